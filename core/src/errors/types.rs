//! Domain-specific error types for account and token operations
//!
//! Error messages here are the internal forms. Transport adapters serialize
//! them through `ErrorResponse`, and the token-validation variants that would
//! leak token state are collapsed to a single uniform error before they reach
//! any caller.

use thiserror::Error;
use vc_shared::types::response::ErrorResponse;

/// Authentication and account errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email address already registered")]
    DuplicateEmail,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account disabled")]
    AccountDisabled,

    #[error("Email verification required")]
    VerificationRequired,

    #[error("Too many requests. Please try again in {seconds} seconds")]
    RateLimitExceeded { seconds: i64 },
}

/// Verification and session token errors
///
/// `NotFound`, `Expired`, `AlreadyConsumed`, and `PurposeMismatch` are
/// internal outcomes used for logging and repository contracts only. The
/// orchestration layer collapses all of them to `InvalidOrExpired` so a
/// caller cannot probe which tokens exist.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid or expired verification link")]
    InvalidOrExpired,

    #[error("Token not found")]
    NotFound,

    #[error("Token expired")]
    Expired,

    #[error("Token already consumed")]
    AlreadyConsumed,

    #[error("Token purpose mismatch")]
    PurposeMismatch,

    #[error("Entropy source unavailable")]
    EntropyUnavailable,

    #[error("Session token generation failed")]
    GenerationFailed,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid session token")]
    SessionInvalid,
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Credential length must be between {min} and {max} characters")]
    InvalidCredentialLength { min: usize, max: usize },

    #[error("Required field: {field}")]
    RequiredField { field: String },
}

/// Notification delivery errors reported by the gateway
///
/// Delivery failure is non-fatal to the calling flow: the state transition
/// has already happened by the time the gateway is invoked.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotificationError {
    #[error("Delivery failed: {reason}")]
    DeliveryFailed { reason: String },
}

/// Convert AuthError to ErrorResponse
impl From<AuthError> for ErrorResponse {
    fn from(err: AuthError) -> Self {
        let error_code = match &err {
            AuthError::DuplicateEmail => "DUPLICATE_EMAIL",
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AccountDisabled => "ACCOUNT_DISABLED",
            AuthError::VerificationRequired => "VERIFICATION_REQUIRED",
            AuthError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert TokenError to ErrorResponse
///
/// Every token-state variant maps to the same code and message: the internal
/// distinction is for logs and metrics, never for callers.
impl From<TokenError> for ErrorResponse {
    fn from(err: TokenError) -> Self {
        let error_code = match &err {
            TokenError::InvalidOrExpired
            | TokenError::NotFound
            | TokenError::Expired
            | TokenError::AlreadyConsumed
            | TokenError::PurposeMismatch => {
                return ErrorResponse::new(
                    "TOKEN_INVALID_OR_EXPIRED",
                    TokenError::InvalidOrExpired.to_string(),
                );
            }
            TokenError::EntropyUnavailable => "ENTROPY_UNAVAILABLE",
            TokenError::GenerationFailed => "TOKEN_GENERATION_FAILED",
            TokenError::SessionExpired => "SESSION_EXPIRED",
            TokenError::SessionInvalid => "SESSION_INVALID",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

/// Convert ValidationError to ErrorResponse
impl From<ValidationError> for ErrorResponse {
    fn from(err: ValidationError) -> Self {
        let error_code = match &err {
            ValidationError::InvalidEmail => "INVALID_EMAIL",
            ValidationError::InvalidCredentialLength { .. } => "INVALID_CREDENTIAL_LENGTH",
            ValidationError::RequiredField { .. } => "REQUIRED_FIELD",
        };

        ErrorResponse::new(error_code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_conversion() {
        let error = AuthError::RateLimitExceeded { seconds: 42 };
        let response: ErrorResponse = error.into();
        assert_eq!(response.error, "RATE_LIMIT_EXCEEDED");
        assert!(response.message.contains("42 seconds"));
    }

    #[test]
    fn test_token_state_errors_collapse_to_one_code() {
        for err in [
            TokenError::InvalidOrExpired,
            TokenError::NotFound,
            TokenError::Expired,
            TokenError::AlreadyConsumed,
            TokenError::PurposeMismatch,
        ] {
            let response: ErrorResponse = err.into();
            assert_eq!(response.error, "TOKEN_INVALID_OR_EXPIRED");
            assert_eq!(response.message, "Invalid or expired verification link");
        }
    }

    #[test]
    fn test_entropy_error_is_distinct() {
        let response: ErrorResponse = TokenError::EntropyUnavailable.into();
        assert_eq!(response.error, "ENTROPY_UNAVAILABLE");
    }

    #[test]
    fn test_validation_error_conversion() {
        let error = ValidationError::InvalidCredentialLength { min: 8, max: 72 };
        let response: ErrorResponse = error.into();
        assert_eq!(response.error, "INVALID_CREDENTIAL_LENGTH");
        assert!(response.message.contains("8"));
    }
}
