//! Session token issuance and verification.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use vc_shared::config::SessionConfig;

use crate::domain::entities::account::Account;
use crate::domain::entities::session::Claims;
use crate::domain::value_objects::auth_response::AuthResponse;
use crate::errors::{DomainError, DomainResult, TokenError};

/// Service issuing HS256 session tokens for authenticated accounts
pub struct SessionService {
    config: SessionConfig,
}

impl SessionService {
    /// Create a new session service
    pub fn new(config: SessionConfig) -> Self {
        if config.is_using_default_secret() {
            tracing::warn!(
                event = "default_session_secret",
                "Session service is running with the default signing secret"
            );
        }
        Self { config }
    }

    fn audience(&self) -> String {
        self.config
            .audience
            .clone()
            .unwrap_or_else(|| self.config.issuer.clone())
    }

    /// Issue a session token for an authenticated account
    ///
    /// # Returns
    ///
    /// * `Ok(AuthResponse)` - Bearer token and session metadata
    /// * `Err(DomainError::Token(TokenError::GenerationFailed))` - Signing failed
    pub fn issue(&self, account: &Account) -> DomainResult<AuthResponse> {
        let claims = Claims::new_session(
            account.id,
            account.is_verified,
            self.config.token_expiry,
            self.config.issuer.clone(),
            self.audience(),
        );

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!(error = %e, event = "session_encode_failed", "Failed to sign session token");
            DomainError::Token(TokenError::GenerationFailed)
        })?;

        tracing::debug!(
            account_id = %account.id,
            session_id = %claims.jti,
            event = "session_issued",
            "Issued session token"
        );

        Ok(AuthResponse::new(
            token,
            self.config.token_expiry,
            account.id,
            account.is_verified,
        ))
    }

    /// Verify a presented session token and return its claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Valid session
    /// * `Err(DomainError::Token(TokenError::SessionExpired))` - Past expiry
    /// * `Err(DomainError::Token(TokenError::SessionInvalid))` - Any other failure
    pub fn verify(&self, token: &str) -> DomainResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_audience(&[&self.audience()]);
        validation.validate_nbf = true;

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                DomainError::Token(TokenError::SessionExpired)
            }
            _ => DomainError::Token(TokenError::SessionInvalid),
        })?;

        Ok(data.claims)
    }
}
