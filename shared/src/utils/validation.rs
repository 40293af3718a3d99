//! Email and credential validation utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic email shape check: local part, one '@', dotted domain.
// Full RFC 5321 validation is the mail system's problem, not ours.
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}$").unwrap()
});

/// Maximum accepted email length (SMTP path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Normalize an email address for storage and lookup
///
/// Addresses are matched case-insensitively, so the canonical stored form
/// is trimmed and lowercased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address has a valid shape
pub fn is_valid_email(email: &str) -> bool {
    let normalized = normalize_email(email);
    normalized.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(&normalized)
}

/// Mask an email address for logging (e.g., al***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let visible = local.chars().take(2).collect::<String>();
            format!("{}***@{}", visible, domain)
        }
        _ => "***".to_string(),
    }
}

/// Check if a credential length is within the accepted bounds
pub fn is_valid_credential_length(credential: &str, min: usize, max: usize) -> bool {
    let len = credential.len();
    len >= min && len <= max
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Alice@Example.COM "), "alice@example.com");
        assert_eq!(normalize_email("bob@x.io"), "bob@x.io");
    }

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+tag@sub.example.org"));
        assert!(is_valid_email("Upper@Example.Com"));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("missing@tld"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_length_limit() {
        let local = "a".repeat(MAX_EMAIL_LENGTH);
        assert!(!is_valid_email(&format!("{}@example.com", local)));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("alice@example.com"), "al***@example.com");
        assert_eq!(mask_email("b@x.io"), "b***@x.io");
        assert_eq!(mask_email("not-an-email"), "***");
    }

    #[test]
    fn test_credential_length() {
        assert!(is_valid_credential_length("secret12", 8, 72));
        assert!(!is_valid_credential_length("short", 8, 72));
        assert!(!is_valid_credential_length(&"x".repeat(73), 8, 72));
    }
}
