//! Token string generation and hashing.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use constant_time_eq::constant_time_eq;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::errors::TokenError;

/// Number of random bytes in a raw token (256 bits of entropy)
pub const TOKEN_BYTES: usize = 32;

/// A freshly generated token: the raw string handed to the user and the
/// hash that goes to storage
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedToken {
    /// URL-safe token string to embed in the verification link
    pub raw: String,
    /// Hex-encoded SHA-256 hash for storage
    pub hash: String,
}

impl std::fmt::Debug for GeneratedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The raw string is a secret; only the storage hash may appear in logs
        f.debug_struct("GeneratedToken")
            .field("raw", &"<redacted>")
            .field("hash", &self.hash)
            .finish()
    }
}

/// Generates unguessable token strings and their storage hashes
///
/// The raw string is URL-safe base64 over 32 bytes from the OS CSPRNG, so it
/// can ride in a URL path segment unescaped. Storage holds only the SHA-256
/// hash: a leaked token table cannot be turned into working links.
pub struct TokenCodec;

impl TokenCodec {
    /// Generate a new random token and its storage hash
    ///
    /// # Returns
    ///
    /// * `Ok(GeneratedToken)` - Raw string and hash pair
    /// * `Err(TokenError::EntropyUnavailable)` - The OS random source failed;
    ///   callers must treat this as fatal rather than fall back to a weaker
    ///   source
    pub fn generate() -> Result<GeneratedToken, TokenError> {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|_| TokenError::EntropyUnavailable)?;

        let raw = URL_SAFE_NO_PAD.encode(bytes);
        let hash = Self::hash(&raw);
        Ok(GeneratedToken { raw, hash })
    }

    /// Hash a raw token string for storage comparison
    ///
    /// Deterministic and pure: the same raw string always yields the same
    /// hex-encoded SHA-256 digest.
    pub fn hash(raw: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(raw.as_bytes());
        format!("{:x}", hasher.finalize())
    }

    /// Verify a presented raw token against a stored hash
    ///
    /// Constant-time over the recomputed digest so the comparison reveals
    /// nothing about how close a guess is.
    pub fn verify(raw: &str, stored_hash: &str) -> bool {
        let computed = Self::hash(raw);
        constant_time_eq(computed.as_bytes(), stored_hash.as_bytes())
    }
}
