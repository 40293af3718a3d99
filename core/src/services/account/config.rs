//! Configuration for the account service

use vc_shared::config::CredentialConfig;

/// Configuration for the account service
#[derive(Debug, Clone)]
pub struct AccountServiceConfig {
    /// Credential hashing and length policy
    pub credentials: CredentialConfig,

    /// Whether new accounts start active or pending verification
    pub activate_on_register: bool,

    /// Whether login requires a verified email address
    ///
    /// The default keeps unverified logins allowed; deployments that gate
    /// privileged panels on verification can flip this instead.
    pub require_verified_login: bool,
}

impl Default for AccountServiceConfig {
    fn default() -> Self {
        Self {
            credentials: CredentialConfig::default(),
            activate_on_register: true,
            require_verified_login: false,
        }
    }
}
