//! Business services containing domain logic and use cases.

pub mod account;
pub mod auth;
pub mod notification;
pub mod session;
pub mod token;

// Re-export commonly used types
pub use account::{AccountService, AccountServiceConfig};
pub use auth::{AuthFlowConfig, AuthService, RegisterResult};
pub use notification::{DeliveryReceipt, NotificationGateway, VerificationMessage};
pub use session::SessionService;
pub use token::{
    GeneratedToken, IssuedToken, TokenCleanupConfig, TokenCleanupService, TokenCodec,
    TokenService, TokenServiceConfig,
};
