//! Repository interfaces for domain persistence.

pub mod account;
pub mod token;

pub use account::AccountRepository;
pub use token::TokenRepository;

#[cfg(test)]
pub use account::MockAccountRepository;
#[cfg(test)]
pub use token::MockTokenRepository;
