//! Notification gateway implementations.
//!
//! Message delivery itself is an external collaborator; the implementations
//! here record and surface messages without carrying an SMTP transport.

pub mod logging;

pub use logging::LoggingNotificationGateway;
