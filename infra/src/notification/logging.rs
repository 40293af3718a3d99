//! Logging notification gateway
//!
//! Development and operations implementation: emits a structured tracing
//! event per message and keeps a bounded in-memory journal that tooling can
//! read back (a dev panel, a smoke test). Raw token strings never reach the
//! log stream; they stay inside the journal entries only.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use vc_core::errors::NotificationError;
use vc_core::services::notification::{DeliveryReceipt, NotificationGateway, VerificationMessage};

/// Default number of journal entries retained
const DEFAULT_JOURNAL_CAPACITY: usize = 100;

/// Notification gateway that logs and journals instead of delivering
#[derive(Clone)]
pub struct LoggingNotificationGateway {
    /// Recent messages, oldest first, bounded by `capacity`
    journal: Arc<RwLock<VecDeque<VerificationMessage>>>,
    /// Journal capacity
    capacity: usize,
    /// Counter of accepted messages
    accepted: Arc<AtomicU64>,
    /// Whether to simulate delivery failures (for testing)
    simulate_failure: bool,
}

impl LoggingNotificationGateway {
    /// Create a new logging gateway with the default journal capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_JOURNAL_CAPACITY)
    }

    /// Create a gateway with a specific journal capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            journal: Arc::new(RwLock::new(VecDeque::new())),
            capacity,
            accepted: Arc::new(AtomicU64::new(0)),
            simulate_failure: false,
        }
    }

    /// Create a gateway that rejects every message
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::new()
        }
    }

    /// Number of messages accepted so far
    pub fn accepted_count(&self) -> u64 {
        self.accepted.load(Ordering::SeqCst)
    }

    /// Snapshot of the journal, oldest first
    pub async fn journal(&self) -> Vec<VerificationMessage> {
        self.journal.read().await.iter().cloned().collect()
    }
}

impl Default for LoggingNotificationGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationGateway for LoggingNotificationGateway {
    async fn send(
        &self,
        message: VerificationMessage,
    ) -> Result<DeliveryReceipt, NotificationError> {
        if self.simulate_failure {
            warn!(
                recipient = %message.recipient,
                purpose = %message.purpose,
                event = "notification_simulated_failure",
                "Logging gateway simulating delivery failure"
            );
            return Err(NotificationError::DeliveryFailed {
                reason: "simulated delivery failure".to_string(),
            });
        }

        let message_id = format!("log_{}", Uuid::new_v4());

        // The raw token stays out of the log stream
        info!(
            recipient = %message.recipient,
            purpose = %message.purpose,
            account_id = %message.account_id,
            message_id = %message_id,
            event = "notification_journaled",
            "Journaled notification message"
        );

        let mut journal = self.journal.write().await;
        if journal.len() == self.capacity {
            journal.pop_front();
        }
        journal.push_back(message);

        self.accepted.fetch_add(1, Ordering::SeqCst);

        Ok(DeliveryReceipt {
            message_id,
            accepted_at: Utc::now(),
        })
    }
}
