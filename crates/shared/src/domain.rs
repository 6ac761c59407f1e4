use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionPhase {
    Asking,
    Celebrating,
}

impl InteractionPhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, InteractionPhase::Celebrating)
    }
}

/// One outbound "they said yes" notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub message: String,
    pub rejection_count: u64,
    pub accepted_at: DateTime<Utc>,
}

impl NotificationRequest {
    pub fn new(message: impl Into<String>, rejection_count: u64) -> Self {
        Self {
            message: message.into(),
            rejection_count,
            accepted_at: Utc::now(),
        }
    }
}
