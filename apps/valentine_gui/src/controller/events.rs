//! UI/backend events and error modeling for the valentine GUI.

use shared::error::NotificationError;

use crate::{backend_bridge::commands::MediaSlot, media::DecodedMedia};

pub enum UiEvent {
    Info(String),
    Error(UiError),
    NotificationSettled(Result<(), NotificationError>),
    MediaLoaded { slot: MediaSlot, media: DecodedMedia },
    MediaFailed { slot: MediaSlot, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Decode,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    Media,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let message_lower = message.to_ascii_lowercase();
        let category = if message_lower.contains("decode")
            || message_lower.contains("format")
            || message_lower.contains("no frames")
        {
            UiErrorCategory::Decode
        } else if message_lower.contains("invalid")
            || message_lower.contains("missing")
            || message_lower.contains("malformed")
        {
            UiErrorCategory::Validation
        } else if message_lower.contains("timeout")
            || message_lower.contains("timed out")
            || message_lower.contains("connection")
            || message_lower.contains("network")
            || message_lower.contains("dns")
            || message_lower.contains("status")
            || message_lower.contains("disconnect")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn summary(&self) -> String {
        let label = match self.category {
            UiErrorCategory::Transport => "Network",
            UiErrorCategory::Decode => "Image",
            UiErrorCategory::Validation => "Validation",
            UiErrorCategory::Unknown => "Unexpected",
        };
        format!("{label} problem: {}", self.message)
    }
}
