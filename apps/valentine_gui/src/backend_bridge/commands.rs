//! Backend commands queued from UI to backend worker.

use shared::domain::NotificationRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaSlot {
    Asking,
    Celebration,
}

impl MediaSlot {
    pub fn label(self) -> &'static str {
        match self {
            MediaSlot::Asking => "asking",
            MediaSlot::Celebration => "celebration",
        }
    }
}

#[derive(Debug, Clone)]
pub enum BackendCommand {
    Notify { request: NotificationRequest },
    FetchMedia { slot: MediaSlot, url: String },
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Notify { .. } => "notify",
            BackendCommand::FetchMedia { .. } => "fetch_media",
        }
    }
}
