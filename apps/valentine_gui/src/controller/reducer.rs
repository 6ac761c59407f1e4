//! Screen model: the interaction controller plus what the backend has
//! reported so far. UI events fold into it here; egui never mutates it directly.

use std::collections::HashMap;

use shared::{domain::InteractionPhase, error::NotificationError};
use valentine_core::InteractionController;

use crate::{
    backend_bridge::commands::{BackendCommand, MediaSlot},
    controller::events::{UiError, UiErrorContext, UiEvent},
    media::FramePlayback,
};

pub enum MediaState {
    Loading,
    Ready(FramePlayback),
    Failed(String),
}

pub struct ScreenModel {
    interaction: InteractionController,
    media: HashMap<MediaSlot, MediaState>,
    status: Option<String>,
}

impl ScreenModel {
    pub fn new(interaction: InteractionController) -> Self {
        Self {
            interaction,
            media: HashMap::new(),
            status: None,
        }
    }

    pub fn interaction(&self) -> &InteractionController {
        &self.interaction
    }

    pub fn phase(&self) -> InteractionPhase {
        self.interaction.phase()
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn status_mut(&mut self) -> &mut Option<String> {
        &mut self.status
    }

    pub fn media(&self, slot: MediaSlot) -> Option<&MediaState> {
        self.media.get(&slot)
    }

    pub fn media_mut(&mut self, slot: MediaSlot) -> Option<&mut MediaState> {
        self.media.get_mut(&slot)
    }

    pub fn decline(&mut self) {
        self.interaction.register_decline();
    }

    /// The notify command for the first acceptance, `None` afterwards.
    pub fn accept(&mut self) -> Option<BackendCommand> {
        self.interaction
            .register_acceptance()
            .map(|request| BackendCommand::Notify { request })
    }

    /// Marks `slot` as loading and returns the fetch, once per slot.
    pub fn request_media(&mut self, slot: MediaSlot, url: &str) -> Option<BackendCommand> {
        if self.media.contains_key(&slot) {
            return None;
        }
        if url.trim().is_empty() {
            self.media
                .insert(slot, MediaState::Failed("no image configured".to_string()));
            return None;
        }

        self.media.insert(slot, MediaState::Loading);
        Some(BackendCommand::FetchMedia {
            slot,
            url: url.trim().to_string(),
        })
    }

    /// A notify command that never reached the worker settles as a failure.
    pub fn notify_dispatch_failed(&mut self, reason: &str) {
        self.interaction
            .notification_settled(&Err(NotificationError::Transport(reason.to_string())));
    }

    pub fn media_dispatch_failed(&mut self, slot: MediaSlot, reason: &str) {
        self.media
            .insert(slot, MediaState::Failed(reason.to_string()));
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                tracing::debug!("backend: {message}");
            }
            UiEvent::Error(err) => {
                tracing::error!(
                    category = ?err.category(),
                    context = ?err.context(),
                    "{}",
                    err.message()
                );
                self.status = Some(err.summary());
            }
            UiEvent::NotificationSettled(outcome) => {
                self.interaction.notification_settled(&outcome);
            }
            UiEvent::MediaLoaded { slot, media } => {
                tracing::debug!(
                    slot = slot.label(),
                    frames = media.frames.len(),
                    "media ready"
                );
                self.media
                    .insert(slot, MediaState::Ready(FramePlayback::new(media)));
            }
            UiEvent::MediaFailed { slot, reason } => {
                let err = UiError::from_message(UiErrorContext::Media, reason);
                tracing::warn!(
                    slot = slot.label(),
                    category = ?err.category(),
                    "media unavailable: {}",
                    err.message()
                );
                self.media
                    .insert(slot, MediaState::Failed(err.message().to_string()));
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
