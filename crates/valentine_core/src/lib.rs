//! Interaction state, derived presentation values and the notification seam
//! for the valentine toy. Nothing in here renders; the GUI reads from it.

pub mod config;
pub mod controller;
pub mod notifier;
pub mod presentation;

pub use config::{load_settings, Settings};
pub use controller::{InteractionController, InteractionState};
pub use notifier::{deliver, spawn_notification, DisabledNotifier, NotificationCollaborator};
pub use presentation::{derive_presentation, Presentation, PresentationTuning};
pub use shared::domain::{InteractionPhase, NotificationRequest};
pub use shared::error::{ConfigError, NotificationError};
