//! Owner of the interaction state and its two-state machine.
//!
//! `Asking` counts declines; the first acceptance commits `Celebrating` and
//! hands back the single notification the caller has to dispatch. The
//! controller never waits on that notification.

use shared::{
    domain::{InteractionPhase, NotificationRequest},
    error::NotificationError,
};

use crate::presentation::{derive_presentation, Presentation, PresentationTuning};

pub const DEFAULT_NOTIFICATION_MESSAGE: &str = "She said YES!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionState {
    rejection_count: u64,
    accepted: bool,
    notifying: bool,
}

impl InteractionState {
    pub fn rejection_count(&self) -> u64 {
        self.rejection_count
    }

    pub fn accepted(&self) -> bool {
        self.accepted
    }

    pub fn notifying(&self) -> bool {
        self.notifying
    }

    pub fn phase(&self) -> InteractionPhase {
        if self.accepted {
            InteractionPhase::Celebrating
        } else {
            InteractionPhase::Asking
        }
    }
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: InteractionState,
    tuning: PresentationTuning,
    message: String,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(PresentationTuning::default(), DEFAULT_NOTIFICATION_MESSAGE)
    }
}

impl InteractionController {
    pub fn new(tuning: PresentationTuning, message: impl Into<String>) -> Self {
        Self {
            state: InteractionState::default(),
            tuning,
            message: message.into(),
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn phase(&self) -> InteractionPhase {
        self.state.phase()
    }

    pub fn tuning(&self) -> &PresentationTuning {
        &self.tuning
    }

    pub fn presentation(&self) -> Presentation<'_> {
        derive_presentation(&self.tuning, self.state.rejection_count)
    }

    /// Returns `false` once accepted; the counter is frozen from then on.
    pub fn register_decline(&mut self) -> bool {
        if self.state.phase().is_terminal() {
            tracing::debug!("decline ignored after acceptance");
            return false;
        }

        self.state.rejection_count = self.state.rejection_count.saturating_add(1);
        tracing::debug!(
            rejection_count = self.state.rejection_count,
            "decline registered"
        );
        true
    }

    /// Commits the terminal transition and yields the notification to send.
    ///
    /// Only the first call returns `Some`; the caller dispatches it detached
    /// and reports back through [`InteractionController::notification_settled`].
    pub fn register_acceptance(&mut self) -> Option<NotificationRequest> {
        if self.state.accepted {
            tracing::debug!("repeat acceptance ignored");
            return None;
        }

        self.state.accepted = true;
        self.state.notifying = true;
        tracing::info!(
            rejection_count = self.state.rejection_count,
            "acceptance registered"
        );

        Some(NotificationRequest::new(
            self.message.clone(),
            self.state.rejection_count,
        ))
    }

    /// Clears `notifying` whatever the outcome. Failures are only logged.
    pub fn notification_settled(&mut self, outcome: &Result<(), NotificationError>) {
        if !self.state.notifying {
            tracing::debug!("notification settle without an outstanding call ignored");
            return;
        }

        self.state.notifying = false;
        tracing::debug!(delivered = outcome.is_ok(), "notification settled");
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
