use std::sync::Arc;

use async_trait::async_trait;
use shared::{domain::NotificationRequest, error::NotificationError};

/// One-shot outbound message delivery invoked on acceptance.
#[async_trait]
pub trait NotificationCollaborator: Send + Sync {
    async fn send(&self, request: &NotificationRequest) -> Result<(), NotificationError>;

    fn name(&self) -> &'static str;
}

/// Stand-in used when no delivery credentials are configured.
pub struct DisabledNotifier;

#[async_trait]
impl NotificationCollaborator for DisabledNotifier {
    async fn send(&self, _request: &NotificationRequest) -> Result<(), NotificationError> {
        Err(NotificationError::NotConfigured)
    }

    fn name(&self) -> &'static str {
        "disabled"
    }
}

pub async fn deliver(
    collaborator: &dyn NotificationCollaborator,
    request: &NotificationRequest,
) -> Result<(), NotificationError> {
    let outcome = collaborator.send(request).await;
    match &outcome {
        Ok(()) => tracing::info!(
            collaborator = collaborator.name(),
            rejection_count = request.rejection_count,
            "notification delivered"
        ),
        Err(err) => tracing::warn!(
            collaborator = collaborator.name(),
            rejection_count = request.rejection_count,
            transient = err.is_transient(),
            "notification delivery failed: {err}"
        ),
    }
    outcome
}

/// Fire-and-forget dispatch of the acceptance notification.
///
/// The task is detached: its `JoinHandle` is dropped here and the outcome
/// only reaches `on_settled`. If the receiver behind `on_settled` is gone by
/// then, the result is simply lost. There is no retry and no cancellation.
pub fn spawn_notification<F>(
    handle: &tokio::runtime::Handle,
    collaborator: Arc<dyn NotificationCollaborator>,
    request: NotificationRequest,
    on_settled: F,
) where
    F: FnOnce(Result<(), NotificationError>) + Send + 'static,
{
    drop(handle.spawn(async move {
        let outcome = deliver(collaborator.as_ref(), &request).await;
        on_settled(outcome);
    }));
}

#[cfg(test)]
#[path = "tests/notifier_tests.rs"]
mod tests;
