//! Headless run of the interaction controller, one printed line per step.

use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use shared::{domain::NotificationRequest, error::NotificationError};
use valentine_core::{spawn_notification, InteractionController, NotificationCollaborator};

/// In-process collaborator that succeeds or fails on demand.
pub struct SimulatedNotifier {
    fail: bool,
}

impl SimulatedNotifier {
    pub fn new(fail: bool) -> Self {
        Self { fail }
    }
}

#[async_trait]
impl NotificationCollaborator for SimulatedNotifier {
    async fn send(&self, _request: &NotificationRequest) -> Result<(), NotificationError> {
        if self.fail {
            Err(NotificationError::Transport("simulated failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn name(&self) -> &'static str {
        "simulated"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    pub declines: u64,
    pub accept: bool,
    pub fail_notification: bool,
}

pub async fn run(
    mut controller: InteractionController,
    scenario: Scenario,
) -> anyhow::Result<Vec<String>> {
    let mut lines = vec![step_line(&controller)];
    for _ in 0..scenario.declines {
        controller.register_decline();
        lines.push(step_line(&controller));
    }

    if scenario.accept {
        if let Some(request) = controller.register_acceptance() {
            tracing::info!(
                rejection_count = request.rejection_count,
                fail_notification = scenario.fail_notification,
                "simulated acceptance; dispatching notification"
            );
            lines.push(format!(
                "accepted: phase={:?} notifying={}",
                controller.phase(),
                controller.state().notifying()
            ));

            let (tx, rx) = tokio::sync::oneshot::channel();
            spawn_notification(
                &tokio::runtime::Handle::current(),
                Arc::new(SimulatedNotifier::new(scenario.fail_notification)),
                request,
                move |outcome| {
                    let _ = tx.send(outcome);
                },
            );
            let outcome = rx.await.context("notification task dropped its outcome")?;
            lines.push(match &outcome {
                Ok(()) => "notification: delivered".to_string(),
                Err(err) => format!("notification: failed ({err})"),
            });
            controller.notification_settled(&outcome);
        }
    }

    let state = controller.state();
    lines.push(format!(
        "final: phase={:?} rejection_count={} accepted={} notifying={}",
        state.phase(),
        state.rejection_count(),
        state.accepted(),
        state.notifying()
    ));
    Ok(lines)
}

fn step_line(controller: &InteractionController) -> String {
    let presentation = controller.presentation();
    format!(
        "declines={:>3} scale={:.2} emphasis={:.2} hint={} phrase={:?}",
        controller.state().rejection_count(),
        presentation.scale,
        presentation.emphasis,
        presentation.show_hint,
        presentation.decline_phrase
    )
}
