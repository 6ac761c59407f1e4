//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

/// Returns false when the command could not be queued; `status` says why.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut Option<String>,
) -> bool {
    let cmd_name = cmd.name();

    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui command queue full");
            *status = Some("UI command queue is full".to_string());
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(command = cmd_name, "backend worker disconnected");
            *status = Some("Background worker is not running".to_string());
            false
        }
    }
}
