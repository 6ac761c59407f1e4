//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender};
use reqwest::Client as HttpClient;
use valentine_core::{spawn_notification, NotificationCollaborator};

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::events::{UiError, UiErrorContext, UiEvent},
    media::{decode_media, DecodedMedia},
};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    collaborator: Arc<dyn NotificationCollaborator>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("valentine-backend".to_string())
        .spawn(move || run_backend(cmd_rx, ui_tx, collaborator))
}

fn run_backend(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    collaborator: Arc<dyn NotificationCollaborator>,
) {
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            tracing::error!("failed to build backend runtime: {err}");
            return;
        }
    };

    let http = HttpClient::new();
    let _ = ui_tx.try_send(UiEvent::Info(format!(
        "backend worker ready (notifier: {})",
        collaborator.name()
    )));

    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            BackendCommand::Notify { request } => {
                let ui_tx = ui_tx.clone();
                spawn_notification(
                    runtime.handle(),
                    Arc::clone(&collaborator),
                    request,
                    move |outcome| {
                        // Blocks until the UI drains a slot; fails only once the UI is gone.
                        if ui_tx.send(UiEvent::NotificationSettled(outcome)).is_err() {
                            tracing::debug!("ui gone before notification settled");
                        }
                    },
                );
            }
            BackendCommand::FetchMedia { slot, url } => {
                let ui_tx = ui_tx.clone();
                let http = http.clone();
                runtime.spawn(async move {
                    let event = match fetch_media(&http, &url).await {
                        Ok(media) => UiEvent::MediaLoaded { slot, media },
                        Err(reason) => UiEvent::MediaFailed { slot, reason },
                    };
                    let _ = ui_tx.try_send(event);
                });
            }
        }
    }

    tracing::debug!("ui command channel closed; backend worker exiting");
}

async fn fetch_media(http: &HttpClient, url: &str) -> Result<DecodedMedia, String> {
    let bytes = http
        .get(url)
        .send()
        .await
        .map_err(|err| format!("failed to fetch image: {err}"))?
        .error_for_status()
        .map_err(|err| format!("image host returned error status: {err}"))?
        .bytes()
        .await
        .map_err(|err| format!("failed to read image body: {err}"))?;

    tokio::task::spawn_blocking(move || decode_media(&bytes))
        .await
        .map_err(|err| format!("image decode task failed: {err}"))?
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
