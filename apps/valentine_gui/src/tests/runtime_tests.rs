use super::*;
use crate::backend_bridge::commands::MediaSlot;
use crossbeam_channel::bounded;
use shared::{domain::NotificationRequest, error::NotificationError};
use std::time::Duration;
use valentine_core::DisabledNotifier;

fn next_non_info(ui_rx: &Receiver<UiEvent>) -> UiEvent {
    loop {
        match ui_rx.recv_timeout(Duration::from_secs(5)) {
            Ok(UiEvent::Info(_)) => continue,
            Ok(event) => return event,
            Err(err) => panic!("no event from backend: {err}"),
        }
    }
}

#[test]
fn notify_command_settles_back_to_the_ui() {
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(8);
    let worker = launch(cmd_rx, ui_tx, Arc::new(DisabledNotifier)).expect("spawn worker");

    cmd_tx
        .send(BackendCommand::Notify {
            request: NotificationRequest::new("She said YES!", 5),
        })
        .expect("queue notify");

    match next_non_info(&ui_rx) {
        UiEvent::NotificationSettled(outcome) => {
            assert_eq!(outcome, Err(NotificationError::NotConfigured));
        }
        _ => panic!("expected a settled notification"),
    }

    drop(cmd_tx);
    worker.join().expect("worker exits once the ui side hangs up");
}

#[test]
fn unreachable_media_reports_failure_for_its_slot() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(8);
    let worker = launch(cmd_rx, ui_tx, Arc::new(DisabledNotifier)).expect("spawn worker");

    cmd_tx
        .send(BackendCommand::FetchMedia {
            slot: MediaSlot::Celebration,
            url: format!("http://{addr}/happy.gif"),
        })
        .expect("queue fetch");

    match next_non_info(&ui_rx) {
        UiEvent::MediaFailed { slot, reason } => {
            assert_eq!(slot, MediaSlot::Celebration);
            assert!(reason.contains("failed to fetch image"));
        }
        _ => panic!("expected a media failure"),
    }

    drop(cmd_tx);
    worker.join().expect("worker exits");
}

#[test]
fn settled_notification_waits_for_a_full_ui_queue() {
    // Capacity one: the ready message fills the queue before the settle arrives.
    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(8);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(1);
    let worker = launch(cmd_rx, ui_tx, Arc::new(DisabledNotifier)).expect("spawn worker");

    cmd_tx
        .send(BackendCommand::Notify {
            request: NotificationRequest::new("She said YES!", 0),
        })
        .expect("queue notify");
    std::thread::sleep(Duration::from_millis(300));

    match ui_rx.recv_timeout(Duration::from_secs(5)) {
        Ok(UiEvent::Info(_)) => {}
        _ => panic!("expected the ready message first"),
    }
    match ui_rx.recv_timeout(Duration::from_secs(5)) {
        Ok(UiEvent::NotificationSettled(outcome)) => {
            assert_eq!(outcome, Err(NotificationError::NotConfigured));
        }
        _ => panic!("settle event was dropped"),
    }

    drop(cmd_tx);
    worker.join().expect("worker exits");
}
