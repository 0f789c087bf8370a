mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{FakeService, connected_session};
use escpos_receipt::{
    Error, PrintSession, ReceiptDocument, PrinterProfile, SessionConfig,
    SessionStatus, ServiceStatus, CommandBuffer
};
use pretty_assertions::assert_eq;
use tokio::time::timeout;

fn buffer() -> CommandBuffer {
    let mut document = ReceiptDocument::new();
    document.line("Hello").cut();
    document.compile(&PrinterProfile::default()).unwrap()
}

#[tokio::test]
async fn listing_requires_a_connection() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let session = PrintSession::new(service.clone());
    assert!(matches!(session.list_printers().await, Err(Error::NotConnected)));
    session.start().unwrap();
    assert!(matches!(session.list_printers().await, Err(Error::NotConnected)));
}

#[tokio::test]
async fn printers_are_listed_once_each() {
    let service = FakeService::with_printers(&["Kitchen", "Counter", "Kitchen"]);
    let session = PrintSession::new(service.clone());
    session.start().unwrap();
    session.on_status_changed(ServiceStatus::Open).unwrap();

    let printers = session.list_printers().await.unwrap();
    assert_eq!(vec!["Kitchen".to_string(), "Counter".to_string()], printers);
    assert_eq!(printers, session.known_printers());
    assert_eq!(Some("Kitchen".to_string()), session.default_printer());
    // The default printer is only a suggestion
    assert_eq!(None, session.selected_printer());
}

#[tokio::test]
async fn unknown_printers_cannot_be_selected() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let session = connected_session(&service, "Kitchen").await;
    match session.select("Bar") {
        Err(Error::UnknownPrinter(name)) => assert_eq!("Bar", name),
        other => panic!("unexpected {:?}", other)
    }
    assert_eq!(Some("Kitchen".to_string()), session.selected_printer());
}

#[tokio::test]
async fn relisting_drops_a_vanished_selection() {
    let service = FakeService::with_printers(&["Kitchen", "Counter"]);
    let session = connected_session(&service, "Counter").await;
    service.set_printers(&["Kitchen"]);
    session.list_printers().await.unwrap();
    assert_eq!(None, session.selected_printer());
}

#[tokio::test]
async fn dispatch_reaches_the_selected_printer() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let session = connected_session(&service, "Kitchen").await;
    let buffer = buffer();
    session.dispatch(buffer.clone()).await.unwrap();

    let sent = service.sent.lock().clone();
    assert_eq!(vec![("Kitchen".to_string(), buffer.as_bytes().to_vec())], sent);
}

#[tokio::test]
async fn dispatch_without_selection_fails() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let session = PrintSession::new(service.clone());
    assert!(matches!(session.dispatch(buffer()).await, Err(Error::NotConnected)));
    session.start().unwrap();
    session.on_status_changed(ServiceStatus::Open).unwrap();
    session.list_printers().await.unwrap();
    assert!(matches!(session.dispatch(buffer()).await, Err(Error::NoPrinterSelected)));
}

#[tokio::test]
async fn disconnection_forgets_the_selection() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let session = connected_session(&service, "Kitchen").await;
    session.dispatch(buffer()).await.unwrap();

    session.on_status_changed(ServiceStatus::Closed).unwrap();
    assert_eq!(None, session.selected_printer());
    assert!(session.known_printers().is_empty());

    // Back online, but nothing is selected anymore
    session.on_status_changed(ServiceStatus::Open).unwrap();
    assert_eq!(SessionStatus::Connected, session.status());
    assert!(matches!(session.dispatch(buffer()).await, Err(Error::NoPrinterSelected)));
}

#[tokio::test]
async fn closed_connections_are_reopened_once() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let session = connected_session(&service, "Kitchen").await;
    assert_eq!(1, service.connects());

    session.on_status_changed(ServiceStatus::Closed).unwrap();
    assert_eq!(SessionStatus::Connecting, session.status());
    assert_eq!(2, service.connects());

    // Still connecting, a second close gives up
    session.on_status_changed(ServiceStatus::Closed).unwrap();
    assert_eq!(SessionStatus::Disconnected, session.status());
    assert_eq!(2, service.connects());
}

#[tokio::test]
async fn without_auto_reconnect_a_close_disconnects() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let config = SessionConfig {
        auto_reconnect: false
    };
    let session = PrintSession::with_config(service.clone(), config);
    session.start().unwrap();
    session.on_status_changed(ServiceStatus::Open).unwrap();
    session.on_status_changed(ServiceStatus::Closed).unwrap();
    assert_eq!(SessionStatus::Disconnected, session.status());
    assert_eq!(1, service.connects());
}

#[tokio::test]
async fn second_dispatch_is_refused_while_one_is_pending() {
    let service = FakeService::with_printers(&["Kitchen"]);
    service.hold_sends.store(true, Ordering::SeqCst);
    let session = connected_session(&service, "Kitchen").await;

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.dispatch(buffer()).await })
    };
    service.send_started.notified().await;

    assert!(matches!(session.dispatch(buffer()).await, Err(Error::DispatchInProgress)));

    service.release.notify_one();
    timeout(Duration::from_secs(5), pending).await.unwrap().unwrap().unwrap();
    // The slot is free again
    service.hold_sends.store(false, Ordering::SeqCst);
    session.dispatch(buffer()).await.unwrap();
    assert_eq!(2, service.sent.lock().len());
}

#[tokio::test]
async fn losing_the_connection_fails_the_pending_dispatch() {
    let service = FakeService::with_printers(&["Kitchen"]);
    service.hold_sends.store(true, Ordering::SeqCst);
    let session = connected_session(&service, "Kitchen").await;

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.dispatch(buffer()).await })
    };
    service.send_started.notified().await;
    session.on_status_changed(ServiceStatus::Closed).unwrap();

    let result = timeout(Duration::from_secs(5), pending).await.unwrap().unwrap();
    assert!(matches!(result, Err(Error::TransmissionFailed(_))));
    assert!(service.sent.lock().is_empty());
}

#[tokio::test]
async fn blocked_fails_the_pending_dispatch() {
    let service = FakeService::with_printers(&["Kitchen"]);
    service.hold_sends.store(true, Ordering::SeqCst);
    let session = connected_session(&service, "Kitchen").await;

    let pending = {
        let session = session.clone();
        tokio::spawn(async move { session.dispatch(buffer()).await })
    };
    service.send_started.notified().await;
    session.on_status_changed(ServiceStatus::Blocked).unwrap();

    let result = timeout(Duration::from_secs(5), pending).await.unwrap().unwrap();
    assert!(matches!(result, Err(Error::TransmissionFailed(_))));
    assert_eq!(SessionStatus::Blocked, session.status());
    // Blocked is not retried
    assert_eq!(1, service.connects());
}

#[tokio::test]
async fn service_failures_become_transmission_failures() {
    let service = FakeService::with_printers(&["Kitchen"]);
    service.fail_sends.store(true, Ordering::SeqCst);
    let session = connected_session(&service, "Kitchen").await;
    match session.dispatch(buffer()).await {
        Err(Error::TransmissionFailed(reason)) => assert!(reason.contains("paper out")),
        other => panic!("unexpected {:?}", other)
    }
}

#[tokio::test]
async fn dropped_dispatch_frees_the_slot() {
    let service = FakeService::with_printers(&["Kitchen"]);
    service.hold_sends.store(true, Ordering::SeqCst);
    let session = connected_session(&service, "Kitchen").await;

    // Gives up long before the service answers
    let abandoned = timeout(Duration::from_millis(50), session.dispatch(buffer())).await;
    assert!(abandoned.is_err());

    service.hold_sends.store(false, Ordering::SeqCst);
    session.dispatch(buffer()).await.unwrap();
}

#[tokio::test]
async fn stop_forgets_everything() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let session = connected_session(&service, "Kitchen").await;
    session.stop().unwrap();
    assert_eq!(SessionStatus::Disconnected, session.status());
    assert!(session.known_printers().is_empty());
    assert_eq!(1, service.disconnects.load(Ordering::SeqCst));
    assert!(matches!(session.select("Kitchen"), Err(Error::UnknownPrinter(_))));
}

#[tokio::test]
async fn closed_session_refuses_everything() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let session = connected_session(&service, "Kitchen").await;
    session.shutdown();

    assert_eq!(1, service.disconnects.load(Ordering::SeqCst));
    assert!(matches!(session.start(), Err(Error::SessionClosed)));
    assert!(matches!(session.on_status_changed(ServiceStatus::Open), Err(Error::SessionClosed)));
    assert!(matches!(session.list_printers().await, Err(Error::SessionClosed)));
    assert!(matches!(session.dispatch(buffer()).await, Err(Error::SessionClosed)));
    assert!(matches!(session.stop(), Err(Error::SessionClosed)));
}

#[tokio::test]
async fn notifications_raised_while_applying_are_not_lost() {
    let service = FakeService::with_printers(&["Kitchen"]);
    service.open_on_connect.store(true, Ordering::SeqCst);
    let session = Arc::new(PrintSession::new(service.clone()));
    service.attach(&session);

    // Open arrives from inside connect
    session.start().unwrap();
    assert_eq!(SessionStatus::Connected, session.status());

    // The reconnection happens while Closed is being applied, its Open waits in line
    session.on_status_changed(ServiceStatus::Closed).unwrap();
    assert_eq!(SessionStatus::Connected, session.status());
    assert_eq!(2, service.connects());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn notifications_from_many_threads_are_all_applied() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let config = SessionConfig {
        auto_reconnect: false
    };
    let session = Arc::new(PrintSession::with_config(service.clone(), config));
    session.start().unwrap();

    let handles: Vec<_> = (0..8).map(|_| {
        let session = session.clone();
        std::thread::spawn(move || session.on_status_changed(ServiceStatus::Open))
    }).collect();
    for handle in handles {
        handle.join().unwrap().unwrap();
    }
    assert_eq!(SessionStatus::Connected, session.status());

    // Blocked wins regardless of what follows
    session.on_status_changed(ServiceStatus::Blocked).unwrap();
    session.on_status_changed(ServiceStatus::Open).unwrap();
    assert_eq!(SessionStatus::Blocked, session.status());
}

#[tokio::test]
async fn subscribers_follow_the_status() {
    let service = FakeService::with_printers(&["Kitchen"]);
    let session = PrintSession::new(service.clone());
    let mut receiver = session.subscribe();
    session.start().unwrap();
    assert!(receiver.has_changed().unwrap());
    assert_eq!(SessionStatus::Connecting, *receiver.borrow_and_update());
    session.on_status_changed(ServiceStatus::Open).unwrap();
    assert_eq!(SessionStatus::Connected, *receiver.borrow_and_update());
}
