#![allow(dead_code)]

use std::sync::{Arc, Weak};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use escpos_receipt::{
    CommandBuffer, OrderPayload, LineItem, PrintService, PrintSession,
    ServiceError, ServiceStatus
};
use parking_lot::Mutex;
use tokio::sync::Notify;

/// In memory print service
#[derive(Default)]
pub struct FakeService {
    pub connects: AtomicUsize,
    pub disconnects: AtomicUsize,
    printers: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<(String, Vec<u8>)>>,
    /// Sends wait for `release` when set
    pub hold_sends: AtomicBool,
    pub fail_sends: AtomicBool,
    pub release: Notify,
    pub send_started: Notify,
    /// Reports the connection as open from inside `connect`
    pub open_on_connect: AtomicBool,
    session: Mutex<Option<Weak<PrintSession>>>
}

impl FakeService {
    pub fn with_printers(printers: &[&str]) -> Arc<FakeService> {
        let service = FakeService::default();
        service.set_printers(printers);
        Arc::new(service)
    }

    pub fn set_printers(&self, printers: &[&str]) {
        *self.printers.lock() = printers.iter().map(|printer| printer.to_string()).collect();
    }

    pub fn attach(&self, session: &Arc<PrintSession>) {
        *self.session.lock() = Some(Arc::downgrade(session));
    }

    pub fn connects(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PrintService for FakeService {
    fn connect(&self) -> Result<(), ServiceError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.open_on_connect.load(Ordering::SeqCst) {
            let session = self.session.lock().as_ref().and_then(Weak::upgrade);
            if let Some(session) = session {
                session.on_status_changed(ServiceStatus::Open)
                    .map_err(|e| ServiceError::Rejected(e.to_string()))?;
            }
        }
        Ok(())
    }

    fn disconnect(&self) {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
    }

    async fn printers(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.printers.lock().clone())
    }

    async fn send(&self, printer: &str, buffer: &CommandBuffer) -> Result<(), ServiceError> {
        self.send_started.notify_one();
        if self.hold_sends.load(Ordering::SeqCst) {
            self.release.notified().await;
        }
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ServiceError::Rejected("paper out".to_string()));
        }
        self.sent.lock().push((printer.to_string(), buffer.as_bytes().to_vec()));
        Ok(())
    }
}

/// Session connected to `service`, with `printer` selected
pub async fn connected_session(service: &Arc<FakeService>, printer: &str) -> Arc<PrintSession> {
    let session = Arc::new(PrintSession::new(service.clone()));
    session.start().unwrap();
    session.on_status_changed(ServiceStatus::Open).unwrap();
    session.list_printers().await.unwrap();
    session.select(printer).unwrap();
    session
}

/// Order used by the ordering front end as its sample
pub fn sample_order() -> OrderPayload {
    OrderPayload {
        order_no: "12345".to_string(),
        order_id: "ORD-987654".to_string(),
        timestamp: "31/03/2025 14:30".to_string(),
        customer: "John Doe".to_string(),
        phone: Some("+91 9876543210".to_string()),
        payment: Some("Online Payment".to_string()),
        items: vec![
            LineItem::new("Paneer Tikka", 2, 180.0),
            LineItem::new("Butter Naan", 4, 40.0),
            LineItem::new("Dal Makhani", 1, 150.0)
        ],
        subtotal: 670.0,
        tax: 33.5,
        total: 703.5
    }
}
