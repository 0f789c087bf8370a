use std::sync::Arc;

use async_trait::async_trait;
use escpos_receipt::{
    CommandBuffer, Error, PrintService, PrintSession, PrinterProfile, ReceiptDocument,
    ServiceError, ServiceStatus, TestPage
};

/// Pretends to be the print daemon, and prints what it would send
struct ConsoleService;

#[async_trait]
impl PrintService for ConsoleService {
    fn connect(&self) -> Result<(), ServiceError> {
        println!("connecting...");
        Ok(())
    }

    fn disconnect(&self) {
        println!("disconnected");
    }

    async fn printers(&self) -> Result<Vec<String>, ServiceError> {
        Ok(vec!["POS-58".to_string(), "Kitchen".to_string()])
    }

    async fn send(&self, printer: &str, buffer: &CommandBuffer) -> Result<(), ServiceError> {
        println!("{} bytes sent to {}", buffer.len(), printer);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let session = PrintSession::new(Arc::new(ConsoleService));
    session.start()?;
    // A real daemon reports this on its own
    session.on_status_changed(ServiceStatus::Open)?;

    let printers = session.list_printers().await?;
    println!("installed printers: {:?}", printers);
    if let Some(printer) = session.default_printer() {
        session.select(printer)?;
    }

    let test_page = TestPage {
        details: vec![
            "Device: USB Thermal Printer".to_string(),
            "Driver: Zadig".to_string()
        ],
        qr_data: Some("https://github.com".to_string()),
        qr_caption: Some("Scan me".to_string()),
        ..Default::default()
    };
    let mut document = ReceiptDocument::new();
    document.render_test_page(&test_page)?;

    session.dispatch(document.compile(&PrinterProfile::default())?).await?;
    session.shutdown();
    Ok(())
}
