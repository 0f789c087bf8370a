use async_trait::async_trait;
use thiserror::Error;

use crate::CommandBuffer;

/// Failures reported by a [PrintService](crate::PrintService)
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("The print service is unavailable: {0}")]
    Unavailable(String),
    #[error("The print service rejected the request: {0}")]
    Rejected(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error)
}

/// Local daemon that brokers access to the installed printers
///
/// Connection changes are not returned by these methods. The implementation reports them through [PrintSession::on_status_changed](crate::PrintSession::on_status_changed), from any thread, and it may do so from inside [connect](PrintService::connect).
#[async_trait]
pub trait PrintService: Send + Sync {
    /// Starts (or resumes) connecting to the daemon
    fn connect(&self) -> Result<(), ServiceError>;
    /// Releases the connection
    fn disconnect(&self);
    /// Names of the installed printers
    async fn printers(&self) -> Result<Vec<String>, ServiceError>;
    /// Resolves once the printer took the whole buffer
    async fn send(&self, printer: &str, buffer: &CommandBuffer) -> Result<(), ServiceError>;
}
