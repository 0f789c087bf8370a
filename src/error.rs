use thiserror::Error;

use crate::session::ServiceError;

/// Errors that this crate throws.
#[derive(Debug, Error)]
pub enum Error {
    /// The instruction handed to the builder is malformed (bad enum value, unencodable payload...)
    #[error("Invalid instruction: {0}")]
    InvalidInstruction(String),
    /// The printer profile has no binary encoding for the instruction
    #[error("Unsupported instruction for the printer profile: {0}")]
    UnsupportedInstruction(String),
    /// The session is not connected to the print service
    #[error("The print service is not connected")]
    NotConnected,
    /// A dispatch was requested before selecting a printer
    #[error("No printer has been selected")]
    NoPrinterSelected,
    /// The printer is not part of the last printer listing
    #[error("Unknown printer \"{0}\"")]
    UnknownPrinter(String),
    /// Only one dispatch may be pending per session
    #[error("Another print job is still being dispatched")]
    DispatchInProgress,
    /// The print service reported a failure, or the connection dropped mid-dispatch
    #[error("Transmission failed: {0}")]
    TransmissionFailed(String),
    /// The session was shut down
    #[error("The print session has been closed")]
    SessionClosed,
    /// The print service failed to answer a query
    #[error("Print service error: {0}")]
    Service(#[from] ServiceError),
    /// Error regarding image treatment
    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),
}
