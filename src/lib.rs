//! Library for composing receipts for esc/pos printers, and sending them through a print service
//!
//! Receipts are built as a [ReceiptDocument](crate::ReceiptDocument): an ordered list of [Instructions](crate::Instruction) (text, alignment, style, font, size, pictures, barcodes, qr and pdf417 codes, feeds and cuts). Each appended instruction remembers the [PrintMode](crate::PrintMode) active at that point, so the document can be compiled on its own into a [CommandBuffer](crate::CommandBuffer).
//!
//! ```rust
//! use escpos_receipt::{ReceiptDocument, PrinterProfile, Justification, TextStyle};
//!
//! let mut document = ReceiptDocument::new();
//! document
//!     .align(Justification::Center)
//!     .style(TextStyle::bold())
//!     .line("Hello, world!")
//!     .style(TextStyle::plain())
//!     .align(Justification::Left)
//!     .line("Plain text, left aligned")
//!     .feed(3)
//!     .cut();
//!
//! // The bytes the printer will receive
//! let buffer = document.compile(&PrinterProfile::default()).unwrap();
//! assert_eq!(&[0x1b, 0x40], &buffer.as_bytes()[..2]);
//! ```
//!
//! ## Printer Details
//!
//! In order to compile, some data about the printer must be known. The [PrinterProfile](crate::PrinterProfile) structure fulfills this purpose: characters per line for each font, paper width in dots, and which optional commands the printer understands. A couple of known printers are available as [PrinterModel](crate::PrinterModel) presets.
//!
//! Instructions the printer has no encoding for (a missing font, italics, pdf417 codes, pictures wider than the paper) make the compilation fail, they are never silently dropped.
//!
//! ### Order receipts
//!
//! An [OrderPayload](crate::OrderPayload), usually deserialized from the ordering system's json, can be laid out in one call with [render_order](crate::ReceiptDocument::render_order). The merchant dependent parts live in [ReceiptOptions](crate::ReceiptOptions).
//!
//! ```rust
//! use escpos_receipt::{ReceiptDocument, OrderPayload, ReceiptOptions, PrinterModel};
//!
//! let order: OrderPayload = serde_json::from_str(r#"{
//!     "orderNo": "12345",
//!     "orderid": "ORD-987654",
//!     "timeStamp": "31/03/2025 14:30",
//!     "userid": "John Doe",
//!     "items": [{"name": "Paneer Tikka", "qty": 2, "price": 180, "total": 360}],
//!     "subtotal": 360,
//!     "tax": 18,
//!     "total": 378
//! }"#).unwrap();
//!
//! let mut document = ReceiptDocument::new();
//! document.render_order(&order, &ReceiptOptions::default());
//! let buffer = document.compile(&PrinterModel::TMT20.profile()).unwrap();
//! assert!(!buffer.is_empty());
//! ```
//!
//! ### Print sessions
//!
//! The printers themselves are reached through a local print service, hidden behind the [PrintService](crate::PrintService) trait. A [PrintSession](crate::PrintSession) follows the connection to that service, lists and selects printers, and dispatches compiled buffers, one at a time.
//!
//! Every public type that describes content implements Serialize from [serde](https://docs.rs/serde), and most of them Deserialize too. Pictures are encoded to base64, so documents can be stored as json.

pub use document::{ReceiptDocument, Step, PrintMode};
pub use instruction::{Instruction, Justification, Style, TextStyle, Bitmap, MAX_SCALE};
pub use printer::{PrinterProfile, PrinterProfileBuilder, PrinterModel};
pub use buffer::CommandBuffer;
pub use receipt::{OrderPayload, LineItem, ReceiptOptions, Logo, TestPage};
pub use session::{PrintSession, SessionConfig, SessionStatus, ServiceStatus, PrintService, ServiceError};
pub use error::{Error};

/// Contains raw esc/pos commands
pub mod command;

mod buffer;
mod document;
mod error;
mod instruction;
mod printer;
mod receipt;
mod session;
