pub use self::printer_profile::{PrinterProfile, PrinterProfileBuilder};
pub use self::printer_model::PrinterModel;

mod printer_profile;
mod printer_model;
