pub use self::font::Font;
pub use self::command::Command;
pub use self::density::Density;
pub use self::barcode::{
    Symbology, HriPosition, BarcodeOptions,
    QrModel, QrErrorCorrection, QrOptions, Pdf417Options
};

pub(crate) use self::barcode::{linear_barcode, qr_code, pdf417};

mod barcode;
mod command;
mod density;
mod font;
