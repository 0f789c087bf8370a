use super::{PrinterProfile};
use crate::command::Font;

/// Printers known to this library
///
/// Probably needs updates. Any other printer can be described with a [PrinterProfileBuilder](crate::PrinterProfileBuilder).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrinterModel {
    /// ZKTeco mini printer, 58mm
    ZKTeco,
    /// Epson most used printer, 80mm
    TMT20
}

impl PrinterModel {
    /// Obtain the full details of the printer, to make an easy print
    pub fn profile(&self) -> PrinterProfile {
        match self {
            PrinterModel::ZKTeco => {
                PrinterProfile::builder()
                    .with_width(384)
                    .with_native_qr(false)
                    .with_pdf417(false)
                    .build()
            },
            PrinterModel::TMT20 => {
                PrinterProfile::builder()
                    .with_font_width(Font::FontA, 48)
                    .with_font_width(Font::FontB, 64)
                    .with_width(576)
                    .build()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tmt20_is_an_80mm_printer() {
        let profile = PrinterModel::TMT20.profile();
        assert_eq!(576, profile.width());
        assert_eq!(Some(48), profile.columns(Font::FontA));
        assert!(profile.native_qr());
    }

    #[test]
    fn zkteco_rasterizes_qr_codes() {
        let profile = PrinterModel::ZKTeco.profile();
        assert!(!profile.native_qr());
        assert!(!profile.pdf417());
        assert_eq!(None, profile.columns(Font::FontB));
    }
}
