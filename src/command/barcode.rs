use serde::{Serialize, Deserialize};
use qrcode::{QrCode, EcLevel};
use crate::Error;
use super::Font;
use std::convert::TryFrom;

/// Largest payload a `GS ( k` store function can carry (pL + pH * 256 includes 3 header bytes)
const MAX_STORED_PAYLOAD: usize = 0xffff - 3;

/// Linear (1D) barcode symbologies, in the order of `GS k` function B
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symbology {
    UpcA,
    UpcE,
    Ean13,
    Ean8,
    Code39,
    Itf,
    Codabar,
    Code93,
    Code128
}

impl Symbology {
    /// The `m` parameter of `GS k` (function B)
    pub fn as_byte(&self) -> u8 {
        match self {
            Symbology::UpcA => 65,
            Symbology::UpcE => 66,
            Symbology::Ean13 => 67,
            Symbology::Ean8 => 68,
            Symbology::Code39 => 69,
            Symbology::Itf => 70,
            Symbology::Codabar => 71,
            Symbology::Code93 => 72,
            Symbology::Code128 => 73
        }
    }

    /// Checks that `data` can be represented with this symbology
    pub(crate) fn validate(&self, data: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Result<(), Error> {
            Err(Error::InvalidInstruction(format!("{:?} barcode \"{}\": {}", self, data, reason)))
        };
        if data.is_empty() {
            return invalid("no data");
        }
        let digits = data.chars().all(|c| c.is_ascii_digit());
        let length = data.len();
        match self {
            Symbology::UpcA if !digits || !(11..=12).contains(&length) => invalid("expected 11 or 12 digits"),
            Symbology::UpcE if !digits || !matches!(length, 6..=8 | 11 | 12) => invalid("expected 6 to 8, 11 or 12 digits"),
            Symbology::Ean13 if !digits || !(12..=13).contains(&length) => invalid("expected 12 or 13 digits"),
            Symbology::Ean8 if !digits || !(7..=8).contains(&length) => invalid("expected 7 or 8 digits"),
            Symbology::Itf if !digits || length % 2 != 0 => invalid("expected an even number of digits"),
            Symbology::Code39 if !data.chars().all(|c| c.is_ascii_digit() || c.is_ascii_uppercase() || " $%*+-./".contains(c)) => {
                invalid("only digits, uppercase letters and \" $%*+-./\" are allowed")
            },
            Symbology::Codabar if !data.chars().all(|c| c.is_ascii_digit() || "ABCDabcd$+-./:".contains(c)) => {
                invalid("only digits, A-D and \"$+-./:\" are allowed")
            },
            Symbology::Code93 | Symbology::Code128 if !data.is_ascii() => invalid("only ascii characters are allowed"),
            _ if self.payload(data).len() > 255 => invalid("longer than 255 bytes"),
            _ => Ok(())
        }
    }

    /// Data as sent after `GS k m n`. Code128 needs a code set selector, `{B` is used when none is given.
    fn payload(&self, data: &str) -> Vec<u8> {
        match self {
            Symbology::Code128 if !data.starts_with('{') => {
                let mut payload = b"{B".to_vec();
                payload.extend_from_slice(data.as_bytes());
                payload
            },
            _ => data.as_bytes().to_vec()
        }
    }
}

impl TryFrom<u8> for Symbology {
    type Error = Error;

    fn try_from(value: u8) -> Result<Symbology, Error> {
        match value {
            65 => Ok(Symbology::UpcA),
            66 => Ok(Symbology::UpcE),
            67 => Ok(Symbology::Ean13),
            68 => Ok(Symbology::Ean8),
            69 => Ok(Symbology::Code39),
            70 => Ok(Symbology::Itf),
            71 => Ok(Symbology::Codabar),
            72 => Ok(Symbology::Code93),
            73 => Ok(Symbology::Code128),
            other => Err(Error::InvalidInstruction(format!("barcode symbology {} does not exist", other)))
        }
    }
}

/// Where the human readable interpretation of a barcode gets printed
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum HriPosition {
    NotPrinted,
    Above,
    #[default]
    Below,
    Both
}

impl HriPosition {
    fn as_byte(&self) -> u8 {
        match self {
            HriPosition::NotPrinted => 0x00,
            HriPosition::Above => 0x01,
            HriPosition::Below => 0x02,
            HriPosition::Both => 0x03
        }
    }
}

/// Options for linear barcodes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct BarcodeOptions {
    /// Height in dots, 1 to 255
    pub height: u8,
    /// Module width in dots, 2 to 6
    pub module_width: u8,
    pub hri: HriPosition,
    /// Font for the human readable text, only `FontA` and `FontB` exist for it
    pub hri_font: Font
}

impl Default for BarcodeOptions {
    fn default() -> BarcodeOptions {
        BarcodeOptions {
            height: 80,
            module_width: 3,
            hri: HriPosition::Below,
            hri_font: Font::FontA
        }
    }
}

impl BarcodeOptions {
    pub(crate) fn validate(&self) -> Result<(), Error> {
        if self.height == 0 {
            return Err(Error::InvalidInstruction("barcode height must be at least 1 dot".to_string()));
        }
        if !(2..=6).contains(&self.module_width) {
            return Err(Error::InvalidInstruction(format!("barcode module width {} is outside 2..=6", self.module_width)));
        }
        if !matches!(self.hri_font, Font::FontA | Font::FontB) {
            return Err(Error::InvalidInstruction(format!("{:?} cannot be used for barcode text", self.hri_font)));
        }
        Ok(())
    }
}

/// Full `GS H`, `GS f`, `GS h`, `GS w`, `GS k` sequence for a validated barcode
pub(crate) fn linear_barcode(data: &str, symbology: Symbology, options: &BarcodeOptions) -> Vec<u8> {
    let payload = symbology.payload(data);
    let mut feed = vec![
        0x1d, 0x48, options.hri.as_byte(),
        0x1d, 0x66, options.hri_font.as_byte(),
        0x1d, 0x68, options.height,
        0x1d, 0x77, options.module_width,
        0x1d, 0x6b, symbology.as_byte(), payload.len() as u8
    ];
    feed.extend_from_slice(&payload);
    feed
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum QrModel {
    Model1,
    #[default]
    Model2
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum QrErrorCorrection {
    /// Recovers 7% of the symbol
    Low,
    /// Recovers 15% of the symbol
    #[default]
    Medium,
    /// Recovers 25% of the symbol
    Quartile,
    /// Recovers 30% of the symbol
    High
}

impl QrErrorCorrection {
    fn as_byte(&self) -> u8 {
        match self {
            QrErrorCorrection::Low => 48,
            QrErrorCorrection::Medium => 49,
            QrErrorCorrection::Quartile => 50,
            QrErrorCorrection::High => 51
        }
    }

    pub(crate) fn ec_level(&self) -> EcLevel {
        match self {
            QrErrorCorrection::Low => EcLevel::L,
            QrErrorCorrection::Medium => EcLevel::M,
            QrErrorCorrection::Quartile => EcLevel::Q,
            QrErrorCorrection::High => EcLevel::H
        }
    }
}

/// Options for QR codes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct QrOptions {
    pub model: QrModel,
    /// Size of a module in dots, 1 to 16
    pub module_size: u8,
    pub error_correction: QrErrorCorrection
}

impl Default for QrOptions {
    fn default() -> QrOptions {
        QrOptions {
            model: QrModel::Model2,
            module_size: 6,
            error_correction: QrErrorCorrection::Medium
        }
    }
}

impl QrOptions {
    pub(crate) fn validate(&self, data: &str) -> Result<(), Error> {
        if !(1..=16).contains(&self.module_size) {
            return Err(Error::InvalidInstruction(format!("qr module size {} is outside 1..=16", self.module_size)));
        }
        if data.is_empty() {
            return Err(Error::InvalidInstruction("qr code without data".to_string()));
        }
        // The symbol itself tells us if the data fits at all
        QrCode::with_error_correction_level(data.as_bytes(), self.error_correction.ec_level())
            .map_err(|e| Error::InvalidInstruction(format!("qr code cannot hold the data, {}", e)))?;
        Ok(())
    }
}

/// Native `GS ( k` sequence (cn = 49) for a validated qr code
pub(crate) fn qr_code(data: &str, options: &QrOptions) -> Vec<u8> {
    let model = match options.model {
        QrModel::Model1 => 49,
        QrModel::Model2 => 50
    };
    let mut feed = vec![
        0x1d, 0x28, 0x6b, 0x04, 0x00, 0x31, 0x41, model, 0x00,
        0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x43, options.module_size,
        0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x45, options.error_correction.as_byte()
    ];
    feed.extend_from_slice(&store(0x31, data.as_bytes()));
    feed.extend_from_slice(&[0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x51, 0x30]);
    feed
}

/// Options for PDF417 codes
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Pdf417Options {
    /// Data columns, 0 (automatic) to 30
    pub columns: u8,
    /// Rows, 0 (automatic) or 3 to 90
    pub rows: u8,
    /// Module width in dots, 2 to 8
    pub module_width: u8,
    /// Row height, as a multiple of the module width, 2 to 8
    pub row_height: u8,
    /// Error correction level, 0 to 8
    pub error_level: u8,
    /// Truncated PDF417 drops the right row indicators
    pub truncated: bool
}

impl Default for Pdf417Options {
    fn default() -> Pdf417Options {
        Pdf417Options {
            columns: 0,
            rows: 0,
            module_width: 3,
            row_height: 3,
            error_level: 1,
            truncated: false
        }
    }
}

impl Pdf417Options {
    pub(crate) fn validate(&self, data: &str) -> Result<(), Error> {
        let out_of_range = |name: &str, value: u8| -> Result<(), Error> {
            Err(Error::InvalidInstruction(format!("pdf417 {} {} is out of range", name, value)))
        };
        if self.columns > 30 {
            return out_of_range("columns", self.columns);
        }
        if self.rows != 0 && !(3..=90).contains(&self.rows) {
            return out_of_range("rows", self.rows);
        }
        if !(2..=8).contains(&self.module_width) {
            return out_of_range("module width", self.module_width);
        }
        if !(2..=8).contains(&self.row_height) {
            return out_of_range("row height", self.row_height);
        }
        if self.error_level > 8 {
            return out_of_range("error level", self.error_level);
        }
        if data.is_empty() || data.len() > MAX_STORED_PAYLOAD {
            return Err(Error::InvalidInstruction(format!("pdf417 data must hold between 1 and {} bytes", MAX_STORED_PAYLOAD)));
        }
        Ok(())
    }
}

/// Native `GS ( k` sequence (cn = 48) for a validated pdf417 code
pub(crate) fn pdf417(data: &str, options: &Pdf417Options) -> Vec<u8> {
    let mut feed = vec![
        0x1d, 0x28, 0x6b, 0x03, 0x00, 0x30, 0x41, options.columns,
        0x1d, 0x28, 0x6b, 0x03, 0x00, 0x30, 0x42, options.rows,
        0x1d, 0x28, 0x6b, 0x03, 0x00, 0x30, 0x43, options.module_width,
        0x1d, 0x28, 0x6b, 0x03, 0x00, 0x30, 0x44, options.row_height,
        0x1d, 0x28, 0x6b, 0x04, 0x00, 0x30, 0x45, 0x30, 0x30 + options.error_level,
        0x1d, 0x28, 0x6b, 0x03, 0x00, 0x30, 0x46, options.truncated as u8
    ];
    feed.extend_from_slice(&store(0x30, data.as_bytes()));
    feed.extend_from_slice(&[0x1d, 0x28, 0x6b, 0x03, 0x00, 0x30, 0x51, 0x30]);
    feed
}

// Symbol storage function, shared by qr (cn = 49) and pdf417 (cn = 48)
fn store(cn: u8, data: &[u8]) -> Vec<u8> {
    let length = data.len() + 3;
    let mut feed = vec![0x1d, 0x28, 0x6b, (length % 256) as u8, (length / 256) as u8, cn, 0x50, 0x30];
    feed.extend_from_slice(data);
    feed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ean13_requires_digits() {
        assert!(Symbology::Ean13.validate("4006381333931").is_ok());
        assert!(matches!(Symbology::Ean13.validate("40063813339A1"), Err(Error::InvalidInstruction(_))));
        assert!(matches!(Symbology::Ean13.validate("123"), Err(Error::InvalidInstruction(_))));
    }

    #[test]
    fn code128_gets_a_code_set() {
        let feed = linear_barcode("ABC", Symbology::Code128, &BarcodeOptions::default());
        assert_eq!(&[0x1d, 0x6b, 73, 5, b'{', b'B', b'A', b'B', b'C'], &feed[12..]);
    }

    #[test]
    fn long_code128_is_rejected() {
        let data = "A".repeat(254);
        assert!(matches!(Symbology::Code128.validate(&data), Err(Error::InvalidInstruction(_))));
        assert!(Symbology::Code128.validate(&"A".repeat(253)).is_ok());
    }

    #[test]
    fn qr_store_is_length_prefixed() {
        let feed = qr_code("hello", &QrOptions::default());
        // model, size and error correction come first
        assert_eq!(&[0x1d, 0x28, 0x6b, 0x08, 0x00, 0x31, 0x50, 0x30], &feed[25..33]);
        assert_eq!(b"hello", &feed[33..38]);
        assert_eq!(&[0x1d, 0x28, 0x6b, 0x03, 0x00, 0x31, 0x51, 0x30], &feed[38..]);
    }

    #[test]
    fn qr_module_size_is_checked() {
        let options = QrOptions {module_size: 17, ..QrOptions::default()};
        assert!(matches!(options.validate("data"), Err(Error::InvalidInstruction(_))));
    }

    #[test]
    fn pdf417_rows_are_checked() {
        let options = Pdf417Options {rows: 2, ..Pdf417Options::default()};
        assert!(matches!(options.validate("data"), Err(Error::InvalidInstruction(_))));
        assert!(Pdf417Options::default().validate("data").is_ok());
    }
}
