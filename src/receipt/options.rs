use std::path::PathBuf;

use serde::{Serialize, Deserialize};
use crate::{Error, command::Density, instruction::Bitmap};

/// Merchant dependent parts of the order receipt
///
/// Every field has a default, so a partial json object is enough.
/// ```rust
/// use escpos_receipt::ReceiptOptions;
///
/// let options: ReceiptOptions = serde_json::from_str(r#"{"currency_symbol": "$"}"#).unwrap();
/// assert_eq!("$", options.currency_symbol);
/// assert_eq!("Padmavati Restaurant", options.merchant_name);
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ReceiptOptions {
    pub merchant_name: String,
    pub currency_symbol: String,
    /// Label of the tax line, like `Tax (5%)`
    pub tax_label: String,
    /// Centered lines printed after the totals
    pub closing_lines: Vec<String>,
    pub logo: Option<Logo>,
    /// Logos wider than this, in dots, are scaled down
    ///
    /// [render_order](crate::ReceiptDocument::render_order) trusts this value, keep it within the printer width. [render_order_for](crate::ReceiptDocument::render_order_for) also caps it to what the profile fits.
    pub logo_width: u16,
    pub logo_density: Density
}

impl Default for ReceiptOptions {
    fn default() -> ReceiptOptions {
        ReceiptOptions {
            merchant_name: "Padmavati Restaurant".to_string(),
            currency_symbol: "₹".to_string(),
            tax_label: "Tax (5%)".to_string(),
            closing_lines: vec![
                "Thank you for dining with us!".to_string(),
                "Please visit again".to_string()
            ],
            logo: None,
            logo_width: 384,
            logo_density: Density::TwentyfourDotDoubleDensity
        }
    }
}

/// Where the receipt logo comes from
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Logo {
    /// Picture file on disk
    Path(PathBuf),
    /// Encoded picture (png, jpeg, gif or bmp)
    Bytes(Vec<u8>),
    /// Already converted
    Bitmap(Bitmap)
}

impl Logo {
    /// Decodes the logo, scaling it down to `max_width` dots
    ///
    /// The result is never wider than `max_width`, whatever the source.
    pub fn load(&self, max_width: u16) -> Result<Bitmap, Error> {
        if max_width == 0 {
            return Err(Error::InvalidInstruction("a logo cannot be 0 dots wide".to_string()));
        }
        match self {
            Logo::Path(path) => Bitmap::open(path, max_width),
            Logo::Bytes(bytes) => Bitmap::from_bytes(bytes, max_width),
            Logo::Bitmap(bitmap) => Ok(bitmap.scaled_down(max_width))
        }
    }
}
