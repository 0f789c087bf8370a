use std::collections::HashMap;
use serde::{Serialize, Deserialize};
use crate::command::Font;

/// Details required to compile for a printer
///
/// Compilation needs to know what the target printer can do: how many characters each font fits in a line, how many dots wide the paper is, and which optional commands (native qr codes, pdf417, italics) are available. The bare minimum is a single font width, see [builder](PrinterProfile::builder).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PrinterProfile {
    /// Paper width, in characters, for each font the printer has
    pub (crate) columns_per_font: HashMap<Font, u8>,
    /// Total printer width in dots, for image printing
    pub (crate) width: u16,
    /// If the printer understands `GS ( k` qr codes. Otherwise they get rasterized.
    pub (crate) native_qr: bool,
    /// If the printer understands `GS ( k` pdf417 codes
    pub (crate) pdf417: bool,
    /// If the printer understands `ESC 4`
    pub (crate) italic: bool
}

impl Default for PrinterProfile {
    fn default() -> PrinterProfile {
        PrinterProfile::builder().build()
    }
}

impl PrinterProfile {
    /// Creates a [PrinterProfileBuilder](crate::PrinterProfileBuilder)
    ///
    /// Equivalent to a call to [PrinterProfileBuilder](crate::PrinterProfileBuilder)'s [new](crate::PrinterProfileBuilder::new) function.
    /// ```rust
    /// use escpos_receipt::PrinterProfile;
    /// let printer_profile = PrinterProfile::builder().build();
    /// assert_eq!(Some(32), printer_profile.columns(escpos_receipt::command::Font::FontA));
    /// ```
    pub fn builder() -> PrinterProfileBuilder {
        PrinterProfileBuilder::new()
    }

    /// Characters per line for the font, if the printer has it
    pub fn columns(&self, font: Font) -> Option<u8> {
        self.columns_per_font.get(&font).copied()
    }

    /// Paper width in dots
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn native_qr(&self) -> bool {
        self.native_qr
    }

    pub fn pdf417(&self) -> bool {
        self.pdf417
    }

    pub fn italic(&self) -> bool {
        self.italic
    }
}

/// Helper structure to create a [PrinterProfile](crate::PrinterProfile)
///
/// Builder pattern for the [PrinterProfile](crate::PrinterProfile) structure.
pub struct PrinterProfileBuilder {
    /// Columns that each font spans at maximum
    columns_per_font: HashMap<Font, u8>,
    /// Width, in dots, of the printer
    width: u16,
    native_qr: bool,
    pdf417: bool,
    italic: bool
}

impl Default for PrinterProfileBuilder {
    fn default() -> PrinterProfileBuilder {
        PrinterProfileBuilder::new()
    }
}

impl PrinterProfileBuilder {
    /// Creates a new [PrinterProfileBuilder](crate::PrinterProfileBuilder)
    ///
    /// By default, a width of 384 dots and the `FontA` with 32 columns of width will be loaded with the profile, which fits most 58mm printers. Qr codes are sent natively, pdf417 codes are considered available, italics are not.
    pub fn new() -> PrinterProfileBuilder {
        PrinterProfileBuilder {
            columns_per_font: vec![(Font::FontA, 32)].into_iter().collect(),
            width: 384,
            native_qr: true,
            pdf417: true,
            italic: false
        }
    }

    /// Adds a specific pixel width for the printer (required for printing images)
    ///
    /// Defaults to 384, usually for 58mm printers.
    /// ```rust
    /// use escpos_receipt::PrinterProfileBuilder;
    /// let printer_profile = PrinterProfileBuilder::new()
    ///     .with_width(576)
    ///     .build();
    /// assert_eq!(576, printer_profile.width());
    /// ```
    pub fn with_width(mut self, width: u16) -> PrinterProfileBuilder {
        self.width = width;
        self
    }

    /// Adds a specific width per font
    ///
    /// This allows the preview and the justification to work, and marks the font as available. If you feel insecure about what value to use, the default font (FontA) usually has 32 characters of width for 58mm paper printers, and 48 for 80mm paper. You can also look for the specsheet, or do trial and error.
    /// ```rust
    /// use escpos_receipt::{PrinterProfileBuilder, command::Font};
    /// let printer_profile = PrinterProfileBuilder::new()
    ///     .with_font_width(Font::FontB, 42)
    ///     .build();
    /// assert_eq!(Some(42), printer_profile.columns(Font::FontB));
    /// ```
    pub fn with_font_width(mut self, font: Font, width: u8) -> PrinterProfileBuilder {
        self.columns_per_font.insert(font, width);
        self
    }

    /// Sets if qr codes are sent with the printer's own qr command, or rasterized as a picture
    pub fn with_native_qr(mut self, native_qr: bool) -> PrinterProfileBuilder {
        self.native_qr = native_qr;
        self
    }

    pub fn with_pdf417(mut self, pdf417: bool) -> PrinterProfileBuilder {
        self.pdf417 = pdf417;
        self
    }

    pub fn with_italic(mut self, italic: bool) -> PrinterProfileBuilder {
        self.italic = italic;
        self
    }

    /// Build the `PrinterProfile` that lies beneath the builder
    pub fn build(self) -> PrinterProfile {
        PrinterProfile {
            columns_per_font: self.columns_per_font,
            width: self.width,
            native_qr: self.native_qr,
            pdf417: self.pdf417,
            italic: self.italic
        }
    }
}
