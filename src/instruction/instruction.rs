extern crate serde;

use crate::{
    Error,
    command::{Font, Density, Symbology, BarcodeOptions, QrOptions, Pdf417Options}
};
use serde::{Serialize, Deserialize};
use super::{Justification, TextStyle, Bitmap};

/// Largest character scale the `GS !` register can hold
pub const MAX_SCALE: u8 = 7;

/// Single drawing or formatting operation of a receipt
///
/// Instructions get appended to a [ReceiptDocument](crate::ReceiptDocument), which records them together with the alignment, style, font and size active at that point, and later compiles them to esc/pos bytes.
///
/// The constructor functions are the preferred way of building them, although the variants can also be deserialized (the enum is tagged by `kind`).
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind")]
pub enum Instruction {
    /// Raw text, no line break is added
    Text {
        content: String
    },
    /// Prints the buffer and moves the paper a number of lines
    Feed {
        lines: u8
    },
    /// Alignment of what follows
    Align {
        justification: Justification
    },
    /// Decorations of the text that follows
    Style {
        style: TextStyle
    },
    /// Font of the text that follows
    Font {
        font: Font
    },
    /// Character magnification, from 0 (normal) to 7 (8 times) on each axis
    Size {
        width: u8,
        height: u8
    },
    /// Static picture
    Image {
        bitmap: Bitmap,
        density: Density
    },
    /// One dimensional barcode
    LinearBarcode {
        data: String,
        symbology: Symbology,
        #[serde(default)]
        options: BarcodeOptions
    },
    /// Prints a QR Code
    QrCode {
        data: String,
        #[serde(default)]
        options: QrOptions
    },
    /// Prints a PDF417 stacked code
    Pdf417 {
        data: String,
        #[serde(default)]
        options: Pdf417Options
    },
    /// Cuts the paper in place. Only for supported printers
    Cut
}

impl Instruction {
    /// Returns true if the instruction is text
    pub fn is_text(&self) -> bool {
        matches!(self, Instruction::Text{..})
    }

    /// Returns true if the instruction only changes the print mode
    pub fn is_mode(&self) -> bool {
        matches!(self, Instruction::Align{..} | Instruction::Style{..} | Instruction::Font{..} | Instruction::Size{..})
    }

    /// Text content, if this is a text instruction
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Instruction::Text{content} => Some(content.as_str()),
            _ => None
        }
    }

    /// Sends simple text to the printer.
    pub fn text<A: Into<String>>(content: A) -> Instruction {
        Instruction::Text {
            content: content.into()
        }
    }

    /// Moves the paper a certain amount of lines. Zero lines is accepted, and does nothing.
    pub fn feed(lines: u8) -> Instruction {
        Instruction::Feed{lines}
    }

    pub fn align(justification: Justification) -> Instruction {
        Instruction::Align{justification}
    }

    pub fn style(style: TextStyle) -> Instruction {
        Instruction::Style{style}
    }

    pub fn font(font: Font) -> Instruction {
        Instruction::Font{font}
    }

    /// Character size, both scales get clamped to 0..=7
    ///
    /// ```rust
    /// use escpos_receipt::Instruction;
    /// assert_eq!(Instruction::Size{width: 7, height: 1}, Instruction::size(12, 1));
    /// ```
    pub fn size(width: u8, height: u8) -> Instruction {
        Instruction::Size {
            width: width.min(MAX_SCALE),
            height: height.min(MAX_SCALE)
        }
    }

    pub fn image(bitmap: Bitmap, density: Density) -> Instruction {
        Instruction::Image{bitmap, density}
    }

    pub fn barcode<A: Into<String>>(data: A, symbology: Symbology, options: BarcodeOptions) -> Instruction {
        Instruction::LinearBarcode {
            data: data.into(),
            symbology,
            options
        }
    }

    pub fn qr_code<A: Into<String>>(data: A, options: QrOptions) -> Instruction {
        Instruction::QrCode {
            data: data.into(),
            options
        }
    }

    pub fn pdf417<A: Into<String>>(data: A, options: Pdf417Options) -> Instruction {
        Instruction::Pdf417 {
            data: data.into(),
            options
        }
    }

    pub fn cut() -> Instruction {
        Instruction::Cut
    }

    /// Clamps the size scales and checks that code payloads can be encoded at all
    pub(crate) fn validated(self) -> Result<Instruction, Error> {
        match self {
            Instruction::Size{width, height} => Ok(Instruction::size(width, height)),
            Instruction::LinearBarcode{data, symbology, options} => {
                options.validate()?;
                symbology.validate(&data)?;
                Ok(Instruction::LinearBarcode{data, symbology, options})
            },
            Instruction::QrCode{data, options} => {
                options.validate(&data)?;
                Ok(Instruction::QrCode{data, options})
            },
            Instruction::Pdf417{data, options} => {
                options.validate(&data)?;
                Ok(Instruction::Pdf417{data, options})
            },
            other => Ok(other)
        }
    }
}
