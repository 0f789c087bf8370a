use serde::{Serialize, Deserialize};
use crate::Error;

/// A single text decoration
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Bold,
    Underline,
    Italic
}

impl Style {
    fn bit(&self) -> u8 {
        match self {
            Style::Bold => 0b001,
            Style::Underline => 0b010,
            Style::Italic => 0b100
        }
    }
}

/// Set of [Style](crate::Style) flags active for the text
///
/// An empty set means plain text.
/// ```rust
/// use escpos_receipt::{Style, TextStyle};
///
/// let style = TextStyle::from_styles(&[Style::Bold, Style::Underline]);
/// assert!(style.contains(Style::Bold));
/// assert!(!style.contains(Style::Italic));
/// assert_eq!(0b011, style.bits());
/// ```
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(default)]
pub struct TextStyle {
    pub bold: bool,
    pub underline: bool,
    pub italic: bool
}

impl TextStyle {
    /// Plain text
    pub fn plain() -> TextStyle {
        TextStyle::default()
    }

    pub fn bold() -> TextStyle {
        TextStyle::from_styles(&[Style::Bold])
    }

    pub fn from_styles(styles: &[Style]) -> TextStyle {
        styles.iter().fold(TextStyle::plain(), |set, style| set.with(*style))
    }

    /// Decodes a bit set (bold = 1, underline = 2, italic = 4)
    pub fn from_bits(bits: u8) -> Result<TextStyle, Error> {
        if bits & !0b111 != 0 {
            return Err(Error::InvalidInstruction(format!("style bits {:#010b} do not exist", bits)));
        }
        Ok(TextStyle {
            bold: bits & Style::Bold.bit() != 0,
            underline: bits & Style::Underline.bit() != 0,
            italic: bits & Style::Italic.bit() != 0
        })
    }

    pub fn bits(&self) -> u8 {
        [Style::Bold, Style::Underline, Style::Italic].iter()
            .filter(|style| self.contains(**style))
            .fold(0, |bits, style| bits | style.bit())
    }

    pub fn with(mut self, style: Style) -> TextStyle {
        match style {
            Style::Bold => self.bold = true,
            Style::Underline => self.underline = true,
            Style::Italic => self.italic = true
        }
        self
    }

    pub fn contains(&self, style: Style) -> bool {
        match style {
            Style::Bold => self.bold,
            Style::Underline => self.underline,
            Style::Italic => self.italic
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == TextStyle::plain()
    }
}
