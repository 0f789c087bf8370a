extern crate serde;

use super::{Font, Density};
use crate::instruction::Justification;
use serde::{Serialize, Deserialize};

/// Raw esc/pos commands used by the compiler
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Command {
    /// Cuts the paper after 0x96 vertical spaces
    Cut,
    /// Clears the print buffer and resets the modes. Equivalent to ESC @
    Initialize,
    /// Selects a character code table, Equivalent to ESC t
    SelectCodeTable {
        code_table: u8
    },
    /// Sets up a font. Equivalent to ESC M
    SelectFont {
        font: Font
    },
    /// Equivalent to ESC a
    SelectJustification {
        justification: Justification
    },
    UnderlineOff,
    Underline1Dot,
    BoldOn,
    BoldOff,
    /// Equivalent to ESC 4, not every printer has it
    ItalicOn,
    ItalicOff,
    /// Character magnification, each scale in 0..=7. Equivalent to GS !
    CharacterSize {
        width: u8,
        height: u8
    },
    /// Prints the buffer and feeds `lines` lines. Equivalent to ESC d
    FeedLines {
        lines: u8
    },
    /// Equivalent to ESC *, must be followed by nL nH and the column data
    Bitmap {
        density: Density
    },
    /// Change line size
    NoLine,
    ResetLine
}

impl Command {
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            Command::Cut => vec![0x1d, 0x56, 0x41, 0x96],
            Command::Initialize => vec![0x1b, 0x40],
            Command::SelectCodeTable{code_table} => vec![0x1b, 0x74, *code_table],
            Command::SelectFont{font} => vec![0x1b, 0x4d, font.as_byte()],
            Command::SelectJustification{justification} => vec![0x1b, 0x61, justification.as_byte()],
            Command::UnderlineOff => vec![0x1b, 0x2d, 0x00],
            Command::Underline1Dot => vec![0x1b, 0x2d, 0x01],
            Command::BoldOn => vec![0x1b, 0x45, 0x01],
            Command::BoldOff => vec![0x1b, 0x45, 0x00],
            Command::ItalicOn => vec![0x1b, 0x34, 0x01],
            Command::ItalicOff => vec![0x1b, 0x34, 0x00],
            Command::CharacterSize{width, height} => vec![0x1d, 0x21, ((width & 0x07) << 4) | (height & 0x07)],
            Command::FeedLines{lines} => vec![0x1b, 0x64, *lines],
            Command::Bitmap{density} => vec![0x1b, 0x2a, density.as_byte()],
            Command::NoLine => vec![0x1b, 0x33, 0x00],
            Command::ResetLine => vec![0x1b, 0x32]
        }
    }
}
