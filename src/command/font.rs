extern crate serde;

use serde::{Serialize, Deserialize};
use crate::Error;
use std::convert::TryFrom;

/// Common fonts used in thermal printers
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Hash, PartialEq, Default)]
pub enum Font {
    #[default]
    FontA,
    FontB,
    FontC,
    FontD,
    FontE
}

impl Eq for Font{}

impl Font {
    /// Byte representation of each font, as expected by `ESC M`.
    pub fn as_byte(&self) -> u8 {
        match self {
            Font::FontA => 0x00,
            Font::FontB => 0x01,
            Font::FontC => 0x02,
            Font::FontD => 0x03,
            Font::FontE => 0x04
        }
    }
}

impl TryFrom<u8> for Font {
    type Error = Error;

    fn try_from(value: u8) -> Result<Font, Error> {
        match value {
            0x00 => Ok(Font::FontA),
            0x01 => Ok(Font::FontB),
            0x02 => Ok(Font::FontC),
            0x03 => Ok(Font::FontD),
            0x04 => Ok(Font::FontE),
            other => Err(Error::InvalidInstruction(format!("font family {} does not exist", other)))
        }
    }
}
