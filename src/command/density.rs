use serde::{Serialize, Deserialize};
use crate::Error;
use std::convert::TryFrom;

/// Specifies de density of the image to be printed
///
/// Not all densities are supported by all printers
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Hash)]
pub enum Density {
    EightDotSingleDensity,
    EightDotDoubleDensity,
    TwentyfourDotSingleDensity,
    TwentyfourDotDoubleDensity
}

impl Eq for Density{}

impl Density {
    /// The `m` parameter of the `ESC *` bit image command
    pub fn as_byte(&self) -> u8 {
        match self {
            Density::EightDotSingleDensity => 0x00,
            Density::EightDotDoubleDensity => 0x01,
            Density::TwentyfourDotSingleDensity => 0x20,
            Density::TwentyfourDotDoubleDensity => 0x21
        }
    }

    /// Vertical dots covered by a single stripe
    pub fn stripe_height(&self) -> u32 {
        match self {
            Density::EightDotSingleDensity | Density::EightDotDoubleDensity => 8,
            Density::TwentyfourDotSingleDensity | Density::TwentyfourDotDoubleDensity => 24
        }
    }

    /// Printer dots covered by one column of the picture. Single density prints every column twice as wide.
    pub fn horizontal_scale(&self) -> u16 {
        match self {
            Density::EightDotSingleDensity | Density::TwentyfourDotSingleDensity => 2,
            Density::EightDotDoubleDensity | Density::TwentyfourDotDoubleDensity => 1
        }
    }

    /// Widest picture, in columns, that fits in `paper_width` dots
    pub fn max_columns(&self, paper_width: u16) -> u16 {
        paper_width / self.horizontal_scale()
    }
}

impl TryFrom<u8> for Density {
    type Error = Error;

    fn try_from(value: u8) -> Result<Density, Error> {
        match value {
            0x00 => Ok(Density::EightDotSingleDensity),
            0x01 => Ok(Density::EightDotDoubleDensity),
            0x20 => Ok(Density::TwentyfourDotSingleDensity),
            0x21 => Ok(Density::TwentyfourDotDoubleDensity),
            other => Err(Error::InvalidInstruction(format!("bit image density {:#04x} does not exist", other)))
        }
    }
}
