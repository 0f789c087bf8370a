extern crate serde;

use serde::{Serialize, Deserialize};
use crate::Error;
use std::convert::TryFrom;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Justification {
    #[default]
    Left,
    Center,
    Right
}

impl Justification {
    /// The `n` parameter of `ESC a`
    pub fn as_byte(&self) -> u8 {
        match self {
            Justification::Left => 0x00,
            Justification::Center => 0x01,
            Justification::Right => 0x02
        }
    }
}

impl TryFrom<u8> for Justification {
    type Error = Error;

    fn try_from(value: u8) -> Result<Justification, Error> {
        match value {
            0x00 => Ok(Justification::Left),
            0x01 => Ok(Justification::Center),
            0x02 => Ok(Justification::Right),
            other => Err(Error::InvalidInstruction(format!("alignment {} does not exist", other)))
        }
    }
}
