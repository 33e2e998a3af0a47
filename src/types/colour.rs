//! Colour type and hex parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WiggleError};

/// An RGBA colour value.
///
/// Serialises as a hex string so config files and state dumps read the same
/// way the pencil colours are written: `"#FF0000"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn from_hex(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid(trimmed));
        }

        match hex.len() {
            3 => {
                let mut nibbles = [0u8; 3];
                for (slot, c) in nibbles.iter_mut().zip(hex.chars()) {
                    let d = c.to_digit(16).ok_or_else(|| invalid(trimmed))? as u8;
                    *slot = d << 4 | d;
                }
                Ok(Self::rgb(nibbles[0], nibbles[1], nibbles[2]))
            }
            6 | 8 => {
                let mut bytes = [255u8; 4];
                for (i, slot) in bytes.iter_mut().enumerate().take(hex.len() / 2) {
                    *slot = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
                        .map_err(|_| invalid(trimmed))?;
                }
                Ok(Self::new(bytes[0], bytes[1], bytes[2], bytes[3]))
            }
            _ => Err(invalid(trimmed)),
        }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Pack as `0x00RRGGBB`, the layout minifb presents.
    pub fn to_u32(self) -> u32 {
        (u32::from(self.r) << 16) | (u32::from(self.g) << 8) | u32::from(self.b)
    }

    /// Composite `self` over an opaque `base` colour.
    pub fn over(self, base: Colour) -> Colour {
        match self.a {
            255 => self,
            0 => Colour { a: 255, ..base },
            a => {
                let a = u16::from(a);
                let mix = |fg: u8, bg: u8| ((u16::from(fg) * a + u16::from(bg) * (255 - a)) / 255) as u8;
                Colour::rgb(mix(self.r, base.r), mix(self.g, base.g), mix(self.b, base.b))
            }
        }
    }
}

fn invalid(s: &str) -> WiggleError {
    WiggleError::Parse {
        message: format!("Invalid hex colour: {:?}", s),
        help: Some("Use #RGB, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

impl FromStr for Colour {
    type Err = WiggleError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Colour {
    type Error = WiggleError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Colour> for String {
    fn from(c: Colour) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}
