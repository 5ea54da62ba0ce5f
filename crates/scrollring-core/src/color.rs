use serde::Deserialize;

use crate::error::ColorError;

/// 8-bit sRGB color with straight alpha.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255, 255);

    /// Tailwind green-500.
    pub const GREEN: Color = Color(0x22, 0xc5, 0x5e, 255);
    /// Tailwind yellow-500.
    pub const YELLOW: Color = Color(0xea, 0xb3, 0x08, 255);
    /// Tailwind red-500.
    pub const RED: Color = Color(0xef, 0x44, 0x44, 255);
    /// Tailwind gray-200, used for the ring track.
    pub const TRACK: Color = Color(0xe5, 0xe7, 0xeb, 255);
    /// Tailwind gray-700, used for the arrow glyph.
    pub const ICON: Color = Color(0x37, 0x41, 0x51, 255);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Color(r, g, b, 255)
    }

    /// Parses `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn parse_hex(hex: &str) -> Result<Self, ColorError> {
        let s = hex.trim().trim_start_matches('#');
        if !s.is_ascii() || !(s.len() == 6 || s.len() == 8) {
            return Err(ColorError::Length(hex.to_string()));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&s[i..i + 2], 16).map_err(|_| ColorError::Digit(hex.to_string()))
        };
        let a = if s.len() == 8 { channel(6)? } else { 255 };
        Ok(Color(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// CSS form used by the DOM host: `#rrggbb` when opaque, `rgba(..)` otherwise.
    pub fn to_css(self) -> String {
        if self.3 == 255 {
            format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
        } else {
            format!(
                "rgba({}, {}, {}, {:.3})",
                self.0,
                self.1,
                self.2,
                self.3 as f32 / 255.0
            )
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse_hex(&value)
    }
}
