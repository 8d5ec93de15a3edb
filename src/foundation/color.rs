use serde::{Deserialize, Serialize};

use crate::foundation::error::{CineError, CineResult};

/// Opaque sRGB tone. Per-draw opacity is applied at render time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Tone {
    /// Build a tone from channel bytes.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional, case-insensitive).
    pub fn from_hex(s: &str) -> CineResult<Self> {
        parse_hex(s).map_err(CineError::validation)
    }

    /// Format as `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Straight-alpha RGBA8 with `opacity` in `[0, 1]`.
    pub fn with_opacity(self, opacity: f64) -> [u8; 4] {
        let a = (opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        [self.r, self.g, self.b, a]
    }
}

/// Rose-gold, the page's accent tone.
pub const ROSE_GOLD: Tone = Tone::rgb(0xD4, 0xA3, 0x73);
/// Lighter rose-gold.
pub const ROSE_GOLD_LIGHT: Tone = Tone::rgb(0xE8, 0xC9, 0xA0);
/// Darker rose-gold.
pub const ROSE_GOLD_DARK: Tone = Tone::rgb(0xB8, 0x87, 0x5A);
/// Muted blush red.
pub const BLUSH: Tone = Tone::rgb(0xD4, 0x73, 0x73);
/// Warm off-white.
pub const CREAM: Tone = Tone::rgb(0xF5, 0xF0, 0xEB);

/// Seven-slot burst palette. Rose-gold tones appear twice to weight the draw toward them.
pub const BURST_PALETTE: [Tone; 7] = [
    ROSE_GOLD,
    ROSE_GOLD_LIGHT,
    ROSE_GOLD_DARK,
    BLUSH,
    CREAM,
    ROSE_GOLD,
    ROSE_GOLD_LIGHT,
];

impl Serialize for Tone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Tone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Arr([u8; 3]),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => parse_hex(&s).map_err(serde::de::Error::custom),
            Repr::Arr([r, g, b]) => Ok(Self::rgb(r, g, b)),
        }
    }
}

fn parse_hex(s: &str) -> Result<Tone, String> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);

    fn hex_byte(pair: &str) -> Result<u8, String> {
        u8::from_str_radix(pair, 16).map_err(|_| format!("invalid hex byte \"{pair}\""))
    }

    if s.len() != 6 || !s.is_ascii() {
        return Err("hex tone must be #RRGGBB (case-insensitive)".to_owned());
    }
    Ok(Tone::rgb(
        hex_byte(&s[0..2])?,
        hex_byte(&s[2..4])?,
        hex_byte(&s[4..6])?,
    ))
}
