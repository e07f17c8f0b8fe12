//! Palette file serialization formats.
//!
//! A palette file is a header-less sequence of entries in index order.
//! Two entry encodings are supported:
//!
//! | Format     | Bytes | Layout                                                  |
//! |------------|-------|---------------------------------------------------------|
//! | `rgba8888` | 4     | `R, G, B, A`                                            |
//! | `psx16`    | 2     | little-endian `R5 \| G5 << 5 \| B5 << 10 \| STP << 15` |
//!
//! `psx16` is the 15-bit color table word of the PlayStation GPU. The word
//! `0x0000` is the hardware's "transparent" code, so entries below the alpha
//! cutoff encode to it, and opaque colors that would collide with it (pure
//! black and near-black) get the STP bit set instead.

use std::fmt;
use std::str::FromStr;

use super::error::PaletteError;
use crate::color::Rgba;

/// Default alpha below which a `psx16` entry is written as transparent.
pub const DEFAULT_ALPHA_CUTOFF: u8 = 128;

const PSX_TRANSPARENT: u16 = 0x0000;
const PSX_STP_BIT: u16 = 0x8000;

/// Serialized representation of a single palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteFormat {
    /// Four bytes per entry: red, green, blue, alpha.
    #[default]
    Rgba8888,
    /// Two bytes per entry: 15-bit BGR word with STP bit, little-endian.
    Psx16,
}

impl PaletteFormat {
    /// Size of one serialized entry in bytes.
    #[inline]
    pub fn entry_size(self) -> usize {
        match self {
            PaletteFormat::Rgba8888 => 4,
            PaletteFormat::Psx16 => 2,
        }
    }

    /// Append one serialized entry to `out`.
    ///
    /// `alpha_cutoff` only affects `psx16`; `rgba8888` stores alpha verbatim.
    pub fn encode_entry(self, color: Rgba, alpha_cutoff: u8, out: &mut Vec<u8>) {
        match self {
            PaletteFormat::Rgba8888 => out.extend_from_slice(&color.to_bytes()),
            PaletteFormat::Psx16 => {
                out.extend_from_slice(&psx16_word(color, alpha_cutoff).to_le_bytes())
            }
        }
    }

    /// Decode a palette file back into colors.
    ///
    /// `psx16` cannot represent alpha gradations: `0x0000` decodes to
    /// [`Rgba::TRANSPARENT`], every other word to an opaque color with its
    /// 5-bit channels expanded by bit replication. Duplicate entries are
    /// allowed here since padded palette files contain them.
    pub fn decode(self, bytes: &[u8]) -> Result<Vec<Rgba>, PaletteError> {
        let entry_size = self.entry_size();
        if bytes.len() % entry_size != 0 {
            return Err(PaletteError::InvalidLength {
                len: bytes.len(),
                entry_size,
            });
        }

        let colors = match self {
            PaletteFormat::Rgba8888 => bytes
                .chunks_exact(4)
                .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
                .collect(),
            PaletteFormat::Psx16 => bytes
                .chunks_exact(2)
                .map(|c| psx16_color(u16::from_le_bytes([c[0], c[1]])))
                .collect(),
        };
        Ok(colors)
    }
}

impl fmt::Display for PaletteFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteFormat::Rgba8888 => write!(f, "rgba8888"),
            PaletteFormat::Psx16 => write!(f, "psx16"),
        }
    }
}

impl FromStr for PaletteFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("rgba8888") || s.eq_ignore_ascii_case("rgba") => {
                Ok(PaletteFormat::Rgba8888)
            }
            s if s.eq_ignore_ascii_case("psx16") || s.eq_ignore_ascii_case("psx") => {
                Ok(PaletteFormat::Psx16)
            }
            other => Err(format!(
                "unknown palette format '{other}' (expected rgba8888 or psx16)"
            )),
        }
    }
}

/// How a [`Palette`](super::Palette) is laid out in its output file.
///
/// # Example
///
/// ```
/// use indexed_pack::{PaletteFormat, PaletteLayout};
///
/// let layout = PaletteLayout::new(PaletteFormat::Psx16).pad_to(16);
/// assert_eq!(layout.format, PaletteFormat::Psx16);
/// assert_eq!(layout.pad_to, Some(16));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteLayout {
    /// Entry encoding.
    pub format: PaletteFormat,
    /// Alpha below which `psx16` entries are written as transparent.
    pub alpha_cutoff: u8,
    /// Pad the file with all-zero entries up to this many entries.
    pub pad_to: Option<usize>,
}

impl Default for PaletteLayout {
    fn default() -> Self {
        Self {
            format: PaletteFormat::default(),
            alpha_cutoff: DEFAULT_ALPHA_CUTOFF,
            pad_to: None,
        }
    }
}

impl PaletteLayout {
    /// Layout with the given format and default cutoff, no padding.
    #[inline]
    pub fn new(format: PaletteFormat) -> Self {
        Self {
            format,
            ..Self::default()
        }
    }

    /// Set the alpha cutoff.
    #[inline]
    pub fn alpha_cutoff(mut self, cutoff: u8) -> Self {
        self.alpha_cutoff = cutoff;
        self
    }

    /// Pad the serialized palette to `entries` entries.
    #[inline]
    pub fn pad_to(mut self, entries: usize) -> Self {
        self.pad_to = Some(entries);
        self
    }
}

fn psx16_word(color: Rgba, alpha_cutoff: u8) -> u16 {
    if color.a < alpha_cutoff {
        return PSX_TRANSPARENT;
    }
    let r = (color.r >> 3) as u16;
    let g = (color.g >> 3) as u16;
    let b = (color.b >> 3) as u16;
    let word = r | (g << 5) | (b << 10);
    if word == PSX_TRANSPARENT {
        PSX_STP_BIT
    } else {
        word
    }
}

fn psx16_color(word: u16) -> Rgba {
    if word == PSX_TRANSPARENT {
        return Rgba::TRANSPARENT;
    }
    let expand = |v: u16| -> u8 {
        let v = (v & 0x1F) as u8;
        (v << 3) | (v >> 2)
    };
    Rgba::opaque(expand(word), expand(word >> 5), expand(word >> 10))
}
