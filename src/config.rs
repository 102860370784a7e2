use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::GlyphError;

/// Canvas dimensions in points, written as `<width>x<height>`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
pub struct CanvasSize {
    /// Horizontal extent.
    pub width: u32,
    /// Vertical extent.
    pub height: u32,
}

impl CanvasSize {
    /// Creates a canvas size from its two dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(12, 24)
    }
}

impl fmt::Display for CanvasSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for CanvasSize {
    type Err = GlyphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GlyphError::InvalidCanvasSize(s.to_owned());

        let (width, height) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width = width.parse::<u32>().map_err(|_| invalid())?;
        let height = height.parse::<u32>().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }

        Ok(Self { width, height })
    }
}

impl TryFrom<String> for CanvasSize {
    type Error = GlyphError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Immutable settings for one generator run.
///
/// The default reproduces the classic setup: Courier at 12x24 points,
/// printable ASCII from space to tilde, files numbered from 32 so that each
/// file name matches its ASCII code.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct Config {
    /// Font name or path handed to the renderer.
    pub font: String,
    /// Canvas every glyph is rendered onto.
    pub canvas_size: CanvasSize,
    /// First code point, inclusive.
    pub first_code_point: char,
    /// Last code point, inclusive.
    pub last_code_point: char,
    /// File name of the first glyph, without extension.
    pub start_counter: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            font: "courier.ttf".to_owned(),
            canvas_size: CanvasSize::default(),
            first_code_point: '\u{20}',
            last_code_point: '\u{7e}',
            start_counter: 32,
        }
    }
}

impl Config {
    /// All code points of the run, in increasing numeric order.
    ///
    /// Surrogates are not scalar values and are never produced. If the first
    /// code point lies above the last one, the range is simply empty.
    #[must_use]
    pub fn code_points(&self) -> RangeInclusive<char> {
        self.first_code_point..=self.last_code_point
    }

    /// Checks that every code point gets its own counter value.
    ///
    /// # Errors
    /// Returns [`GlyphError::CounterOverflow`] if numbering the range from
    /// `start_counter` would go past `u32::MAX`.
    pub fn validate(&self) -> Result<(), GlyphError> {
        let count = self.code_points().count() as u64;
        let last = u64::from(self.start_counter) + count.saturating_sub(1);
        if count > 0 && last > u64::from(u32::MAX) {
            return Err(GlyphError::CounterOverflow { start: self.start_counter, count });
        }
        Ok(())
    }
}

/// Parses a code point written in hex, as in `20`, `7e`, `U+3042` or `0x3042`.
///
/// # Errors
/// Returns [`GlyphError::InvalidCodePoint`] if the digits are not hex or do not
/// name a Unicode scalar value.
pub fn parse_code_point(arg: &str) -> Result<char, GlyphError> {
    let invalid = || GlyphError::InvalidCodePoint(arg.to_owned());

    let digits = arg.trim();
    let digits = digits
        .strip_prefix("U+")
        .or_else(|| digits.strip_prefix("u+"))
        .or_else(|| digits.strip_prefix("0x"))
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(digits);

    let codepoint = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    char::try_from(codepoint).map_err(|_| invalid())
}
