use crate::{CanvasSize, Config};

/// Everything needed to render one glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GlyphJob<'a> {
    /// The character to render.
    pub character: char,
    /// Sequence number used as the output file name.
    pub counter: u32,
    /// Font name or path.
    pub font: &'a str,
    /// Target canvas.
    pub canvas: CanvasSize,
}

impl GlyphJob<'_> {
    /// Output file name, e.g. `32.png`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.png", self.counter)
    }

    /// The ImageMagick invocation producing this glyph.
    ///
    /// The character is placed between double quotes verbatim, so a `"` or
    /// `\` glyph yields a command the shell will mangle.
    #[must_use]
    pub fn command(&self) -> String {
        format!(
            "convert -background white -fill black -font {} -gravity Center -size {} label:\"{}\" {}",
            self.font,
            self.canvas,
            self.character,
            self.file_name(),
        )
    }
}

/// One job per code point of `config`, numbered consecutively from
/// `start_counter`.
///
/// Numbering never wraps: once `u32::MAX` has been handed out the iterator
/// ends, even if code points remain. [`Config::validate`] rejects such ranges
/// up front.
pub fn jobs(config: &Config) -> impl Iterator<Item = GlyphJob<'_>> + '_ {
    config.code_points().scan(Some(config.start_counter), move |next, character| {
        let counter = (*next)?;
        *next = counter.checked_add(1);
        Some(GlyphJob { character, counter, font: &config.font, canvas: config.canvas_size })
    })
}
