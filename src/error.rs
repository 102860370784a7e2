use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while assembling a run's configuration, and by the
/// asciifier.
///
/// Nothing in here is produced by the generator loop itself; once a
/// [`Config`](crate::Config) is validated, a run always goes to completion.
#[derive(Debug, Error)]
pub enum GlyphError {
    /// A canvas size that is not of the form `<width>x<height>`.
    #[error("invalid canvas size '{0}', expected <width>x<height> with positive integers")]
    InvalidCanvasSize(String),
    /// A code point specifier that is not hex, or not a Unicode scalar value.
    #[error("invalid code point '{0}', expected hex digits such as 20 or U+3042")]
    InvalidCodePoint(String),
    /// The range holds more code points than there are counter values left.
    #[error("{count} code points starting at counter {start} would run past {}", u32::MAX)]
    CounterOverflow {
        /// Configured first counter value.
        start: u32,
        /// Number of code points in the range.
        count: u64,
    },
    /// An output directory was given for a renderer that cannot use it.
    #[error("--output-dir is only supported by the native renderer")]
    OutputDirNeedsNative,
    /// The font file could not be parsed by the rasterizer.
    #[error("failed to parse font data from {}", .0.display())]
    Font(PathBuf),
    /// The config file extension maps to no supported format.
    #[error(
        "failed to deduce config format from path: {} (supported formats are: ron, json)",
        .0.display()
    )]
    UnsupportedConfigFormat(PathBuf),
    /// Reading a config or font file failed.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// Creating the output directory failed.
    #[error("failed to create directory {}: {source}", .path.display())]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The glyph directory holds no `<N>.png` files.
    #[error("no numbered glyph images found in {}", .0.display())]
    NoGlyphs(PathBuf),
    /// A glyph image does not have the dimensions of the others.
    #[error(
        "glyph {} is {}x{}, expected {}x{}",
        .path.display(), .found.0, .found.1, .expected.0, .expected.1
    )]
    GlyphSizeMismatch {
        /// The offending glyph image.
        path: PathBuf,
        /// Size of the first glyph.
        expected: (u32, u32),
        /// Size of this glyph.
        found: (u32, u32),
    },
    /// Decoding or encoding an image failed.
    #[cfg(feature = "image")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    /// Writing the generated commands failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    /// A RON config file did not parse.
    #[cfg(feature = "ron")]
    #[error("invalid RON config: {0}")]
    Ron(#[from] ron::error::SpannedError),
    /// A JSON config file did not parse.
    #[cfg(feature = "serde_json")]
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to produce the bitmap for a single glyph.
///
/// These are collected into a [`Report`](crate::Report) and never abort a run.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The shell or the rendering tool could not be launched.
    #[error("failed to launch renderer: {0}")]
    Spawn(#[source] io::Error),
    /// The rendering tool ran but did not exit successfully.
    #[error("renderer exited with {}", describe_exit(.0))]
    Exit(Option<i32>),
    /// Encoding or writing the image failed.
    #[cfg(feature = "raster")]
    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_owned(),
    }
}
