//! Generates one bitmap per character of a Unicode range, numbered sequentially.
//!
//! For every code point from [`Config::first_code_point`] to
//! [`Config::last_code_point`] (inclusive) an ImageMagick command line is
//! printed that renders the character black on white, centred on a fixed
//! canvas, into `<counter>.png`. Optionally each command is also handed to a
//! [`Renderer`] right after it is printed.
//!
//! # Usage
//! ```
//! use glyph_gen::{generate_and_dispatch, Config, ShellRenderer};
//!
//! let config = Config { last_code_point: '!', ..Config::default() };
//! let mut out = Vec::new();
//! // Print only: the renderer is never invoked.
//! let report = generate_and_dispatch(&config, false, &mut ShellRenderer::new(), &mut out)?;
//!
//! assert_eq!(report.generated, 2);
//! assert_eq!(
//!     String::from_utf8(out).unwrap(),
//!     "convert -background white -fill black -font courier.ttf -gravity Center \
//!      -size 12x24 label:\" \" 32.png\n\
//!      convert -background white -fill black -font courier.ttf -gravity Center \
//!      -size 12x24 label:\"!\" 33.png\n",
//! );
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! ## Renderers
//! [`ShellRenderer`] runs the printed command through the host shell, so it
//! needs ImageMagick's `convert` on the `PATH`. With the `raster` feature,
//! `RasterRenderer` draws the glyphs in-process with `rusttype` instead.
//! Either way, a failing glyph is recorded in the [`Report`] and the run
//! carries on.
//!
//! ## Asciifying
//! With the `asciify` feature the numbered bitmaps can be put to use:
//! `GlyphSet::load` reads a directory of `<N>.png` glyphs and `asciify`
//! rebuilds a grayscale image block by block out of the best matching glyphs.

#![cfg_attr(docs_rs, feature(doc_cfg))]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]

mod command;
mod config;
mod error;
mod generator;
mod render;

pub use command::{jobs, GlyphJob};
pub use config::{parse_code_point, CanvasSize, Config};
pub use error::{GlyphError, RenderError};
pub use generator::{generate_and_dispatch, maybe_print_usage_hint, RenderFailure, Report};
pub use render::{Renderer, ShellRenderer};

#[cfg(feature = "raster")]
mod raster;

#[cfg(feature = "raster")]
#[cfg_attr(docs_rs, doc(cfg(feature = "raster")))]
pub use raster::RasterRenderer;

#[cfg(feature = "asciify")]
mod asciify;

#[cfg(feature = "asciify")]
#[cfg_attr(docs_rs, doc(cfg(feature = "asciify")))]
pub use asciify::{asciify, pad_to_blocks, Asciified, Divergence, Glyph, GlyphSet, Matcher};

#[cfg(feature = "bin")]
mod cli;

#[cfg(feature = "bin")]
pub use cli::{run, run_asciify, Args, AsciifyArgs, Backend, DivergenceArg, MatchMode};
