use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::{
    asciify, generate_and_dispatch, maybe_print_usage_hint, parse_code_point, Asciified,
    CanvasSize, Config, Divergence, GlyphError, GlyphSet, Matcher, RasterRenderer, Renderer,
    Report, ShellRenderer,
};

/// Command line of the `ttf2png` binary.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Any non-empty value runs the printed commands instead of only printing them.
    /// Values starting with `-` count too, unless they spell one of the options below
    #[arg(allow_hyphen_values = true)]
    pub execute: Option<String>,
    /// Font name or path passed to the renderer [default: courier.ttf]
    #[arg(short, long)]
    pub font: Option<String>,
    /// Canvas size in points, written as <width>x<height> [default: 12x24]
    #[arg(short, long, value_parser = parse_canvas_size)]
    pub size: Option<CanvasSize>,
    /// First code point in hex, inclusive [default: 20]
    #[arg(long, value_parser = parse_code_point_arg)]
    pub first: Option<char>,
    /// Last code point in hex, inclusive [default: 7e]
    #[arg(long, value_parser = parse_code_point_arg)]
    pub last: Option<char>,
    /// Number used as the file name of the first glyph [default: 32]
    #[arg(long)]
    pub start: Option<u32>,
    /// RON or JSON file providing defaults for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// What renders the glyphs when executing
    #[arg(short, long, value_enum, default_value_t = Backend::Convert)]
    pub renderer: Backend,
    /// Directory the native renderer writes into, created when executing
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
}

/// Renderer selectable from the command line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Run the printed ImageMagick command through the shell
    #[default]
    Convert,
    /// Rasterize in-process with rusttype; `--font` must be a font file path
    Native,
}

impl Args {
    /// Whether the positional argument asks for execution.
    #[must_use]
    pub fn execute(&self) -> bool {
        self.execute.as_deref().is_some_and(|value| !value.is_empty())
    }

    /// Layers the config file (if any) and then the command-line overrides
    /// over [`Config::default`].
    ///
    /// # Errors
    /// Fails if the config file cannot be read or parsed, or if the counter
    /// would overflow.
    pub fn config(&self) -> Result<Config, GlyphError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => Config::default(),
        };

        if let Some(font) = &self.font {
            config.font.clone_from(font);
        }
        if let Some(size) = self.size {
            config.canvas_size = size;
        }
        if let Some(first) = self.first {
            config.first_code_point = first;
        }
        if let Some(last) = self.last {
            config.last_code_point = last;
        }
        if let Some(start) = self.start {
            config.start_counter = start;
        }

        config.validate()?;
        Ok(config)
    }

    fn renderer(&self, config: &Config, execute: bool) -> Result<Box<dyn Renderer>, GlyphError> {
        match (self.renderer, &self.output_dir) {
            (Backend::Convert, Some(_)) => Err(GlyphError::OutputDirNeedsNative),
            (Backend::Native, output_dir) if execute => {
                let mut renderer = RasterRenderer::from_file(&config.font)?;
                if let Some(dir) = output_dir {
                    std::fs::create_dir_all(dir)
                        .map_err(|source| GlyphError::CreateDir { path: dir.clone(), source })?;
                    renderer = renderer.with_output_dir(dir);
                }
                Ok(Box::new(renderer))
            }
            _ => Ok(Box::new(ShellRenderer::new())),
        }
    }
}

/// Runs the generator as the `ttf2png` binary does, writing to `out`.
///
/// `program` is the name shown in the usage hint after a print-only run.
///
/// # Errors
/// Fails on configuration problems, on an unloadable font for the native
/// renderer, or when `out` cannot be written. Failed glyphs are not errors.
pub fn run<W: Write + ?Sized>(
    args: &Args,
    program: &str,
    out: &mut W,
) -> Result<Report, GlyphError> {
    let config = args.config()?;
    let execute = args.execute();
    let mut renderer = args.renderer(&config, execute)?;
    log::info!(
        "{} U+{:04X}..=U+{:04X} with {} at {}, counter from {}",
        if execute { "rendering" } else { "printing" },
        config.first_code_point as u32,
        config.last_code_point as u32,
        config.font,
        config.canvas_size,
        config.start_counter,
    );

    let report = generate_and_dispatch(&config, execute, renderer.as_mut(), out)?;
    maybe_print_usage_hint(out, execute, program)?;
    out.flush()?;

    Ok(report)
}

/// Command line of the `asciify` binary.
#[derive(Parser, Debug)]
#[command(name = "asciify", author, version, long_about = None)]
#[command(about = "Rebuilds a PNG image out of numbered glyph bitmaps")]
pub struct AsciifyArgs {
    /// PNG image to convert
    pub image: PathBuf,
    /// Where the glyph-tiled image is written
    pub output: PathBuf,
    /// Directory holding the <N>.png glyphs
    #[arg(short, long, default_value = "glyphs")]
    pub glyphs_dir: PathBuf,
    /// How each block picks its glyph
    #[arg(short, long, value_enum, default_value_t = MatchMode::Nearest)]
    pub matcher: MatchMode,
    /// Divergence minimized by the factorize matcher
    #[arg(short, long, value_enum, default_value_t = DivergenceArg::Sed)]
    pub divergence: DivergenceArg,
    /// Update rounds of the factorize matcher
    #[arg(short, long, default_value_t = 1000)]
    pub iterations: u32,
    /// Also print the chosen characters as text
    #[arg(short, long)]
    pub text: bool,
}

/// Glyph matcher selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum MatchMode {
    /// Smallest squared pixel distance
    Nearest,
    /// Non-negative factorization over the glyphs
    Factorize,
}

/// Divergence selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum DivergenceArg {
    /// Squared Euclidean distance
    Sed,
    /// Kullback-Leibler divergence
    Kld,
}

impl AsciifyArgs {
    /// The matcher described by the flags.
    #[must_use]
    pub fn matcher(&self) -> Matcher {
        let divergence = match self.divergence {
            DivergenceArg::Sed => Divergence::SquaredEuclidean,
            DivergenceArg::Kld => Divergence::KullbackLeibler,
        };
        match self.matcher {
            MatchMode::Nearest => Matcher::Nearest,
            MatchMode::Factorize => Matcher::Factorize { iterations: self.iterations, divergence },
        }
    }
}

/// Runs the asciifier as the `asciify` binary does. With `--text` the
/// characters are written to `out`.
///
/// # Errors
/// Fails if the input image or the glyphs cannot be loaded, or the output
/// cannot be written.
pub fn run_asciify<W: Write + ?Sized>(
    args: &AsciifyArgs,
    out: &mut W,
) -> Result<Asciified, GlyphError> {
    let glyphs = GlyphSet::load(&args.glyphs_dir)?;
    let image = image::open(&args.image)?.to_luma8();
    let (width, height) = image.dimensions();
    log::info!("converted {} to grayscale, {width}x{height}", args.image.display());

    let result = asciify(&image, &glyphs, args.matcher());
    result.image.save(&args.output)?;
    log::info!("wrote {}", args.output.display());

    if args.text {
        out.write_all(result.to_text().as_bytes())?;
        out.flush()?;
    }
    Ok(result)
}

fn load_config(path: &Path) -> Result<Config, GlyphError> {
    let read = || {
        std::fs::read_to_string(path)
            .map_err(|source| GlyphError::Read { path: path.to_owned(), source })
    };

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ron") => Ok(ron::from_str(&read()?)?),
        Some("json") => Ok(serde_json::from_str(&read()?)?),
        _ => Err(GlyphError::UnsupportedConfigFormat(path.to_owned())),
    }
}

fn parse_canvas_size(arg: &str) -> Result<CanvasSize, GlyphError> {
    arg.parse()
}

fn parse_code_point_arg(arg: &str) -> Result<char, GlyphError> {
    parse_code_point(arg)
}
