use std::path::{Path, PathBuf};

use image::{imageops, GrayImage, Luma};

use crate::GlyphError;

const PAD: Luma<u8> = Luma([0xFF]);

/// One numbered glyph bitmap, as written by a renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyph {
    /// The number in the glyph's file name.
    pub counter: u32,
    /// Grayscale pixels.
    pub pixels: GrayImage,
}

impl Glyph {
    /// The character this glyph stands for, assuming the counter is its code
    /// point (true for the default numbering).
    #[must_use]
    pub fn character(&self) -> Option<char> {
        char::from_u32(self.counter)
    }
}

/// Glyphs of equal size, ordered by counter.
#[derive(Clone, Debug)]
pub struct GlyphSet {
    glyphs: Vec<Glyph>,
    width: u32,
    height: u32,
}

impl GlyphSet {
    /// Sorts `glyphs` by counter and checks that they all share one size.
    ///
    /// # Errors
    /// [`GlyphError::NoGlyphs`] for an empty list,
    /// [`GlyphError::GlyphSizeMismatch`] if sizes differ.
    pub fn new(mut glyphs: Vec<Glyph>) -> Result<Self, GlyphError> {
        glyphs.sort_by_key(|glyph| glyph.counter);

        let Some(first) = glyphs.first() else {
            return Err(GlyphError::NoGlyphs(PathBuf::new()));
        };
        let (width, height) = first.pixels.dimensions();

        let odd = glyphs.iter().find(|glyph| glyph.pixels.dimensions() != (width, height));
        if let Some(odd) = odd {
            return Err(GlyphError::GlyphSizeMismatch {
                path: PathBuf::from(format!("{}.png", odd.counter)),
                expected: (width, height),
                found: odd.pixels.dimensions(),
            });
        }

        Ok(Self { glyphs, width, height })
    }

    /// Loads every `<N>.png` in `dir`, converted to grayscale. Other files
    /// are skipped.
    ///
    /// # Errors
    /// Fails if the directory or an image cannot be read, if no glyph is
    /// found, or if the glyphs differ in size.
    pub fn load(dir: &Path) -> Result<Self, GlyphError> {
        let read_err = |source| GlyphError::Read { path: dir.to_owned(), source };

        let mut glyphs = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(read_err)? {
            let path = entry.map_err(read_err)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("png") {
                continue;
            }
            let Some(counter) = path.file_stem().and_then(|stem| stem.to_str()?.parse::<u32>().ok())
            else {
                log::debug!("skipping {}, not a numbered glyph", path.display());
                continue;
            };

            glyphs.push(Glyph { counter, pixels: image::open(&path)?.to_luma8() });
        }

        if glyphs.is_empty() {
            return Err(GlyphError::NoGlyphs(dir.to_owned()));
        }
        log::info!("found {} glyphs in {}", glyphs.len(), dir.display());

        Self::new(glyphs).map_err(|err| match err {
            GlyphError::GlyphSizeMismatch { path, expected, found } => {
                GlyphError::GlyphSizeMismatch { path: dir.join(path), expected, found }
            }
            other => other,
        })
    }

    /// The glyphs, ordered by counter.
    #[must_use]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Width and height shared by all glyphs.
    #[must_use]
    pub fn glyph_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// How the divergence between a block and its glyph reconstruction is
/// measured by [`Matcher::Factorize`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Divergence {
    /// Squared Euclidean distance (beta = 2).
    #[default]
    SquaredEuclidean,
    /// Kullback-Leibler divergence (beta = 1).
    KullbackLeibler,
}

impl Divergence {
    fn beta(self) -> f32 {
        match self {
            Self::SquaredEuclidean => 2.0,
            Self::KullbackLeibler => 1.0,
        }
    }
}

/// Strategy for picking the glyph of each image block.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Matcher {
    /// The glyph with the smallest squared pixel distance to the block.
    #[default]
    Nearest,
    /// Non-negative factorization of the block over the unit-normalized
    /// glyphs with multiplicative beta-divergence updates; the glyph with the
    /// largest activation wins.
    Factorize {
        /// Number of update rounds.
        iterations: u32,
        /// Divergence minimized by the updates.
        divergence: Divergence,
    },
}

/// An image rebuilt from glyphs.
#[derive(Clone, Debug)]
pub struct Asciified {
    /// Glyph bitmaps tiled over the padded input.
    pub image: GrayImage,
    /// Blocks per row.
    pub columns: u32,
    /// Blocks per column.
    pub rows: u32,
    /// Counter of the glyph chosen for each block, row by row.
    pub counters: Vec<u32>,
}

impl Asciified {
    /// The chosen glyphs as text, one line per block row. Counters that are
    /// not code points show up as `?`.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for row in self.counters.chunks(self.columns.max(1) as usize) {
            text.extend(row.iter().map(|&counter| char::from_u32(counter).unwrap_or('?')));
            text.push('\n');
        }
        text
    }
}

/// Leading and trailing padding that rounds `extent` up to a multiple of `block`.
fn padding(extent: u32, block: u32) -> (u32, u32) {
    match extent % block {
        0 => (0, 0),
        rest => {
            let remainder = block - rest;
            (remainder / 2, remainder / 2 + remainder % 2)
        }
    }
}

/// Pads `image` with white so both sides are multiples of the block size,
/// splitting the padding evenly (the odd pixel goes right and bottom).
#[must_use]
pub fn pad_to_blocks(image: &GrayImage, block_width: u32, block_height: u32) -> GrayImage {
    let (width, height) = image.dimensions();
    let (left, right) = padding(width, block_width);
    let (top, bottom) = padding(height, block_height);
    log::debug!("padding by top {top}, bottom {bottom}, left {left}, right {right}");

    let mut padded = GrayImage::from_pixel(width + left + right, height + top + bottom, PAD);
    imageops::replace(&mut padded, image, i64::from(left), i64::from(top));
    padded
}

fn block_vector(image: &GrayImage, x0: u32, y0: u32, width: u32, height: u32) -> Vec<f32> {
    let mut vector = Vec::with_capacity((width * height) as usize);
    for y in y0..y0 + height {
        for x in x0..x0 + width {
            vector.push(f32::from(image.get_pixel(x, y).0[0]));
        }
    }
    vector
}

fn nearest(block: &[f32], glyphs: &[Vec<f32>]) -> usize {
    let mut best = (0, f32::INFINITY);
    for (index, glyph) in glyphs.iter().enumerate() {
        let distance: f32 = block.iter().zip(glyph).map(|(a, b)| (a - b) * (a - b)).sum();
        if distance < best.1 {
            best = (index, distance);
        }
    }
    best.0
}

/// Multiplicative updates of the activations `h` for `block ~ W h`, with the
/// columns of `W` given as `basis`. Non-finite ratios reset an activation to 0.
fn factorize(block: &[f32], basis: &[Vec<f32>], iterations: u32, beta: f32) -> usize {
    let mut activations = vec![1.0_f32; basis.len()];
    let mut numerator = vec![0.0_f32; block.len()];
    let mut denominator = vec![0.0_f32; block.len()];

    for _ in 0..iterations {
        for (d, &value) in block.iter().enumerate() {
            let approx: f32 =
                basis.iter().zip(&activations).map(|(column, h)| column[d] * h).sum();
            // Zero pixels contribute nothing, even where the reconstruction is zero too.
            numerator[d] = if value == 0.0 { 0.0 } else { value * approx.powf(beta - 2.0) };
            denominator[d] = approx.powf(beta - 1.0);
        }
        for (column, h) in basis.iter().zip(activations.iter_mut()) {
            let up: f32 = column.iter().zip(&numerator).map(|(w, n)| w * n).sum();
            let down: f32 = column.iter().zip(&denominator).map(|(w, n)| w * n).sum();
            let ratio = up / down;
            *h = if ratio.is_finite() { *h * ratio } else { 0.0 };
        }
    }

    let mut best = (0, f32::NEG_INFINITY);
    for (index, &h) in activations.iter().enumerate() {
        if h > best.1 {
            best = (index, h);
        }
    }
    best.0
}

fn normalized(mut vector: Vec<f32>) -> Vec<f32> {
    let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
    if norm > 0.0 {
        vector.iter_mut().for_each(|v| *v /= norm);
    }
    vector
}

/// Rebuilds `image` from `glyphs`, one glyph per block of glyph size.
#[must_use]
pub fn asciify(image: &GrayImage, glyphs: &GlyphSet, matcher: Matcher) -> Asciified {
    let (block_width, block_height) = glyphs.glyph_size();
    let padded = pad_to_blocks(image, block_width, block_height);
    let columns = padded.width() / block_width;
    let rows = padded.height() / block_height;
    log::info!(
        "matching {columns} x {rows} blocks of {block_width} x {block_height} against {} glyphs",
        glyphs.glyphs().len()
    );

    let vectors: Vec<Vec<f32>> = glyphs
        .glyphs()
        .iter()
        .map(|glyph| block_vector(&glyph.pixels, 0, 0, block_width, block_height))
        .collect();
    let basis: Vec<Vec<f32>> = match matcher {
        Matcher::Nearest => Vec::new(),
        Matcher::Factorize { .. } => vectors.iter().cloned().map(normalized).collect(),
    };

    let mut output = GrayImage::from_pixel(padded.width(), padded.height(), PAD);
    let mut counters = Vec::with_capacity((columns * rows) as usize);
    for row in 0..rows {
        for column in 0..columns {
            let (x, y) = (column * block_width, row * block_height);
            let block = block_vector(&padded, x, y, block_width, block_height);
            let index = match matcher {
                Matcher::Nearest => nearest(&block, &vectors),
                Matcher::Factorize { iterations, divergence } => {
                    factorize(&block, &basis, iterations, divergence.beta())
                }
            };

            let glyph = &glyphs.glyphs()[index];
            imageops::replace(&mut output, &glyph.pixels, i64::from(x), i64::from(y));
            counters.push(glyph.counter);
        }
    }

    Asciified { image: output, columns, rows, counters }
}
