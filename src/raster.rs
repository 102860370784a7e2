use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use rusttype::{point, Font, Scale};

use crate::{GlyphError, GlyphJob, RenderError, Renderer};

const BACKGROUND: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

/// Rasterizes glyphs in-process with `rusttype`, without ImageMagick.
///
/// Each glyph is drawn black on a white canvas at a pixel height of
/// `min(width, height)` and centred on its pixel bounding box. The font
/// passed in the [`GlyphJob`] is ignored; the one loaded here is used.
pub struct RasterRenderer {
    font: Font<'static>,
    output_dir: PathBuf,
}

impl RasterRenderer {
    /// Wraps an already parsed font. Images are written to `output_dir`.
    #[must_use]
    pub fn new(font: Font<'static>, output_dir: impl Into<PathBuf>) -> Self {
        Self { font, output_dir: output_dir.into() }
    }

    /// Loads a TrueType/OpenType font from disk and writes images to the
    /// current directory.
    ///
    /// # Errors
    /// Fails if the file cannot be read or does not contain a usable font.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, GlyphError> {
        let path = path.as_ref();
        let font_data = std::fs::read(path)
            .map_err(|source| GlyphError::Read { path: path.to_owned(), source })?;
        let font =
            Font::try_from_vec(font_data).ok_or_else(|| GlyphError::Font(path.to_owned()))?;
        Ok(Self::new(font, "."))
    }

    /// Writes images to `output_dir` instead. The directory must exist.
    #[must_use]
    pub fn with_output_dir(self, output_dir: impl Into<PathBuf>) -> Self {
        Self { output_dir: output_dir.into(), ..self }
    }

    /// Draws the glyph for `job` without saving it.
    #[must_use]
    pub fn rasterize(&self, job: &GlyphJob<'_>) -> RgbImage {
        let width = job.canvas.width;
        let height = job.canvas.height;
        let mut canvas = RgbImage::from_pixel(width, height, BACKGROUND);

        #[allow(clippy::cast_precision_loss)]
        let scale = Scale::uniform(width.min(height) as f32);
        let glyph = self.font.glyph(job.character).scaled(scale).positioned(point(0.0, 0.0));

        let Some(bounding_box) = glyph.pixel_bounding_box() else {
            if !job.character.is_whitespace() {
                log::debug!("no outline for U+{:04X}, leaving canvas blank", job.character as u32);
            }
            return canvas;
        };

        #[allow(clippy::cast_possible_wrap)]
        let (canvas_w, canvas_h) = (width as i32, height as i32);
        let offset_x = (canvas_w - bounding_box.width()) / 2;
        let offset_y = (canvas_h - bounding_box.height()) / 2;

        glyph.draw(|x, y, coverage| {
            #[allow(clippy::cast_possible_wrap)]
            let (x, y) = (offset_x + x as i32, offset_y + y as i32);
            if x < 0 || y < 0 || x >= canvas_w || y >= canvas_h {
                return;
            }

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let shade = (255.0 - coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
            #[allow(clippy::cast_sign_loss)]
            let pixel = canvas.get_pixel_mut(x as u32, y as u32);
            *pixel = Rgb([shade; 3]);
        });

        canvas
    }
}

impl Renderer for RasterRenderer {
    fn render(&mut self, job: &GlyphJob<'_>) -> Result<PathBuf, RenderError> {
        let path = self.output_dir.join(job.file_name());
        self.rasterize(job).save(&path)?;
        Ok(path)
    }
}
