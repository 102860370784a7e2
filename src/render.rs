use std::path::PathBuf;
use std::process::Command;

use crate::{GlyphJob, RenderError};

/// Turns a [`GlyphJob`] into an image file.
///
/// Implementations run synchronously: the generator waits for each call to
/// return before moving on to the next code point.
pub trait Renderer {
    /// Renders one glyph and returns the path of the written image.
    ///
    /// # Errors
    /// Returns a [`RenderError`] describing why no image was produced. The
    /// generator records it and carries on.
    fn render(&mut self, job: &GlyphJob<'_>) -> Result<PathBuf, RenderError>;
}

/// Runs [`GlyphJob::command`] through the host shell.
///
/// Standard streams are inherited and the images land in the process'
/// working directory, wherever `convert` puts them.
#[derive(Clone, Copy, Debug, Default)]
pub struct ShellRenderer;

impl ShellRenderer {
    /// Creates a renderer that shells out to ImageMagick.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Renderer for ShellRenderer {
    fn render(&mut self, job: &GlyphJob<'_>) -> Result<PathBuf, RenderError> {
        let status = shell(&job.command()).status().map_err(RenderError::Spawn)?;
        if status.success() {
            Ok(PathBuf::from(job.file_name()))
        } else {
            Err(RenderError::Exit(status.code()))
        }
    }
}

#[cfg(windows)]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("cmd");
    command.arg("/C").arg(command_line);
    command
}

#[cfg(not(windows))]
fn shell(command_line: &str) -> Command {
    let mut command = Command::new("sh");
    command.arg("-c").arg(command_line);
    command
}
