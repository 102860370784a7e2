use std::io::{self, Write};
use std::path::PathBuf;

use crate::{jobs, Config, RenderError, Renderer};

/// A glyph whose renderer reported an error.
#[derive(Debug)]
pub struct RenderFailure {
    /// The character that was being rendered.
    pub character: char,
    /// Its file name counter.
    pub counter: u32,
    /// What went wrong.
    pub error: RenderError,
}

/// Summary of one generator pass.
#[derive(Debug, Default)]
pub struct Report {
    /// Number of commands printed.
    pub generated: usize,
    /// Images the renderer reported as written, in order.
    pub rendered: Vec<PathBuf>,
    /// Glyphs the renderer failed on, in order.
    pub failures: Vec<RenderFailure>,
}

/// Prints the command for every code point of `config` to `out` and, if
/// `execute` is set, hands each job to `renderer` right after printing it.
///
/// Render failures are logged and collected in the returned [`Report`]; they
/// never stop the pass. In print-only mode the renderer is not touched.
///
/// # Errors
/// Only a failure to write to `out` is returned.
pub fn generate_and_dispatch<R, W>(
    config: &Config,
    execute: bool,
    renderer: &mut R,
    out: &mut W,
) -> io::Result<Report>
where
    R: Renderer + ?Sized,
    W: Write + ?Sized,
{
    let mut report = Report::default();

    for job in jobs(config) {
        writeln!(out, "{}", job.command())?;
        report.generated += 1;

        if !execute {
            continue;
        }

        // Keep printed commands ahead of whatever the child writes.
        out.flush()?;
        log::debug!("rendering U+{:04X} to {}", job.character as u32, job.file_name());
        match renderer.render(&job) {
            Ok(path) => report.rendered.push(path),
            Err(error) => {
                log::warn!("U+{:04X} ({}): {error}", job.character as u32, job.file_name());
                report.failures.push(RenderFailure {
                    character: job.character,
                    counter: job.counter,
                    error,
                });
            }
        }
    }

    log::info!(
        "{} commands generated, {} rendered, {} failed",
        report.generated,
        report.rendered.len(),
        report.failures.len()
    );

    Ok(report)
}

/// After a print-only run, tells the user how to run the commands for real.
///
/// # Errors
/// Propagates write errors on `out`.
pub fn maybe_print_usage_hint<W: Write + ?Sized>(
    out: &mut W,
    execute: bool,
    program: &str,
) -> io::Result<()> {
    if execute {
        return Ok(());
    }
    writeln!(out, "If you want to execute these commands, try this: {program} 1")
}
