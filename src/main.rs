use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use glyph_gen::{run, Args};

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let program = std::env::args_os()
        .next()
        .and_then(|arg0| {
            Path::new(&arg0).file_name().map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| "ttf2png".to_owned());

    let stdout = std::io::stdout();
    match run(&args, &program, &mut stdout.lock()) {
        Ok(report) => {
            // Failed glyphs never change the outcome of a run.
            if !report.failures.is_empty() {
                let failed = report.failures.len();
                log::info!("{failed} of {} glyphs failed to render", report.generated);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
