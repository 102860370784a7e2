use std::process::ExitCode;

use clap::Parser;

use glyph_gen::{run_asciify, AsciifyArgs};

fn main() -> ExitCode {
    env_logger::init();
    let args = AsciifyArgs::parse();

    let stdout = std::io::stdout();
    match run_asciify(&args, &mut stdout.lock()) {
        Ok(result) => {
            log::info!("{}x{} glyphs placed", result.columns, result.rows);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
