//! End-to-end tests of the `ttf2png` and `asciify` binaries.

use std::path::Path;
use std::process::{Command, Output};

fn ttf2png(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ttf2png"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute ttf2png")
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout).lines().map(str::to_owned).collect()
}

fn is_hint(line: &str) -> bool {
    line.starts_with("If you want to execute these commands, try this: ")
}

#[test]
fn print_only_lists_ascii_and_hints_once() {
    let dir = tempfile::tempdir().unwrap();
    let output = ttf2png(dir.path(), &[]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 96);
    assert_eq!(lines.iter().filter(|line| is_hint(line)).count(), 1);
    assert!(is_hint(&lines[95]));
    assert!(lines[95].contains("ttf2png"));
    assert!(lines[95].ends_with(" 1"));

    assert_eq!(
        lines[0],
        "convert -background white -fill black -font courier.ttf -gravity Center -size 12x24 label:\" \" 32.png"
    );
    for (line, counter) in lines[..95].iter().zip(32..=126) {
        assert!(line.starts_with("convert "), "{line}");
        assert!(line.ends_with(&format!(" {counter}.png")), "{line}");
    }

    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn empty_argument_still_prints_only() {
    let dir = tempfile::tempdir().unwrap();
    let output = ttf2png(dir.path(), &[""]);
    assert!(output.status.success());
    assert!(is_hint(stdout_lines(&output).last().unwrap()));
}

#[test]
fn start_counter_shifts_every_file() {
    let dir = tempfile::tempdir().unwrap();
    let base = stdout_lines(&ttf2png(dir.path(), &[]));
    let shifted = stdout_lines(&ttf2png(dir.path(), &["--start", "1000"]));

    assert_eq!(base.len(), shifted.len());
    for (i, (a, b)) in base[..95].iter().zip(&shifted[..95]).enumerate() {
        let a_file = format!(" {}.png", 32 + i);
        let b_file = format!(" {}.png", 1000 + i);
        assert_eq!(a.strip_suffix(&a_file), b.strip_suffix(&b_file));
    }
}

#[test]
fn inverted_range_prints_only_the_hint() {
    let dir = tempfile::tempdir().unwrap();
    let output = ttf2png(dir.path(), &["--first", "7e", "--last", "20"]);
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(is_hint(&lines[0]));
}

#[test]
fn invalid_options_fail_before_printing() {
    let dir = tempfile::tempdir().unwrap();
    let output = ttf2png(dir.path(), &["--size", "wide"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let output = ttf2png(dir.path(), &["--config", "glyphs.yaml"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("supported formats are: ron, json"));
}

// With an empty PATH neither the shell nor `convert` can be found, which
// must go unnoticed: every command is still printed and the run succeeds.
#[cfg(unix)]
#[test]
fn execute_ignores_a_missing_renderer() {
    let dir = tempfile::tempdir().unwrap();
    let empty_path = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_ttf2png"))
        .arg("1")
        .current_dir(dir.path())
        .env("PATH", empty_path.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute ttf2png");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 95);
    assert!(!lines.iter().any(|line| is_hint(line)));
    assert!(lines[94].ends_with("label:\"~\" 126.png"));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn execute_runs_each_command_in_order() {
    use std::os::unix::fs::PermissionsExt;

    // A stand-in `convert` that just creates the file named by its last argument.
    let dir = tempfile::tempdir().unwrap();
    let bin = tempfile::tempdir_in(env!("CARGO_TARGET_TMPDIR")).unwrap();
    let fake = bin.path().join("convert");
    std::fs::write(&fake, "#!/bin/sh\nfor last; do :; done\n: > \"$last\"\n").unwrap();
    std::fs::set_permissions(&fake, std::fs::Permissions::from_mode(0o755)).unwrap();

    let path = format!("{}:{}", bin.path().display(), std::env::var("PATH").unwrap_or_default());
    let output = Command::new(env!("CARGO_BIN_EXE_ttf2png"))
        .args(["yes", "--first", "41", "--last", "5a"])
        .current_dir(dir.path())
        .env("PATH", path)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute ttf2png");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 26);
    assert!(!lines.iter().any(|line| is_hint(line)));

    let mut files: Vec<String> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    files.sort_by_key(|name| name.trim_end_matches(".png").parse::<u32>().unwrap());
    let expected: Vec<String> = (65..=90).map(|n| format!("{n}.png")).collect();
    assert_eq!(files, expected);
}

#[test]
fn native_glyphs_feed_the_asciifier() {
    let dir = tempfile::tempdir().unwrap();
    let font = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fonts/DejaVuSansMono.ttf");
    let output = ttf2png(
        dir.path(),
        &["1", "-r", "native", "-f", font, "-o", "glyphs", "--first", "20", "--last", "2e"],
    );
    assert!(output.status.success());
    assert!(dir.path().join("glyphs/32.png").is_file());

    // Two glyph blocks side by side: white on the left, black on the right.
    let mut input = image::GrayImage::from_pixel(24, 24, image::Luma([255]));
    for y in 0..24 {
        for x in 12..24 {
            input.put_pixel(x, y, image::Luma([0]));
        }
    }
    input.save(dir.path().join("input.png")).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_asciify"))
        .args(["input.png", "output.png", "--text"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute asciify");
    assert!(output.status.success());

    let lines = stdout_lines(&output);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with(' '), "{lines:?}");
    assert_eq!(lines[0].chars().count(), 2);
    let tiled = image::open(dir.path().join("output.png")).unwrap().to_luma8();
    assert_eq!(tiled.dimensions(), (24, 24));
}

#[test]
fn asciify_reports_a_missing_glyph_dir() {
    let dir = tempfile::tempdir().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_asciify"))
        .args(["input.png", "output.png", "-g", "nowhere"])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute asciify");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).starts_with("Error: "));
}
