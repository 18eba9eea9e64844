//! Interactive read-eval-print loop and batch reporting.
//!
//! The shell is generic over its input and output streams so it can be driven
//! from a terminal or from a test buffer.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::command::{parse_command, BatchRequest, Command};
use crate::engine::{process_batch_with, BatchResult, FileOutcome};
use crate::error::Error;
use crate::input::expand_input;

/// Maximum number of files listed by `preview`.
const PREVIEW_LIMIT: usize = 20;

const BANNER: &str = r"
  ___                 _____           _
 |_ _|_ __ ___   __ _|_   _|__   ___ | |
  | || '_ ` _ \ / _` | | |/ _ \ / _ \| |
  | || | | | | | (_| | | | (_) | (_) | |
 |___|_| |_| |_|\__, | |_|\___/ \___/|_|
                |___/
";

const COMMANDS: &[(&str, &str)] = &[
    ("magic", "All-in-one: resize + remove colors (shortcut)"),
    ("process", "Process images with all options (advanced)"),
    ("resize", "Quick resize only"),
    ("remove-color", "Quick remove color only"),
    ("preview", "Preview files matching pattern"),
    ("help", "Show available commands"),
    ("examples", "Show usage examples"),
    ("clear", "Clear screen"),
    ("exit", "Exit the shell"),
    ("quit", "Exit the shell"),
];

const FLAGS: &[(&str, &str)] = &[
    ("--input", "Input pattern (e.g., ./icons/*.png)"),
    ("--output", "Output directory"),
    ("--size", "Target size (default: 48)"),
    ("--remove-color", "HEX colors to remove"),
    ("--tolerance", "Color tolerance 0-255 (default: 0)"),
    ("--keep-aspect", "Keep aspect ratio"),
    ("--suffix", "Filename suffix (e.g., _48)"),
    ("--overwrite", "Overwrite existing files"),
];

const EXAMPLES: &[(&str, &str)] = &[
    (
        "MAGIC: All-in-one (resize + remove colors)",
        "magic ./icons/*.png ./output 64 #FFFFFF,#000000 10",
    ),
    ("MAGIC: Single file only", "magic ./photo.png ./output 512 #FFFFFF 10"),
    ("Preview files before processing", "preview ./images/**/*.png"),
    ("Quick resize to 64x64", "resize ./icons/*.png ./output 64"),
    (
        "Quick remove white background",
        "remove-color ./images/*.png ./output #FFFFFF",
    ),
    (
        "Advanced: Resize with all options",
        "process --input ./icons/*.png --output ./output --size 48 --keep-aspect",
    ),
    (
        "Advanced: Remove multiple colors with tolerance",
        "process --input ./raw/*.png --output ./output --remove-color #FF00FF,#000000 --tolerance 10",
    ),
];

/// Run the interactive shell until `exit`/`quit` or end of input.
///
/// Command errors are reported and the loop continues.
///
/// # Errors
///
/// Returns an error only when reading `input` or writing `out` fails.
pub fn run_shell<R: BufRead, W: Write>(mut input: R, out: &mut W) -> io::Result<()> {
    print_banner(out)?;

    let mut line = String::new();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out, "\nGoodbye!")?;
            return Ok(());
        }

        match parse_command(&line) {
            Ok(Command::Exit) => {
                writeln!(out, "\nThanks for using imgtool!\n")?;
                return Ok(());
            }
            Ok(command) => execute(command, out)?,
            Err(e) => writeln!(out, "X Error: {e}")?,
        }
    }
}

fn execute<W: Write>(command: Command, out: &mut W) -> io::Result<()> {
    match command {
        Command::Empty | Command::Exit => Ok(()),
        Command::Help => print_help(out),
        Command::Examples => print_examples(out),
        Command::Clear => {
            write!(out, "\x1b[2J\x1b[H")?;
            print_banner(out)
        }
        Command::Preview(pattern) => preview(&pattern, out),
        Command::Batch(request) => run_batch(&request, out).map(|_| ()),
        Command::Usage(usage) => writeln!(out, "Usage: {usage}"),
        Command::Unknown(word) => {
            writeln!(out, "\nX Unknown command: {word}")?;
            writeln!(out, "Type help for available commands\n")
        }
    }
}

/// Expand the request's input, process every file and report progress to `out`.
///
/// Returns `None` when the input matched nothing (or was malformed), after
/// reporting it.
///
/// # Errors
///
/// Returns an error only when writing to `out` fails.
pub fn run_batch<W: Write>(
    request: &BatchRequest,
    out: &mut W,
) -> io::Result<Option<BatchResult>> {
    let files = match expand_input(&request.input) {
        Ok(files) => files,
        Err(e @ Error::NoInputFiles(_)) => {
            writeln!(out, "! {e}")?;
            return Ok(None);
        }
        Err(e) => {
            writeln!(out, "X Error: {e}")?;
            return Ok(None);
        }
    };

    report_batch(&files, request, out).map(Some)
}

/// Process an already expanded file list, writing the configuration summary,
/// one status line per file and the final tally to `out`.
///
/// # Errors
///
/// Returns an error only when writing to `out` fails.
pub fn report_batch<W: Write>(
    files: &[PathBuf],
    request: &BatchRequest,
    out: &mut W,
) -> io::Result<BatchResult> {
    let opts = &request.options;
    writeln!(out, "Processing configuration")?;
    writeln!(out, "  Files found: {}", files.len())?;
    match opts.size {
        Some(size) => writeln!(out, "  Target size: {size}x{size}")?,
        None => writeln!(out, "  Target size: original")?,
    }
    if !opts.colors.is_empty() {
        let colors: Vec<String> = opts.colors.iter().map(ToString::to_string).collect();
        writeln!(out, "  Removing colors: {}", colors.join(", "))?;
    }
    if opts.keep_aspect {
        writeln!(out, "  Mode: Keep aspect ratio")?;
    }

    let mut write_error = None;
    let result = process_batch_with(files, &request.output, opts, |path, outcome| {
        if write_error.is_none() {
            if let Err(e) = report_file(out, path, outcome) {
                write_error = Some(e);
            }
        }
    });
    if let Some(e) = write_error {
        return Err(e);
    }

    let output_dir =
        std::path::absolute(&request.output).unwrap_or_else(|_| request.output.clone());
    writeln!(out, "Success: {}/{} files", result.succeeded, result.total)?;
    writeln!(out, "Output: {}", output_dir.display())?;

    Ok(result)
}

fn report_file<W: Write>(out: &mut W, path: &Path, outcome: &FileOutcome) -> io::Result<()> {
    let name = display_name(path);
    match outcome {
        FileOutcome::Written(_) => writeln!(out, "[OK] {name}"),
        FileOutcome::Skipped(_) => writeln!(out, "[SKIP] {name}: output exists"),
        FileOutcome::Failed(reason) => writeln!(out, "[FAIL] {name}: {reason}"),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |f| f.to_string_lossy().to_string(),
    )
}

fn preview<W: Write>(pattern: &str, out: &mut W) -> io::Result<()> {
    let files = match expand_input(pattern) {
        Ok(files) => files,
        Err(e) => return writeln!(out, "! {e}"),
    };

    writeln!(out, "\nFound {} file(s)", files.len())?;
    writeln!(out, "{:<32} {:>12} {:>12}", "File", "Size", "Dimensions")?;
    for file in files.iter().take(PREVIEW_LIMIT) {
        #[allow(clippy::cast_precision_loss)]
        let size = std::fs::metadata(file)
            .map_or_else(|_| "?".to_string(), |m| format!("{:.1} KB", m.len() as f64 / 1024.0));
        let dims = image::image_dimensions(file)
            .map_or_else(|_| "?".to_string(), |(w, h)| format!("{w}x{h}"));
        writeln!(out, "{:<32} {size:>12} {dims:>12}", display_name(file))?;
    }
    if files.len() > PREVIEW_LIMIT {
        writeln!(out, "{:<32} {:>12}", "...", format!("+ {} more", files.len() - PREVIEW_LIMIT))?;
    }
    writeln!(out)
}

fn print_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{BANNER}")?;
    writeln!(out, "{}", "=".repeat(60))?;
    writeln!(out, "Interactive Image Processor - Batch resize & remove colors\n")?;
    writeln!(out, "  1. Type help for available commands")?;
    writeln!(out, "  2. Type examples for usage examples\n")
}

fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nAvailable Commands")?;
    for (command, description) in COMMANDS {
        writeln!(out, "  {command:<20} {description}")?;
    }
    writeln!(out, "\nCommon Flags")?;
    for (flag, description) in FLAGS {
        writeln!(out, "  {flag:<20} {description}")?;
    }
    writeln!(out)
}

fn print_examples<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "\nUsage Examples:\n")?;
    for (i, (description, command)) in EXAMPLES.iter().enumerate() {
        writeln!(out, "{}. {description}", i + 1)?;
        writeln!(out, "   {command}\n")?;
    }
    Ok(())
}
