use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgtool::command::BatchRequest;
use imgtool::shell::{report_batch, run_shell};
use imgtool::{expand_input, parse_color_list, Error, ProcessOptions};

#[derive(Parser)]
#[command(
    name = "imgtool",
    about = "Batch image processor (resize & remove colors)",
    version,
    after_help = "Run without arguments to enter interactive mode.\n\n\
                  Example: imgtool -i 'icons/*.png' -o out -s 64 -k -c '#FFFFFF' -t 10"
)]
#[allow(clippy::struct_excessive_bools)]
struct Cli {
    /// Input file, directory or glob pattern (e.g. "*.png")
    #[arg(short, long)]
    input: Option<String>,

    /// Output directory (default: ./output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Target size in pixels (square)
    #[arg(short, long)]
    size: Option<u32>,

    /// HEX colors to remove (e.g. "#FFFFFF" "#000000" or "#FFF,#000")
    #[arg(short, long, num_args = 1..)]
    colors: Vec<String>,

    /// Color matching tolerance 0-255
    #[arg(short, long, default_value_t = 10)]
    tolerance: u8,

    /// Keep aspect ratio with transparent padding
    #[arg(short, long)]
    keep_aspect: bool,

    /// Suffix for output filenames
    #[arg(long, default_value = "")]
    suffix: String,

    /// Overwrite existing output files
    #[arg(long)]
    overwrite: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Suppress all non-error output
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn is_direct(&self) -> bool {
        self.input.is_some()
            || self.output.is_some()
            || self.size.is_some()
            || !self.colors.is_empty()
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if !cli.is_direct() {
        let stdin = io::stdin();
        if let Err(e) = run_shell(stdin.lock(), &mut io::stdout()) {
            eprintln!("Fatal: {e}");
            process::exit(1);
        }
        return;
    }

    match run_direct(cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

/// Run a single batch from command-line flags. Returns whether every file succeeded.
fn run_direct(cli: Cli) -> imgtool::Result<bool> {
    let input = cli.input.ok_or(Error::MissingArgument("--input"))?;
    if cli.size == Some(0) {
        return Err(Error::InvalidSize(0));
    }

    let request = BatchRequest {
        input,
        output: cli.output.unwrap_or_else(|| PathBuf::from("./output")),
        options: ProcessOptions {
            size: cli.size,
            colors: parse_color_list(&cli.colors)?,
            tolerance: cli.tolerance,
            keep_aspect: cli.keep_aspect,
            suffix: cli.suffix,
            overwrite: cli.overwrite,
        },
    };

    let files = expand_input(&request.input)?;

    let result = if cli.quiet {
        report_batch(&files, &request, &mut io::sink())?
    } else {
        eprintln!("Processing {} file(s)...\n", files.len());
        report_batch(&files, &request, &mut io::stderr())?
    };

    if cli.quiet {
        for (path, reason) in &result.failures {
            eprintln!("[FAIL] {}: {reason}", path.display());
        }
    }

    Ok(!result.has_failures())
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "imgtool=debug" } else { "imgtool=error" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(io::stderr),
        )
        .init();
}
