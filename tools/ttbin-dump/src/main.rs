mod format;

use anyhow::Context;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;
use ttbin::{Decoder, DecoderOptions, SchemaVariant};

#[derive(Parser)]
#[command(name = "ttbin-dump")]
#[command(about = "List the records of a ttbin activity file")]
struct Cli {
    /// Path to the ttbin file
    file: PathBuf,

    /// Schema variant (a or b), detected from the header when omitted
    #[arg(long)]
    variant: Option<SchemaVariant>,

    /// Print one JSON object per record
    #[arg(long)]
    json: bool,

    /// Show every timestamp in UTC
    #[arg(long)]
    utc: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let stdout = io::stdout();
    match run(&cli, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// List every record of `cli.file` into `out`.
///
/// A terminal unknown tag still counts as a complete listing, any other
/// decode error is returned after it has been written.
fn run(cli: &Cli, out: &mut impl Write) -> anyhow::Result<()> {
    let file = File::open(&cli.file)
        .with_context(|| format!("Failed to open: {}", cli.file.display()))?;
    let decoder = Decoder::with_options(
        BufReader::new(file),
        DecoderOptions {
            variant: cli.variant,
            ..DecoderOptions::default()
        },
    );
    let listing = format::Listing { utc_only: cli.utc };
    let mut count = 0usize;
    for item in decoder {
        let record = match item {
            Ok(record) => record,
            Err(e) => {
                if cli.json {
                    writeln!(out, "{}", serde_json::to_string(&e)?)?;
                }
                return Err(e).with_context(|| format!("Decoding {} failed", cli.file.display()));
            }
        };
        count += 1;
        if cli.json {
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        } else {
            write!(out, "{}", listing.record(&record)?)?;
        }
    }
    debug!("Listed {count} records from {}", cli.file.display());
    Ok(())
}
