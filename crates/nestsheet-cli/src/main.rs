//! nestsheet CLI - convert a JSON record array to a spreadsheet or back

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use nestsheet::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nestsheet")]
#[command(
    author,
    version,
    about = "Convert between JSON record arrays and spreadsheets with nested headers"
)]
struct Cli {
    /// Source file (.xlsx or .json)
    source: PathBuf,

    /// Directory the converted file is written to (created if missing)
    output_dir: PathBuf,

    /// Replace an existing spreadsheet instead of merging into it
    #[arg(long)]
    overwrite: bool,

    /// Fail when a value does not match its column's shape
    #[arg(long)]
    strict: bool,

    /// Column identifying a record when merging (repeatable)
    #[arg(long = "key", value_name = "COLUMN")]
    keys: Vec<String>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            existing: if self.overwrite {
                ExistingPolicy::Overwrite
            } else {
                ExistingPolicy::MergeIfExists
            },
            strict_shapes: self.strict,
            merge_key: (!self.keys.is_empty()).then(|| self.keys.clone()),
            ..ConvertOptions::default()
        }
    }

    fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

/// Configure tracing; RUST_LOG takes precedence over -v
fn init_logging(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    println!("Source: {}", cli.source.display());
    println!("Destination: {}", cli.output_dir.display());

    let direction = Direction::from_path(&cli.source)?;
    println!("Converting {}", direction);

    let conversion = convert_file(&cli.source, &cli.output_dir, &cli.options())
        .with_context(|| format!("Failed to convert '{}'", cli.source.display()))?;
    tracing::info!(
        output = %conversion.output.display(),
        records = conversion.records,
        "conversion finished"
    );

    println!("Done.");
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
