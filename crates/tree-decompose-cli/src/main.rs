//! `decompose` CLI — flatten JSON configuration documents into path/value pairs.
//!
//! ## Usage
//!
//! ```sh
//! # Flatten JSON from stdin, one `path = value` line per leaf
//! echo '{"system":{"clock":{"timezone-name":"Europe/Rome"}}}' | decompose flatten
//!
//! # Flatten a file to a JSON array of {path, type, value} records
//! decompose flatten -i config.json -o values.json --format json
//!
//! # Raise or lift the nesting limit (default 64)
//! decompose flatten --max-depth 256 -i deep.json
//! decompose flatten --unbounded -i deep.json
//!
//! # Leaf counts per type and number of skipped nodes
//! decompose stats -i config.json
//!
//! # Show skipped-node warnings (or set RUST_LOG)
//! decompose --log-level debug flatten -i config.json
//! ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use tree_decompose::{
    decompose_tree_with, CollectingSink, DecomposeOptions, PathValue, TracingSink,
    DEFAULT_MAX_DEPTH,
};

#[derive(Parser)]
#[command(
    name = "decompose",
    version,
    about = "Flatten JSON configuration trees into path/value pairs"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log filter directive (e.g. "warn", "tree_decompose=debug"); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Flatten a JSON document into path/value pairs
    Flatten {
        /// Input file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        #[command(flatten)]
        depth: DepthArgs,
    },
    /// Show leaf counts per value type and the number of skipped nodes
    Stats {
        /// Input JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        #[command(flatten)]
        depth: DepthArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// One `path = value` line per leaf
    Text,
    /// Pretty-printed JSON array of {path, type, value}
    Json,
}

#[derive(Args)]
struct DepthArgs {
    /// Maximum nesting depth before the document is rejected
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, conflicts_with = "unbounded")]
    max_depth: usize,
    /// Disable the nesting depth check
    #[arg(long)]
    unbounded: bool,
}

impl DepthArgs {
    fn options(&self) -> DecomposeOptions {
        if self.unbounded {
            DecomposeOptions::unbounded()
        } else {
            DecomposeOptions::new().max_depth(Some(self.max_depth))
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref())?;

    match cli.command {
        Commands::Flatten {
            input,
            output,
            format,
            depth,
        } => {
            let raw = read_input(input.as_deref())?;
            let values = decompose_tree_with(&raw, &depth.options(), &mut TracingSink)
                .context("Failed to decompose JSON")?;
            tracing::debug!(leaves = values.len(), "decomposed document");
            let rendered = render(&values, format)?;
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Stats { input, depth } => {
            let raw = read_input(input.as_deref())?;
            let mut sink = CollectingSink::new();
            let values = decompose_tree_with(&raw, &depth.options(), &mut sink)
                .context("Failed to decompose JSON")?;
            for diagnostic in sink.diagnostics() {
                tracing::warn!("{diagnostic}");
            }

            let count = |ty: &str| values.iter().filter(|pv| pv.value.value_type() == ty).count();
            println!("Leaves:   {}", values.len());
            println!("  string: {}", count("string"));
            println!("  bool:   {}", count("bool"));
            println!("  float:  {}", count("float"));
            println!("Skipped:  {}", sink.len());
        }
    }

    Ok(())
}

/// Text output ends with a newline per pair; an empty result renders as nothing.
fn render(values: &[PathValue], format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(values.iter().map(|pv| format!("{pv}\n")).collect()),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(values)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// stderr-only so `flatten` output stays clean when piped.
fn init_tracing(directive: Option<&str>) -> Result<()> {
    let env_filter = match directive {
        Some(d) => {
            EnvFilter::try_new(d).with_context(|| format!("Invalid --log-level directive: {}", d))?
        }
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
    Ok(())
}

fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}
