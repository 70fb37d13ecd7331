use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use tabular_ingest::ingestion::{
    FileObserver, IngestionFormat, IngestionObserver, IngestionOptions, TracingObserver,
    ingest_from_path,
};

#[derive(Parser, Debug)]
#[command(name = "tabular-ingest")]
#[command(about = "Load a CSV, JSON, or XML file and print the inferred column types")]
struct Args {
    /// Path to input data file
    #[arg(long)]
    input: PathBuf,

    /// Parse as this format instead of choosing by file extension
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Print the schema as a JSON array instead of `<column>: <type>` lines
    #[arg(long)]
    json: bool,

    /// Append ingestion events to this file
    #[arg(long)]
    event_log: Option<PathBuf>,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
    Xml,
}

impl From<FormatArg> for IngestionFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Csv => Self::Csv,
            FormatArg::Json => Self::Json,
            FormatArg::Xml => Self::Xml,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    let mut observers: Vec<Arc<dyn IngestionObserver>> = vec![Arc::new(TracingObserver)];
    if let Some(log) = &args.event_log {
        observers.push(Arc::new(FileObserver::new(log)));
    }
    let options = IngestionOptions {
        format: args.format.map(Into::into),
        observer: Some(Arc::new(observers)),
        ..Default::default()
    };

    tracing::debug!(input = %args.input.display(), ?options, "starting ingestion");
    let out = ingest_from_path(&args.input, &options)
        .with_context(|| format!("failed to ingest {}", args.input.display()))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&out.schema)?);
    } else {
        for field in &out.schema.fields {
            println!("{}: {}", field.name, field.data_type);
        }
    }

    Ok(())
}
