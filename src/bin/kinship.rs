//! Kinship CLI
//!
//! Resolves how everyone in a family graph is related to a root person and
//! prints the result grouped by closeness grade.
//!
//! ## Configuration
//!
//! Environment variables:
//! - `KINSHIP_PEOPLE`: path to the people JSON file (same as `--people`)
//! - `KINSHIP_ROOT`: root person id (same as `--root`)
//! - `RUST_LOG`: log level filter (default: kinship=info,kinship_kernel=warn)
//! - `LOG_FORMAT`: "json" for structured logs, "pretty" for development (default: pretty)
//!
//! ## Usage
//!
//! ```bash
//! cargo run --features cli --bin kinship -- --people family.json --root abc123
//! ```

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kinship_kernel::{
    resolve, resolve_strict, BatchResolver, GraphIndex, PersonId, RelationshipIndex,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Grade headers followed by one line per person
    Text,
    /// Pretty-printed JSON
    Json,
}

#[derive(Parser)]
#[command(name = "kinship")]
#[command(version)]
#[command(about = "Resolve kinship labels and closeness grades in a family graph", long_about = None)]
struct Cli {
    /// People JSON file (an array of person documents)
    #[arg(short, long, env = "KINSHIP_PEOPLE")]
    people: PathBuf,

    /// Root person id
    #[arg(short, long, env = "KINSHIP_ROOT", required_unless_present = "all")]
    root: Option<String>,

    /// Resolve every person in the graph as a root
    #[arg(long, conflicts_with = "root")]
    all: bool,

    /// Worker threads for --all
    #[arg(long, default_value = "4")]
    workers: NonZeroUsize,

    /// Fail when the root is not in the graph instead of printing nothing
    #[arg(long)]
    strict: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Initialize the tracing subscriber with JSON or pretty format
fn init_tracing() {
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kinship=info,kinship_kernel=warn".into());

    if log_format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .init();
    }
}

fn print_text(index: &RelationshipIndex) {
    println!("root: {}", index.root());
    for (grade, familiars) in index.grades() {
        println!("grade {grade}:");
        for familiar in familiars {
            println!(
                "  {:<24} {:<32} ({})",
                familiar.relation_or_default(),
                familiar.person.display_name(),
                familiar.relation_path,
            );
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let load_start = Instant::now();
    let json = std::fs::read_to_string(&cli.people).map_err(|e| {
        error!(path = %cli.people.display(), error = %e, "failed to read people file");
        e
    })?;
    let graph = GraphIndex::from_json(&json)?;
    info!(
        people = graph.len(),
        dangling_edges = graph.dangling_edges().len(),
        latency_ms = load_start.elapsed().as_millis() as u64,
        "family graph loaded"
    );

    if cli.all {
        let roots: Vec<PersonId> = graph.ids().cloned().collect();
        let batch = BatchResolver::new(&graph).resolve_all_parallel(&roots, cli.workers)?;
        info!(
            snapshot_id = %batch.snapshot_id,
            roots = batch.registry.entries.len(),
            registry_hash = %batch.registry.registry_hash,
            "batch resolution complete"
        );
        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&batch)?),
            OutputFormat::Text => {
                for index in batch.indexes.values() {
                    print_text(index);
                    println!();
                }
            }
        }
        return Ok(());
    }

    let root = PersonId::new(cli.root.unwrap_or_default());
    let index = if cli.strict {
        resolve_strict(&graph, &root)?
    } else {
        resolve(&graph, &root)
    };

    let unclassified = index.unclassified().count();
    info!(
        root = %root,
        familiars = index.len(),
        unclassified = unclassified,
        "relationships resolved"
    );

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&index)?),
        OutputFormat::Text => print_text(&index),
    }

    Ok(())
}
