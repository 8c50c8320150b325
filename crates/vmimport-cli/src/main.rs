//! vmimport CLI
//!
//! Runs the import validation engine against VM descriptors stored on disk.

mod commands;

use clap::{Parser, Subcommand};
use commands::{CatalogCommand, DiskReadyCommand, SchemaCommand, ValidateCommand};
use tracing_subscriber::{layer::SubscriberExt, Layer};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "VMIMPORT_LOG_LEVEL", global = true)]
    log_level: String,

    /// Log format: compact, full
    #[arg(
        long,
        default_value = "compact",
        env = "VMIMPORT_LOG_FORMAT",
        global = true
    )]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a VM descriptor and its mappings
    Validate(ValidateCommand),
    /// Report whether each attached disk is ready for copying
    DiskReady(DiskReadyCommand),
    /// Print the effective severity of every check
    Catalog(CatalogCommand),
    /// Print the OpenAPI schema of descriptors, mappings and conditions
    Schema(SchemaCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // If RUST_LOG is set, use it as-is; otherwise apply the level to our crates
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::try_from_default_env()?
    } else {
        tracing_subscriber::EnvFilter::new(format!(
            "vmimport_cli={level},\
             vmimport={level},\
             vmimport_ovirt={level},\
             vmimport_types={level}",
            level = cli.log_level
        ))
    };

    // Logs go to stderr so JSON output on stdout stays parseable
    let fmt_layer = match cli.log_format.as_str() {
        "full" => tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
        _ => tracing_subscriber::fmt::layer() // "compact" or any other value
            .with_writer(std::io::stderr)
            .compact()
            .with_target(false)
            .with_thread_ids(false)
            .with_thread_names(false)
            .boxed(),
    };

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Validate(validate_cmd) => validate_cmd.execute(),
        Commands::DiskReady(disk_ready_cmd) => disk_ready_cmd.execute(),
        Commands::Catalog(catalog_cmd) => catalog_cmd.execute(),
        Commands::Schema(schema_cmd) => schema_cmd.execute(),
    }
}
