//! DCIM export CLI: NetBox machine inventory to a provisioning CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use dcim_export::{machine, output, pipeline, Netbox};

/// Export physical-machine inventory from NetBox for cluster provisioning.
#[derive(Parser)]
#[command(name = "dcim-export")]
#[command(about = "Export NetBox machine inventory to a provisioning CSV")]
struct Cli {
    /// NetBox base URL (or set `NETBOX_HOST`).
    #[arg(long, env = "NETBOX_HOST")]
    host: String,

    /// NetBox API token (or set `NETBOX_TOKEN`).
    #[arg(long, env = "NETBOX_TOKEN")]
    token: String,

    /// Only export devices carrying this tag.
    #[arg(long)]
    tag: Option<String>,

    /// Destination CSV file.
    #[arg(long, default_value = "hardware.csv")]
    csv: PathBuf,

    /// Also write the machine collection as indented JSON.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long, default_value = "false")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let netbox = Netbox::new(&cli.host, &cli.token).context("Failed to create NetBox client")?;

    let machines = pipeline::run(&netbox, cli.tag.as_deref()).await?;
    info!(machines = machines.len(), "pipeline complete");

    if let Some(path) = &cli.json {
        let encoded = machine::serialize_machines(&machines)?;
        std::fs::write(path, encoded)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        println!("Wrote {} machines to {}", machines.len(), path.display());
    }

    output::write_csv_file(&machines, &cli.csv)
        .with_context(|| format!("Failed to write {}", cli.csv.display()))?;
    println!("Wrote {} machines to {}", machines.len(), cli.csv.display());

    Ok(())
}
