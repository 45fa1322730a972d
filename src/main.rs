//! CLI entry point for the groups.io photo album exporter.

use anyhow::{Context, Result, bail};
use clap::Parser;
use gio_export::{ApiClient, Config, Exporter, select_group};
use tracing::{debug, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Determine log level based on verbose/quiet flags
    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");

    let config = Config::from_env().context("loading configuration from environment")?;
    let client = ApiClient::login(&config)
        .await
        .context("logging in to groups.io")?;

    if args.selector == "list" {
        println!("ID\tName");
        println!("-----\t----");
        for group in client.subscriptions() {
            println!("{}\t{}", group.group_id, group.group_name);
        }
        return Ok(());
    }

    let Some(group) = select_group(client.subscriptions(), &args.selector) else {
        bail!("Group not found in subscription list: {}", args.selector);
    };

    info!(
        group = %group.group_name,
        id = group.group_id,
        output_dir = %args.output_dir.display(),
        "starting export"
    );

    let exporter = Exporter::new(client, args.output_dir.clone());
    let stats = exporter.export_group(&group).await?;

    info!(
        albums = stats.albums,
        downloaded = stats.downloaded,
        skipped = stats.skipped,
        failed = stats.failed,
        "Export complete"
    );

    Ok(())
}
