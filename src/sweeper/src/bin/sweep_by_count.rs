//! Count-based deployment retention: keep the N most recent deployment
//! prefixes in a bucket, delete the rest.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use common::{cli, storage};
use sweeper::retention::RetentionPolicy;
use sweeper::{DeploymentStore, sweep};

#[derive(Parser, Debug)]
#[command(
    name = "sweep-by-count",
    about = "Delete all but the most recent deployment prefixes in a bucket"
)]
struct Args {
    /// Bucket holding one top-level prefix per deployment
    bucket: String,

    /// Number of most recent deployments to keep
    keep_count: i64,

    /// S3-compatible endpoint URL (e.g. a local MinIO)
    endpoint_url: Option<String>,

    #[arg(long, help = "Configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose logging")]
    verbose: bool,

    #[arg(short, long, help = "Enable quiet mode (minimal output)")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args: Args = cli::parse_args();
    cli::init_logging(args.verbose, args.quiet);

    let config = cli::load_config(args.config.as_ref())?;
    let policy = RetentionPolicy::keep_recent(args.keep_count)?;

    let object_store =
        storage::open_store(&args.bucket, args.endpoint_url.as_deref(), &config.storage)?;
    let store = DeploymentStore::new(object_store);

    let report = sweep::run(&store, &policy).await?;

    if !report.is_clean() {
        bail!(
            "{} of {} deployment deletions failed",
            report.failed.len(),
            report.failed.len() + report.deleted.len()
        );
    }

    Ok(())
}
