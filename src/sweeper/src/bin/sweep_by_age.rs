//! Age-based deployment retention: delete deployment prefixes older than
//! a day limit, while always keeping the N most recent.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;

use common::{cli, storage};
use sweeper::retention::RetentionPolicy;
use sweeper::{DeploymentStore, sweep};

#[derive(Parser, Debug)]
#[command(
    name = "sweep-by-age",
    about = "Delete deployment prefixes older than a day limit, keeping the most recent ones"
)]
struct Args {
    /// Bucket holding one top-level prefix per deployment
    bucket: String,

    /// Minimum number of most recent deployments to keep, regardless of age
    keep_count: i64,

    /// Deployments older than this many days become deletion candidates
    max_days: i64,

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
    let policy = RetentionPolicy::keep_recent_with_max_age(args.keep_count, args.max_days)?;

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
