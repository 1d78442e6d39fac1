//! One retention pass over a deployment bucket.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::inventory::DeploymentStore;
use crate::retention::{RetentionPolicy, select_for_deletion};

/// Outcome of a single cleanup pass.
#[derive(Debug, Clone)]
pub struct SweepReport {
    /// Deployments present in the bucket when the pass started.
    pub evaluated: usize,
    /// Prefixes whose objects were deleted.
    pub deleted: Vec<String>,
    /// Stale prefixes retained to honor the keep-count floor.
    pub retained_stale: Vec<String>,
    /// Prefixes whose deletion failed, with the error message.
    pub failed: Vec<(String, String)>,
    /// Total objects removed across all deleted prefixes.
    pub objects_removed: usize,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,
}

impl SweepReport {
    /// True when every selected deletion went through.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Run one cleanup pass: inventory, selection, deletion.
///
/// An individual deletion failure is logged and recorded in the report
/// but does not abort the pass; the bucket is left in the reported mixed
/// state for the next run to reconcile.
pub async fn run(store: &DeploymentStore, policy: &RetentionPolicy) -> Result<SweepReport> {
    let started_at = Utc::now();

    let deployments = store
        .list_deployments(started_at)
        .await
        .context("Failed to build deployment inventory")?;
    let evaluated = deployments.len();

    info!(
        deployments = evaluated,
        keep_count = policy.keep_count(),
        max_age = ?policy.max_age(),
        "Starting retention sweep"
    );

    let selection =
        select_for_deletion(deployments, policy, started_at).context("Retention selection failed")?;

    if selection.delete.is_empty() {
        info!(
            deployments = evaluated,
            keep_count = policy.keep_count(),
            "All deployments within retention, nothing to delete"
        );
    }

    let mut deleted = Vec::new();
    let mut failed = Vec::new();
    let mut objects_removed = 0;

    for deployment in &selection.delete {
        match store.delete_deployment(&deployment.prefix).await {
            Ok(count) => {
                info!(
                    prefix = %deployment.prefix,
                    last_modified = %deployment.last_modified.to_rfc3339(),
                    objects = count,
                    "Deleted deployment"
                );
                objects_removed += count;
                deleted.push(deployment.prefix.clone());
            }
            Err(e) => {
                error!(
                    prefix = %deployment.prefix,
                    error = %e,
                    "Failed to delete deployment"
                );
                failed.push((deployment.prefix.clone(), e.to_string()));
            }
        }
    }

    for deployment in &selection.retained_stale {
        warn!(
            prefix = %deployment.prefix,
            last_modified = %deployment.last_modified.to_rfc3339(),
            "Deployment exceeds the age limit but deleting it would drop below the keep-count floor, retaining"
        );
    }

    let completed_at = Utc::now();
    let report = SweepReport {
        evaluated,
        deleted,
        retained_stale: selection
            .retained_stale
            .iter()
            .map(|d| d.prefix.clone())
            .collect(),
        failed,
        objects_removed,
        started_at,
        completed_at,
    };

    info!(
        evaluated = report.evaluated,
        deleted = report.deleted.len(),
        retained_stale = report.retained_stale.len(),
        failed = report.failed.len(),
        objects_removed = report.objects_removed,
        duration_ms = (completed_at - started_at).num_milliseconds(),
        "Retention sweep completed"
    );

    Ok(report)
}
