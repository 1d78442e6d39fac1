//! Live deployment inventory over an object store.
//!
//! Deployments are the top-level key prefixes of a bucket. The inventory
//! is rebuilt from live storage state on every pass; nothing is cached
//! between runs.

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::StreamExt;
use object_store::ObjectStore;
use object_store::path::Path as ObjectPath;

use crate::retention::Deployment;

/// Storage-facing view of a deployment bucket.
pub struct DeploymentStore {
    object_store: Arc<dyn ObjectStore>,
}

impl DeploymentStore {
    pub fn new(object_store: Arc<dyn ObjectStore>) -> Self {
        Self { object_store }
    }

    /// List the top-level prefixes of the bucket.
    pub async fn list_prefixes(&self) -> Result<Vec<String>> {
        let listing = self
            .object_store
            .list_with_delimiter(None)
            .await
            .context("Failed to list deployment prefixes")?;

        Ok(listing
            .common_prefixes
            .iter()
            .map(|prefix| prefix.to_string())
            .collect())
    }

    /// Timestamp of the most recent object under `prefix`.
    ///
    /// A prefix with no objects resolves to `now`, so it is treated as
    /// fresh rather than immediately deletable.
    pub async fn last_modified(&self, prefix: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let path = ObjectPath::from(prefix);
        let mut objects = self.object_store.list(Some(&path));

        let mut latest: Option<DateTime<Utc>> = None;
        while let Some(meta) = objects.next().await {
            let meta =
                meta.with_context(|| format!("Failed to list objects under '{prefix}'"))?;
            latest = Some(match latest {
                Some(current) => current.max(meta.last_modified),
                None => meta.last_modified,
            });
        }

        Ok(latest.unwrap_or(now))
    }

    /// Build the deployment inventory from live bucket state.
    pub async fn list_deployments(&self, now: DateTime<Utc>) -> Result<Vec<Deployment>> {
        let prefixes = self.list_prefixes().await?;

        let mut deployments = Vec::with_capacity(prefixes.len());
        for prefix in prefixes {
            let last_modified = self.last_modified(&prefix, now).await?;
            deployments.push(Deployment::new(prefix, last_modified));
        }

        Ok(deployments)
    }

    /// Delete every object under `prefix`. Returns the number of objects
    /// removed.
    pub async fn delete_deployment(&self, prefix: &str) -> Result<usize> {
        let path = ObjectPath::from(prefix);

        // Collect first so the listing is not consumed while objects
        // disappear underneath it
        let mut objects = self.object_store.list(Some(&path));
        let mut locations = Vec::new();
        while let Some(meta) = objects.next().await {
            let meta =
                meta.with_context(|| format!("Failed to list objects under '{prefix}'"))?;
            locations.push(meta.location);
        }
        drop(objects);

        for location in &locations {
            self.object_store
                .delete(location)
                .await
                .with_context(|| format!("Failed to delete object '{location}'"))?;
        }

        tracing::debug!(
            prefix = %prefix,
            objects = locations.len(),
            "Deleted all objects under prefix"
        );

        Ok(locations.len())
    }
}
