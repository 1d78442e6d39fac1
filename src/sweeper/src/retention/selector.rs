//! Pure selection of deployments to keep and delete.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::policy::RetentionPolicy;

/// A deployment prefix together with the timestamp of its most recent
/// object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deployment {
    /// Top-level key prefix identifying the deployment within its bucket.
    pub prefix: String,
    /// Most recent object timestamp under the prefix.
    pub last_modified: DateTime<Utc>,
}

impl Deployment {
    pub fn new(prefix: impl Into<String>, last_modified: DateTime<Utc>) -> Self {
        Self {
            prefix: prefix.into(),
            last_modified,
        }
    }
}

/// Outcome of a selection pass.
///
/// `keep` holds every surviving deployment, most recent first. Stale
/// deployments protected by the keep-count floor survive too; they appear
/// in `keep` and are repeated in `retained_stale` so callers can report
/// them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub keep: Vec<Deployment>,
    pub delete: Vec<Deployment>,
    pub retained_stale: Vec<Deployment>,
}

/// Rejected selector input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    /// Two input deployments share a prefix. The inventory layer should
    /// guarantee uniqueness; the selector refuses to guess which entry
    /// wins.
    #[error("duplicate deployment prefix '{prefix}'")]
    DuplicatePrefix { prefix: String },
}

/// Decide which deployments survive a cleanup pass.
///
/// Deployments are ranked by `last_modified` descending, ties broken by
/// prefix ascending so repeated runs over identical inputs are
/// deterministic. The `keep_count` highest-ranked deployments always
/// survive. Without an age limit every lower-ranked deployment is
/// deleted. With an age limit only deployments older than
/// `now - max_age` are candidates, evaluated most recent first, and a
/// candidate is skipped once deleting it would leave fewer than
/// `keep_count` deployments standing.
///
/// This is a pure computation: no I/O, no clock access (`now` is
/// injected), and identical inputs produce identical results.
pub fn select_for_deletion(
    mut deployments: Vec<Deployment>,
    policy: &RetentionPolicy,
    now: DateTime<Utc>,
) -> Result<Selection, SelectionError> {
    {
        let mut seen = HashSet::with_capacity(deployments.len());
        for deployment in &deployments {
            if !seen.insert(deployment.prefix.as_str()) {
                return Err(SelectionError::DuplicatePrefix {
                    prefix: deployment.prefix.clone(),
                });
            }
        }
    }

    deployments.sort_by(|a, b| {
        b.last_modified
            .cmp(&a.last_modified)
            .then_with(|| a.prefix.cmp(&b.prefix))
    });

    let keep_count = policy.keep_count();
    if deployments.len() <= keep_count {
        return Ok(Selection {
            keep: deployments,
            ..Selection::default()
        });
    }

    match policy.max_age() {
        None => {
            let delete = deployments.split_off(keep_count);
            Ok(Selection {
                keep: deployments,
                delete,
                retained_stale: Vec::new(),
            })
        }
        Some(max_age) => {
            let cutoff = now - max_age;

            let mut keep = Vec::with_capacity(keep_count);
            let mut delete = Vec::new();
            let mut retained_stale = Vec::new();
            // Deployments not yet deleted; only shrinks while the
            // keep-count floor holds.
            let mut surviving = deployments.len();

            for (rank, deployment) in deployments.into_iter().enumerate() {
                if rank < keep_count {
                    keep.push(deployment);
                } else if deployment.last_modified < cutoff {
                    if surviving > keep_count {
                        surviving -= 1;
                        delete.push(deployment);
                    } else {
                        retained_stale.push(deployment.clone());
                        keep.push(deployment);
                    }
                } else {
                    keep.push(deployment);
                }
            }

            Ok(Selection {
                keep,
                delete,
                retained_stale,
            })
        }
    }
}
