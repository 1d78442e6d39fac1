//! Validated retention parameters.

use chrono::Duration;
use thiserror::Error;

/// How many deployments survive a cleanup pass, and optionally how old a
/// deployment may grow before it becomes a deletion candidate.
///
/// Construction validates the raw command-line integers, so a policy in
/// hand is always well-formed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetentionPolicy {
    keep_count: usize,
    max_age: Option<Duration>,
}

impl RetentionPolicy {
    /// Count-only retention: keep the `keep_count` most recent
    /// deployments, delete the rest.
    pub fn keep_recent(keep_count: i64) -> Result<Self, PolicyError> {
        Ok(Self {
            keep_count: validate_keep_count(keep_count)?,
            max_age: None,
        })
    }

    /// Count+age retention: deployments older than `max_age_days` are
    /// deletion candidates, but the `keep_count` most recent always
    /// survive.
    pub fn keep_recent_with_max_age(
        keep_count: i64,
        max_age_days: i64,
    ) -> Result<Self, PolicyError> {
        if max_age_days < 0 {
            return Err(PolicyError::NegativeMaxAge(max_age_days));
        }

        Ok(Self {
            keep_count: validate_keep_count(keep_count)?,
            max_age: Some(Duration::days(max_age_days)),
        })
    }

    /// Minimum number of most-recent deployments that must never be
    /// deleted.
    pub fn keep_count(&self) -> usize {
        self.keep_count
    }

    /// Age limit beyond which lower-ranked deployments become deletion
    /// candidates. `None` means count-only retention.
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age
    }
}

fn validate_keep_count(keep_count: i64) -> Result<usize, PolicyError> {
    usize::try_from(keep_count).map_err(|_| PolicyError::NegativeKeepCount(keep_count))
}

/// Invalid retention parameters.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolicyError {
    #[error("keep_count must be non-negative, got {0}")]
    NegativeKeepCount(i64),

    #[error("max_age_days must be non-negative, got {0}")]
    NegativeMaxAge(i64),
}
