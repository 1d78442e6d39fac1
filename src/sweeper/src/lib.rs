//! Deployment retention sweeping for object-storage buckets.
//!
//! A deployment is a top-level key prefix in a bucket. A sweep lists the
//! prefixes, resolves the most recent object timestamp per prefix, and
//! deletes the prefixes that fall outside the retention policy: either
//! everything beyond the N most recent, or everything older than an age
//! limit subject to a keep-count floor.
//!
//! ## Architecture
//!
//! - `retention`: policy parameters and the pure selection algorithm
//! - `inventory`: the storage-facing view of a deployment bucket
//! - `sweep`: one cleanup pass tying inventory, selection, and deletion
//!   together

pub mod inventory;
pub mod retention;
pub mod sweep;

// Re-export commonly used types
pub use inventory::DeploymentStore;
pub use retention::{
    Deployment, PolicyError, RetentionPolicy, Selection, SelectionError, select_for_deletion,
};
pub use sweep::SweepReport;
