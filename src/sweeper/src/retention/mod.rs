//! Retention policy and deployment selection.
//!
//! `policy` holds the validated retention parameters; `selector` computes
//! which deployments survive a cleanup pass. Selection is a pure
//! computation with an injected clock, so all storage I/O stays with the
//! caller.

pub mod policy;
pub mod selector;

pub use policy::{PolicyError, RetentionPolicy};
pub use selector::{Deployment, Selection, SelectionError, select_for_deletion};
