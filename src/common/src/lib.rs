//! Shared plumbing for the deploy-sweeper binaries: configuration,
//! object store construction, and CLI bootstrap.

pub mod cli;
pub mod config;
pub mod storage;

pub use config::{Configuration, StorageConfig};
