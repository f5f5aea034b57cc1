//! Flag and environment storage.
//!
//! Stores hand out `Arc` snapshots. A write swaps the `Arc` kept under a key and
//! never touches a snapshot that a caller is still evaluating against.

pub mod environments;
pub mod flags;
pub mod sample;

pub use environments::{Environment, EnvironmentRepository, InMemoryEnvironmentRepository};
pub use flags::{FlagRecord, FlagRepository, InMemoryFlagRepository};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Flag '{0}' not found")]
    FlagNotFound(String),
    #[error("Flag key '{0}' already exists")]
    FlagExists(String),
    #[error("Environment '{0}' not found")]
    EnvironmentNotFound(String),
    #[error("{0} store lock poisoned")]
    Poisoned(&'static str),
}
