//! Community snapshot persistence port

use leap_domain::CommunitySnapshot;
use thiserror::Error;

/// Errors raised by snapshot storage adapters
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    #[error("Unsupported snapshot version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
}

/// Where the community store keeps its state between runs.
///
/// `load` returns `Ok(None)` when nothing has been saved yet.
pub trait SnapshotRepository: Send + Sync {
    fn load(&self) -> Result<Option<CommunitySnapshot>, StoreError>;

    fn save(&self, snapshot: &CommunitySnapshot) -> Result<(), StoreError>;
}
