use thiserror::Error;

/// Errors that can arise at the adventure's persistence boundary.
///
/// Player mistakes never surface here; handlers narrate those instead.
#[derive(Debug, Error)]
pub enum AdventureError {
    /// Wrapper around IO errors (save directory creation, file locking, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapper around JSON serialization and deserialization errors.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Returned when loading a snapshot written by an incompatible format.
    #[error("snapshot version mismatch: expected {expected}, got {found}")]
    SnapshotVersion { expected: u32, found: u32 },

    /// Snapshot decoded but its contents violate a world invariant.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}
