//! Save files.
//!
//! A [`Snapshot`] is everything needed to resume a session: the player, every
//! generated room, and the random stream position. Stores only move whole
//! snapshots in and out; they know nothing about the game.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::catalog::ItemSet;
use super::errors::AdventureError;
use super::session::SessionStatus;
use super::world::{Coord, Room};

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub turn: u64,
    pub time_in_room: u32,
    pub position: Coord,
    pub hit_points: i32,
    pub inventory: ItemSet,
    /// JSON object keys must be strings, so rooms are stored as pairs.
    pub rooms: Vec<(Coord, Room)>,
    pub seed: u64,
    /// ChaCha stream position; 128 bits, kept as a decimal string.
    #[serde(with = "u128_string")]
    pub word_pos: u128,
    pub status: SessionStatus,
}

mod u128_string {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &u128, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse::<u128>().map_err(serde::de::Error::custom)
    }
}

/// Where snapshots live.
pub trait SnapshotStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), AdventureError>;
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>, AdventureError>;
}

/// One pretty-printed JSON file, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl SnapshotStore for JsonFileStore {
    fn save(&self, snapshot: &Snapshot) -> Result<(), AdventureError> {
        let json = serde_json::to_string_pretty(snapshot)?;
        write_json_atomic(&self.path, &json)?;
        debug!(
            "saved turn {} ({} rooms) to {}",
            snapshot.turn,
            snapshot.rooms.len(),
            self.path.display()
        );
        Ok(())
    }

    fn load(&self) -> Result<Option<Snapshot>, AdventureError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        info!(
            "loaded save from {} (turn {}, saved {})",
            self.path.display(),
            snapshot.turn,
            snapshot.saved_at.format("%Y-%m-%d %H:%M:%S")
        );
        Ok(Some(snapshot))
    }
}

/// Write via a temp file and rename while holding an exclusive lock on a
/// sidecar `.lock` file, so readers never see a half-written save.
fn write_json_atomic(path: &Path, content: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&dir)?;
    let base = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("cavecraft.json");
    let lock_file = OpenOptions::new()
        .create(true)
        .truncate(false)
        .read(true)
        .write(true)
        .open(dir.join(format!(".{}.lock", base)))?;
    lock_file.lock_exclusive()?;

    let mut counter = 0u32;
    let tmp_path = loop {
        let cand = dir.join(format!(".{}.tmp-{}-{}", base, std::process::id(), counter));
        match OpenOptions::new().write(true).create_new(true).open(&cand) {
            Ok(mut tmp) => {
                tmp.write_all(content.as_bytes())?;
                tmp.flush()?;
                let _ = tmp.sync_all();
                break cand;
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                counter = counter.saturating_add(1);
            }
            Err(e) => return Err(e),
        }
    };
    std::fs::rename(&tmp_path, path)?;
    if let Ok(dirf) = File::open(&dir) {
        let _ = dirf.sync_all();
    }
    FileExt::unlock(&lock_file)?;
    Ok(())
}
