//! The survival adventure engine.
//!
//! Control flow for one line of input:
//!
//! ```text
//! text -> parser -> actions / combat -> narration
//!                        |
//!                        v
//!                  turn simulator (only when the action took time)
//! ```
//!
//! Everything mutable lives in one [`Session`]; nothing here does I/O except
//! [`storage`].

pub mod actions;
pub mod catalog;
pub mod combat;
pub mod errors;
pub mod narration;
pub mod parser;
pub mod player;
pub mod recipes;
pub mod rng;
pub mod session;
pub mod storage;
pub mod turn;
pub mod world;

pub use catalog::{ItemKey, ItemSet, Tag};
pub use errors::AdventureError;
pub use narration::{Narration, Tone};
pub use session::{Session, SessionStatus};
pub use storage::{JsonFileStore, Snapshot, SnapshotStore};
pub use world::{Coord, Direction, Room, World};
