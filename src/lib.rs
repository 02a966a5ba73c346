//! # Cavecraft - a procedurally generated survival text adventure
//!
//! Cavecraft builds an endless world of rooms lazily as the player explores:
//! sunlit biomes on the surface, dark caves on three layers beneath it, and
//! bedrock below that. The player gathers wood and ore, crafts tools, and tries
//! to survive the monsters that come out at night.
//!
//! ## Features
//!
//! - **Lazy World**: Rooms are generated on first visit and stay consistent with their neighbours.
//! - **Natural Commands**: `mine iron with stone pickaxe`, `chop down tree`, `craft a torch`.
//! - **Tool Tiers**: Better pickaxes mine harder ore; better swords kill more reliably.
//! - **Day and Night**: Monsters spawn in the dark, and sunrise burns most of them away.
//! - **Save Files**: Atomic JSON snapshots that resume with the same random stream.
//!
//! ## Quick Start
//!
//! ```rust
//! use cavecraft::adventure::Session;
//!
//! let mut session = Session::new(42);
//! for line in session.handle_input("look") {
//!     println!("{}", line);
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`adventure`] - The game engine: world, items, commands, turns, saves
//! - [`config`] - Configuration management
//! - [`logutil`] - Single-line log sanitising

pub mod adventure;
pub mod config;
pub mod logutil;
