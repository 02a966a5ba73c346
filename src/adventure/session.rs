//! The owned game context: one world, one player, one random stream.
//!
//! Every command runs to completion against a `Session` before the next line
//! is read: interpret, apply the handler, then advance the turn simulator if
//! the handler consumed a turn. A death of any kind flips the status to
//! [`SessionStatus::Dead`] and all later input is refused.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::actions::{self, Outcome};
use super::errors::AdventureError;
use super::narration::Narration;
use super::parser::{Command, Interpreter, Parsed};
use super::player::{Player, MAX_HIT_POINTS};
use super::rng::GameRng;
use super::storage::{Snapshot, SNAPSHOT_VERSION};
use super::turn;
use super::world::{Room, World};
use crate::logutil::escape_log;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionStatus {
    Playing,
    Dead { cause: String },
}

pub struct Session {
    pub(crate) world: World,
    pub(crate) player: Player,
    pub(crate) rng: GameRng,
    pub(crate) status: SessionStatus,
    interpreter: Interpreter,
}

impl Session {
    /// Fresh game at the origin with the starting room already generated.
    pub fn new(seed: u64) -> Self {
        let mut session = Self {
            world: World::new(),
            player: Player::new(),
            rng: GameRng::new(seed),
            status: SessionStatus::Playing,
            interpreter: Interpreter::new(),
        };
        session.here();
        info!("new session seed={}", seed);
        session
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, SessionStatus::Dead { .. })
    }

    /// The player's current room, generated on first use.
    pub fn here(&mut self) -> &mut Room {
        let pos = self.player.position;
        self.world.room_entry(pos, &mut self.rng)
    }

    /// Run one line of player input.
    pub fn handle_input(&mut self, input: &str) -> Vec<Narration> {
        if self.is_over() {
            return vec![Narration::warning(
                "The game is over. Start a new game to play again.",
            )];
        }
        match self.interpreter.parse(input) {
            Parsed::Empty => vec![Narration::warning("You didn't say anything.")],
            Parsed::Unrecognized => {
                debug!("unrecognized input '{}'", escape_log(input));
                vec![Narration::warning("I didn't understand that.")]
            }
            Parsed::Command(command) => {
                debug!("command {:?} args={:?}", command.verb, command.args);
                self.execute(&command)
            }
        }
    }

    /// Apply an already parsed command, then let the world react.
    pub fn execute(&mut self, command: &Command) -> Vec<Narration> {
        if self.is_over() {
            return Vec::new();
        }
        let Outcome {
            mut lines,
            acted,
            death,
        } = actions::dispatch(self, command);
        if let Some(cause) = death {
            lines.extend(self.die(cause));
            return lines;
        }
        if acted {
            lines.extend(turn::advance(self));
            if self.player.is_dead() {
                lines.extend(self.die("slain by monsters".to_string()));
            }
        }
        lines
    }

    fn die(&mut self, cause: String) -> Vec<Narration> {
        info!(
            "player died at {} on turn {}: {}",
            self.player.position, self.player.turn, cause
        );
        let score = vec![
            Narration::danger("You have died."),
            Narration::plain(format!(
                "You survived {} turns and were carrying {} items.",
                self.player.turn,
                self.player.inventory.len()
            )),
        ];
        self.status = SessionStatus::Dead { cause };
        score
    }

    /// One-line summary for front ends.
    pub fn status_line(&self) -> String {
        let pos = self.player.position;
        let clock = if turn::is_day(self.player.turn) {
            "day"
        } else {
            "night"
        };
        format!(
            "HP {}/{} | {} | turn {} | {}",
            self.player.hit_points, MAX_HIT_POINTS, pos, self.player.turn, clock
        )
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: SNAPSHOT_VERSION,
            saved_at: chrono::Utc::now(),
            turn: self.player.turn,
            time_in_room: self.player.time_in_room,
            position: self.player.position,
            hit_points: self.player.hit_points,
            inventory: self.player.inventory.clone(),
            rooms: self
                .world
                .rooms()
                .map(|(coord, room)| (*coord, room.clone()))
                .collect(),
            seed: self.rng.seed(),
            word_pos: self.rng.word_pos(),
            status: self.status.clone(),
        }
    }

    /// Rebuild a session from a snapshot, continuing its random stream.
    pub fn restore(snapshot: Snapshot) -> Result<Self, AdventureError> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(AdventureError::SnapshotVersion {
                expected: SNAPSHOT_VERSION,
                found: snapshot.version,
            });
        }
        if !snapshot.position.in_bounds() {
            return Err(AdventureError::InvalidSnapshot(format!(
                "player position {} is outside the world",
                snapshot.position
            )));
        }
        if !(0..=MAX_HIT_POINTS).contains(&snapshot.hit_points) {
            return Err(AdventureError::InvalidSnapshot(format!(
                "hit points {} out of range",
                snapshot.hit_points
            )));
        }
        if let Some((coord, _)) = snapshot.rooms.iter().find(|(c, _)| !c.in_bounds()) {
            return Err(AdventureError::InvalidSnapshot(format!(
                "room {} is outside the world",
                coord
            )));
        }
        let world = World::from_rooms(snapshot.rooms);
        if world.get(snapshot.position).is_none() {
            return Err(AdventureError::InvalidSnapshot(format!(
                "no room at player position {}",
                snapshot.position
            )));
        }
        let player = Player {
            position: snapshot.position,
            hit_points: snapshot.hit_points,
            inventory: snapshot.inventory,
            turn: snapshot.turn,
            time_in_room: snapshot.time_in_room,
        };
        info!(
            "restored session turn={} rooms={}",
            player.turn,
            world.len()
        );
        Ok(Self {
            world,
            player,
            rng: GameRng::resume(snapshot.seed, snapshot.word_pos),
            status: snapshot.status,
            interpreter: Interpreter::new(),
        })
    }
}
