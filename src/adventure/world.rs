//! Coordinate-addressed, lazily generated world of rooms.
//!
//! A room is generated the first time it is asked for with `create = true` and
//! cached for the rest of the session. Generation only ever *peeks* at
//! neighbours ([`World::peek`]), it never generates them, so exploring a long
//! corridor cannot trigger an unbounded chain of generation.
//!
//! Exit consistency: an exit towards an already generated neighbour mirrors
//! that neighbour's opposite exit; an exit towards an unknown neighbour is a
//! local guess, and the neighbour honours it when it is generated later.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use super::catalog::{ItemKey, ItemSet, Tag, FAUNA};
use super::rng::GameRng;

/// The sunlit layer.
pub const SURFACE_Y: i32 = 0;
/// Deepest layer; nothing is generated or dug below it.
pub const BEDROCK_Y: i32 = -3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Coord {
    pub const ORIGIN: Coord = Coord { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn step(self, dir: Direction) -> Coord {
        let (dx, dy, dz) = dir.offset();
        Coord::new(self.x + dx, self.y + dy, self.z + dz)
    }

    pub fn in_bounds(self) -> bool {
        (BEDROCK_Y..=SURFACE_Y).contains(&self.y)
    }

    pub fn is_surface(self) -> bool {
        self.y == SURFACE_Y
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Up,
        Direction::Down,
    ];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
            Direction::West => Direction::East,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// (dx, dy, dz). North is +z, east is +x, up is +y.
    pub fn offset(self) -> (i32, i32, i32) {
        match self {
            Direction::North => (0, 0, 1),
            Direction::South => (0, 0, -1),
            Direction::East => (1, 0, 0),
            Direction::West => (-1, 0, 0),
            Direction::Up => (0, 1, 0),
            Direction::Down => (0, -1, 0),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }

    /// Accepts full names and single-letter abbreviations, any case.
    pub fn parse(word: &str) -> Option<Direction> {
        match word.trim().to_lowercase().as_str() {
            "north" | "n" => Some(Direction::North),
            "south" | "s" => Some(Direction::South),
            "east" | "e" => Some(Direction::East),
            "west" | "w" => Some(Direction::West),
            "up" | "u" | "upwards" => Some(Direction::Up),
            "down" | "d" | "downwards" => Some(Direction::Down),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exits {
    pub north: bool,
    pub south: bool,
    pub east: bool,
    pub west: bool,
    pub up: bool,
    pub down: bool,
}

impl Exits {
    pub fn is_open(&self, dir: Direction) -> bool {
        match dir {
            Direction::North => self.north,
            Direction::South => self.south,
            Direction::East => self.east,
            Direction::West => self.west,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    pub fn set(&mut self, dir: Direction, open: bool) {
        let slot = match dir {
            Direction::North => &mut self.north,
            Direction::South => &mut self.south,
            Direction::East => &mut self.east,
            Direction::West => &mut self.west,
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
        };
        *slot = open;
    }

    pub fn open(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(move |d| self.is_open(*d))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Biome {
    Plains,
    Forest,
    Taiga,
    Jungle,
    Desert,
    Mountains,
}

impl Biome {
    pub const ALL: [Biome; 6] = [
        Biome::Plains,
        Biome::Forest,
        Biome::Taiga,
        Biome::Jungle,
        Biome::Desert,
        Biome::Mountains,
    ];

    /// Forest, taiga and jungle (ids 1-3).
    pub fn has_trees(self) -> bool {
        matches!(self, Biome::Forest | Biome::Taiga | Biome::Jungle)
    }

    pub fn allows_river(self) -> bool {
        !matches!(self, Biome::Plains | Biome::Desert)
    }

    pub fn is_stony(self) -> bool {
        self == Biome::Mountains
    }

    pub fn description(self) -> &'static str {
        match self {
            Biome::Plains => "You are standing on open, grassy plains.",
            Biome::Forest => "You are in a leafy forest.",
            Biome::Taiga => "You are in a cold taiga of tall spruce trees.",
            Biome::Jungle => "You are in a steaming jungle.",
            Biome::Desert => "You are in a hot, sandy desert.",
            Biome::Mountains => "You are high in the rocky mountains.",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub items: ItemSet,
    pub exits: Exits,
    pub dark: bool,
    /// Monsters spawned here and not yet killed or despawned.
    pub monsters: u8,
    /// Surface rooms only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biome: Option<Biome>,
    #[serde(default)]
    pub trees: bool,
}

impl Room {
    pub fn has_torch(&self) -> bool {
        self.items.contains(ItemKey::Torch)
    }

    /// Unlit: a torch lying here counts, however it got here.
    pub fn is_dark(&self) -> bool {
        self.dark && !self.has_torch()
    }

    pub fn monsters_present(&self) -> Vec<ItemKey> {
        self.items.with_tag(Tag::Monster).collect()
    }
}

/// Result of a non-generating neighbour lookup.
#[derive(Debug, Clone, Copy)]
pub enum Peek<'a> {
    Generated(&'a Room),
    NotYetGenerated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigOutcome {
    Opened(Coord),
    AlreadyOpen(Coord),
    /// Below the bedrock floor.
    Bedrock,
    /// Digging up from the surface.
    NoCeiling,
}

/// Append-only sparse map of every room generated this session.
#[derive(Debug, Clone, Default)]
pub struct World {
    rooms: BTreeMap<Coord, Room>,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from previously generated rooms (snapshot restore).
    pub fn from_rooms<I: IntoIterator<Item = (Coord, Room)>>(rooms: I) -> Self {
        Self {
            rooms: rooms.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    pub fn rooms(&self) -> impl Iterator<Item = (&Coord, &Room)> {
        self.rooms.iter()
    }

    pub fn rooms_mut(&mut self) -> impl Iterator<Item = (&Coord, &mut Room)> {
        self.rooms.iter_mut()
    }

    /// Look without generating.
    pub fn peek(&self, coord: Coord) -> Peek<'_> {
        match self.rooms.get(&coord) {
            Some(room) => Peek::Generated(room),
            None => Peek::NotYetGenerated,
        }
    }

    pub fn get(&self, coord: Coord) -> Option<&Room> {
        self.rooms.get(&coord)
    }

    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut Room> {
        self.rooms.get_mut(&coord)
    }

    /// Fetch a room, generating it first when `create` is set.
    ///
    /// Returns `None` outside the valid depth range, or when the room does not
    /// exist yet and `create` is false.
    pub fn room_at(&mut self, coord: Coord, create: bool, rng: &mut GameRng) -> Option<&Room> {
        if create {
            self.ensure(coord, rng);
        }
        self.rooms.get(&coord)
    }

    /// Generating, mutable variant of [`World::room_at`].
    pub fn room_mut(&mut self, coord: Coord, rng: &mut GameRng) -> Option<&mut Room> {
        self.ensure(coord, rng);
        self.rooms.get_mut(&coord)
    }

    /// Mutable access to an in-bounds room, generating it if needed. Callers
    /// pass coordinates that are already known to be in bounds, such as the
    /// player's position.
    pub fn room_entry(&mut self, coord: Coord, rng: &mut GameRng) -> &mut Room {
        debug_assert!(coord.in_bounds(), "room_entry outside the world: {}", coord);
        self.ensure(coord, rng);
        self.rooms.entry(coord).or_default()
    }

    /// Generate `coord` if it is in bounds and missing. Returns true if the
    /// room exists afterwards.
    pub fn ensure(&mut self, coord: Coord, rng: &mut GameRng) -> bool {
        if !coord.in_bounds() {
            return false;
        }
        if !self.rooms.contains_key(&coord) {
            let room = self.generate(coord, rng);
            debug!(
                "generated room at {} exits={:?} items={}",
                coord,
                room.exits.open().map(Direction::name).collect::<Vec<_>>(),
                room.items.len()
            );
            self.rooms.insert(coord, room);
        }
        true
    }

    fn generate(&self, coord: Coord, rng: &mut GameRng) -> Room {
        if coord.is_surface() {
            self.generate_surface(coord, rng)
        } else {
            self.generate_underground(coord, rng)
        }
    }

    fn generate_surface(&self, coord: Coord, rng: &mut GameRng) -> Room {
        let mut room = Room::default();
        let biome = *rng.pick(&Biome::ALL).unwrap_or(&Biome::Plains);
        room.biome = Some(biome);
        room.trees = biome.has_trees();

        if rng.one_in(3) {
            let count = rng.irand(1, 3);
            for _ in 0..count {
                if let Some(animal) = rng.pick(&FAUNA) {
                    room.items.insert(*animal);
                }
            }
        }
        // Roll before testing the biome so the stream doesn't depend on it.
        let stone = rng.one_in(5);
        if stone || biome.is_stony() {
            room.items.insert(ItemKey::Stone);
        }
        if rng.one_in(8) {
            room.items.insert(ItemKey::Coal);
        }
        let river = rng.one_in(8);
        if river && biome.allows_river() {
            room.items.insert(ItemKey::River);
        }

        for dir in [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ] {
            room.exits.set(dir, true);
        }
        let down = match self.peek(coord.step(Direction::Down)) {
            Peek::Generated(below) => below.exits.up,
            Peek::NotYetGenerated => rng.one_in(8),
        };
        if down {
            room.exits.down = true;
            room.items.insert(ItemKey::CaveEntrance);
        }
        room
    }

    fn generate_underground(&self, coord: Coord, rng: &mut GameRng) -> Room {
        let mut room = Room {
            dark: true,
            ..Room::default()
        };
        for dir in Direction::ALL {
            let open = match dir {
                // Only a cave entrance above can open the way to the surface.
                Direction::Up if coord.y == SURFACE_Y - 1 => {
                    match self.peek(coord.step(Direction::Up)) {
                        Peek::Generated(above) => above.exits.down,
                        Peek::NotYetGenerated => false,
                    }
                }
                Direction::Down if coord.y <= BEDROCK_Y => false,
                _ => match self.peek(coord.step(dir)) {
                    Peek::Generated(neighbour) => neighbour.exits.is_open(dir.opposite()),
                    Peek::NotYetGenerated => rng.one_in(3),
                },
            };
            room.exits.set(dir, open);
        }
        if room.exits.up && coord.y == SURFACE_Y - 1 {
            room.items.insert(ItemKey::SurfaceExit);
        }

        room.items.insert(ItemKey::Stone);
        if rng.one_in(3) {
            room.items.insert(ItemKey::Coal);
        }
        if rng.one_in(8) {
            room.items.insert(ItemKey::Iron);
        }
        if coord.y == BEDROCK_Y && rng.one_in(15) {
            room.items.insert(ItemKey::Diamond);
        }
        room
    }

    /// Open a passage from `from` towards `dir` on both sides, generating the
    /// neighbour if needed.
    pub fn dig_exit(&mut self, from: Coord, dir: Direction, rng: &mut GameRng) -> DigOutcome {
        if dir == Direction::Up && from.y >= SURFACE_Y {
            return DigOutcome::NoCeiling;
        }
        let to = from.step(dir);
        if to.y < BEDROCK_Y {
            return DigOutcome::Bedrock;
        }
        self.ensure(from, rng);
        self.ensure(to, rng);

        let already = self
            .get(from)
            .map(|r| r.exits.is_open(dir))
            .unwrap_or(false)
            && self
                .get(to)
                .map(|r| r.exits.is_open(dir.opposite()))
                .unwrap_or(false);
        if already {
            return DigOutcome::AlreadyOpen(to);
        }

        // Which side of a surface shaft each room is on, if any.
        let (from_marker, to_marker) = match dir {
            Direction::Up if to.is_surface() => {
                (Some(ItemKey::SurfaceExit), Some(ItemKey::CaveEntrance))
            }
            Direction::Down if from.is_surface() => {
                (Some(ItemKey::CaveEntrance), Some(ItemKey::SurfaceExit))
            }
            _ => (None, None),
        };

        if let Some(room) = self.get_mut(from) {
            room.exits.set(dir, true);
            if let Some(marker) = from_marker {
                room.items.insert(marker);
            }
        }
        if let Some(room) = self.get_mut(to) {
            room.exits.set(dir.opposite(), true);
            if let Some(marker) = to_marker {
                room.items.insert(marker);
            }
        }
        debug!("dug {} from {} to {}", dir.name(), from, to);
        DigOutcome::Opened(to)
    }
}
