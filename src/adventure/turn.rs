//! Per-turn world simulation: the day/night clock, monster spawning around the
//! player, sunrise despawns and passive attacks.
//!
//! Day and night are never stored; they are recomputed from the turn counter.

use log::{debug, info};

use super::catalog::{ItemKey, Tag, MONSTERS};
use super::narration::{capitalize, emph, Narration};
use super::session::Session;
use super::world::{Coord, BEDROCK_Y};

/// Turns in one full day/night cycle.
pub const DAY_LENGTH: u64 = 20;
/// Leading turns of each cycle that are daylight.
pub const DAYLIGHT_TURNS: u64 = 12;
/// A room never holds more spawned monsters than this.
pub const MAX_MONSTERS_PER_ROOM: u8 = 2;
/// Turns the player must linger before monsters start attacking.
pub const LINGER_TURNS: u32 = 2;

pub fn is_day(turn: u64) -> bool {
    turn % DAY_LENGTH < DAYLIGHT_TURNS
}

pub fn is_sunrise(turn: u64) -> bool {
    turn > 0 && turn % DAY_LENGTH == 0
}

pub fn is_sunset(turn: u64) -> bool {
    turn % DAY_LENGTH == DAYLIGHT_TURNS
}

/// Coordinates the simulator looks at around `center`: a 4x2x4 box.
pub fn spawn_window(center: Coord) -> Vec<Coord> {
    let lower = (center.y - 1).max(BEDROCK_Y);
    let mut layers = vec![center.y];
    if lower != center.y {
        layers.push(lower);
    }
    let mut coords = Vec::with_capacity(32);
    for y in layers {
        for x in center.x - 2..center.x + 2 {
            for z in center.z - 2..center.z + 2 {
                coords.push(Coord::new(x, y, z));
            }
        }
    }
    coords
}

/// Advance one turn after an action that consumed time.
pub fn advance(session: &mut Session) -> Vec<Narration> {
    session.player.turn += 1;
    session.player.time_in_room += 1;
    let now = session.player.turn;
    let on_surface = session.player.position.is_surface();
    let mut lines = Vec::new();

    if is_sunrise(now) {
        sunrise_cleanup(session);
        if on_surface {
            lines.push(Narration::good("The sun rises."));
        }
    } else if is_sunset(now) && on_surface {
        lines.push(Narration::warning("The sun sets."));
    }

    let spawned_here = spawn_monsters(session, &mut lines);
    if !spawned_here && session.player.time_in_room >= LINGER_TURNS {
        monster_attacks(session, &mut lines);
    }
    lines
}

/// Daylight burns off every non-nocturnal monster on the surface.
fn sunrise_cleanup(session: &mut Session) {
    let mut removed = 0;
    for (coord, room) in session.world.rooms_mut() {
        if !coord.is_surface() {
            continue;
        }
        for monster in room.monsters_present() {
            if !monster.has(Tag::Nocturnal) {
                room.items.remove(monster);
                room.monsters = room.monsters.saturating_sub(1);
                removed += 1;
            }
        }
    }
    if removed > 0 {
        debug!("sunrise removed {} monsters", removed);
    }
}

/// Returns true if a monster appeared in the player's own room.
fn spawn_monsters(session: &mut Session, lines: &mut Vec<Narration>) -> bool {
    let night = !is_day(session.player.turn);
    let here = session.player.position;
    let mut spawned_here = false;
    for coord in spawn_window(here) {
        let room = session.world.room_entry(coord, &mut session.rng);
        if room.monsters >= MAX_MONSTERS_PER_ROOM {
            continue;
        }
        let exposed = coord.is_surface() && night && !room.has_torch();
        if !(room.is_dark() || exposed) {
            continue;
        }
        let candidates: Vec<ItemKey> = MONSTERS
            .iter()
            .copied()
            .filter(|m| !room.items.contains(*m))
            .collect();
        let Some(monster) = session.rng.pick(&candidates).copied() else {
            continue;
        };
        room.items.insert(monster);
        room.monsters += 1;
        debug!("spawned {:?} at {}", monster, coord);
        if coord == here {
            spawned_here = true;
            if !room.is_dark() {
                lines.push(Narration::danger(format!(
                    "{} appears!",
                    capitalize(&emph(monster.name()))
                )));
            }
        }
    }
    spawned_here
}

fn monster_attacks(session: &mut Session, lines: &mut Vec<Narration>) {
    let monsters = session.here().monsters_present();
    for monster in monsters {
        if !session.rng.one_in(4) {
            continue;
        }
        let name = capitalize(&emph(monster.name()));
        if monster == ItemKey::Creeper {
            let room = session.here();
            room.items.remove(monster);
            room.monsters = room.monsters.saturating_sub(1);
            session.player.hurt(2);
            lines.push(Narration::danger(format!("{} explodes!", name)));
        } else {
            session.player.hurt(1);
            lines.push(Narration::danger(format!("{} attacks you!", name)));
        }
        if session.player.is_dead() {
            info!("player killed by {:?}", monster);
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_cycle() {
        assert!(is_day(0));
        assert!(is_day(11));
        assert!(!is_day(12));
        assert!(!is_day(19));
        assert!(is_day(20));
        assert!(is_sunset(12));
        assert!(is_sunrise(20));
        assert!(!is_sunrise(0));
    }

    #[test]
    fn window_is_four_by_two_by_four() {
        let window = spawn_window(Coord::new(5, 0, -3));
        assert_eq!(window.len(), 32);
        assert!(window.contains(&Coord::new(3, -1, -5)));
        assert!(window.contains(&Coord::new(6, 0, -2)));
        assert!(!window.contains(&Coord::new(7, 0, -3)));
    }

    #[test]
    fn window_at_bedrock_has_one_layer() {
        let window = spawn_window(Coord::new(0, BEDROCK_Y, 0));
        assert_eq!(window.len(), 16);
        assert!(window.iter().all(|c| c.y == BEDROCK_Y));
    }

    #[test]
    fn daylight_surface_rooms_stay_empty() {
        let mut session = Session::new(9);
        for _ in 0..5 {
            advance(&mut session);
        }
        let room = session.world().get(Coord::ORIGIN).expect("origin");
        assert_eq!(room.monsters, 0);
    }

    #[test]
    fn sunrise_removes_daytime_monsters_only() {
        let mut session = Session::new(9);
        {
            let room = session.here();
            room.items.insert(ItemKey::Zombie);
            room.items.insert(ItemKey::Spider);
            room.monsters = 2;
        }
        session.player_mut().turn = DAY_LENGTH - 1;
        let lines = advance(&mut session);
        assert!(lines.iter().any(|l| l.text == "The sun rises."));
        let room = session.here();
        assert!(!room.items.contains(ItemKey::Zombie));
        assert!(room.items.contains(ItemKey::Spider));
        assert_eq!(room.monsters, 1);
    }

    /// A fresh session on the lit surface origin with `monster` in the room.
    fn lingering_with(seed: u64, monster: ItemKey, time_in_room: u32) -> Session {
        let mut session = Session::new(seed);
        {
            let room = session.here();
            for present in room.monsters_present() {
                room.items.remove(present);
            }
            room.items.insert(monster);
            room.monsters = 1;
            room.dark = false;
        }
        session.player_mut().time_in_room = time_in_room;
        session
    }

    #[test]
    fn nothing_attacks_before_the_player_lingers() {
        for seed in 0..40 {
            let mut session = lingering_with(seed, ItemKey::Zombie, 0);
            advance(&mut session);
            assert_eq!(session.player().hit_points, 5);
        }
    }

    #[test]
    fn lingering_zombies_sometimes_bite() {
        let mut bitten = 0;
        for seed in 0..80 {
            let mut session = lingering_with(seed, ItemKey::Zombie, 1);
            let lines = advance(&mut session);
            if session.player().hit_points == 4 {
                bitten += 1;
                assert!(lines
                    .iter()
                    .any(|l| l.plain_text() == "A zombie attacks you!"));
            } else {
                assert_eq!(session.player().hit_points, 5);
            }
        }
        assert!(bitten > 0 && bitten < 80);
    }

    #[test]
    fn creepers_explode_and_leave_the_room() {
        let mut exploded = 0;
        let mut waited = 0;
        for seed in 0..80 {
            let mut session = lingering_with(seed, ItemKey::Creeper, 1);
            let lines = advance(&mut session);
            let room = session.here();
            if room.items.contains(ItemKey::Creeper) {
                waited += 1;
                assert_eq!(room.monsters, 1);
                assert_eq!(session.player().hit_points, 5);
            } else {
                exploded += 1;
                assert_eq!(room.monsters, 0);
                assert_eq!(session.player().hit_points, 3);
                assert!(lines.iter().any(|l| l.plain_text() == "A creeper explodes!"));
            }
        }
        assert!(exploded > 0 && waited > 0);
    }

    #[test]
    fn no_attack_on_the_tick_a_monster_appears_here() {
        for seed in 0..40 {
            let mut session = lingering_with(seed, ItemKey::Zombie, 5);
            session.here().dark = true;
            advance(&mut session);
            assert_eq!(session.here().monsters, 2);
            assert_eq!(session.player().hit_points, 5);
        }
    }

    #[test]
    fn a_monster_appearing_in_a_lit_room_is_announced() {
        let mut session = Session::new(13);
        {
            let room = session.here();
            for present in room.monsters_present() {
                room.items.remove(present);
            }
            room.monsters = 0;
            room.dark = false;
        }
        session.player_mut().turn = DAYLIGHT_TURNS - 1;
        let lines = advance(&mut session);
        let texts: Vec<String> = lines.iter().map(Narration::plain_text).collect();
        assert!(texts.iter().any(|t| t == "The sun sets."));
        assert!(texts
            .iter()
            .any(|t| t.starts_with('A') && t.ends_with(" appears!")));
        assert_eq!(session.here().monsters, 1);
    }

    #[test]
    fn a_torch_on_the_floor_counts_as_light() {
        let mut session = Session::new(13);
        let below = Coord::new(0, -1, 0);
        session.world.ensure(below, &mut session.rng);
        session.player_mut().move_to(below);
        {
            let room = session.here();
            for present in room.monsters_present() {
                room.items.remove(present);
            }
            room.monsters = 0;
            room.dark = true;
            room.items.insert(ItemKey::Torch);
        }
        for _ in 0..5 {
            advance(&mut session);
        }
        assert_eq!(session.here().monsters, 0);
    }

    #[test]
    fn night_spawns_respect_the_room_cap() {
        let mut session = Session::new(21);
        session.player_mut().turn = DAYLIGHT_TURNS;
        for _ in 0..8 {
            advance(&mut session);
            for (_, room) in session.world().rooms() {
                assert!(room.monsters <= MAX_MONSTERS_PER_ROOM);
            }
        }
    }
}
