mod common;

use cavecraft::adventure::catalog::MONSTERS;
use cavecraft::adventure::turn::DAYLIGHT_TURNS;
use cavecraft::adventure::{Coord, ItemKey};
use common::{run_script, sealed_start, texts};

#[test]
fn going_down_without_an_exit_stays_put() {
    let mut session = sealed_start(1);
    let out = texts(&session.handle_input("go down"));
    assert_eq!(out, vec!["You can't go that way.".to_string()]);
    assert_eq!(session.player().position, Coord::ORIGIN);
    assert_eq!(session.player().turn, 0, "a refused move takes no time");
}

#[test]
fn walking_north_moves_along_z_and_describes_the_room() {
    let mut session = sealed_start(2);
    let out = run_script(&mut session, &["n"]);
    assert_eq!(out[0], "You go north.");
    assert!(out.iter().any(|l| l.starts_with("Exits:")));
    assert_eq!(session.player().position, Coord::new(0, 0, 1));
    assert_eq!(session.player().time_in_room, 1);
}

#[test]
fn crafting_a_wooden_pickaxe_consumes_the_inputs() {
    let mut session = sealed_start(3);
    session.player_mut().inventory.insert(ItemKey::Planks);
    session.player_mut().inventory.insert(ItemKey::Sticks);
    let out = texts(&session.handle_input("craft a wooden pickaxe"));
    assert_eq!(out[0], "You craft a wooden pickaxe.");
    let carried: Vec<ItemKey> = session.player().inventory.iter().collect();
    assert_eq!(carried, vec![ItemKey::WoodenPickaxe]);
}

#[test]
fn chopping_and_crafting_chain() {
    let mut session = sealed_start(4);
    session.here().trees = true;
    let out = run_script(
        &mut session,
        &["chop down tree", "craft planks", "chop down tree", "craft planks", "craft sticks"],
    );
    assert!(out.iter().all(|l| !l.starts_with("You need")), "{:?}", out);
    // Presence only: the second batch of planks merged into the first.
    let inventory = &session.player().inventory;
    assert!(inventory.contains(ItemKey::Sticks));
    assert!(!inventory.contains(ItemKey::Planks));
    assert!(!inventory.contains(ItemKey::Wood));
}

#[test]
fn mining_iron_with_a_wooden_pickaxe_fails() {
    let mut session = sealed_start(5);
    session.here().items.insert(ItemKey::Iron);
    session.player_mut().inventory.insert(ItemKey::WoodenPickaxe);
    let out = texts(&session.handle_input("mine iron with wooden pickaxe"));
    assert!(out[0].contains("not strong enough"), "{:?}", out);
    assert!(session.here().items.contains(ItemKey::Iron));
    assert!(!session.player().inventory.contains(ItemKey::Iron));
}

#[test]
fn night_on_the_surface_never_crowds_a_room() {
    for seed in 0..10 {
        let mut session = sealed_start(seed);
        session.player_mut().turn = DAYLIGHT_TURNS;
        for _ in 0..10 {
            session.handle_input("wait");
            let room = session.here();
            let present = room.items.iter().filter(|k| MONSTERS.contains(k)).count();
            assert!(room.monsters <= 2, "seed {} counter {}", seed, room.monsters);
            assert!(present <= 2, "seed {} has {} monsters", seed, present);
        }
    }
}

#[test]
fn a_torch_keeps_the_night_away() {
    let mut session = sealed_start(6);
    session.player_mut().inventory.insert(ItemKey::Torch);
    session.handle_input("place torch");
    session.player_mut().turn = DAYLIGHT_TURNS;
    for _ in 0..6 {
        session.handle_input("wait");
    }
    assert_eq!(session.here().monsters, 0);
}

#[test]
fn digging_down_from_the_surface_opens_a_shaft() {
    let mut session = sealed_start(7);
    session.player_mut().inventory.insert(ItemKey::StonePickaxe);
    let out = texts(&session.handle_input("dig down"));
    assert!(out[0].starts_with("You dig down"), "{:?}", out);
    assert!(session.here().items.contains(ItemKey::CaveEntrance));
    session.handle_input("go down");
    assert_eq!(session.player().position, Coord::new(0, -1, 0));
    assert!(session.here().exits.up);
    assert!(session.here().items.contains(ItemKey::SurfaceExit));
}

#[test]
fn eating_heals_one_point() {
    let mut session = sealed_start(8);
    session.player_mut().hit_points = 3;
    session.player_mut().inventory.insert(ItemKey::Mutton);
    session.handle_input("eat mutton");
    assert_eq!(session.player().hit_points, 4);
    assert!(!session.player().inventory.contains(ItemKey::Mutton));
}

#[test]
fn death_reports_a_score() {
    let mut session = sealed_start(9);
    session.player_mut().inventory.insert(ItemKey::Torch);
    let out = texts(&session.handle_input("kill me"));
    assert!(out.contains(&"You have died.".to_string()));
    assert!(out
        .iter()
        .any(|l| l == "You survived 0 turns and were carrying 1 items."));
    assert!(session.is_over());
}
