use cavecraft::adventure::rng::GameRng;
use cavecraft::adventure::world::{Peek, BEDROCK_Y, SURFACE_Y};
use cavecraft::adventure::{Coord, Direction, ItemKey, World};

/// Every generated pair of neighbours must agree on the exit between them.
fn assert_consistent(world: &World) {
    for (coord, room) in world.rooms() {
        for dir in Direction::ALL {
            if let Peek::Generated(other) = world.peek(coord.step(dir)) {
                assert_eq!(
                    room.exits.is_open(dir),
                    other.exits.is_open(dir.opposite()),
                    "{} {} disagrees with its neighbour",
                    coord,
                    dir.name()
                );
            }
        }
    }
}

fn explore(seed: u64, order: &[Coord]) -> World {
    let mut rng = GameRng::new(seed);
    let mut world = World::new();
    for coord in order {
        world.room_at(*coord, true, &mut rng);
    }
    world
}

fn block() -> Vec<Coord> {
    let mut coords = Vec::new();
    for y in BEDROCK_Y..=SURFACE_Y {
        for x in -2..=2 {
            for z in -2..=2 {
                coords.push(Coord::new(x, y, z));
            }
        }
    }
    coords
}

#[test]
fn top_down_exploration_is_consistent() {
    for seed in 0..16 {
        let world = explore(seed, &block());
        assert_eq!(world.len(), 100);
        assert_consistent(&world);
    }
}

#[test]
fn bottom_up_and_scrambled_exploration_is_consistent() {
    for seed in 0..16 {
        let mut order = block();
        order.reverse();
        assert_consistent(&explore(seed, &order));

        // Deterministic shuffle driven by its own generator.
        let mut order = block();
        let mut shuffler = GameRng::new(seed ^ 0xC0FFEE);
        for i in (1..order.len()).rev() {
            let j = shuffler.irand(0, i as i64) as usize;
            order.swap(i, j);
        }
        assert_consistent(&explore(seed, &order));
    }
}

#[test]
fn layers_have_their_own_contents() {
    let world = explore(3, &block());
    for (coord, room) in world.rooms() {
        if coord.is_surface() {
            assert!(!room.dark);
            assert!(room.biome.is_some());
            assert!(room.exits.north && room.exits.south && room.exits.east && room.exits.west);
            assert!(!room.exits.up);
            assert_eq!(room.exits.down, room.items.contains(ItemKey::CaveEntrance));
        } else {
            assert!(room.dark);
            assert!(room.biome.is_none());
            assert!(room.items.contains(ItemKey::Stone));
        }
        if coord.y == BEDROCK_Y {
            assert!(!room.exits.down);
        } else {
            assert!(!room.items.contains(ItemKey::Diamond), "diamond above bedrock layer");
        }
    }
}

#[test]
fn rooms_are_cached_not_regenerated() {
    let mut rng = GameRng::new(12);
    let mut world = World::new();
    let coord = Coord::new(4, -2, -7);
    let first = world.room_at(coord, true, &mut rng).cloned();
    let second = world.room_at(coord, true, &mut rng).cloned();
    assert!(first.is_some());
    assert_eq!(first, second);
    assert!(world.room_at(Coord::new(0, 1, 0), true, &mut rng).is_none());
    assert!(world.room_at(Coord::new(9, 0, 9), false, &mut rng).is_none());
}

#[test]
fn same_seed_same_world() {
    let a = explore(99, &block());
    let b = explore(99, &block());
    let rooms_a: Vec<_> = a.rooms().collect();
    let rooms_b: Vec<_> = b.rooms().collect();
    assert_eq!(rooms_a, rooms_b);
}
