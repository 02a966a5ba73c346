//! Breaking things: mining ore, chopping trees and fighting creatures all go
//! through [`cbreak`]. `mine` and `attack` only differ in how they insist on a
//! tool argument.

use log::{debug, info};

use super::actions::{is_tree, Outcome};
use super::catalog::{normalize_name, ItemKey, Tag, ToolCategory};
use super::narration::{capitalize, emph, Narration};
use super::session::Session;

/// Kill chance in percent, indexed by sword tier (0 = no sword).
pub const KILL_CHANCE_PERCENT: [i64; 5] = [20, 40, 55, 80, 100];

/// Chance in percent that each hit-drop falls off a struck creature.
pub const HIT_DROP_PERCENT: i64 = 60;

const SELF_WORDS: [&str; 5] = ["self", "me", "myself", "yourself", "player"];

/// `mine <ore> with <tool>`
pub fn mine(session: &mut Session, args: &[String]) -> Outcome {
    match args {
        [] => Outcome::refused("Mine what?"),
        [target] => Outcome::refused(format!("What do you want to mine {} with?", target)),
        [target, tool, ..] => cbreak(session, target, Some(tool.as_str())),
    }
}

/// `attack <creature> with <weapon>`
pub fn attack(session: &mut Session, args: &[String]) -> Outcome {
    match args {
        [] => Outcome::refused("Attack what?"),
        [target] => Outcome::refused(format!("What do you want to attack {} with?", target)),
        [target, tool, ..] => cbreak(session, target, Some(tool.as_str())),
    }
}

/// `break <thing> [with <tool>]`, also reached by punch, chop and bare attack.
pub fn break_target(session: &mut Session, args: &[String]) -> Outcome {
    match args {
        [] => Outcome::refused("Break what?"),
        [target] => cbreak(session, target, None),
        [target, tool, ..] => cbreak(session, target, Some(tool.as_str())),
    }
}

/// A resolved tool in hand; bare hands are tier 0 with no category.
#[derive(Debug, Clone, Copy)]
struct Wielded {
    key: Option<ItemKey>,
    tier: u8,
    category: Option<ToolCategory>,
}

impl Wielded {
    const HANDS: Wielded = Wielded {
        key: None,
        tier: 0,
        category: None,
    };

    fn of(key: ItemKey) -> Self {
        let def = key.def();
        if key.has(Tag::Tool) {
            Self {
                key: Some(key),
                tier: def.tier,
                category: def.category,
            }
        } else {
            Self {
                key: Some(key),
                ..Self::HANDS
            }
        }
    }

    fn sword_tier(&self) -> usize {
        match self.category {
            Some(ToolCategory::Sword) => self.tier as usize,
            _ => 0,
        }
    }

    fn label(&self) -> String {
        match self.key {
            Some(key) => emph(key.name()),
            None => "your bare hands".to_string(),
        }
    }
}

pub fn cbreak(session: &mut Session, target: &str, tool: Option<&str>) -> Outcome {
    let target = normalize_name(target);
    if SELF_WORDS.contains(&target.as_str()) {
        info!("player attacked themselves");
        return Outcome::fatal(
            "self-inflicted",
            vec![Narration::danger("You turn on yourself. It is very effective.")],
        );
    }

    let wielded = match tool {
        None => Wielded::HANDS,
        Some(name) => match session.player.inventory.resolve(name) {
            Some(key) => Wielded::of(key),
            None => return Outcome::refused(format!("You don't have {}.", name)),
        },
    };

    let room = session.here();
    let Some(key) = room.items.resolve(&target) else {
        if is_tree(&target) {
            if !room.trees {
                return Outcome::refused("There are no trees here.");
            }
            session.player.inventory.insert(ItemKey::Wood);
            return Outcome::acted(vec![Narration::good(format!(
                "You chop down a tree and collect {}.",
                emph(ItemKey::Wood.name())
            ))]);
        }
        return Outcome::refused(format!("There is no {} here.", target));
    };

    if key.has(Tag::Ore) {
        mine_ore(session, key, wielded)
    } else if key.has(Tag::Creature) {
        strike(session, key, wielded)
    } else {
        Outcome::refused(format!("You can't break {}.", emph(key.name())))
    }
}

fn mine_ore(session: &mut Session, ore: ItemKey, wielded: Wielded) -> Outcome {
    let def = ore.def();
    let Some(tool) = wielded.key else {
        return Outcome::refused(format!("You need a tool to mine {}.", emph(ore.name())));
    };
    if wielded.tier < def.tier {
        return Outcome::refused(format!(
            "{} is not strong enough to mine {}.",
            capitalize(&emph(tool.name())),
            emph(ore.name())
        ));
    }
    if wielded.category != def.category {
        return Outcome::refused(format!(
            "You need a different kind of tool to mine {}.",
            emph(ore.name())
        ));
    }
    let room = session.here();
    if !ore.has(Tag::Infinite) {
        room.items.remove(ore);
    }
    session.player.inventory.insert(ore);
    debug!("mined {:?} with {:?}", ore, tool);
    Outcome::acted(vec![Narration::good(format!(
        "You mine {} with {}.",
        emph(ore.name()),
        emph(tool.name())
    ))])
}

fn strike(session: &mut Session, creature: ItemKey, wielded: Wielded) -> Outcome {
    let def = creature.def();
    let tier = wielded.sword_tier().min(KILL_CHANCE_PERCENT.len() - 1);
    let killed = session.rng.chance_percent(KILL_CHANCE_PERCENT[tier]);

    let mut lines = Vec::new();
    for drop in def.hit_drops {
        if session.rng.chance_percent(HIT_DROP_PERCENT) {
            session.player.inventory.insert(*drop);
            lines.push(Narration::good(format!(
                "You knock {} loose and grab it.",
                emph(drop.name())
            )));
        }
    }

    if !killed {
        lines.insert(
            0,
            Narration::plain(format!(
                "You hit {} with {}, but it survives.",
                emph(creature.name()),
                wielded.label()
            )),
        );
        return Outcome::acted(lines);
    }

    let room = session.here();
    room.items.remove(creature);
    if creature.has(Tag::Monster) {
        room.monsters = room.monsters.saturating_sub(1);
    }
    let mut dropped = Vec::new();
    for drop in def.drops {
        if room.items.insert(*drop) {
            dropped.push(emph(drop.name()));
        }
    }
    debug!("killed {:?} (sword tier {})", creature, tier);
    lines.insert(
        0,
        Narration::good(format!(
            "You kill {} with {}.",
            emph(creature.name()),
            wielded.label()
        )),
    );
    if !dropped.is_empty() {
        lines.push(Narration::plain(format!("It drops {}.", dropped.join(" and "))));
    }
    Outcome::acted(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn mining_needs_a_strong_enough_tool() {
        let mut session = Session::new(4);
        session.here().items.insert(ItemKey::Iron);
        session.player.inventory.insert(ItemKey::WoodenPickaxe);
        let weak = mine(&mut session, &args(&["iron", "wooden pickaxe"]));
        assert!(!weak.acted);
        assert_eq!(
            weak.lines[0].plain_text(),
            "A wooden pickaxe is not strong enough to mine some iron."
        );
        assert!(session.here().items.contains(ItemKey::Iron));

        session.player.inventory.insert(ItemKey::StonePickaxe);
        let ok = mine(&mut session, &args(&["iron", "stone pickaxe"]));
        assert!(ok.acted);
        assert!(!session.here().items.contains(ItemKey::Iron));
        assert!(session.player.inventory.contains(ItemKey::Iron));
    }

    #[test]
    fn swords_are_the_wrong_kind_of_tool_for_ore() {
        let mut session = Session::new(4);
        session.here().items.insert(ItemKey::Coal);
        session.player.inventory.insert(ItemKey::IronSword);
        let outcome = mine(&mut session, &args(&["coal", "sword"]));
        assert!(outcome.lines[0].text.contains("different kind of tool"));
        assert!(session.here().items.contains(ItemKey::Coal));
    }

    #[test]
    fn stone_stays_after_mining() {
        let mut session = Session::new(4);
        session.here().items.insert(ItemKey::Stone);
        session.player.inventory.insert(ItemKey::WoodenPickaxe);
        let outcome = mine(&mut session, &args(&["stone", "pickaxe"]));
        assert!(outcome.acted);
        assert!(session.here().items.contains(ItemKey::Stone));
        assert!(session.player.inventory.contains(ItemKey::Stone));
    }

    #[test]
    fn mine_without_a_tool_asks_for_one() {
        let mut session = Session::new(4);
        let outcome = mine(&mut session, &args(&["coal"]));
        assert!(outcome.lines[0].text.contains("mine coal with"));
        let bare = break_target(&mut session, &args(&["coal"]));
        assert!(!bare.acted);
    }

    #[test]
    fn a_diamond_sword_always_kills() {
        let mut session = Session::new(4);
        {
            let room = session.here();
            room.items.insert(ItemKey::Zombie);
            room.monsters = 1;
        }
        session.player.inventory.insert(ItemKey::DiamondSword);
        let outcome = attack(&mut session, &args(&["zombie", "diamond sword"]));
        assert!(outcome.acted);
        let room = session.here();
        assert!(!room.items.contains(ItemKey::Zombie));
        assert_eq!(room.monsters, 0);
        assert!(room.items.contains(ItemKey::RottenFlesh));
    }

    #[test]
    fn hitting_a_sheep_sometimes_shakes_wool_loose() {
        let mut sheared = 0;
        let mut missed = 0;
        for seed in 0..64 {
            let mut session = Session::new(seed);
            session.here().items.insert(ItemKey::Sheep);
            let outcome = break_target(&mut session, &args(&["sheep"]));
            assert!(outcome.acted);
            let got_wool = session.player.inventory.contains(ItemKey::Wool);
            let said_so = outcome
                .lines
                .iter()
                .any(|l| l.plain_text() == "You knock some wool loose and grab it.");
            assert_eq!(got_wool, said_so);
            if got_wool {
                sheared += 1;
            } else {
                missed += 1;
            }
        }
        assert!(sheared > 0 && missed > 0);
    }

    #[test]
    fn chopping_trees_needs_trees() {
        let mut session = Session::new(4);
        session.here().trees = false;
        let none = break_target(&mut session, &args(&["tree"]));
        assert!(!none.acted);
        session.here().trees = true;
        let chopped = break_target(&mut session, &args(&["tree"]));
        assert!(chopped.acted);
        assert!(session.player.inventory.contains(ItemKey::Wood));
    }

    #[test]
    fn attacking_yourself_is_fatal() {
        let mut session = Session::new(4);
        let outcome = break_target(&mut session, &args(&["myself"]));
        assert_eq!(outcome.death.as_deref(), Some("self-inflicted"));
    }
}
