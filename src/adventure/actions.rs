//! Verb handlers other than breaking things (see [`super::combat`]).
//!
//! A handler validates against the player and the current room, mutates on
//! success, and always answers with narration. Refusals leave every piece of
//! state as it was and do not consume a turn.

use log::{debug, info};

use super::catalog::{resolve_any, ItemKey, Tag, ToolCategory};
use super::combat;
use super::narration::{capitalize, emph, Narration};
use super::parser::{Command, Verb};
use super::player::MAX_HIT_POINTS;
use super::recipes::{recipe_for, recipe_lines};
use super::session::Session;
use super::turn;
use super::world::{Coord, Direction, DigOutcome, BEDROCK_Y};

/// What a handler produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    pub lines: Vec<Narration>,
    /// The action happened and a turn should elapse.
    pub acted: bool,
    /// Set when the action killed the player outright.
    pub death: Option<String>,
}

impl Outcome {
    /// A refused action; nothing changed.
    pub fn refused(text: impl Into<String>) -> Self {
        Self {
            lines: vec![Narration::warning(text)],
            ..Self::default()
        }
    }

    /// Informational output that costs no time.
    pub fn free(lines: Vec<Narration>) -> Self {
        Self {
            lines,
            ..Self::default()
        }
    }

    pub fn acted(lines: Vec<Narration>) -> Self {
        Self {
            lines,
            acted: true,
            death: None,
        }
    }

    pub fn fatal(cause: impl Into<String>, lines: Vec<Narration>) -> Self {
        Self {
            lines,
            acted: true,
            death: Some(cause.into()),
        }
    }
}

pub fn dispatch(session: &mut Session, command: &Command) -> Outcome {
    let args = command.args.as_slice();
    match command.verb {
        Verb::Go => go(session, args),
        Verb::Dig => dig(session, args),
        Verb::Take => take(session, args),
        Verb::Drop => drop_item(session, args),
        Verb::Place => place(session, args),
        Verb::Mine => combat::mine(session, args),
        Verb::Attack => combat::attack(session, args),
        Verb::Break => combat::break_target(session, args),
        Verb::Craft => craft(session, args),
        Verb::Eat => eat(session, args),
        Verb::Inspect => inspect(session, args),
        Verb::Look => Outcome::free(look(session)),
        Verb::Inventory => Outcome::free(inventory(session)),
        Verb::Wait => Outcome::acted(vec![Narration::plain("Time passes.")]),
        Verb::Recipes => Outcome::free(recipes()),
        Verb::Help => Outcome::free(help()),
    }
}

fn first_arg(args: &[String]) -> Option<&str> {
    args.first().map(String::as_str).filter(|a| !a.trim().is_empty())
}

pub fn go(session: &mut Session, args: &[String]) -> Outcome {
    let Some(arg) = first_arg(args) else {
        return Outcome::refused("Go where?");
    };
    let Some(dir) = Direction::parse(arg) else {
        return Outcome::refused(format!("I don't know which way \"{}\" is.", arg));
    };
    let from = session.player.position;
    let target = from.step(dir);
    if !session.here().exits.is_open(dir) || !target.in_bounds() {
        return Outcome::refused("You can't go that way.");
    }
    session.world.ensure(target, &mut session.rng);
    session.player.move_to(target);
    debug!("player moved {} from {} to {}", dir.name(), from, target);
    let mut lines = vec![Narration::plain(format!("You go {}.", dir.name()))];
    lines.extend(look(session));
    Outcome::acted(lines)
}

pub fn dig(session: &mut Session, args: &[String]) -> Outcome {
    let Some(arg) = first_arg(args) else {
        return Outcome::refused("Dig which way?");
    };
    let Some(dir) = Direction::parse(arg) else {
        return Outcome::refused(format!("You can't dig \"{}\".", arg));
    };
    let Some(pick) = session.player.best_tool(ToolCategory::Pickaxe) else {
        return Outcome::refused("You need a pickaxe to dig.");
    };
    let from = session.player.position;
    match session.world.dig_exit(from, dir, &mut session.rng) {
        DigOutcome::Opened(to) => {
            info!("dug {} from {} to {}", dir.name(), from, to);
            Outcome::acted(vec![Narration::good(format!(
                "You dig {} with {}. A new passage opens.",
                dir.name(),
                emph(pick.name())
            ))])
        }
        DigOutcome::AlreadyOpen(_) => {
            Outcome::refused(format!("There is already a way {}.", dir.name()))
        }
        DigOutcome::Bedrock => Outcome::refused("You hit bedrock. You can't dig any deeper."),
        DigOutcome::NoCeiling => Outcome::refused("There is nothing above you but sky."),
    }
}

pub fn take(session: &mut Session, args: &[String]) -> Outcome {
    let Some(arg) = first_arg(args) else {
        return Outcome::refused("Take what?");
    };
    let underground = !session.player.position.is_surface();
    let room = session.here();
    let Some(key) = room.items.resolve(arg) else {
        if room.trees && is_tree(arg) {
            return Outcome::refused("You can't carry a tree. Try chopping it down.");
        }
        return Outcome::refused(format!("There is no {} here.", arg));
    };
    if key.has(Tag::Heavy) {
        return Outcome::refused(format!(
            "{} is too heavy to carry.",
            capitalize(&emph(key.name()))
        ));
    }
    if key.has(Tag::Ore) {
        return Outcome::refused(format!(
            "You can't just pick up {}. You'll have to mine it.",
            emph(key.name())
        ));
    }
    if !key.has(Tag::Infinite) {
        room.items.remove(key);
    }
    let mut lines = vec![Narration::good(format!("You take {}.", emph(key.name())))];
    if key == ItemKey::Torch && underground {
        room.dark = true;
        lines.push(Narration::warning("The room goes dark."));
    }
    session.player.inventory.insert(key);
    Outcome::acted(lines)
}

pub fn drop_item(session: &mut Session, args: &[String]) -> Outcome {
    let Some(arg) = first_arg(args) else {
        return Outcome::refused("Drop what?");
    };
    let Some(key) = session.player.inventory.resolve(arg) else {
        return Outcome::refused(format!("You don't have {}.", arg));
    };
    if !key.has(Tag::Droppable) {
        return Outcome::refused(format!("You can't drop {}.", emph(key.name())));
    }
    session.player.inventory.remove(key);
    session.here().items.insert(key);
    Outcome::acted(vec![Narration::plain(format!("You drop {}.", emph(key.name())))])
}

pub fn place(session: &mut Session, args: &[String]) -> Outcome {
    let Some(arg) = first_arg(args) else {
        return Outcome::refused("Place what?");
    };
    let Some(key) = session.player.inventory.resolve(arg) else {
        return Outcome::refused(format!("You don't have {}.", arg));
    };
    if !key.has(Tag::Droppable) || !key.has(Tag::Material) {
        return Outcome::refused(format!("You can't place {}.", emph(key.name())));
    }
    session.player.inventory.remove(key);
    let room = session.here();
    room.items.insert(key);
    let mut lines = vec![Narration::plain(format!("You place {}.", emph(key.name())))];
    if key == ItemKey::Torch && room.dark {
        room.dark = false;
        lines.push(Narration::good("The torch lights up the room."));
    }
    Outcome::acted(lines)
}

pub fn craft(session: &mut Session, args: &[String]) -> Outcome {
    let Some(arg) = first_arg(args) else {
        return Outcome::refused("Craft what?");
    };
    let Some(key) = resolve_any(arg) else {
        return Outcome::refused(format!("You don't know how to make {}.", arg));
    };
    let Some(recipe) = recipe_for(key) else {
        return Outcome::refused(format!(
            "{} can't be crafted.",
            capitalize(&emph(key.name()))
        ));
    };
    let missing = recipe.missing_from(&session.player.inventory);
    if !missing.is_empty() {
        let names: Vec<String> = missing.iter().map(|k| emph(k.name())).collect();
        return Outcome::refused(format!(
            "You need {} to craft {}.",
            names.join(" and "),
            emph(key.name())
        ));
    }
    for input in recipe.inputs {
        session.player.inventory.remove(*input);
    }
    session.player.inventory.insert(key);
    debug!("crafted {:?}", key);
    if key == ItemKey::Computer {
        return Outcome::fatal(
            "outsmarted by a computer",
            vec![
                Narration::plain(format!("You assemble {}. It hums to life.", emph(key.name()))),
                Narration::danger(
                    "The computer studies you for a moment, decides you are obsolete, and acts accordingly.",
                ),
            ],
        );
    }
    Outcome::acted(vec![Narration::good(format!("You craft {}.", emph(key.name())))])
}

pub fn eat(session: &mut Session, args: &[String]) -> Outcome {
    let Some(arg) = first_arg(args) else {
        return Outcome::refused("Eat what?");
    };
    let Some(key) = session.player.inventory.resolve(arg) else {
        return Outcome::refused(format!("You don't have {}.", arg));
    };
    if !key.has(Tag::Food) {
        return Outcome::refused(format!("You can't eat {}.", emph(key.name())));
    }
    session.player.inventory.remove(key);
    let mut lines = vec![Narration::plain(format!("You eat {}.", emph(key.name())))];
    if session.player.heal(1) {
        lines.push(Narration::good("You are no longer injured."));
    } else if session.player.hit_points < MAX_HIT_POINTS {
        lines.push(Narration::good("You feel a little better."));
    }
    Outcome::acted(lines)
}

pub fn inspect(session: &mut Session, args: &[String]) -> Outcome {
    let Some(arg) = first_arg(args) else {
        return Outcome::refused("Inspect what?");
    };
    let found = session
        .player
        .inventory
        .resolve(arg)
        .or_else(|| session.here().items.resolve(arg));
    if found.is_none() && is_tree(arg) && session.here().trees {
        return Outcome::free(vec![Narration::plain(
            "Sturdy trees. Chop one down for some wood.",
        )]);
    }
    match found.or_else(|| resolve_any(arg)) {
        Some(key) => Outcome::free(vec![
            Narration::plain(format!("{}:", capitalize(&emph(key.name())))),
            Narration::plain(key.def().description),
        ]),
        None => Outcome::refused(format!("You don't know what {} is.", arg)),
    }
}

pub(crate) fn is_tree(name: &str) -> bool {
    matches!(
        name.trim(),
        "tree" | "trees" | "a tree" | "the tree" | "some trees"
    )
}

/// Describe the current room.
pub fn look(session: &mut Session) -> Vec<Narration> {
    let pos = session.player.position;
    let night = !turn::is_day(session.player.turn);
    let room = session.here();
    if room.is_dark() {
        return vec![Narration::plain("It is too dark to see.")];
    }
    let mut lines = Vec::new();
    match room.biome {
        Some(biome) if pos.is_surface() => {
            lines.push(Narration::plain(biome.description()));
            if room.trees {
                lines.push(Narration::plain("Trees grow all around you."));
            }
            lines.push(Narration::plain(if night {
                "It is night."
            } else {
                "It is day."
            }));
        }
        _ => lines.push(Narration::plain(depth_description(pos))),
    }
    if !room.items.is_empty() {
        let names: Vec<String> = room.items.iter().map(|k| emph(k.name())).collect();
        lines.push(Narration::plain(format!("You see {}.", names.join(", "))));
    }
    let exits: Vec<&str> = room.exits.open().map(Direction::name).collect();
    if exits.is_empty() {
        lines.push(Narration::plain("There is no obvious way out."));
    } else {
        lines.push(Narration::plain(format!("Exits: {}.", exits.join(", "))));
    }
    lines
}

fn depth_description(pos: Coord) -> String {
    match pos.y {
        0 => "You are outside.".to_string(),
        -1 => "You are in a cave just below the surface.".to_string(),
        y if y <= BEDROCK_Y => "You are deep underground. Bedrock lies beneath you.".to_string(),
        y => format!("You are in a cave {} levels below the surface.", -y),
    }
}

pub fn inventory(session: &Session) -> Vec<Narration> {
    let player = &session.player;
    let mut lines = if player.inventory.is_empty() {
        vec![Narration::plain("You are not carrying anything.")]
    } else {
        let names: Vec<String> = player.inventory.iter().map(|k| emph(k.name())).collect();
        vec![Narration::plain(format!("You are carrying {}.", names.join(", ")))]
    };
    lines.push(Narration::plain(format!(
        "Health: {}/{}",
        player.hit_points, MAX_HIT_POINTS
    )));
    lines
}

pub fn recipes() -> Vec<Narration> {
    let mut lines = vec![Narration::plain("You know how to craft:")];
    lines.extend(recipe_lines().into_iter().map(|l| Narration::plain(format!("  {}", l))));
    lines
}

pub fn help() -> Vec<Narration> {
    [
        "go <direction>      move north, south, east, west, up or down",
        "dig <direction>     dig a passage (needs a pickaxe)",
        "take / drop / place <item>",
        "mine <ore> with <tool>, attack <creature> with <weapon>",
        "break <thing>, chop down tree",
        "craft <item>, recipes",
        "eat <food>, inspect <item>",
        "look, inventory, wait",
    ]
    .into_iter()
    .map(Narration::plain)
    .collect()
}
