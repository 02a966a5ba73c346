//! Command interpreter: free text to a verb and positional arguments.
//!
//! The grammar is an explicit, ordered list of `(verb, template)` rules. Input
//! is matched case-insensitively against the whole template, rules are tried
//! in order, and the first match wins outright: no other verb is consulted even
//! if one of its templates would also have matched. Within a verb the most
//! specific templates come first and a bare-verb fallback comes last.
//!
//! Template syntax, one token per word:
//! - a plain word must appear literally,
//! - `{}` captures one or more words (greedy, backtracking),
//! - `{a|b|c}` captures exactly one word from the listed alternatives.

use log::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Go,
    Dig,
    Take,
    Drop,
    Place,
    Mine,
    Attack,
    Break,
    Craft,
    Eat,
    Inspect,
    Look,
    Inventory,
    Wait,
    Recipes,
    Help,
}

/// Verb table in priority order.
const GRAMMAR: &[(Verb, &[&str])] = &[
    (
        Verb::Go,
        &[
            "go {}",
            "walk {}",
            "move {}",
            "climb {}",
            "head {}",
            "{north|south|east|west|up|down|n|s|e|w|u|d}",
            "go",
            "walk",
        ],
    ),
    (Verb::Dig, &["dig {}", "dig"]),
    (
        Verb::Take,
        &["take {}", "pick up {}", "get {}", "grab {}", "take", "get"],
    ),
    (Verb::Drop, &["drop {}", "drop"]),
    (Verb::Place, &["place {}", "put down {}", "put {}", "place"]),
    (
        Verb::Mine,
        &["mine {} with {}", "mine {} using {}", "mine {}", "mine"],
    ),
    (
        Verb::Attack,
        &[
            "attack {} with {}",
            "kill {} with {}",
            "hit {} with {}",
            "fight {} with {}",
        ],
    ),
    (
        Verb::Break,
        &[
            "break {} with {}",
            "break {}",
            "chop down {}",
            "chop {}",
            "punch {}",
            "attack {}",
            "kill {}",
            "hit {}",
            "fight {}",
            "break",
            "attack",
            "kill",
        ],
    ),
    (Verb::Craft, &["craft {}", "make {}", "build {}", "craft"]),
    (Verb::Eat, &["eat {}", "eat"]),
    (
        Verb::Inspect,
        &[
            "inspect {}",
            "examine {}",
            "look at {}",
            "x {}",
            "describe {}",
            "inspect",
            "examine",
        ],
    ),
    (Verb::Look, &["look", "look around", "l"]),
    (Verb::Inventory, &["inventory", "inv", "i"]),
    (Verb::Wait, &["wait", "z", "rest"]),
    (Verb::Recipes, &["recipes", "list recipes"]),
    (Verb::Help, &["help", "?"]),
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Element {
    Literal(String),
    Capture,
    Choice(Vec<String>),
}

/// A template compiled into elements.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: &'static str,
    elements: Vec<Element>,
}

impl Pattern {
    pub fn compile(source: &'static str) -> Self {
        let elements = source
            .split_whitespace()
            .map(|token| {
                if token == "{}" {
                    Element::Capture
                } else if let Some(inner) = token.strip_prefix('{').and_then(|t| t.strip_suffix('}')) {
                    Element::Choice(inner.split('|').map(str::to_lowercase).collect())
                } else {
                    Element::Literal(token.to_lowercase())
                }
            })
            .collect();
        Self { source, elements }
    }

    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Match the whole word list; returns captured groups on success.
    pub fn matches(&self, words: &[&str]) -> Option<Vec<String>> {
        let mut captures = Vec::new();
        if match_from(&self.elements, words, &mut captures) {
            Some(captures)
        } else {
            None
        }
    }
}

fn match_from(elements: &[Element], words: &[&str], captures: &mut Vec<String>) -> bool {
    let Some((first, rest)) = elements.split_first() else {
        return words.is_empty();
    };
    match first {
        Element::Literal(lit) => match words.split_first() {
            Some((word, tail)) if *word == lit.as_str() => match_from(rest, tail, captures),
            _ => false,
        },
        Element::Choice(options) => match words.split_first() {
            Some((word, tail)) if options.iter().any(|o| o.as_str() == *word) => {
                captures.push((*word).to_string());
                if match_from(rest, tail, captures) {
                    return true;
                }
                captures.pop();
                false
            }
            _ => false,
        },
        Element::Capture => {
            // Longest first, like a greedy `(.+)`.
            for take in (1..=words.len()).rev() {
                captures.push(words[..take].join(" "));
                if match_from(rest, &words[take..], captures) {
                    return true;
                }
                captures.pop();
            }
            false
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub verb: Verb,
    pub args: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Blank input.
    Empty,
    /// No rule matched.
    Unrecognized,
    Command(Command),
}

/// Compiled, ordered rule list.
#[derive(Debug, Clone)]
pub struct Interpreter {
    rules: Vec<(Verb, Pattern)>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let rules = GRAMMAR
            .iter()
            .flat_map(|(verb, templates)| {
                templates
                    .iter()
                    .map(move |template| (*verb, Pattern::compile(*template)))
            })
            .collect();
        Self { rules }
    }

    pub fn parse(&self, input: &str) -> Parsed {
        let lowered = input.to_lowercase();
        let words: Vec<&str> = lowered.split_whitespace().collect();
        if words.is_empty() {
            return Parsed::Empty;
        }
        for (verb, pattern) in &self.rules {
            if let Some(args) = pattern.matches(&words) {
                trace!("'{}' matched {:?} via '{}'", lowered, verb, pattern.source());
                return Parsed::Command(Command { verb: *verb, args });
            }
        }
        Parsed::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(verb: Verb, args: &[&str]) -> Parsed {
        Parsed::Command(Command {
            verb,
            args: args.iter().map(|s| s.to_string()).collect(),
        })
    }

    #[test]
    fn blank_and_unknown_input() {
        let interp = Interpreter::new();
        assert_eq!(interp.parse(""), Parsed::Empty);
        assert_eq!(interp.parse("   \t "), Parsed::Empty);
        assert_eq!(interp.parse("dance wildly"), Parsed::Unrecognized);
    }

    #[test]
    fn captures_are_positional_and_case_insensitive() {
        let interp = Interpreter::new();
        assert_eq!(
            interp.parse("Mine Iron WITH wooden   pickaxe"),
            cmd(Verb::Mine, &["iron", "wooden pickaxe"])
        );
        assert_eq!(
            interp.parse("craft a wooden pickaxe"),
            cmd(Verb::Craft, &["a wooden pickaxe"])
        );
        assert_eq!(interp.parse("go down"), cmd(Verb::Go, &["down"]));
        assert_eq!(interp.parse("N"), cmd(Verb::Go, &["n"]));
    }

    #[test]
    fn bare_verbs_carry_no_arguments() {
        let interp = Interpreter::new();
        assert_eq!(interp.parse("craft"), cmd(Verb::Craft, &[]));
        assert_eq!(interp.parse("look"), cmd(Verb::Look, &[]));
        assert_eq!(interp.parse("mine"), cmd(Verb::Mine, &[]));
    }

    #[test]
    fn first_matching_verb_wins() {
        let interp = Interpreter::new();
        // Attack needs a weapon; the bare form belongs to the later Break rules.
        assert_eq!(
            interp.parse("attack zombie with iron sword"),
            cmd(Verb::Attack, &["zombie", "iron sword"])
        );
        assert_eq!(interp.parse("attack zombie"), cmd(Verb::Break, &["zombie"]));
        // "look at" is claimed by Inspect before Look is tried.
        assert_eq!(interp.parse("look at torch"), cmd(Verb::Inspect, &["torch"]));
        assert_eq!(interp.parse("chop down tree"), cmd(Verb::Break, &["tree"]));
    }

    #[test]
    fn greedy_capture_backtracks_to_the_last_literal() {
        let pattern = Pattern::compile("mine {} with {}");
        let words = ["mine", "stone", "with", "care", "with", "pick"];
        assert_eq!(
            pattern.matches(&words),
            Some(vec!["stone with care".to_string(), "pick".to_string()])
        );
        assert_eq!(pattern.matches(&["mine", "with", "pick"]), None);
    }
}
