//! Narration events handed to whatever front end renders the game.
//!
//! Text may carry inline emphasis markers: `*...*` around item and creature
//! names. The tone says how a front end might colour the whole line. Nothing
//! in the engine depends on how either is rendered.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Ordinary description.
    Plain,
    /// Something went the player's way.
    Good,
    /// The action was refused or had no effect.
    Warning,
    /// The player is being hurt, or has died.
    Danger,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Narration {
    pub tone: Tone,
    pub text: String,
}

impl Narration {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Tone::Plain, text)
    }

    pub fn good(text: impl Into<String>) -> Self {
        Self::new(Tone::Good, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Tone::Warning, text)
    }

    pub fn danger(text: impl Into<String>) -> Self {
        Self::new(Tone::Danger, text)
    }

    /// Text with emphasis markers removed.
    pub fn plain_text(&self) -> String {
        self.text.replace('*', "")
    }
}

impl fmt::Display for Narration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain_text())
    }
}

/// Wrap a name in emphasis markers.
pub fn emph(name: &str) -> String {
    format!("*{}*", name)
}

/// Capitalise the first letter, for names that open a sentence. A leading
/// emphasis marker is stepped over so `*a cow*` becomes `*A cow*`.
pub fn capitalize(text: &str) -> String {
    let (marker, rest) = match text.strip_prefix('*') {
        Some(rest) => ("*", rest),
        None => ("", text),
    };
    let mut chars = rest.chars();
    match chars.next() {
        Some(first) => marker
            .chars()
            .chain(first.to_uppercase())
            .chain(chars)
            .collect(),
        None => text.to_string(),
    }
}

/// Join narration lines into one plain-text block.
pub fn render_plain(lines: &[Narration]) -> String {
    let mut out = String::new();
    for line in lines {
        out.push_str(&line.plain_text());
        out.push('\n');
    }
    out
}
