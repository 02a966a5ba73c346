//! Logging helpers for player-typed text and narration so logs stay single-line.

use crate::adventure::narration::Narration;

use std::fmt::Write;

/// Characters of typed input kept in a log line.
const MAX_PREVIEW: usize = 300;

/// Flatten player input onto one log line. Line breaks, tabs and backslashes
/// get their usual escapes and any other control character becomes `\xNN`.
/// Input past the preview length is cut and ends in `…`.
pub fn escape_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 8);
    s.chars()
        .take(MAX_PREVIEW)
        .for_each(|ch| push_escaped(&mut out, ch));
    if s.chars().nth(MAX_PREVIEW).is_some() {
        out.push('…');
    }
    out
}

fn push_escaped(out: &mut String, ch: char) {
    let escape = match ch {
        '\\' => "\\\\",
        '\n' => "\\n",
        '\r' => "\\r",
        '\t' => "\\t",
        c if c.is_control() => {
            let _ = write!(out, "\\x{:02X}", c as u32);
            return;
        }
        c => {
            out.push(c);
            return;
        }
    };
    out.push_str(escape);
}

/// One log line for a batch of narration: plain text joined with ` | `.
pub fn summarize_narration(lines: &[Narration]) -> String {
    let joined = lines
        .iter()
        .map(Narration::plain_text)
        .collect::<Vec<_>>()
        .join(" | ");
    escape_log(&joined)
}
