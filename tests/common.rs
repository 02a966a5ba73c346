//! Shared helpers for the integration tests.

use cavecraft::adventure::{Narration, Session};

/// Plain text of each narration line.
#[allow(dead_code)]
pub fn texts(lines: &[Narration]) -> Vec<String> {
    lines.iter().map(Narration::plain_text).collect()
}

/// Fresh session whose starting room has no way down.
#[allow(dead_code)]
pub fn sealed_start(seed: u64) -> Session {
    let mut session = Session::new(seed);
    session.here().exits.down = false;
    session
}

/// Run a scripted list of commands, returning every narration line produced.
#[allow(dead_code)]
pub fn run_script(session: &mut Session, commands: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for command in commands {
        out.extend(texts(&session.handle_input(command)));
    }
    out
}
