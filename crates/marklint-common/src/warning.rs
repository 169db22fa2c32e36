//! Parser warnings with colored terminal output.
//!
//! Warnings are deduplicated per parse session: each unique message prints
//! once, and [`clear_warnings`] resets the record when a new file begins
//! (the parser calls it at the start of every session). The lexer uses
//! this to note constructs that are tolerated (parsing never fails on
//! malformed input) but worth a line on stderr, such as delimiters left
//! unterminated at end of input.

use std::collections::HashSet;
use std::sync::{Mutex, OnceLock};

/// ANSI color codes for terminal output
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

fn warned() -> &'static Mutex<HashSet<String>> {
    static WARNED: OnceLock<Mutex<HashSet<String>>> = OnceLock::new();
    WARNED.get_or_init(|| Mutex::new(HashSet::new()))
}

/// True the first time `key` is seen since the last [`clear_warnings`].
fn first_sighting(key: &str) -> bool {
    warned()
        .lock()
        .expect("warning set mutex poisoned")
        .insert(key.to_string())
}

/// Warn about a tolerated construct. Each unique component/message pair
/// prints once per parse session.
///
/// # Example
/// ```ignore
/// warn_once("lexer", "unterminated comment at 14:1, consumed to end of input");
/// ```
///
/// # Panics
/// Panics if the warning set mutex is poisoned.
pub fn warn_once(component: &str, message: &str) {
    if first_sighting(&format!("[{component}] {message}")) {
        eprintln!("{YELLOW}[marklint {component}] ⚠ {message}{RESET}");
    }
}

/// Forget every recorded warning. Called at the start of each parse
/// session so deduplication is per file, not per process.
///
/// # Panics
/// Panics if the warning set mutex is poisoned.
pub fn clear_warnings() {
    warned()
        .lock()
        .expect("warning set mutex poisoned")
        .clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test covering record, dedup, and reset: the set is global, so
    // splitting these assertions across parallel tests would race.
    #[test]
    fn test_dedup_resets_per_session() {
        clear_warnings();
        assert!(first_sighting("[lexer] first"));
        assert!(!first_sighting("[lexer] first"));
        assert!(first_sighting("[lexer] second"));
        clear_warnings();
        assert!(first_sighting("[lexer] first"));
    }
}
