//! Search pattern construction.

use regex::Regex;

use crate::error::Error;

/// Build a find-all pattern for a raw user search term.
///
/// The term is escaped so it always matches literally, never as regex
/// syntax the user could inject. `whole_word` adds word-boundary anchors on
/// both sides; case-insensitive matching is selected with an inline `(?i)`
/// flag. An empty or blank term is a caller error: a blank term means
/// "search cleared" and must be handled before asking for a pattern.
pub fn build_pattern(term: &str, whole_word: bool, case_sensitive: bool) -> Result<Regex, Error> {
    if term.trim().is_empty() {
        return Err(Error::EmptyTerm);
    }

    let escaped = regex::escape(term);
    let anchored = if whole_word {
        format!(r"\b{escaped}\b")
    } else {
        escaped
    };
    let pattern = if case_sensitive {
        anchored
    } else {
        format!("(?i){anchored}")
    };

    Ok(Regex::new(&pattern)?)
}
