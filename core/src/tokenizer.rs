use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"\w+").expect("valid regex");
}

/// Tokenize text into the set of lowercase terms it contains.
///
/// A term is a maximal run of word characters (letters, digits, underscore);
/// everything else separates terms. Only membership is kept, not frequency.
pub fn tokenize(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Normalize a single query term the same way document terms are normalized.
pub fn normalize_term(term: &str) -> String {
    term.to_lowercase()
}
