//! Ingredient name normalization.
//!
//! Everything here is literal: lowercasing, trimming, splitting on whitespace
//! and commas, and dropping short or descriptive words. There is no stemming.

use regex::Regex;
use std::sync::LazyLock;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid"));

/// Descriptive and filler words dropped when reducing a recipe phrase to its
/// core name.
const FILLER_WORDS: &[&str] = &[
    // freshness
    "fresh", "dried", "frozen", "canned",
    // preparation
    "ground", "whole", "chopped", "minced", "sliced", "diced",
    "grated", "shredded", "cooked", "raw",
    // quality
    "organic", "free-range", "extra", "virgin", "kosher",
    "sea", "table", "fine", "coarse",
    // size
    "large", "small", "medium",
    // connectives
    "about", "approximately", "or", "to", "taste",
];

pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

pub fn strip_parentheticals(raw: &str) -> String {
    PARENTHETICAL.replace_all(raw, "").trim().to_string()
}

fn split_words(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
}

/// Significant words of a name: longer than two characters.
pub fn tokenize(raw: &str) -> Vec<String> {
    split_words(raw)
        .filter(|w| w.chars().count() > 2)
        .map(str::to_string)
        .collect()
}

/// Reduce a verbose recipe phrase ("fresh chopped basil") to the name that
/// belongs on a list ("basil"). Never empty for non-empty input: whitespace
/// alone comes back unchanged.
pub fn core_name(raw: &str) -> String {
    let normalized = normalize(raw);
    if normalized.is_empty() {
        return raw.to_string();
    }
    let cleaned = strip_parentheticals(&normalized);

    let words: Vec<&str> = split_words(&cleaned)
        .filter(|w| w.chars().count() > 1 && !FILLER_WORDS.contains(w))
        .collect();

    if !words.is_empty() {
        words.join(" ")
    } else if !cleaned.is_empty() {
        cleaned
    } else {
        normalized
    }
}
