//! Fact extraction: pull the speaker's name, mood and favorite thing out of
//! a single utterance with a handful of self-introduction patterns.
//!
//! Runs before any matching so replies in the same turn can use what was just
//! said. Each fact key is extracted independently; one utterance may set all three.

use once_cell::sync::Lazy;
use regex::Regex;
use unicare_core::FactUpdate;

/// "my name is X", "I'm X", "Im X", "hi, I'm X".
static NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:my name is|i\s*['’`]?m)\s+([a-z\x{00C0}-\x{017F} ]+)")
        .expect("name pattern compiles")
});

/// "I'm feeling X", "I am feeling X", "I feeling X".
static FEELING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bi(?:['’`]m| am)? feeling ([a-z\x{00C0}-\x{017F} ]+)")
        .expect("feeling pattern compiles")
});

/// "I feel X".
static FEEL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bi feel ([a-z\x{00C0}-\x{017F} ]+)").expect("feel pattern compiles")
});

/// "I like X".
static LIKE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bi like ([a-z\x{00C0}-\x{017F} ]+)").expect("like pattern compiles")
});

/// Words that read as a mood when they follow "I'm", never as a name.
pub const MOOD_WORDS: &[&str] = &[
    "sad", "happy", "tired", "stressed", "anxious", "okay", "fine", "good", "bad", "lonely",
    "angry", "excited", "bored", "upset", "worried", "depressed", "energetic", "calm",
    "relaxed", "scared", "afraid", "confused", "hopeful", "grateful",
];

/// Degree words skipped before the word that carries the meaning ("I'm so tired").
const INTENSIFIERS: &[&str] = &["so", "very", "really", "quite", "pretty", "too", "just", "kinda"];

/// Degree words that only count as such after "a" ("a bit", "a little").
const AFTER_A: &[&str] = &["bit", "little"];

/// First words after "I'm" that rule out a self-introduction.
const NOT_A_NAME: &[&str] = &[
    "feeling", "not", "a", "the", "an", "here", "going", "also", "still", "from", "in", "at",
    "on", "with", "back", "done", "trying", "sorry",
];

const ARTICLES: &[&str] = &["a", "an", "the"];

/// Extract whatever facts the utterance states about the speaker.
pub fn extract_facts(message: &str) -> FactUpdate {
    let mut update = FactUpdate::default();

    // Explicit "feeling" phrasing outranks a mood word caught by the name pattern.
    update.mood = capture(&FEELING_PATTERN, message)
        .or_else(|| capture(&FEEL_PATTERN, message))
        .and_then(|c| content_word(&c))
        .map(|w| w.to_lowercase())
        .filter(|w| !ARTICLES.contains(&w.as_str()));

    if let Some(word) = capture(&NAME_PATTERN, message).and_then(|c| content_word(&c)) {
        let lower = word.to_lowercase();
        if MOOD_WORDS.contains(&lower.as_str()) {
            update.mood.get_or_insert(lower);
        } else if !NOT_A_NAME.contains(&lower.as_str()) {
            update.name = Some(title_case(&word));
        }
    }

    update.favorite = capture(&LIKE_PATTERN, message)
        .map(|c| c.trim().to_string())
        .filter(|f| !f.is_empty());

    update
}

fn capture(pattern: &Regex, message: &str) -> Option<String> {
    pattern
        .captures(message)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First word of `captured` that is not an intensifier.
fn content_word(captured: &str) -> Option<String> {
    let mut words = captured.split_whitespace().peekable();
    while let Some(word) = words.next() {
        let lower = word.to_lowercase();
        if INTENSIFIERS.contains(&lower.as_str()) {
            continue;
        }
        if lower == "a" {
            if let Some(next) = words.peek() {
                if AFTER_A.contains(&next.to_lowercase().as_str()) {
                    words.next();
                    continue;
                }
            }
        }
        return Some(word.to_string());
    }
    None
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
