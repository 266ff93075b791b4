//! Durable facts about the speaker, threaded through every turn by the host.
//!
//! `Facts` is a plain value: the engine never mutates the caller's copy, it
//! computes a [`FactUpdate`] from the utterance and merges it into a new value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Identifier of a signed-in user. The web host sends either a number or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{}", n),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        match value.trim().parse::<i64>() {
            Ok(n) => UserId::Number(n),
            Err(_) => UserId::Text(value.trim().to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facts {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<String>,
    /// Every distinct mood reported, oldest first. Append-only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mood_history: Vec<String>,
    /// Every distinct favorite reported, oldest first. Append-only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub favorite_history: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Host-owned keys; carried through untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Facts extracted from a single utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactUpdate {
    pub name: Option<String>,
    pub mood: Option<String>,
    pub favorite: Option<String>,
}

impl FactUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.mood.is_none() && self.favorite.is_none()
    }
}

impl Facts {
    /// Return a new `Facts` with `update` applied.
    ///
    /// A newly set mood or favorite is appended to its history unless it equals
    /// the most recent entry.
    pub fn merge(&self, update: &FactUpdate) -> Facts {
        let mut next = self.clone();
        if let Some(name) = &update.name {
            next.name = Some(name.clone());
        }
        if let Some(mood) = &update.mood {
            next.mood = Some(mood.clone());
            push_distinct(&mut next.mood_history, mood);
        }
        if let Some(favorite) = &update.favorite {
            next.favorite = Some(favorite.clone());
            push_distinct(&mut next.favorite_history, favorite);
        }
        next
    }

    /// Whether the host should write these facts to durable storage.
    pub fn should_persist(&self) -> bool {
        self.user_id.is_some()
    }

    /// The mood reported before the most recent one.
    pub fn previous_mood(&self) -> Option<&str> {
        let len = self.mood_history.len();
        if len < 2 {
            return None;
        }
        self.mood_history.get(len - 2).map(String::as_str)
    }

    /// All moods except the most recent, comma-joined. `None` unless there are at least two.
    pub fn earlier_moods(&self) -> Option<String> {
        match self.mood_history.split_last() {
            Some((_, earlier)) if !earlier.is_empty() => Some(earlier.join(", ")),
            _ => None,
        }
    }

    pub fn last_favorite(&self) -> Option<&str> {
        self.favorite_history.last().map(String::as_str)
    }
}

fn push_distinct(history: &mut Vec<String>, value: &str) {
    if history.last().map(String::as_str) != Some(value) {
        history.push(value.to_string());
    }
}
