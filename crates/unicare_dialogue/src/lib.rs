//! Rule-based support dialogue for UNICARE.
//!
//! [`respond`] turns one utterance plus the carried topic and facts into a
//! reply, the next topic and the updated facts. Hosts own all state.

mod continuation;
mod crisis;
pub mod engine;
pub mod extraction;
mod intents;
pub mod rules;
pub mod template;

pub use engine::DialogueEngine;
pub use extraction::extract_facts;
pub use rules::{RuleBook, RuleBookError};

use once_cell::sync::Lazy;
use unicare_core::{Facts, Topic, TurnResult};

static BUILTIN_ENGINE: Lazy<DialogueEngine> =
    Lazy::new(|| DialogueEngine::builtin().expect("built-in rule book is valid"));

/// Run one turn against the built-in rule book.
pub fn respond(message: &str, last_topic: Option<Topic>, facts: &Facts) -> TurnResult {
    BUILTIN_ENGINE.respond(message, last_topic, facts)
}
