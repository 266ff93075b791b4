//! The dialogue engine: one pure function per turn.
//!
//! Stages run in a fixed order and the first to decide ends the turn:
//! fact extraction (always), crisis, continuation, intents, fallback.

use anyhow::Result;
use unicare_core::config::DialogueConfig;
use unicare_core::{Facts, Topic, TurnResult};

use crate::extraction::extract_facts;
use crate::rules::{RuleBook, RuleBookError};
use crate::{continuation, crisis, intents};

/// What a stage decided for this turn.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Decision<'a> {
    pub reply: String,
    pub topic: Option<Topic>,
    /// Which rule fired, for logs.
    pub rule: &'a str,
}

#[derive(Debug, Clone)]
pub struct DialogueEngine {
    rules: RuleBook,
}

impl DialogueEngine {
    pub fn new(rules: RuleBook) -> Self {
        Self { rules }
    }

    pub fn builtin() -> Result<Self, RuleBookError> {
        Ok(Self::new(RuleBook::builtin()?))
    }

    /// Use the configured rule book, or the built-in one when none is set.
    pub fn from_config(config: &DialogueConfig) -> Result<Self> {
        let rules = match &config.rules_path {
            Some(path) => RuleBook::load(path)?,
            None => RuleBook::builtin()?,
        };
        Ok(Self::new(rules))
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Produce the reply, next topic and updated facts for one utterance.
    ///
    /// Never fails and never touches `facts`; the returned facts are a new value.
    pub fn respond(&self, message: &str, last_topic: Option<Topic>, facts: &Facts) -> TurnResult {
        let update = extract_facts(message);
        if !update.is_empty() {
            tracing::debug!(?update, "Extracted facts");
        }
        let facts = facts.merge(&update);
        let text = message.trim().to_lowercase();

        let decision = crisis::check(&self.rules.crisis, &text)
            .or_else(|| continuation::check(&self.rules.continuation, &text, last_topic, &facts))
            .or_else(|| intents::check(&self.rules.intents, &text, &facts))
            .unwrap_or_else(|| intents::fallback(&self.rules.fallback, &facts));

        tracing::debug!(
            rule = decision.rule,
            last_topic = ?last_topic,
            topic = ?decision.topic,
            "Turn decided"
        );

        TurnResult {
            reply: decision.reply,
            topic: decision.topic,
            facts,
        }
    }
}
