//! The rule book: every keyword table, threshold, topic label and reply the
//! engine uses, loaded from TOML.
//!
//! The built-in book lives in `rules/default.toml`. Hosts can ship their own
//! file with the same layout to add languages or intents without touching the
//! engine. Keywords are case-folded and templates parsed once, here.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use unicare_core::{fuzzy_match, Topic};

use crate::template::{Template, TemplateError};

const BUILTIN_RULES: &str = include_str!("../rules/default.toml");

/// Threshold used by a keyword class that does not set one.
pub const CLASS_THRESHOLD: f64 = 0.7;

#[derive(Debug, Error)]
pub enum RuleBookError {
    #[error("failed to parse rule book: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid template in {location}: {source}")]
    Template {
        location: String,
        #[source]
        source: TemplateError,
    },
    #[error("{location} has no keywords")]
    EmptyKeywords { location: String },
    #[error("{location} threshold {threshold} is outside [0, 1]")]
    Threshold { location: String, threshold: f64 },
    #[error("transition {index} refers to unknown class '{class}'")]
    UnknownClass { index: usize, class: String },
}

// ============================================================================
// Compiled rule book
// ============================================================================

/// A keyword list matched as one unit (see [`unicare_core::fuzzy_match`]).
#[derive(Debug, Clone, PartialEq)]
pub struct KeywordClass {
    pub keywords: Vec<String>,
    pub threshold: f64,
}

impl KeywordClass {
    pub fn matches(&self, text: &str) -> bool {
        fuzzy_match(text, &self.keywords, self.threshold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Tl,
}

#[derive(Debug, Clone)]
pub struct CrisisRules {
    pub class: KeywordClass,
    /// Sent verbatim; never templated.
    pub reply: String,
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub class: String,
    pub last_topic: Topic,
    pub topic: Topic,
    pub reply: Template,
}

#[derive(Debug, Clone)]
pub struct ContinuationRules {
    pub classes: BTreeMap<String, KeywordClass>,
    /// Evaluated in order; the first whose class and topic both match wins.
    pub transitions: Vec<Transition>,
    pub empty_reply: Template,
}

#[derive(Debug, Clone)]
pub struct IntentRule {
    pub name: String,
    pub language: Language,
    pub trigger: KeywordClass,
    /// Alternative trigger: fires when every class here matches.
    pub also: Vec<KeywordClass>,
    pub topic: Topic,
    pub reply: Template,
}

impl IntentRule {
    pub fn matches(&self, text: &str) -> bool {
        self.trigger.matches(text)
            || (!self.also.is_empty() && self.also.iter().all(|c| c.matches(text)))
    }
}

#[derive(Debug, Clone)]
pub struct RuleBook {
    pub crisis: CrisisRules,
    pub continuation: ContinuationRules,
    pub intents: Vec<IntentRule>,
    pub fallback: Template,
}

impl RuleBook {
    /// The rule book compiled into the binary.
    pub fn builtin() -> Result<RuleBook, RuleBookError> {
        RuleBook::from_toml(BUILTIN_RULES)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<RuleBook> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read rule book: {}", path.as_ref().display())
        })?;
        let book = RuleBook::from_toml(&content)
            .with_context(|| format!("Invalid rule book: {}", path.as_ref().display()))?;
        tracing::info!(
            "Loaded rule book from {} ({} intents)",
            path.as_ref().display(),
            book.intents.len()
        );
        Ok(book)
    }

    pub fn from_toml(source: &str) -> Result<RuleBook, RuleBookError> {
        let raw: RawRuleBook = toml::from_str(source)?;
        raw.compile()
    }
}

// ============================================================================
// File layout
// ============================================================================

fn default_threshold() -> f64 {
    CLASS_THRESHOLD
}

#[derive(Debug, Deserialize)]
struct RawRuleBook {
    crisis: RawCrisis,
    continuation: RawContinuation,
    #[serde(default)]
    intents: Vec<RawIntent>,
    fallback: RawFallback,
}

#[derive(Debug, Deserialize)]
struct RawClass {
    keywords: Vec<String>,
    #[serde(default = "default_threshold")]
    threshold: f64,
}

#[derive(Debug, Deserialize)]
struct RawCrisis {
    keywords: Vec<String>,
    #[serde(default = "default_threshold")]
    threshold: f64,
    reply: String,
}

#[derive(Debug, Deserialize)]
struct RawContinuation {
    classes: BTreeMap<String, RawClass>,
    #[serde(default)]
    transitions: Vec<RawTransition>,
    empty_reply: String,
}

#[derive(Debug, Deserialize)]
struct RawTransition {
    class: String,
    last_topic: Topic,
    topic: Topic,
    reply: String,
}

#[derive(Debug, Deserialize)]
struct RawIntent {
    name: String,
    language: Language,
    keywords: Vec<String>,
    #[serde(default)]
    also: Vec<Vec<String>>,
    #[serde(default = "default_threshold")]
    threshold: f64,
    topic: Topic,
    reply: String,
}

#[derive(Debug, Deserialize)]
struct RawFallback {
    reply: String,
}

impl RawRuleBook {
    fn compile(self) -> Result<RuleBook, RuleBookError> {
        let crisis = CrisisRules {
            class: class("crisis", self.crisis.keywords, self.crisis.threshold)?,
            reply: self.crisis.reply,
        };

        let mut classes = BTreeMap::new();
        for (name, raw) in self.continuation.classes {
            let location = format!("continuation class '{}'", name);
            classes.insert(name, class(&location, raw.keywords, raw.threshold)?);
        }

        let mut transitions = Vec::with_capacity(self.continuation.transitions.len());
        for (index, raw) in self.continuation.transitions.into_iter().enumerate() {
            if !classes.contains_key(&raw.class) {
                return Err(RuleBookError::UnknownClass {
                    index,
                    class: raw.class,
                });
            }
            let reply = template(&format!("transition {}", index), &raw.reply)?;
            transitions.push(Transition {
                class: raw.class,
                last_topic: raw.last_topic,
                topic: raw.topic,
                reply,
            });
        }

        let continuation = ContinuationRules {
            classes,
            transitions,
            empty_reply: template("continuation.empty_reply", &self.continuation.empty_reply)?,
        };

        let mut intents = Vec::with_capacity(self.intents.len());
        for raw in self.intents {
            let location = format!("intent '{}'", raw.name);
            let trigger = class(&location, raw.keywords, raw.threshold)?;
            let also = raw
                .also
                .into_iter()
                .map(|keywords| class(&location, keywords, raw.threshold))
                .collect::<Result<Vec<_>, _>>()?;
            let reply = template(&location, &raw.reply)?;
            intents.push(IntentRule {
                name: raw.name,
                language: raw.language,
                trigger,
                also,
                topic: raw.topic,
                reply,
            });
        }

        Ok(RuleBook {
            crisis,
            continuation,
            intents,
            fallback: template("fallback", &self.fallback.reply)?,
        })
    }
}

fn class(location: &str, keywords: Vec<String>, threshold: f64) -> Result<KeywordClass, RuleBookError> {
    if !(0.0..=1.0).contains(&threshold) {
        return Err(RuleBookError::Threshold {
            location: location.to_string(),
            threshold,
        });
    }
    let keywords: Vec<String> = keywords
        .into_iter()
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();
    if keywords.is_empty() {
        return Err(RuleBookError::EmptyKeywords {
            location: location.to_string(),
        });
    }
    Ok(KeywordClass {
        keywords,
        threshold,
    })
}

fn template(location: &str, source: &str) -> Result<Template, RuleBookError> {
    Template::parse(source).map_err(|source| RuleBookError::Template {
        location: location.to_string(),
        source,
    })
}
