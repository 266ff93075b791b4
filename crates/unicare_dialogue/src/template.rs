//! Reply templates.
//!
//! Syntax:
//! - `{slot}` inserts a fact, `{slot|default}` falls back to `default`.
//! - `[ ... ]` is an optional section, dropped unless every slot in it has a value.
//!
//! A bare `{slot}` is only allowed inside an optional section, so rendering
//! can never leave a hole in the reply.

use thiserror::Error;
use unicare_core::Facts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Name,
    Mood,
    Favorite,
    /// Second-most-recent mood.
    PreviousMood,
    /// Every mood but the most recent, comma-joined.
    EarlierMoods,
    LastFavorite,
}

impl Slot {
    fn from_key(key: &str) -> Option<Slot> {
        match key {
            "name" => Some(Slot::Name),
            "mood" => Some(Slot::Mood),
            "favorite" => Some(Slot::Favorite),
            "previous_mood" => Some(Slot::PreviousMood),
            "earlier_moods" => Some(Slot::EarlierMoods),
            "last_favorite" => Some(Slot::LastFavorite),
            _ => None,
        }
    }

    fn lookup(&self, facts: &Facts) -> Option<String> {
        let value = match self {
            Slot::Name => facts.name.clone(),
            Slot::Mood => facts.mood.clone(),
            Slot::Favorite => facts.favorite.clone(),
            Slot::PreviousMood => facts.previous_mood().map(str::to_string),
            Slot::EarlierMoods => facts.earlier_moods(),
            Slot::LastFavorite => facts.last_favorite().map(str::to_string),
        };
        value.filter(|v| !v.is_empty())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unknown slot '{0}'")]
    UnknownSlot(String),
    #[error("slot '{0}' needs a default or an enclosing [ ] section")]
    RequiredSlot(String),
    #[error("unclosed '{{'")]
    UnclosedSlot,
    #[error("unmatched '}}'")]
    StrayBrace,
    #[error("unclosed '['")]
    UnclosedSection,
    #[error("unmatched ']'")]
    StrayBracket,
    #[error("sections cannot nest")]
    NestedSection,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Text(String),
    Slot { slot: Slot, default: Option<String> },
    Optional(Vec<Segment>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Template, TemplateError> {
        let mut top: Vec<Segment> = Vec::new();
        let mut section: Option<Vec<Segment>> = None;
        let mut text = String::new();
        let mut chars = source.chars();

        while let Some(c) = chars.next() {
            match c {
                '{' => {
                    let mut inner = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(ch) => inner.push(ch),
                            None => return Err(TemplateError::UnclosedSlot),
                        }
                    }
                    let (key, default) = match inner.split_once('|') {
                        Some((k, d)) => (k.trim(), Some(d.to_string())),
                        None => (inner.trim(), None),
                    };
                    let slot = Slot::from_key(key)
                        .ok_or_else(|| TemplateError::UnknownSlot(key.to_string()))?;
                    if section.is_none() && default.is_none() {
                        return Err(TemplateError::RequiredSlot(key.to_string()));
                    }
                    let target = section.as_mut().unwrap_or(&mut top);
                    flush(&mut text, target);
                    target.push(Segment::Slot { slot, default });
                }
                '}' => return Err(TemplateError::StrayBrace),
                '[' => {
                    if section.is_some() {
                        return Err(TemplateError::NestedSection);
                    }
                    flush(&mut text, &mut top);
                    section = Some(Vec::new());
                }
                ']' => {
                    let mut inner = section.take().ok_or(TemplateError::StrayBracket)?;
                    flush(&mut text, &mut inner);
                    top.push(Segment::Optional(inner));
                }
                _ => text.push(c),
            }
        }

        if section.is_some() {
            return Err(TemplateError::UnclosedSection);
        }
        flush(&mut text, &mut top);
        Ok(Template { segments: top })
    }

    pub fn render(&self, facts: &Facts) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Optional(inner) => {
                    if let Some(rendered) = render_all(inner, facts) {
                        out.push_str(&rendered);
                    }
                }
                other => {
                    if let Some(rendered) = render_all(std::slice::from_ref(other), facts) {
                        out.push_str(&rendered);
                    }
                }
            }
        }
        out
    }
}

/// Render a flat run of segments; `None` if any slot lacks both value and default.
fn render_all(segments: &[Segment], facts: &Facts) -> Option<String> {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(t) => out.push_str(t),
            Segment::Slot { slot, default } => {
                let value = slot.lookup(facts).or_else(|| default.clone())?;
                out.push_str(&value);
            }
            Segment::Optional(_) => {}
        }
    }
    Some(out)
}

fn flush(text: &mut String, target: &mut Vec<Segment>) {
    if !text.is_empty() {
        target.push(Segment::Text(std::mem::take(text)));
    }
}
