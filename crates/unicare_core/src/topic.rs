use serde::{Deserialize, Serialize};
use std::fmt;

/// What the previous turn was about.
///
/// Only used to interpret the next turn's short follow-ups ("yes", "more", "paano").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Greetings,
    Sad,
    Happy,
    Stress,
    Activity,
    Help,
    Bye,
    Tip,
}

impl Topic {
    pub const ALL: [Topic; 8] = [
        Topic::Greetings,
        Topic::Sad,
        Topic::Happy,
        Topic::Stress,
        Topic::Activity,
        Topic::Help,
        Topic::Bye,
        Topic::Tip,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Greetings => "greetings",
            Topic::Sad => "sad",
            Topic::Happy => "happy",
            Topic::Stress => "stress",
            Topic::Activity => "activity",
            Topic::Help => "help",
            Topic::Bye => "bye",
            Topic::Tip => "tip",
        }
    }

    /// Lenient label parsing for host-supplied topics.
    ///
    /// Unknown or blank labels yield `None`, which the engine treats as "no topic".
    pub fn parse(label: &str) -> Option<Topic> {
        let label = label.trim();
        Topic::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
