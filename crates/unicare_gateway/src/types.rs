use serde::{Deserialize, Serialize};
use unicare_core::{Facts, Topic, TurnResult};

/// Inbound chat turn, as posted by the web page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    /// Topic label returned by the previous turn, echoed back by the client.
    #[serde(default)]
    pub last_topic: Option<String>,
    #[serde(default)]
    pub user_facts: Facts,
}

impl ChatRequest {
    /// The carried topic. Labels the engine does not know read as no topic.
    pub fn topic(&self) -> Option<Topic> {
        let label = self.last_topic.as_deref()?;
        let topic = Topic::parse(label);
        if topic.is_none() && !label.trim().is_empty() {
            tracing::debug!("Ignoring unknown last_topic '{}'", label);
        }
        topic
    }
}

/// Outbound reply. The client stores `topic` and `user_facts` for the next turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    pub topic: Option<Topic>,
    pub user_facts: Facts,
}

impl From<TurnResult> for ChatResponse {
    fn from(turn: TurnResult) -> Self {
        Self {
            reply: turn.reply,
            topic: turn.topic,
            user_facts: turn.facts,
        }
    }
}
