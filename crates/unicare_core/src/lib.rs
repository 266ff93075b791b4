pub mod config;
pub mod facts;
pub mod fuzzy;
pub mod topic;

pub use config::UnicareConfig;
pub use facts::{FactUpdate, Facts, UserId};
pub use fuzzy::{fuzzy_match, similarity_ratio, DEFAULT_THRESHOLD};
pub use topic::Topic;

use serde::{Deserialize, Serialize};

/// Outcome of one conversational turn.
///
/// Hosts feed `topic` and `facts` back in as the next turn's inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnResult {
    pub reply: String,
    pub topic: Option<Topic>,
    pub facts: Facts,
}
