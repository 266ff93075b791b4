//! Crisis detection. Runs before every other stage; a hit always produces the
//! hotline directory and clears the topic.

use crate::engine::Decision;
use crate::rules::CrisisRules;

pub fn check<'a>(rules: &'a CrisisRules, text: &str) -> Option<Decision<'a>> {
    if !rules.class.matches(text) {
        return None;
    }
    // The message itself is deliberately not logged.
    tracing::info!("Crisis language detected, replying with hotline directory");
    Some(Decision {
        reply: rules.reply.clone(),
        topic: None,
        rule: "crisis",
    })
}
