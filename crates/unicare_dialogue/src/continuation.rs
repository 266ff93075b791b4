//! Short follow-ups ("yes", "more", "paano") read against the previous topic.

use unicare_core::{Facts, Topic};

use crate::engine::Decision;
use crate::rules::ContinuationRules;

pub fn check<'a>(
    rules: &'a ContinuationRules,
    text: &str,
    last_topic: Option<Topic>,
    facts: &Facts,
) -> Option<Decision<'a>> {
    // A blank message gets the same prompt whatever came before.
    if text.is_empty() {
        return Some(Decision {
            reply: rules.empty_reply.render(facts),
            topic: None,
            rule: "empty",
        });
    }

    let last_topic = last_topic?;
    rules
        .transitions
        .iter()
        .filter(|t| t.last_topic == last_topic)
        .find(|t| {
            rules
                .classes
                .get(&t.class)
                .is_some_and(|class| class.matches(text))
        })
        .map(|t| Decision {
            reply: t.reply.render(facts),
            topic: Some(t.topic),
            rule: t.class.as_str(),
        })
}
