//! The flat intent table and the catch-all reply.

use unicare_core::Facts;

use crate::engine::Decision;
use crate::rules::IntentRule;
use crate::template::Template;

/// First rule whose keywords match, in table order.
pub fn check<'a>(rules: &'a [IntentRule], text: &str, facts: &Facts) -> Option<Decision<'a>> {
    rules.iter().find(|rule| rule.matches(text)).map(|rule| Decision {
        reply: rule.reply.render(facts),
        topic: Some(rule.topic),
        rule: rule.name.as_str(),
    })
}

pub fn fallback<'a>(template: &'a Template, facts: &Facts) -> Decision<'a> {
    Decision {
        reply: template.render(facts),
        topic: None,
        rule: "fallback",
    }
}
