//! Property-based tests for unicare_dialogue.
//!
//! These hold for every utterance, topic and fact set, not just the scripted
//! scenarios in `engine_tests.rs`.

use proptest::prelude::*;
use unicare_core::{Facts, Topic};
use unicare_dialogue::{respond, RuleBook};

// ============================================================================
// Strategies
// ============================================================================

fn arb_topic() -> impl Strategy<Value = Option<Topic>> {
    proptest::option::of(proptest::sample::select(Topic::ALL.to_vec()))
}

fn arb_facts() -> impl Strategy<Value = Facts> {
    (
        proptest::option::of("[A-Z][a-z]{1,8}"),
        proptest::option::of("[a-z]{2,8}"),
        proptest::collection::vec("[a-z]{2,8}", 0..4),
        proptest::collection::vec("[a-z ]{2,12}", 0..3),
    )
        .prop_map(|(name, mood, mood_history, favorite_history)| Facts {
            name,
            mood,
            mood_history,
            favorite_history,
            ..Default::default()
        })
}

/// Utterances biased towards the shapes the extractor and tables look for.
fn arb_utterance() -> impl Strategy<Value = String> {
    prop_oneof![
        "\\PC{0,40}",
        "(i'm|my name is|i feel|i like) [a-z]{1,10}",
        proptest::sample::select(vec![
            "yes", "more", "paano", "hello", "I feel sad", "I'm tired", "I like chess", "",
        ])
        .prop_map(str::to_string),
    ]
}

fn crisis_keywords() -> Vec<String> {
    RuleBook::builtin().unwrap().crisis.class.keywords
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// Identical inputs give identical outputs.
    #[test]
    fn respond_is_deterministic(
        message in arb_utterance(),
        topic in arb_topic(),
        facts in arb_facts(),
    ) {
        let a = respond(&message, topic, &facts);
        let b = respond(&message, topic, &facts);
        prop_assert_eq!(a, b);
    }

    /// Any utterance containing a crisis phrase gets the hotline directory,
    /// whatever the topic and facts.
    #[test]
    fn crisis_phrase_always_wins(
        index in 0usize..1000,
        prefix in "[a-z ]{0,12}",
        suffix in "[a-z ]{0,12}",
        topic in arb_topic(),
        facts in arb_facts(),
    ) {
        let keywords = crisis_keywords();
        let keyword = &keywords[index % keywords.len()];
        let message = format!("{}{}{}", prefix, keyword, suffix);
        let book = RuleBook::builtin().unwrap();
        let r = respond(&message, topic, &facts);
        prop_assert_eq!(r.reply, book.crisis.reply);
        prop_assert_eq!(r.topic, None);
    }

    /// Threading state forward never shrinks or reorders the histories and
    /// never produces adjacent duplicates.
    #[test]
    fn histories_grow_monotonically(
        messages in proptest::collection::vec(arb_utterance(), 1..12),
    ) {
        let mut topic = None;
        let mut facts = Facts::default();
        for message in &messages {
            let r = respond(message, topic, &facts);
            prop_assert!(r.facts.mood_history.starts_with(&facts.mood_history));
            prop_assert!(r.facts.favorite_history.starts_with(&facts.favorite_history));
            topic = r.topic;
            facts = r.facts;
        }
        for pair in facts.mood_history.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
        for pair in facts.favorite_history.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
    }

    /// Every input produces a non-empty reply with no template syntax left in it.
    #[test]
    fn replies_are_always_rendered(
        message in arb_utterance(),
        topic in arb_topic(),
        facts in arb_facts(),
    ) {
        let r = respond(&message, topic, &facts);
        prop_assert!(!r.reply.is_empty());
        prop_assert!(!r.reply.contains('{'), "unrendered template: {}", r.reply);
    }
}
