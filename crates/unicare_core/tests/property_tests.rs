//! Property-based tests for unicare_core.
//!
//! Uses proptest to check the matcher and fact-merge invariants over
//! arbitrary inputs rather than hand-picked examples.

use proptest::prelude::*;
use unicare_core::{fuzzy_match, similarity_ratio, FactUpdate, Facts};

// ============================================================================
// Strategies
// ============================================================================

/// Short lower-case words, with a few repeats likely so duplicates get exercised.
fn arb_word() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("sad".to_string()),
        Just("tired".to_string()),
        Just("music".to_string()),
        "[a-z]{1,8}",
    ]
}

fn arb_update() -> impl Strategy<Value = FactUpdate> {
    (
        proptest::option::of(arb_word()),
        proptest::option::of(arb_word()),
        proptest::option::of(arb_word()),
    )
        .prop_map(|(name, mood, favorite)| FactUpdate {
            name,
            mood,
            favorite,
        })
}

// ============================================================================
// Similarity
// ============================================================================

proptest! {
    #[test]
    fn ratio_is_bounded(a in "\\PC{0,30}", b in "\\PC{0,30}") {
        let r = similarity_ratio(&a, &b);
        prop_assert!(r.is_finite());
        prop_assert!((0.0..=1.0).contains(&r), "ratio out of range: {}", r);
    }

    #[test]
    fn ratio_of_identical_strings_is_one(a in "\\PC{0,30}") {
        prop_assert!((similarity_ratio(&a, &a) - 1.0).abs() < 1e-9);
    }

    /// Substring containment matches regardless of threshold.
    #[test]
    fn contained_keyword_always_matches(
        prefix in "[a-z ]{0,10}",
        kw in "[a-z]{1,10}",
        suffix in "[a-z ]{0,10}",
    ) {
        let text = format!("{}{}{}", prefix, kw, suffix);
        prop_assert!(fuzzy_match(&text, &[kw.as_str()], 1.5));
    }
}

// ============================================================================
// Fact merging
// ============================================================================

proptest! {
    /// Histories only grow, keep their prefix, and never hold adjacent duplicates.
    #[test]
    fn histories_are_monotonic(updates in proptest::collection::vec(arb_update(), 0..20)) {
        let mut facts = Facts::default();
        for update in &updates {
            let next = facts.merge(update);
            prop_assert!(next.mood_history.starts_with(&facts.mood_history));
            prop_assert!(next.favorite_history.starts_with(&facts.favorite_history));
            facts = next;
        }
        for pair in facts.mood_history.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
        for pair in facts.favorite_history.windows(2) {
            prop_assert_ne!(&pair[0], &pair[1]);
        }
    }
}
