//! Property tests for the normalizer

use super::{lemmatize, normalize};
use proptest::prelude::*;

fn arb_sentence() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            3 => "[a-zA-Z]{1,12}",
            1 => "[a-z]{1,6}'[a-z]{1,3}",
            1 => "[a-z]{2,6}n't've",
            1 => "[0-9]{1,4}",
            1 => "[?!.,;:\"()-]",
        ],
        0..20,
    )
    .prop_map(|words| words.join(" "))
}

fn arb_training_sentence() -> impl Strategy<Value = String> {
    proptest::sample::select(crate::classifier::training::TRAINING_DATA)
        .prop_map(|(text, _)| text.to_string())
}

proptest! {
    #[test]
    fn normalize_is_a_fixed_point(text in arb_sentence()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_training_vocabulary_is_a_fixed_point(text in arb_training_sentence()) {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn lemmatize_is_idempotent(word in "[a-z]{1,15}") {
        let once = lemmatize(&word);
        prop_assert_eq!(lemmatize(&once), once);
    }

    #[test]
    fn output_has_single_spaces(text in arb_sentence()) {
        let out = normalize(&text);
        prop_assert!(!out.contains("  "));
        prop_assert_eq!(out.trim(), out.as_str());
    }
}
