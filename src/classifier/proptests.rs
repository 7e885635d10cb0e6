//! Property tests for the classifier

use super::training::train_default;
use super::Classifier;
use proptest::prelude::*;
use std::sync::LazyLock;

static CLASSIFIER: LazyLock<Classifier> = LazyLock::new(|| {
    Classifier::new(train_default().expect("built-in corpus trains")).expect("valid bundle")
});

const LABELS: &[&str] = &["philosophy", "ethics", "epistemology", "logic", "life"];

proptest! {
    #[test]
    fn classify_is_total(text in "\\PC{1,200}") {
        let label = CLASSIFIER.classify(&text);
        prop_assert!(LABELS.contains(&label), "unexpected label {:?}", label);
    }

    #[test]
    fn classify_training_words_is_total(
        words in proptest::collection::vec(
            prop_oneof![
                Just("what"), Just("is"), Just("love"), Just("truth"), Just("we"),
                Just("know"), Just("free"), Just("will"), Just("valid"), Just("justified"),
            ],
            1..12,
        )
    ) {
        let text = words.join(" ");
        let label = CLASSIFIER.classify(&text);
        prop_assert!(LABELS.contains(&label));
    }
}
