//! Bag-of-words term counting over a fixed vocabulary

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// Terms are runs of two or more word characters
static TERM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("term pattern is valid"));

/// Fitted count vectorizer. The vocabulary is sorted and unique; a term's
/// feature index is its position in the vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountVectorizer {
    vocabulary: Vec<String>,
}

impl CountVectorizer {
    /// Learn the vocabulary from a training corpus
    pub fn fit<'a>(texts: impl IntoIterator<Item = &'a str>) -> Self {
        let terms: BTreeSet<String> = texts.into_iter().flat_map(analyze).collect();
        Self {
            vocabulary: terms.into_iter().collect(),
        }
    }

    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// Number of features produced by [`Self::transform`]
    pub fn width(&self) -> usize {
        self.vocabulary.len()
    }

    /// Count vocabulary terms in `text`. Unknown terms are ignored.
    pub fn transform(&self, text: &str) -> Vec<u32> {
        let mut counts = vec![0u32; self.vocabulary.len()];
        for term in analyze(text) {
            if let Ok(index) = self.vocabulary.binary_search(&term) {
                counts[index] = counts[index].saturating_add(1);
            }
        }
        counts
    }

    /// Check the sorted-unique vocabulary invariant of a deserialized vectorizer
    pub fn validate(&self) -> Result<(), String> {
        if let Some(pair) = self.vocabulary.windows(2).find(|w| w[0] >= w[1]) {
            return Err(format!(
                "vocabulary is not sorted and unique at {:?} / {:?}",
                pair[0], pair[1]
            ));
        }
        Ok(())
    }
}

/// Lowercase `text` and extract its terms
fn analyze(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
