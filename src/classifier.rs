//! Question categorization
//!
//! A count vectorizer and a decision tree, trained offline on a handful of
//! labeled questions and shipped as a single versioned bundle.

mod bundle;
pub mod training;
mod tree;
mod vectorizer;

#[cfg(test)]
mod proptests;

pub use bundle::ModelBundle;

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Failed to access model bundle {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed model bundle: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported model bundle version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },
    #[error("Vectorizer produces {vocabulary} features but the tree expects {tree}")]
    WidthMismatch { vocabulary: usize, tree: usize },
    #[error("Invalid vectorizer: {0}")]
    InvalidVectorizer(String),
    #[error("Invalid decision tree: {0}")]
    InvalidTree(String),
    #[error("No training examples")]
    EmptyTrainingSet,
}

/// Loaded category model
#[derive(Debug, Clone)]
pub struct Classifier {
    bundle: ModelBundle,
}

impl Classifier {
    /// Wrap a bundle after checking that its halves fit together
    pub fn new(bundle: ModelBundle) -> Result<Self, ModelError> {
        bundle.validate()?;
        Ok(Self { bundle })
    }

    /// Load the bundle at `path`
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        ModelBundle::load(path).map(|bundle| Self { bundle })
    }

    /// Predict the category of `text`. Always yields one of [`Self::labels`].
    pub fn classify(&self, text: &str) -> &str {
        let features = self.bundle.vectorizer.transform(text);
        self.bundle.tree.predict(&features)
    }

    /// Labels the model was trained on
    pub fn labels(&self) -> &[String] {
        self.bundle.tree.classes()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.bundle.vectorizer.width()
    }
}
