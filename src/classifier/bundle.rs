//! Versioned model bundle: the fitted vectorizer and tree as one artifact

use super::tree::DecisionTree;
use super::vectorizer::CountVectorizer;
use super::ModelError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Bundle layout version. Bump when the serialized shape changes.
pub const FORMAT_VERSION: u32 = 1;

/// The two halves of the category model, stored and loaded together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelBundle {
    pub format_version: u32,
    pub vectorizer: CountVectorizer,
    pub tree: DecisionTree,
}

impl ModelBundle {
    pub fn new(vectorizer: CountVectorizer, tree: DecisionTree) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            vectorizer,
            tree,
        }
    }

    /// Read and validate a bundle from disk
    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parse and validate a bundle
    pub fn from_json(json: &str) -> Result<Self, ModelError> {
        let bundle: Self = serde_json::from_str(json)?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Write the bundle as pretty JSON
    pub fn save(&self, path: &Path) -> Result<(), ModelError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Compatibility check between the two halves
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.format_version != FORMAT_VERSION {
            return Err(ModelError::UnsupportedVersion {
                found: self.format_version,
                expected: FORMAT_VERSION,
            });
        }
        self.vectorizer
            .validate()
            .map_err(ModelError::InvalidVectorizer)?;
        if self.vectorizer.width() != self.tree.n_features() {
            return Err(ModelError::WidthMismatch {
                vocabulary: self.vectorizer.width(),
                tree: self.tree.n_features(),
            });
        }
        self.tree.validate().map_err(ModelError::InvalidTree)
    }
}
