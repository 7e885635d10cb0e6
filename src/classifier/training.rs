//! Offline training of the category model

use super::bundle::ModelBundle;
use super::tree::DecisionTree;
use super::vectorizer::CountVectorizer;
use super::ModelError;

/// Hand-labeled example questions
pub const TRAINING_DATA: &[(&str, &str)] = &[
    ("What is the meaning of life?", "philosophy"),
    ("Do we have free will?", "philosophy"),
    ("Should we always tell the truth?", "ethics"),
    ("Is stealing ever justified?", "ethics"),
    ("How do we know what we know?", "epistemology"),
    ("What makes an argument valid?", "logic"),
    ("How should we treat others?", "ethics"),
    ("What is love?", "life"),
    ("What is consciousness?", "philosophy"),
    ("What is friendship?", "life"),
];

/// Fit a vectorizer and a tree on `(text, label)` pairs
pub fn train(data: &[(&str, &str)]) -> Result<ModelBundle, ModelError> {
    let vectorizer = CountVectorizer::fit(data.iter().map(|(text, _)| *text));
    let rows: Vec<Vec<u32>> = data
        .iter()
        .map(|(text, _)| vectorizer.transform(text))
        .collect();
    let labels: Vec<&str> = data.iter().map(|(_, label)| *label).collect();
    let tree = DecisionTree::fit(&rows, &labels, vectorizer.width())
        .ok_or(ModelError::EmptyTrainingSet)?;

    let bundle = ModelBundle::new(vectorizer, tree);
    bundle.validate()?;
    Ok(bundle)
}

/// Train on the built-in examples
pub fn train_default() -> Result<ModelBundle, ModelError> {
    train(TRAINING_DATA)
}
