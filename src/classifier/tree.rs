//! Decision tree over term-count features
//!
//! CART with Gini impurity. Split candidates are the midpoints between
//! adjacent distinct feature values; ties go to the lowest feature index and
//! the lowest threshold, so training is deterministic.

use serde::{Deserialize, Serialize};

/// Impurity improvements smaller than this are treated as ties
const EPSILON: f64 = 1e-12;

/// A tree node. Children always come after their parent in `nodes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// `features[feature] <= threshold` goes to `left`, otherwise `right`
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        class: usize,
    },
}

/// Fitted decision tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    n_features: usize,
    classes: Vec<String>,
    nodes: Vec<Node>,
}

struct SplitCandidate {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// Fit a tree on dense feature rows and their labels.
    ///
    /// Returns `None` when there are no samples or the rows and labels
    /// disagree in length.
    pub fn fit(rows: &[Vec<u32>], labels: &[&str], n_features: usize) -> Option<Self> {
        if rows.is_empty() || rows.len() != labels.len() {
            return None;
        }
        let mut classes: Vec<String> = labels.iter().map(|l| (*l).to_string()).collect();
        classes.sort();
        classes.dedup();
        let targets: Vec<usize> = labels
            .iter()
            .map(|l| classes.iter().position(|c| c == l).unwrap_or(0))
            .collect();

        let mut builder = TreeBuilder {
            rows,
            targets: &targets,
            n_features,
            n_classes: classes.len(),
            nodes: Vec::new(),
        };
        builder.grow((0..rows.len()).collect());

        Some(Self {
            n_features,
            classes,
            nodes: builder.nodes,
        })
    }

    /// Number of features the tree expects
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    #[cfg(test)]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Predict the class label for one feature row.
    ///
    /// Features missing from a short row read as zero.
    pub fn predict(&self, features: &[u32]) -> &str {
        let mut index = 0;
        loop {
            match self.nodes.get(index) {
                Some(Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = f64::from(features.get(*feature).copied().unwrap_or(0));
                    index = if value <= *threshold { *left } else { *right };
                }
                Some(Node::Leaf { class }) => {
                    return self.classes.get(*class).map_or("", String::as_str);
                }
                // Only reachable for an unvalidated tree
                None => return self.classes.first().map_or("", String::as_str),
            }
        }
    }

    /// Check structural invariants of a deserialized tree
    pub fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("tree has no classes".to_string());
        }
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        let len = self.nodes.len();
        for (i, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= self.n_features {
                        return Err(format!(
                            "node {i} splits on feature {feature} but the tree has {} features",
                            self.n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {i} has a non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= i || child >= len {
                            return Err(format!("node {i} has invalid child {child}"));
                        }
                    }
                }
                Node::Leaf { class } => {
                    if *class >= self.classes.len() {
                        return Err(format!("leaf {i} points at unknown class {class}"));
                    }
                }
            }
        }
        Ok(())
    }
}

struct TreeBuilder<'a> {
    rows: &'a [Vec<u32>],
    targets: &'a [usize],
    n_features: usize,
    n_classes: usize,
    nodes: Vec<Node>,
}

impl TreeBuilder<'_> {
    /// Grow the subtree for `samples` and return its root index
    fn grow(&mut self, samples: Vec<usize>) -> usize {
        let id = self.nodes.len();
        let counts = self.class_counts(&samples);
        self.nodes.push(Node::Leaf {
            class: majority(&counts),
        });

        if gini(&counts, samples.len()) <= EPSILON {
            return id;
        }
        let Some(split) = self.best_split(&samples) else {
            return id;
        };

        let (left, right): (Vec<usize>, Vec<usize>) = samples
            .into_iter()
            .partition(|&s| f64::from(self.value(s, split.feature)) <= split.threshold);
        let left = self.grow(left);
        let right = self.grow(right);
        self.nodes[id] = Node::Split {
            feature: split.feature,
            threshold: split.threshold,
            left,
            right,
        };
        id
    }

    fn best_split(&self, samples: &[usize]) -> Option<SplitCandidate> {
        let mut best: Option<SplitCandidate> = None;
        for feature in 0..self.n_features {
            let mut values: Vec<u32> = samples.iter().map(|&s| self.value(s, feature)).collect();
            values.sort_unstable();
            values.dedup();
            for pair in values.windows(2) {
                let threshold = (f64::from(pair[0]) + f64::from(pair[1])) / 2.0;
                let impurity = self.split_impurity(samples, feature, threshold);
                if best
                    .as_ref()
                    .map_or(true, |b| impurity < b.impurity - EPSILON)
                {
                    best = Some(SplitCandidate {
                        feature,
                        threshold,
                        impurity,
                    });
                }
            }
        }
        best
    }

    /// Weighted Gini impurity of the two sides of a split
    fn split_impurity(&self, samples: &[usize], feature: usize, threshold: f64) -> f64 {
        let mut left = vec![0usize; self.n_classes];
        let mut right = vec![0usize; self.n_classes];
        for &s in samples {
            let side = if f64::from(self.value(s, feature)) <= threshold {
                &mut left
            } else {
                &mut right
            };
            side[self.targets[s]] += 1;
        }
        let n_left: usize = left.iter().sum();
        let n_right: usize = right.iter().sum();
        let total = to_f64(samples.len());
        (to_f64(n_left) * gini(&left, n_left) + to_f64(n_right) * gini(&right, n_right)) / total
    }

    fn class_counts(&self, samples: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &s in samples {
            counts[self.targets[s]] += 1;
        }
        counts
    }

    fn value(&self, sample: usize, feature: usize) -> u32 {
        self.rows[sample].get(feature).copied().unwrap_or(0)
    }
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = to_f64(total);
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = to_f64(c) / total;
            p * p
        })
        .sum::<f64>()
}

/// Index of the largest count; ties go to the lowest index
fn majority(counts: &[usize]) -> usize {
    let mut best = 0;
    for (i, &c) in counts.iter().enumerate() {
        if c > counts[best] {
            best = i;
        }
    }
    best
}

#[allow(clippy::cast_precision_loss)] // sample counts are tiny
fn to_f64(n: usize) -> f64 {
    n as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_separates_distinct_rows() {
        let rows = vec![vec![1, 0], vec![0, 1], vec![0, 0]];
        let tree = DecisionTree::fit(&rows, &["a", "b", "c"], 2).unwrap();
        assert!(tree.validate().is_ok());
        assert_eq!(tree.predict(&[1, 0]), "a");
        assert_eq!(tree.predict(&[0, 1]), "b");
        assert_eq!(tree.predict(&[0, 0]), "c");
    }

    #[test]
    fn test_identical_rows_fall_back_to_majority() {
        let rows = vec![vec![1], vec![1], vec![1]];
        let tree = DecisionTree::fit(&rows, &["y", "x", "y"], 1).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.predict(&[1]), "y");
    }

    #[test]
    fn test_majority_tie_picks_lowest_class() {
        assert_eq!(majority(&[2, 2, 1]), 0);
        assert_eq!(majority(&[0, 3, 3]), 1);
    }

    #[test]
    fn test_short_rows_read_as_zero() {
        let rows = vec![vec![0, 2], vec![0, 0]];
        let tree = DecisionTree::fit(&rows, &["two", "none"], 2).unwrap();
        assert_eq!(tree.predict(&[]), "none");
    }

    #[test]
    fn test_fit_rejects_empty_or_mismatched_input() {
        assert!(DecisionTree::fit(&[], &[], 0).is_none());
        assert!(DecisionTree::fit(&[vec![1]], &["a", "b"], 1).is_none());
    }

    #[test]
    fn test_validate_rejects_backward_child() {
        let tree = DecisionTree {
            n_features: 1,
            classes: vec!["a".into()],
            nodes: vec![
                Node::Split {
                    feature: 0,
                    threshold: 0.5,
                    left: 0,
                    right: 1,
                },
                Node::Leaf { class: 0 },
            ],
        };
        assert!(tree.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_feature_and_class() {
        let tree = DecisionTree {
            n_features: 1,
            classes: vec!["a".into()],
            nodes: vec![
                Node::Split {
                    feature: 3,
                    threshold: 0.5,
                    left: 1,
                    right: 2,
                },
                Node::Leaf { class: 0 },
                Node::Leaf { class: 0 },
            ],
        };
        assert!(tree.validate().is_err());

        let tree = DecisionTree {
            n_features: 1,
            classes: vec!["a".into()],
            nodes: vec![Node::Leaf { class: 4 }],
        };
        assert!(tree.validate().is_err());
    }
}
