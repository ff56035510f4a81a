//! Gradient-boosted tree ensemble evaluation.
//!
//! The artifact stores a forest of binary regression trees plus a base score;
//! a prediction is the base score plus one leaf value per tree.
//!
//! The decoder validates structure up front (child/feature indices in range,
//! children strictly after their parent, finite leaf values) so evaluation
//! can walk nodes without bounds failures or cycles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::FEATURE_COUNT;

/// Artifact schema version this build understands.
pub const ARTIFACT_VERSION: u32 = 1;

/// Tool tag expected in the artifact header.
pub const ARTIFACT_TOOL: &str = "house-pricer";

/// Model artifact load failure. Fatal to the caller; there is no retry path.
#[derive(Debug, Clone)]
pub enum ModelLoadError {
    /// Transport-level failure (connect, read).
    Http(String),
    /// Non-success HTTP status from the artifact host.
    Status(u16),
    /// Response body is not a valid serialized model.
    Decode(String),
    /// Valid JSON, but not a model this build can evaluate.
    Incompatible(String),
}

impl std::fmt::Display for ModelLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelLoadError::Http(detail) => write!(f, "artifact fetch failed: {detail}"),
            ModelLoadError::Status(code) => {
                write!(f, "artifact host returned HTTP status {code}")
            }
            ModelLoadError::Decode(detail) => {
                write!(f, "artifact body is not a valid model: {detail}")
            }
            ModelLoadError::Incompatible(detail) => {
                write!(f, "artifact is not usable by this build: {detail}")
            }
        }
    }
}

impl std::error::Error for ModelLoadError {}

/// Inference failure. Returned, never panicked; the session stays usable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictError {
    /// Input vector length does not match the artifact's trained column count.
    ShapeMismatch { expected: usize, got: usize },
    /// Input vector contains a NaN or infinite value.
    NonFinite { index: usize },
    /// Evaluation produced a non-finite score (corrupt leaf values).
    NonFiniteScore,
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::ShapeMismatch { expected, got } => write!(
                f,
                "input vector has {got} values but the model expects {expected}"
            ),
            PredictError::NonFinite { index } => {
                write!(f, "input vector value at position {index} is not finite")
            }
            PredictError::NonFiniteScore => write!(f, "model produced a non-finite score"),
        }
    }
}

impl std::error::Error for PredictError {}

/// One node of a regression tree.
///
/// Split nodes route on `vector[feature] < threshold` (left when true); leaf
/// nodes carry the additive value. Child references are indices into the
/// tree's node list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

/// A single regression tree, rooted at node 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

/// The serialized artifact schema (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelFile {
    pub tool: String,
    pub version: u32,
    pub trained_at: NaiveDate,
    pub n_features: usize,
    pub feature_names: Vec<String>,
    pub base_score: f64,
    pub trees: Vec<Tree>,
}

/// A decoded, structurally validated model ready for inference.
///
/// Read-only after decode; `predict` is a pure function of its input, so a
/// single instance can back any number of submissions.
#[derive(Debug, Clone)]
pub struct GbdtModel {
    file: ModelFile,
}

impl GbdtModel {
    /// Decode and validate an artifact body.
    pub fn decode(bytes: &[u8]) -> Result<Self, ModelLoadError> {
        let file: ModelFile = serde_json::from_slice(bytes)
            .map_err(|e| ModelLoadError::Decode(e.to_string()))?;
        Self::from_file(file)
    }

    /// Validate a deserialized artifact.
    pub fn from_file(file: ModelFile) -> Result<Self, ModelLoadError> {
        if file.tool != ARTIFACT_TOOL {
            return Err(ModelLoadError::Incompatible(format!(
                "unknown tool tag '{}' (expected '{ARTIFACT_TOOL}')",
                file.tool
            )));
        }
        if file.version != ARTIFACT_VERSION {
            return Err(ModelLoadError::Incompatible(format!(
                "schema version {} (expected {ARTIFACT_VERSION})",
                file.version
            )));
        }
        if file.n_features == 0 {
            return Err(ModelLoadError::Incompatible(
                "artifact declares zero features".to_string(),
            ));
        }
        if file.feature_names.len() != file.n_features {
            return Err(ModelLoadError::Incompatible(format!(
                "{} feature names for {} declared features",
                file.feature_names.len(),
                file.n_features
            )));
        }
        if !file.base_score.is_finite() {
            return Err(ModelLoadError::Incompatible(
                "base score is not finite".to_string(),
            ));
        }
        if file.trees.is_empty() {
            return Err(ModelLoadError::Incompatible(
                "artifact contains no trees".to_string(),
            ));
        }
        for (tree_idx, tree) in file.trees.iter().enumerate() {
            validate_tree(tree, tree_idx, file.n_features)?;
        }

        Ok(Self { file })
    }

    /// Run inference over a feature vector.
    ///
    /// The vector must match the artifact's declared column count exactly; a
    /// mismatch is an error, never a silent misprediction.
    pub fn predict(&self, vector: &[f64]) -> Result<f64, PredictError> {
        if vector.len() != self.file.n_features {
            return Err(PredictError::ShapeMismatch {
                expected: self.file.n_features,
                got: vector.len(),
            });
        }
        if let Some(index) = vector.iter().position(|v| !v.is_finite()) {
            return Err(PredictError::NonFinite { index });
        }

        let mut score = self.file.base_score;
        for tree in &self.file.trees {
            score += eval_tree(tree, vector);
        }

        if !score.is_finite() {
            return Err(PredictError::NonFiniteScore);
        }
        Ok(score)
    }

    pub fn trained_at(&self) -> NaiveDate {
        self.file.trained_at
    }

    pub fn n_features(&self) -> usize {
        self.file.n_features
    }

    pub fn feature_names(&self) -> &[String] {
        &self.file.feature_names
    }

    pub fn tree_count(&self) -> usize {
        self.file.trees.len()
    }

    pub fn base_score(&self) -> f64 {
        self.file.base_score
    }

    pub fn tool(&self) -> &str {
        &self.file.tool
    }

    pub fn version(&self) -> u32 {
        self.file.version
    }
}

/// Structural checks that make `eval_tree` total: every index in range, and
/// children strictly after their parent so traversal cannot cycle.
fn validate_tree(tree: &Tree, tree_idx: usize, n_features: usize) -> Result<(), ModelLoadError> {
    if tree.nodes.is_empty() {
        return Err(ModelLoadError::Incompatible(format!(
            "tree {tree_idx} has no nodes"
        )));
    }

    for (node_idx, node) in tree.nodes.iter().enumerate() {
        match node {
            TreeNode::Leaf { value } => {
                if !value.is_finite() {
                    return Err(ModelLoadError::Incompatible(format!(
                        "tree {tree_idx} node {node_idx} has a non-finite leaf value"
                    )));
                }
            }
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= n_features {
                    return Err(ModelLoadError::Incompatible(format!(
                        "tree {tree_idx} node {node_idx} splits on feature {feature} \
                         but the artifact declares {n_features} features"
                    )));
                }
                if !threshold.is_finite() {
                    return Err(ModelLoadError::Incompatible(format!(
                        "tree {tree_idx} node {node_idx} has a non-finite threshold"
                    )));
                }
                for child in [*left, *right] {
                    if child >= tree.nodes.len() || child <= node_idx {
                        return Err(ModelLoadError::Incompatible(format!(
                            "tree {tree_idx} node {node_idx} references child {child} \
                             out of order or out of range"
                        )));
                    }
                }
            }
        }
    }

    Ok(())
}

/// Walk a validated tree from the root to a leaf.
fn eval_tree(tree: &Tree, vector: &[f64]) -> f64 {
    let mut idx = 0usize;
    loop {
        match &tree.nodes[idx] {
            TreeNode::Leaf { value } => return *value,
            TreeNode::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                idx = if vector[*feature] < *threshold {
                    *left
                } else {
                    *right
                };
            }
        }
    }
}

/// True when the artifact's column count matches the form's vector width.
///
/// Callers may still predict against a mismatched artifact and get a
/// `ShapeMismatch`; this is for surfacing the problem at load time.
pub fn matches_form_width(model: &GbdtModel) -> bool {
    model.n_features() == FEATURE_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(value: f64) -> TreeNode {
        TreeNode::Leaf { value }
    }

    fn split(feature: usize, threshold: f64, left: usize, right: usize) -> TreeNode {
        TreeNode::Split {
            feature,
            threshold,
            left,
            right,
        }
    }

    fn small_file(trees: Vec<Tree>) -> ModelFile {
        ModelFile {
            tool: ARTIFACT_TOOL.to_string(),
            version: ARTIFACT_VERSION,
            trained_at: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
            n_features: 2,
            feature_names: vec!["a".to_string(), "b".to_string()],
            base_score: 100.0,
            trees,
        }
    }

    #[test]
    fn predict_sums_base_score_and_leaves() {
        // Tree 1: x0 < 5 -> 10, else 20. Tree 2: constant 1.
        let file = small_file(vec![
            Tree {
                nodes: vec![split(0, 5.0, 1, 2), leaf(10.0), leaf(20.0)],
            },
            Tree {
                nodes: vec![leaf(1.0)],
            },
        ]);
        let model = GbdtModel::from_file(file).unwrap();

        assert_eq!(model.predict(&[3.0, 0.0]).unwrap(), 111.0);
        assert_eq!(model.predict(&[7.0, 0.0]).unwrap(), 121.0);
        // Boundary: routing is strict less-than.
        assert_eq!(model.predict(&[5.0, 0.0]).unwrap(), 121.0);
    }

    #[test]
    fn predict_rejects_wrong_shape() {
        let file = small_file(vec![Tree {
            nodes: vec![leaf(0.0)],
        }]);
        let model = GbdtModel::from_file(file).unwrap();

        let err = model.predict(&[1.0]).unwrap_err();
        assert_eq!(
            err,
            PredictError::ShapeMismatch {
                expected: 2,
                got: 1
            }
        );
    }

    #[test]
    fn predict_rejects_non_finite_input() {
        let file = small_file(vec![Tree {
            nodes: vec![leaf(0.0)],
        }]);
        let model = GbdtModel::from_file(file).unwrap();

        let err = model.predict(&[1.0, f64::NAN]).unwrap_err();
        assert_eq!(err, PredictError::NonFinite { index: 1 });
    }

    #[test]
    fn decode_rejects_invalid_json() {
        let err = GbdtModel::decode(b"not a model").unwrap_err();
        assert!(matches!(err, ModelLoadError::Decode(_)));
    }

    #[test]
    fn decode_rejects_unknown_version() {
        let mut file = small_file(vec![Tree {
            nodes: vec![leaf(0.0)],
        }]);
        file.version = 99;
        let err = GbdtModel::from_file(file).unwrap_err();
        assert!(matches!(err, ModelLoadError::Incompatible(_)));
    }

    #[test]
    fn decode_rejects_out_of_range_children() {
        // Child index 7 does not exist.
        let file = small_file(vec![Tree {
            nodes: vec![split(0, 5.0, 1, 7), leaf(10.0), leaf(20.0)],
        }]);
        let err = GbdtModel::from_file(file).unwrap_err();
        assert!(matches!(err, ModelLoadError::Incompatible(_)));
    }

    #[test]
    fn decode_rejects_backward_children() {
        // A child pointing at the root would loop forever at eval time.
        let file = small_file(vec![Tree {
            nodes: vec![split(0, 5.0, 0, 1), leaf(10.0)],
        }]);
        let err = GbdtModel::from_file(file).unwrap_err();
        assert!(matches!(err, ModelLoadError::Incompatible(_)));
    }

    #[test]
    fn decode_round_trips_serialized_artifact() {
        let file = small_file(vec![Tree {
            nodes: vec![split(1, 0.5, 1, 2), leaf(-3.0), leaf(3.0)],
        }]);
        let bytes = serde_json::to_vec(&file).unwrap();
        let model = GbdtModel::decode(&bytes).unwrap();

        assert_eq!(model.tree_count(), 1);
        assert_eq!(model.n_features(), 2);
        assert_eq!(model.predict(&[0.0, 0.0]).unwrap(), 97.0);
    }
}
