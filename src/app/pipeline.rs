//! Shared estimate logic used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! resolve artifact URL -> fetch + decode model -> encode features -> predict
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::data::ModelClient;
use crate::domain::{FEATURE_COUNT, HouseFeatures};
use crate::error::AppError;
use crate::model::{GbdtModel, PredictError};

/// All computed outputs of a single estimate.
#[derive(Debug, Clone)]
pub struct EstimateOutput {
    pub features: HouseFeatures,
    pub vector: [f64; FEATURE_COUNT],
    pub price: f64,
}

/// Load the model once at startup. Failure is fatal: no model, no app.
pub fn load_model(url_flag: Option<&str>) -> Result<(ModelClient, GbdtModel), AppError> {
    let client = ModelClient::from_env(url_flag);
    let model = client
        .load()
        .map_err(|e| AppError::model_load(format!("Failed to load model: {e}")))?;
    Ok((client, model))
}

/// Encode the form state and run inference.
///
/// Each call is independent and idempotent for identical inputs; nothing is
/// persisted between submissions.
pub fn run_estimate(
    model: &GbdtModel,
    features: &HouseFeatures,
) -> Result<EstimateOutput, PredictError> {
    let vector = features.to_vector();
    let price = model.predict(&vector)?;
    Ok(EstimateOutput {
        features: *features,
        vector,
        price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ARTIFACT_TOOL, ARTIFACT_VERSION, ModelFile, Tree, TreeNode};
    use chrono::NaiveDate;

    fn constant_model(price: f64) -> GbdtModel {
        let file = ModelFile {
            tool: ARTIFACT_TOOL.to_string(),
            version: ARTIFACT_VERSION,
            trained_at: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
            n_features: FEATURE_COUNT,
            feature_names: (0..FEATURE_COUNT).map(|i| format!("f{i}")).collect(),
            base_score: price,
            trees: vec![Tree {
                nodes: vec![TreeNode::Leaf { value: 0.0 }],
            }],
        };
        GbdtModel::from_file(file).unwrap()
    }

    #[test]
    fn estimate_carries_vector_and_price() {
        let model = constant_model(150_000.0);
        let features = HouseFeatures::default();

        let out = run_estimate(&model, &features).unwrap();
        assert_eq!(out.vector, features.to_vector());
        assert_eq!(out.price, 150_000.0);
    }

    #[test]
    fn estimate_is_idempotent_for_identical_inputs() {
        let model = constant_model(98_765.43);
        let features = HouseFeatures::default();

        let first = run_estimate(&model, &features).unwrap();
        let second = run_estimate(&model, &features).unwrap();
        assert_eq!(first.price, second.price);
        assert_eq!(first.vector, second.vector);
    }

    #[test]
    fn failed_model_load_is_fatal_with_exit_code_3() {
        // An unsupported scheme fails at request time without touching the
        // network, exercising the same fatal path as an HTTP failure.
        let err = load_model(Some("ftp://localhost/model.json")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
        assert!(err.to_string().starts_with("Failed to load model:"));
    }

    #[test]
    fn estimate_surfaces_shape_mismatch_as_error() {
        // Artifact trained on a different column count than the form builds.
        let file = ModelFile {
            tool: ARTIFACT_TOOL.to_string(),
            version: ARTIFACT_VERSION,
            trained_at: NaiveDate::from_ymd_opt(2024, 11, 2).unwrap(),
            n_features: 12,
            feature_names: (0..12).map(|i| format!("f{i}")).collect(),
            base_score: 0.0,
            trees: vec![Tree {
                nodes: vec![TreeNode::Leaf { value: 0.0 }],
            }],
        };
        let model = GbdtModel::from_file(file).unwrap();

        let err = run_estimate(&model, &HouseFeatures::default()).unwrap_err();
        assert_eq!(
            err,
            PredictError::ShapeMismatch {
                expected: 12,
                got: FEATURE_COUNT
            }
        );
    }
}
