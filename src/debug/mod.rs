//! Debug bundle writer for inspecting form state and model behavior.
//!
//! A bundle is a small markdown file capturing everything needed to reproduce
//! one submission: model metadata, the raw inputs, the encoded vector, and
//! the prediction outcome.

use std::fs::{File, create_dir_all};
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;

use crate::app::pipeline::EstimateOutput;
use crate::domain::HouseFeatures;
use crate::error::AppError;
use crate::model::{GbdtModel, PredictError};

pub fn write_debug_bundle(
    model: &GbdtModel,
    url: &str,
    features: &HouseFeatures,
    outcome: &Result<EstimateOutput, PredictError>,
) -> Result<PathBuf, AppError> {
    let dir = PathBuf::from("debug");
    create_dir_all(&dir).map_err(|e| AppError::runtime(format!("Failed to create debug dir: {e}")))?;

    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("hp_debug_{ts}.md"));

    let body = render_debug_bundle(model, url, features, outcome);

    let mut file = File::create(&path)
        .map_err(|e| AppError::runtime(format!("Failed to create debug file: {e}")))?;
    file.write_all(body.as_bytes())
        .map_err(|e| AppError::runtime(format!("Failed to write debug bundle: {e}")))?;

    Ok(path)
}

fn render_debug_bundle(
    model: &GbdtModel,
    url: &str,
    features: &HouseFeatures,
    outcome: &Result<EstimateOutput, PredictError>,
) -> String {
    let mut out = String::new();

    out.push_str("# hp debug bundle\n");
    out.push_str(&format!("- generated: {}\n", Local::now().to_rfc3339()));
    out.push_str(&format!("- artifact_url: {url}\n"));
    out.push_str(&format!("- artifact_tool: {} v{}\n", model.tool(), model.version()));
    out.push_str(&format!("- trained_at: {}\n", model.trained_at()));
    out.push_str(&format!(
        "- trees: {} | features: {} | base_score: {:.4}\n",
        model.tree_count(),
        model.n_features(),
        model.base_score(),
    ));

    out.push_str("\n## Inputs\n");
    out.push_str("| field | value |\n");
    out.push_str("| - | - |\n");
    for (label, value) in crate::report::feature_rows(features) {
        out.push_str(&format!("| {} | {value} |\n", label.trim_end_matches(':')));
    }

    out.push_str("\n## Encoded vector\n");
    let parts: Vec<String> = features.to_vector().iter().map(|v| format!("{v:.0}")).collect();
    out.push_str(&format!("`[{}]`\n", parts.join(", ")));

    out.push_str("\n## Outcome\n");
    match outcome {
        Ok(est) => {
            out.push_str(&format!("- price_raw: {:.6}\n", est.price));
            out.push_str(&format!(
                "- price_formatted: {}\n",
                crate::report::format_price(est.price)
            ));
        }
        Err(err) => {
            out.push_str(&format!("- prediction_error: {err}\n"));
        }
    }

    out
}
