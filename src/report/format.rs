//! Formatted terminal output for estimates and model metadata.

use crate::app::pipeline::EstimateOutput;
use crate::domain::HouseFeatures;
use crate::model::{GbdtModel, matches_form_width};

/// Format a price as `$<value>` with two decimals and thousands separators.
///
/// Callers only pass finite values; `predict` rejects non-finite scores.
pub fn format_price(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let dollars = cents / 100;
    let fraction = cents % 100;
    let grouped = group_thousands(dollars);
    if negative {
        format!("-${grouped}.{fraction:02}")
    } else {
        format!("${grouped}.{fraction:02}")
    }
}

/// Format the full estimate summary (inputs + encoded vector + price).
pub fn format_estimate_summary(out: &EstimateOutput, model: &GbdtModel, url: &str) -> String {
    let mut text = String::new();

    text.push_str("=== hp - House Price Estimate ===\n");
    text.push_str(&format!(
        "Model: trained {} | trees={} | features={}\n",
        model.trained_at(),
        model.tree_count(),
        model.n_features(),
    ));
    text.push_str(&format!("Source: {url}\n"));

    text.push_str("\nInputs:\n");
    text.push_str(&format_feature_lines(&out.features));

    text.push_str(&format!("\nVector: {}\n", fmt_vector(&out.vector)));
    text.push_str(&format!("Estimated price: {}\n", format_price(out.price)));

    text
}

/// Format model metadata for `hp inspect`.
pub fn format_model_info(model: &GbdtModel, url: &str) -> String {
    let mut text = String::new();

    text.push_str("=== hp - Model Artifact ===\n");
    text.push_str(&format!("Source: {url}\n"));
    text.push_str(&format!(
        "Tool: {} | schema v{}\n",
        model.tool(),
        model.version(),
    ));
    text.push_str(&format!("Trained: {}\n", model.trained_at()));
    text.push_str(&format!(
        "Features ({}): {}\n",
        model.n_features(),
        model.feature_names().join(", "),
    ));
    text.push_str(&format!(
        "Trees: {} | base score: {:.2}\n",
        model.tree_count(),
        model.base_score(),
    ));
    text.push_str(&format!(
        "Matches form width: {}\n",
        if matches_form_width(model) { "yes" } else { "no" },
    ));

    text
}

/// One aligned line per form field, in form order.
pub fn format_feature_lines(features: &HouseFeatures) -> String {
    let mut text = String::new();
    for (label, value) in feature_rows(features) {
        text.push_str(&format!("  {label:<28} {value}\n"));
    }
    text
}

/// `(label, value)` rows in the fixed form order, shared with debug bundles.
pub fn feature_rows(features: &HouseFeatures) -> [(&'static str, String); 10] {
    [
        ("Full bathrooms:", features.full_bath.to_string()),
        (
            "Overall quality:",
            features.overall_qual.display_name().to_string(),
        ),
        (
            "Kitchen quality:",
            features.kitchen_qual.display_name().to_string(),
        ),
        (
            "Exterior quality:",
            features.exter_qual.display_name().to_string(),
        ),
        (
            "Garage type:",
            features.garage_type.display_name().to_string(),
        ),
        (
            "Second floor (sqft):",
            features.second_floor_sf.to_string(),
        ),
        (
            "Basement quality:",
            features.bsmt_qual.display_name().to_string(),
        ),
        (
            "Rooms above grade:",
            features.rooms_above_grade.to_string(),
        ),
        ("Living area (sqft):", features.living_area_sf.to_string()),
        ("Basement area (sqft):", features.basement_sf.to_string()),
    ]
}

fn fmt_vector(vector: &[f64]) -> String {
    let parts: Vec<String> = vector.iter().map(|v| format!("{v:.0}")).collect();
    format!("[{}]", parts.join(", "))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
