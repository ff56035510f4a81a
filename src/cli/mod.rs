//! Command-line parsing for the house price estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the encoding/inference code.

use clap::{Parser, Subcommand};

use crate::domain::{
    BSMT_SF_MAX, GarageType, HouseFeatures, LIV_AREA_MAX, LIV_AREA_MIN, OverallQual, QualRating,
    ROOMS_MAX, ROOMS_MIN,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "hp", version, about = "House Price Estimator (pretrained model)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// One-shot estimate from flags; prints inputs, the encoded vector, and the price.
    Estimate(EstimateArgs),
    /// Print model artifact metadata without predicting.
    Inspect(ModelArgs),
    /// Launch the interactive form.
    ///
    /// This uses the same estimate pipeline as `hp estimate`, but renders an
    /// input form and the result in a terminal UI using Ratatui.
    Tui(ModelArgs),
}

/// Model artifact location options.
#[derive(Debug, Parser, Clone)]
pub struct ModelArgs {
    /// Override the model artifact URL (default: MODEL_URL env, then the built-in location).
    #[arg(long, value_name = "URL")]
    pub model_url: Option<String>,
}

/// House feature inputs for a one-shot estimate.
///
/// Defaults match the form's initial state: numeric widgets at their minimum,
/// categorical widgets at their first option. Range validators mirror the
/// form's widget bounds, so an out-of-range value is rejected before any
/// encoding happens.
#[derive(Debug, Parser, Clone)]
pub struct EstimateArgs {
    #[command(flatten)]
    pub model: ModelArgs,

    /// Number of full bathrooms above grade.
    #[arg(long, default_value_t = 0)]
    pub full_bath: u32,

    /// Overall material and finish quality.
    #[arg(long, value_enum, default_value_t = OverallQual::VeryPoor)]
    pub overall_qual: OverallQual,

    /// Kitchen quality.
    #[arg(long, value_enum, default_value_t = QualRating::Excellent)]
    pub kitchen_qual: QualRating,

    /// Exterior material quality.
    #[arg(long, value_enum, default_value_t = QualRating::Excellent)]
    pub exter_qual: QualRating,

    /// Garage location/type.
    #[arg(long, value_enum, default_value_t = GarageType::MoreThanOne)]
    pub garage_type: GarageType,

    /// Second floor square feet.
    #[arg(long, default_value_t = 0)]
    pub second_floor_sf: u32,

    /// Basement quality and height.
    #[arg(long, value_enum, default_value_t = QualRating::Excellent)]
    pub bsmt_qual: QualRating,

    /// Total rooms above grade (excluding bathrooms).
    #[arg(long, default_value_t = ROOMS_MIN,
          value_parser = clap::value_parser!(u32).range(ROOMS_MIN as i64..=ROOMS_MAX as i64))]
    pub rooms_above_grade: u32,

    /// Above-grade living area (sqft).
    #[arg(long, default_value_t = LIV_AREA_MIN,
          value_parser = clap::value_parser!(u32).range(LIV_AREA_MIN as i64..=LIV_AREA_MAX as i64))]
    pub living_area_sf: u32,

    /// Basement area (sqft).
    #[arg(long, default_value_t = 0,
          value_parser = clap::value_parser!(u32).range(0..=BSMT_SF_MAX as i64))]
    pub basement_sf: u32,
}

impl EstimateArgs {
    /// Collect the flag values into the raw form state.
    pub fn to_features(&self) -> HouseFeatures {
        HouseFeatures {
            full_bath: self.full_bath,
            overall_qual: self.overall_qual,
            kitchen_qual: self.kitchen_qual,
            exter_qual: self.exter_qual,
            garage_type: self.garage_type,
            second_floor_sf: self.second_floor_sf,
            bsmt_qual: self.bsmt_qual,
            rooms_above_grade: self.rooms_above_grade,
            living_area_sf: self.living_area_sf,
            basement_sf: self.basement_sf,
        }
    }
}
