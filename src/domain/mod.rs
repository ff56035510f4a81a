//! Domain types used throughout the estimate pipeline.
//!
//! This module defines:
//!
//! - the categorical feature enums and their fixed integer codes
//!   (`OverallQual`, `QualRating`, `GarageType`)
//! - numeric input bounds enforced at the widget level
//! - the raw form state (`HouseFeatures`) and its model input vector

pub mod types;

pub use types::*;
