//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - carried through the estimate pipeline
//! - rendered by both the CLI report and the TUI form
//! - written to debug bundles

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Number of columns in the model input vector.
pub const FEATURE_COUNT: usize = 10;

/// Overall material and finish quality.
///
/// Codes follow the ordinal scheme the model was trained on (1 = worst,
/// 10 = best). The direction and values are a fixed contract of the artifact
/// and must not be re-derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OverallQual {
    VeryPoor,
    Poor,
    Fair,
    BelowAverage,
    Average,
    AboveAverage,
    Good,
    VeryGood,
    Excellent,
    VeryExcellent,
}

impl OverallQual {
    pub const ALL: [OverallQual; 10] = [
        OverallQual::VeryPoor,
        OverallQual::Poor,
        OverallQual::Fair,
        OverallQual::BelowAverage,
        OverallQual::Average,
        OverallQual::AboveAverage,
        OverallQual::Good,
        OverallQual::VeryGood,
        OverallQual::Excellent,
        OverallQual::VeryExcellent,
    ];

    /// Integer code expected by the model.
    pub fn code(self) -> f64 {
        match self {
            OverallQual::VeryPoor => 1.0,
            OverallQual::Poor => 2.0,
            OverallQual::Fair => 3.0,
            OverallQual::BelowAverage => 4.0,
            OverallQual::Average => 5.0,
            OverallQual::AboveAverage => 6.0,
            OverallQual::Good => 7.0,
            OverallQual::VeryGood => 8.0,
            OverallQual::Excellent => 9.0,
            OverallQual::VeryExcellent => 10.0,
        }
    }

    /// Human-readable label for form and report output.
    pub fn display_name(self) -> &'static str {
        match self {
            OverallQual::VeryPoor => "Very Poor",
            OverallQual::Poor => "Poor",
            OverallQual::Fair => "Fair",
            OverallQual::BelowAverage => "Below Average",
            OverallQual::Average => "Average",
            OverallQual::AboveAverage => "Above Average",
            OverallQual::Good => "Good",
            OverallQual::VeryGood => "Very Good",
            OverallQual::Excellent => "Excellent",
            OverallQual::VeryExcellent => "Very Excellent",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Quality rating shared by the kitchen, exterior, and basement features.
///
/// All three were trained on the same label set and code table, so one closed
/// enum covers them. Note the codes are *not* ordinal by quality; they follow
/// the encoding the artifact was trained with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QualRating {
    Excellent,
    Fair,
    Good,
    Average,
}

impl QualRating {
    pub const ALL: [QualRating; 4] = [
        QualRating::Excellent,
        QualRating::Fair,
        QualRating::Good,
        QualRating::Average,
    ];

    /// Integer code expected by the model.
    pub fn code(self) -> f64 {
        match self {
            QualRating::Excellent => 0.0,
            QualRating::Fair => 1.0,
            QualRating::Good => 2.0,
            QualRating::Average => 3.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            QualRating::Excellent => "Excellent",
            QualRating::Fair => "Fair",
            QualRating::Good => "Good",
            QualRating::Average => "Average",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

/// Garage location/type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum GarageType {
    MoreThanOne,
    Attached,
    Basement,
    BuiltIn,
    CarPort,
    Detached,
}

impl GarageType {
    pub const ALL: [GarageType; 6] = [
        GarageType::MoreThanOne,
        GarageType::Attached,
        GarageType::Basement,
        GarageType::BuiltIn,
        GarageType::CarPort,
        GarageType::Detached,
    ];

    /// Integer code expected by the model.
    pub fn code(self) -> f64 {
        match self {
            GarageType::MoreThanOne => 0.0,
            GarageType::Attached => 1.0,
            GarageType::Basement => 2.0,
            GarageType::BuiltIn => 3.0,
            GarageType::CarPort => 4.0,
            GarageType::Detached => 5.0,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            GarageType::MoreThanOne => "More than one type of garage",
            GarageType::Attached => "Attached to home",
            GarageType::Basement => "Basement Garage",
            GarageType::BuiltIn => "Built-In (part of house)",
            GarageType::CarPort => "Car Port",
            GarageType::Detached => "Detached from home",
        }
    }

    pub fn next(self) -> Self {
        cycle(&Self::ALL, self, 1)
    }

    pub fn prev(self) -> Self {
        cycle(&Self::ALL, self, -1)
    }
}

fn cycle<T: Copy + PartialEq>(all: &[T], current: T, delta: isize) -> T {
    let len = all.len() as isize;
    let idx = all.iter().position(|&v| v == current).unwrap_or(0) as isize;
    all[((idx + delta).rem_euclid(len)) as usize]
}

/// Widget bounds for the bounded numeric inputs.
///
/// Values outside these ranges cannot be entered; widget adjustments saturate
/// at the bounds. Unbounded-above fields (bathrooms, second-floor sqft) have
/// no max constant.
pub const ROOMS_MIN: u32 = 2;
pub const ROOMS_MAX: u32 = 20;
pub const LIV_AREA_MIN: u32 = 334;
pub const LIV_AREA_MAX: u32 = 5642;
pub const BSMT_SF_MIN: u32 = 0;
pub const BSMT_SF_MAX: u32 = 6110;

/// Raw form state: the ten inputs as the user supplied them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseFeatures {
    pub full_bath: u32,
    pub overall_qual: OverallQual,
    pub kitchen_qual: QualRating,
    pub exter_qual: QualRating,
    pub garage_type: GarageType,
    pub second_floor_sf: u32,
    pub bsmt_qual: QualRating,
    pub rooms_above_grade: u32,
    pub living_area_sf: u32,
    pub basement_sf: u32,
}

impl HouseFeatures {
    /// Assemble the model input vector in the trained column order.
    ///
    /// The order is significant and must match the artifact's training
    /// columns; changing it is a change to the model contract.
    pub fn to_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.full_bath),
            self.overall_qual.code(),
            self.kitchen_qual.code(),
            self.exter_qual.code(),
            self.garage_type.code(),
            f64::from(self.second_floor_sf),
            self.bsmt_qual.code(),
            f64::from(self.rooms_above_grade),
            f64::from(self.living_area_sf),
            f64::from(self.basement_sf),
        ]
    }
}

impl Default for HouseFeatures {
    /// Initial form state: each widget starts at its minimum (numeric) or
    /// first option (categorical).
    fn default() -> Self {
        Self {
            full_bath: 0,
            overall_qual: OverallQual::VeryPoor,
            kitchen_qual: QualRating::Excellent,
            exter_qual: QualRating::Excellent,
            garage_type: GarageType::MoreThanOne,
            second_floor_sf: 0,
            bsmt_qual: QualRating::Excellent,
            rooms_above_grade: ROOMS_MIN,
            living_area_sf: LIV_AREA_MIN,
            basement_sf: BSMT_SF_MIN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_qual_codes_match_training_table() {
        let expected = [
            (OverallQual::VeryPoor, 1.0),
            (OverallQual::Poor, 2.0),
            (OverallQual::Fair, 3.0),
            (OverallQual::BelowAverage, 4.0),
            (OverallQual::Average, 5.0),
            (OverallQual::AboveAverage, 6.0),
            (OverallQual::Good, 7.0),
            (OverallQual::VeryGood, 8.0),
            (OverallQual::Excellent, 9.0),
            (OverallQual::VeryExcellent, 10.0),
        ];
        for (qual, code) in expected {
            assert_eq!(qual.code(), code, "{}", qual.display_name());
        }
    }

    #[test]
    fn qual_rating_codes_match_training_table() {
        assert_eq!(QualRating::Excellent.code(), 0.0);
        assert_eq!(QualRating::Fair.code(), 1.0);
        assert_eq!(QualRating::Good.code(), 2.0);
        assert_eq!(QualRating::Average.code(), 3.0);
    }

    #[test]
    fn garage_type_codes_match_training_table() {
        assert_eq!(GarageType::MoreThanOne.code(), 0.0);
        assert_eq!(GarageType::Attached.code(), 1.0);
        assert_eq!(GarageType::Basement.code(), 2.0);
        assert_eq!(GarageType::BuiltIn.code(), 3.0);
        assert_eq!(GarageType::CarPort.code(), 4.0);
        assert_eq!(GarageType::Detached.code(), 5.0);
    }

    #[test]
    fn vector_has_fixed_length_and_order() {
        let features = HouseFeatures {
            full_bath: 2,
            overall_qual: OverallQual::Good,
            kitchen_qual: QualRating::Good,
            exter_qual: QualRating::Good,
            garage_type: GarageType::Attached,
            second_floor_sf: 800,
            bsmt_qual: QualRating::Good,
            rooms_above_grade: 7,
            living_area_sf: 1800,
            basement_sf: 900,
        };

        let vector = features.to_vector();
        assert_eq!(vector.len(), FEATURE_COUNT);
        assert_eq!(
            vector,
            [2.0, 7.0, 2.0, 2.0, 1.0, 800.0, 2.0, 7.0, 1800.0, 900.0]
        );
    }

    #[test]
    fn cycling_wraps_both_directions() {
        assert_eq!(OverallQual::VeryExcellent.next(), OverallQual::VeryPoor);
        assert_eq!(OverallQual::VeryPoor.prev(), OverallQual::VeryExcellent);
        assert_eq!(QualRating::Average.next(), QualRating::Excellent);
        assert_eq!(GarageType::MoreThanOne.prev(), GarageType::Detached);
    }

    #[test]
    fn default_form_state_sits_at_widget_minimums() {
        let d = HouseFeatures::default();
        assert_eq!(d.rooms_above_grade, ROOMS_MIN);
        assert_eq!(d.living_area_sf, LIV_AREA_MIN);
        assert_eq!(d.basement_sf, BSMT_SF_MIN);
        assert_eq!(d.overall_qual, OverallQual::VeryPoor);
    }
}
