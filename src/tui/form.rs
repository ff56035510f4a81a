//! Form state and field behavior.
//!
//! Kept free of terminal concerns so the widget rules (clamping, cycling,
//! direct entry) are directly testable. The rendering code in `tui` only
//! reads labels and writes key events through these methods.

use crate::domain::{
    BSMT_SF_MAX, BSMT_SF_MIN, FEATURE_COUNT, HouseFeatures, LIV_AREA_MAX, LIV_AREA_MIN, ROOMS_MAX,
    ROOMS_MIN,
};

/// Kind of a form field, with widget bounds for numeric inputs.
///
/// Numeric bounds are enforced here, at the widget: adjustments saturate and
/// direct entry clamps, so out-of-range values never reach the pipeline.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    Numeric {
        min: u32,
        max: Option<u32>,
        step: u32,
    },
    Choice,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub label: &'static str,
    pub kind: FieldKind,
}

/// The form fields in submission order (the vector's column order).
pub const FIELDS: [FieldSpec; FEATURE_COUNT] = [
    FieldSpec {
        label: "Full bathrooms",
        kind: FieldKind::Numeric {
            min: 0,
            max: None,
            step: 1,
        },
    },
    FieldSpec {
        label: "Overall quality",
        kind: FieldKind::Choice,
    },
    FieldSpec {
        label: "Kitchen quality",
        kind: FieldKind::Choice,
    },
    FieldSpec {
        label: "Exterior quality",
        kind: FieldKind::Choice,
    },
    FieldSpec {
        label: "Garage type",
        kind: FieldKind::Choice,
    },
    FieldSpec {
        label: "Second floor (sqft)",
        kind: FieldKind::Numeric {
            min: 0,
            max: None,
            step: 25,
        },
    },
    FieldSpec {
        label: "Basement quality",
        kind: FieldKind::Choice,
    },
    FieldSpec {
        label: "Rooms above grade",
        kind: FieldKind::Numeric {
            min: ROOMS_MIN,
            max: Some(ROOMS_MAX),
            step: 1,
        },
    },
    FieldSpec {
        label: "Living area (sqft)",
        kind: FieldKind::Numeric {
            min: LIV_AREA_MIN,
            max: Some(LIV_AREA_MAX),
            step: 25,
        },
    },
    FieldSpec {
        label: "Basement area (sqft)",
        kind: FieldKind::Numeric {
            min: BSMT_SF_MIN,
            max: Some(BSMT_SF_MAX),
            step: 25,
        },
    },
];

/// Interactive form state: current inputs, selection, and edit buffer.
#[derive(Debug, Clone)]
pub struct FormState {
    pub features: HouseFeatures,
    pub selected: usize,
    pub editing: bool,
    pub input: String,
}

impl FormState {
    pub fn new() -> Self {
        Self {
            features: HouseFeatures::default(),
            selected: 0,
            editing: false,
            input: String::new(),
        }
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < FIELDS.len() {
            self.selected += 1;
        }
    }

    /// Step the selected field: numeric fields move by their step and
    /// saturate at the widget bounds, categorical fields cycle.
    pub fn adjust(&mut self, delta: i32) {
        match FIELDS[self.selected].kind {
            FieldKind::Numeric { min, max, step } => {
                let current = self.numeric_value(self.selected);
                let next = if delta >= 0 {
                    current.saturating_add(step)
                } else {
                    current.saturating_sub(step)
                };
                self.set_numeric(self.selected, clamp_numeric(next, min, max));
            }
            FieldKind::Choice => self.cycle_choice(self.selected, delta),
        }
    }

    /// Start direct entry on the selected field. Returns false for
    /// categorical fields, which only cycle.
    pub fn begin_edit(&mut self) -> bool {
        match FIELDS[self.selected].kind {
            FieldKind::Numeric { .. } => {
                self.editing = true;
                self.input.clear();
                true
            }
            FieldKind::Choice => false,
        }
    }

    pub fn push_digit(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.input.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.input.pop();
    }

    pub fn cancel_edit(&mut self) {
        self.editing = false;
        self.input.clear();
    }

    /// Apply the edit buffer to the selected field, clamping to the widget
    /// bounds. An empty buffer leaves the field unchanged.
    pub fn apply_edit(&mut self) -> Result<(), String> {
        self.editing = false;
        let raw = std::mem::take(&mut self.input);
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(());
        }

        let FieldKind::Numeric { min, max, .. } = FIELDS[self.selected].kind else {
            return Ok(());
        };

        let value = trimmed
            .parse::<u32>()
            .map_err(|_| format!("Invalid number '{trimmed}'."))?;
        self.set_numeric(self.selected, clamp_numeric(value, min, max));
        Ok(())
    }

    /// Current display value for a field (the edit buffer while editing).
    pub fn value_label(&self, idx: usize) -> String {
        if self.editing && idx == self.selected {
            return format!("{}_", self.input);
        }
        match idx {
            0 => self.features.full_bath.to_string(),
            1 => self.features.overall_qual.display_name().to_string(),
            2 => self.features.kitchen_qual.display_name().to_string(),
            3 => self.features.exter_qual.display_name().to_string(),
            4 => self.features.garage_type.display_name().to_string(),
            5 => self.features.second_floor_sf.to_string(),
            6 => self.features.bsmt_qual.display_name().to_string(),
            7 => self.features.rooms_above_grade.to_string(),
            8 => self.features.living_area_sf.to_string(),
            9 => self.features.basement_sf.to_string(),
            _ => String::new(),
        }
    }

    fn numeric_value(&self, idx: usize) -> u32 {
        match idx {
            0 => self.features.full_bath,
            5 => self.features.second_floor_sf,
            7 => self.features.rooms_above_grade,
            8 => self.features.living_area_sf,
            9 => self.features.basement_sf,
            _ => 0,
        }
    }

    fn set_numeric(&mut self, idx: usize, value: u32) {
        match idx {
            0 => self.features.full_bath = value,
            5 => self.features.second_floor_sf = value,
            7 => self.features.rooms_above_grade = value,
            8 => self.features.living_area_sf = value,
            9 => self.features.basement_sf = value,
            _ => {}
        }
    }

    fn cycle_choice(&mut self, idx: usize, delta: i32) {
        let forward = delta >= 0;
        match idx {
            1 => {
                self.features.overall_qual = if forward {
                    self.features.overall_qual.next()
                } else {
                    self.features.overall_qual.prev()
                };
            }
            2 => {
                self.features.kitchen_qual = if forward {
                    self.features.kitchen_qual.next()
                } else {
                    self.features.kitchen_qual.prev()
                };
            }
            3 => {
                self.features.exter_qual = if forward {
                    self.features.exter_qual.next()
                } else {
                    self.features.exter_qual.prev()
                };
            }
            4 => {
                self.features.garage_type = if forward {
                    self.features.garage_type.next()
                } else {
                    self.features.garage_type.prev()
                };
            }
            6 => {
                self.features.bsmt_qual = if forward {
                    self.features.bsmt_qual.next()
                } else {
                    self.features.bsmt_qual.prev()
                };
            }
            _ => {}
        }
    }
}

fn clamp_numeric(value: u32, min: u32, max: Option<u32>) -> u32 {
    let v = value.max(min);
    match max {
        Some(max) => v.min(max),
        None => v,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{GarageType, OverallQual};

    fn select(form: &mut FormState, idx: usize) {
        form.selected = idx;
    }

    #[test]
    fn rooms_cannot_leave_widget_bounds_by_stepping() {
        let mut form = FormState::new();
        select(&mut form, 7);
        assert_eq!(form.features.rooms_above_grade, ROOMS_MIN);

        form.adjust(-1);
        assert_eq!(form.features.rooms_above_grade, ROOMS_MIN);

        for _ in 0..100 {
            form.adjust(1);
        }
        assert_eq!(form.features.rooms_above_grade, ROOMS_MAX);
    }

    #[test]
    fn direct_entry_clamps_to_widget_bounds() {
        let mut form = FormState::new();
        select(&mut form, 7);

        assert!(form.begin_edit());
        for c in "25".chars() {
            form.push_digit(c);
        }
        form.apply_edit().unwrap();
        assert_eq!(form.features.rooms_above_grade, ROOMS_MAX);

        select(&mut form, 8);
        assert!(form.begin_edit());
        for c in "100".chars() {
            form.push_digit(c);
        }
        form.apply_edit().unwrap();
        assert_eq!(form.features.living_area_sf, LIV_AREA_MIN);
    }

    #[test]
    fn direct_entry_rejects_non_numeric_buffers() {
        let mut form = FormState::new();
        select(&mut form, 9);

        assert!(form.begin_edit());
        // Non-digits are filtered at key time.
        form.push_digit('x');
        assert!(form.input.is_empty());

        // An overlong buffer fails u32 parsing and reports, not panics.
        for c in "99999999999999999999".chars() {
            form.push_digit(c);
        }
        assert!(form.apply_edit().is_err());
        assert_eq!(form.features.basement_sf, BSMT_SF_MIN);
    }

    #[test]
    fn empty_edit_leaves_field_unchanged() {
        let mut form = FormState::new();
        select(&mut form, 5);
        form.adjust(1);
        assert_eq!(form.features.second_floor_sf, 25);

        assert!(form.begin_edit());
        form.apply_edit().unwrap();
        assert_eq!(form.features.second_floor_sf, 25);
    }

    #[test]
    fn categorical_fields_cycle_instead_of_editing() {
        let mut form = FormState::new();
        select(&mut form, 1);

        assert!(!form.begin_edit());
        form.adjust(1);
        assert_eq!(form.features.overall_qual, OverallQual::Poor);
        form.adjust(-1);
        assert_eq!(form.features.overall_qual, OverallQual::VeryPoor);
        form.adjust(-1);
        assert_eq!(form.features.overall_qual, OverallQual::VeryExcellent);

        select(&mut form, 4);
        form.adjust(-1);
        assert_eq!(form.features.garage_type, GarageType::Detached);
    }

    #[test]
    fn selection_stays_within_the_field_list() {
        let mut form = FormState::new();
        form.select_prev();
        assert_eq!(form.selected, 0);

        for _ in 0..50 {
            form.select_next();
        }
        assert_eq!(form.selected, FIELDS.len() - 1);
    }

    #[test]
    fn unbounded_fields_only_clamp_below() {
        let mut form = FormState::new();
        select(&mut form, 0);
        form.adjust(-1);
        assert_eq!(form.features.full_bath, 0);

        assert!(form.begin_edit());
        for c in "14".chars() {
            form.push_digit(c);
        }
        form.apply_edit().unwrap();
        assert_eq!(form.features.full_bath, 14);
    }
}
