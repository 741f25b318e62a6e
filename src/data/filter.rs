use serde::{Deserialize, Serialize};

use super::model::{Dataset, Vehicle};

// ---------------------------------------------------------------------------
// Filter selection: which exact-match constraints are active
// ---------------------------------------------------------------------------

/// The user's current exact-match constraints. `None` means no constraint.
///
/// A selection is created empty, replaced wholesale on apply, and cleared
/// on reset; it is never partially mutated anywhere else.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub make: Option<String>,
    pub vehicle_type: Option<String>,
    pub model_year: Option<u16>,
    pub county: Option<String>,
}

impl FilterSelection {
    /// Build a selection from the raw strings a row of dropdowns produces.
    ///
    /// Empty (or whitespace-only) strings mean "no constraint". The
    /// model-year text is parsed up front so the comparison downstream is
    /// integer equality, never text coercion; non-numeric year text is
    /// treated as no constraint.
    pub fn from_raw(make: &str, vehicle_type: &str, model_year: &str, county: &str) -> Self {
        fn non_empty(s: &str) -> Option<String> {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }

        let model_year = match model_year.trim() {
            "" => None,
            text => match text.parse::<u16>() {
                Ok(year) => Some(year),
                Err(_) => {
                    log::debug!("ignoring non-numeric model-year filter {text:?}");
                    None
                }
            },
        };

        Self {
            make: non_empty(make),
            vehicle_type: non_empty(vehicle_type),
            model_year,
            county: non_empty(county),
        }
    }

    /// True when no predicate is set (the identity selection).
    pub fn is_empty(&self) -> bool {
        self.make.is_none()
            && self.vehicle_type.is_none()
            && self.model_year.is_none()
            && self.county.is_none()
    }

    /// Whether `vehicle` passes every set predicate.
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        self.make.as_deref().map_or(true, |m| vehicle.make == m)
            && self
                .vehicle_type
                .as_deref()
                .map_or(true, |t| vehicle.vehicle_type == t)
            && self.model_year.map_or(true, |y| vehicle.model_year == y)
            && self.county.as_deref().map_or(true, |c| vehicle.county == c)
    }
}

/// Return indices of records passing all active predicates, in dataset
/// order. The empty selection is the identity.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .vehicles()
        .iter()
        .enumerate()
        .filter(|(_, v)| selection.matches(v))
        .map(|(i, _)| i)
        .collect()
}
