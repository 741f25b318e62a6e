use std::collections::BTreeSet;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Vehicle – one registration record
// ---------------------------------------------------------------------------

/// A single electric-vehicle registration (one validated CSV row).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Vehicle {
    /// Truncated VIN; an identifier but not required to be unique.
    pub vin: String,
    pub county: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub model_year: u16,
    /// Non-empty once a record is accepted.
    pub make: String,
    /// Non-empty once a record is accepted.
    pub model: String,
    /// Full categorical label, e.g. "Battery Electric Vehicle (BEV)".
    pub vehicle_type: String,
    pub cafv_eligibility: String,
    /// EPA range in miles; 0 means unknown.
    pub electric_range: u32,
    pub base_msrp: u32,
    pub legislative_district: u16,
    pub dol_vehicle_id: String,
    /// Point geometry kept as text, e.g. "POINT (-122.3 47.6)".
    pub vehicle_location: String,
    /// Possibly a `||`-delimited multi-value list.
    pub electric_utility: String,
    pub census_tract: String,
}

/// Battery-electric vs plug-in hybrid, derived from the type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Drivetrain {
    Bev,
    Phev,
}

impl Drivetrain {
    pub fn label(self) -> &'static str {
        match self {
            Drivetrain::Bev => "BEV",
            Drivetrain::Phev => "PHEV",
        }
    }
}

/// Clean Alternative Fuel Vehicle eligibility, derived from the label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CafvStatus {
    Eligible,
    NotEligible,
}

impl CafvStatus {
    pub fn label(self) -> &'static str {
        match self {
            CafvStatus::Eligible => "Eligible",
            CafvStatus::NotEligible => "Not Eligible",
        }
    }
}

impl Vehicle {
    /// Substring derivation: any type label mentioning "BEV" is
    /// battery-electric, everything else is a plug-in hybrid.
    pub fn drivetrain(&self) -> Drivetrain {
        if self.vehicle_type.contains("BEV") {
            Drivetrain::Bev
        } else {
            Drivetrain::Phev
        }
    }

    /// Substring derivation on the eligibility label. Labels like
    /// "Eligibility unknown …" do not contain the marker and so count as
    /// not eligible.
    pub fn cafv_status(&self) -> CafvStatus {
        if self.cafv_eligibility.contains("Eligible") {
            CafvStatus::Eligible
        } else {
            CafvStatus::NotEligible
        }
    }

    /// Individual utilities from the `||`-delimited field.
    pub fn utilities(&self) -> impl Iterator<Item = &str> {
        self.electric_utility
            .split("||")
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

// ---------------------------------------------------------------------------
// Dataset – the canonical, immutable record sequence
// ---------------------------------------------------------------------------

/// Distinct values per filterable field, for populating selection controls.
///
/// Derived from the canonical dataset only, never from a filtered view, so
/// the options stay stable while the user narrows results.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterOptions {
    /// Lexicographic ascending.
    pub makes: Vec<String>,
    /// Lexicographic ascending.
    pub vehicle_types: Vec<String>,
    /// Numeric descending – most recent year first.
    pub model_years: Vec<u16>,
    /// Lexicographic ascending.
    pub counties: Vec<String>,
}

/// The canonical dataset: every validated record in source order, plus the
/// precomputed filter options.
///
/// Immutable once built; the filter engine and any rendering layer only
/// ever read it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    vehicles: Vec<Vehicle>,
    options: FilterOptions,
}

impl Dataset {
    /// Build the dataset and its filter-option index in one pass.
    pub fn from_vehicles(vehicles: Vec<Vehicle>) -> Self {
        let mut makes = BTreeSet::new();
        let mut vehicle_types = BTreeSet::new();
        let mut years = BTreeSet::new();
        let mut counties = BTreeSet::new();

        for v in &vehicles {
            makes.insert(v.make.clone());
            vehicle_types.insert(v.vehicle_type.clone());
            years.insert(v.model_year);
            counties.insert(v.county.clone());
        }

        let mut model_years: Vec<u16> = years.into_iter().collect();
        model_years.reverse();

        Dataset {
            vehicles,
            options: FilterOptions {
                makes: makes.into_iter().collect(),
                vehicle_types: vehicle_types.into_iter().collect(),
                model_years,
                counties: counties.into_iter().collect(),
            },
        }
    }

    /// All records, in source order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn get(&self, index: usize) -> Option<&Vehicle> {
        self.vehicles.get(index)
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }
}
