use std::collections::HashMap;
use std::path::Path;

use chrono::Datelike;
use csv::{ReaderBuilder, StringRecord, Trim};

use super::error::{IngestError, ParseFailure};
use super::model::{Dataset, Vehicle};
use super::sample;
use crate::notify::Notification;

// ---------------------------------------------------------------------------
// Column layout
// ---------------------------------------------------------------------------

// Column meaning is bound by position, not header text. The header row is
// consumed only to check the column count; its names are ignored.
mod col {
    pub const VIN: usize = 0;
    pub const COUNTY: usize = 1;
    pub const CITY: usize = 2;
    pub const STATE: usize = 3;
    pub const POSTAL_CODE: usize = 4;
    pub const MODEL_YEAR: usize = 5;
    pub const MAKE: usize = 6;
    pub const MODEL: usize = 7;
    pub const VEHICLE_TYPE: usize = 8;
    pub const CAFV_ELIGIBILITY: usize = 9;
    pub const ELECTRIC_RANGE: usize = 10;
    pub const BASE_MSRP: usize = 11;
    pub const LEGISLATIVE_DISTRICT: usize = 12;
    pub const DOL_VEHICLE_ID: usize = 13;
    pub const VEHICLE_LOCATION: usize = 14;
    pub const ELECTRIC_UTILITY: usize = 15;
    pub const CENSUS_TRACT: usize = 16;
}

/// Width of the source layout.
pub const EXPECTED_COLUMNS: usize = 17;

/// Rows narrower than this are dropped as malformed.
const MIN_ROW_FIELDS: usize = 10;

/// Model years must be strictly after this.
const MODEL_YEAR_FLOOR: u16 = 1990;

/// Candidate delimiters, tried in order.
const DELIMITERS: [u8; 4] = [b',', b'\t', b'|', b';'];

/// How many rows the delimiter sniffer examines.
const SNIFF_ROWS: usize = 64;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Outcome of [`load_dataset`].
///
/// There is always a usable dataset. When the source could not be used,
/// `fallback` carries the single user-facing warning and the dataset is the
/// embedded sample.
#[derive(Debug)]
pub struct LoadReport {
    pub dataset: Dataset,
    /// Non-fatal per-row parse irregularities, in row order.
    pub row_warnings: Vec<String>,
    /// Set when the embedded sample dataset was substituted.
    pub fallback: Option<Notification>,
}

/// Load the registration CSV at `path`.
///
/// Never fails: a source that cannot be fetched or structurally parsed is
/// replaced by the embedded sample dataset, with exactly one warning
/// notification for the caller to surface.
pub fn load_dataset(path: &Path) -> LoadReport {
    match fetch_source(path).and_then(|text| load_from_str(&text)) {
        Ok((dataset, row_warnings)) => {
            log::info!(
                "loaded {} vehicle records from {}",
                dataset.len(),
                path.display()
            );
            if !row_warnings.is_empty() {
                log::warn!(
                    "{} rows in {} had parse irregularities",
                    row_warnings.len(),
                    path.display()
                );
            }
            LoadReport {
                dataset,
                row_warnings,
                fallback: None,
            }
        }
        Err(err) => {
            log::warn!("falling back to sample data: {err}");
            let message = format!(
                "Could not load {}, using sample data instead",
                path.display()
            );
            LoadReport {
                dataset: Dataset::from_vehicles(sample::sample_vehicles()),
                row_warnings: Vec::new(),
                fallback: Some(Notification::warning(message)),
            }
        }
    }
}

/// Run the parse/validate pipeline on in-memory CSV text.
///
/// Unlike [`load_dataset`] this propagates structural failures; the
/// sample-data fallback policy lives only at the file entry point.
pub fn load_from_str(text: &str) -> Result<(Dataset, Vec<String>), IngestError> {
    let (rows, warnings) = parse_rows(text)?;
    let vehicles = map_and_validate(&rows, default_max_year());
    Ok((Dataset::from_vehicles(vehicles), warnings))
}

/// Read the CSV resource.
pub fn fetch_source(path: &Path) -> Result<String, IngestError> {
    std::fs::read_to_string(path).map_err(|source| IngestError::SourceUnavailable {
        path: path.display().to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Delimiter detection
// ---------------------------------------------------------------------------

/// Pick the candidate delimiter yielding the most consistent multi-column
/// layout over the first [`SNIFF_ROWS`] rows.
///
/// A candidate is viable only if its modal field count is at least two;
/// ties in consistency go to the earlier candidate.
pub fn detect_delimiter(text: &str) -> Result<u8, ParseFailure> {
    if text.trim().is_empty() {
        return Err(ParseFailure::EmptyInput);
    }

    let mut best: Option<(u8, f64)> = None;
    for &delimiter in &DELIMITERS {
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut widths: HashMap<usize, usize> = HashMap::new();
        let mut rows = 0usize;
        let mut record = StringRecord::new();
        while rows < SNIFF_ROWS {
            match reader.read_record(&mut record) {
                Ok(true) => {
                    *widths.entry(record.len()).or_default() += 1;
                    rows += 1;
                }
                Ok(false) => break,
                // A quoting mishap under this candidate counts against its
                // consistency but is not fatal to the sniff.
                Err(_) => rows += 1,
            }
        }
        if rows == 0 {
            continue;
        }

        let Some((&width, &count)) = widths.iter().max_by_key(|(w, c)| (**c, **w)) else {
            continue;
        };
        if width < 2 {
            continue;
        }

        let consistency = count as f64 / rows as f64;
        if best.map_or(true, |(_, best_score)| consistency > best_score) {
            best = Some((delimiter, consistency));
        }
    }

    best.map(|(delimiter, _)| delimiter)
        .ok_or(ParseFailure::DelimiterUndetectable)
}

// ---------------------------------------------------------------------------
// Row parsing
// ---------------------------------------------------------------------------

/// Split CSV text into trimmed field rows, honoring quoting.
///
/// The header row is discarded here after a column-count check; everything
/// after it is data. Per-row read errors become warnings, never aborts.
pub fn parse_rows(text: &str) -> Result<(Vec<StringRecord>, Vec<String>), IngestError> {
    let delimiter = detect_delimiter(text)?;

    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    let mut warnings = Vec::new();
    let mut record = StringRecord::new();
    let mut row_no = 0usize;
    let mut header_seen = false;
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => {
                row_no += 1;
                if !header_seen {
                    header_seen = true;
                    if record.len() != EXPECTED_COLUMNS {
                        return Err(ParseFailure::HeaderColumnCount {
                            expected: EXPECTED_COLUMNS,
                            found: record.len(),
                        }
                        .into());
                    }
                    continue;
                }
                // Skip blank lines.
                if record.iter().all(str::is_empty) {
                    continue;
                }
                rows.push(record.clone());
            }
            Ok(false) => break,
            Err(err) => {
                row_no += 1;
                warnings.push(format!("row {row_no}: {err}"));
            }
        }
    }

    Ok((rows, warnings))
}

// ---------------------------------------------------------------------------
// Mapping and validation
// ---------------------------------------------------------------------------

/// Latest plausible model year: registrations run ahead of the calendar by
/// up to two model years.
pub fn default_max_year() -> u16 {
    (chrono::Utc::now().year() + 2) as u16
}

/// Map positional fields to [`Vehicle`]s, dropping rows that fail the
/// acceptance rules.
///
/// Dropping is a filtering decision, not an error; rows are not reported
/// individually. Surviving records keep their source order.
pub fn map_and_validate(rows: &[StringRecord], max_year: u16) -> Vec<Vehicle> {
    rows.iter()
        .filter_map(|row| map_row(row, max_year))
        .collect()
}

fn map_row(row: &StringRecord, max_year: u16) -> Option<Vehicle> {
    if row.len() < MIN_ROW_FIELDS {
        return None;
    }

    let text = |idx: usize| row.get(idx).unwrap_or("").to_string();

    let make = text(col::MAKE);
    let model = text(col::MODEL);
    if make.is_empty() || model.is_empty() {
        return None;
    }

    let model_year: u16 = parse_or_zero(row.get(col::MODEL_YEAR));
    if model_year <= MODEL_YEAR_FLOOR || model_year > max_year {
        return None;
    }

    Some(Vehicle {
        vin: text(col::VIN),
        county: text(col::COUNTY),
        city: text(col::CITY),
        state: text(col::STATE),
        postal_code: text(col::POSTAL_CODE),
        model_year,
        make,
        model,
        vehicle_type: text(col::VEHICLE_TYPE),
        cafv_eligibility: text(col::CAFV_ELIGIBILITY),
        electric_range: parse_or_zero(row.get(col::ELECTRIC_RANGE)),
        base_msrp: parse_or_zero(row.get(col::BASE_MSRP)),
        legislative_district: parse_or_zero(row.get(col::LEGISLATIVE_DISTRICT)),
        dol_vehicle_id: text(col::DOL_VEHICLE_ID),
        vehicle_location: text(col::VEHICLE_LOCATION),
        electric_utility: text(col::ELECTRIC_UTILITY),
        census_tract: text(col::CENSUS_TRACT),
    })
}

/// Unsigned integer coercion with 0-fallback: absent, unparseable, or
/// negative input all coerce to 0 rather than rejecting the record.
fn parse_or_zero<T: std::str::FromStr + Default>(field: Option<&str>) -> T {
    field
        .and_then(|s| s.parse::<T>().ok())
        .unwrap_or_default()
}
