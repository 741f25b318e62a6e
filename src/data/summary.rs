//! Aggregations consumed by the dashboard's metric tiles, charts, and
//! table.
//!
//! Everything here is a pure computation over an ordered sequence of
//! records; callers pass either the canonical dataset or the current
//! filtered view. How the numbers get drawn is someone else's problem.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use super::model::{CafvStatus, Drivetrain, Vehicle};

// ---------------------------------------------------------------------------
// Headline metrics
// ---------------------------------------------------------------------------

/// Numbers for the metric tiles at the top of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total_vehicles: usize,
    /// Mean electric range, rounded to the nearest mile. Unknown (zero)
    /// ranges count toward the mean; an empty view yields 0.
    pub avg_electric_range: u32,
    /// Most frequent make; ties go to the make seen first. `None` on an
    /// empty view.
    pub top_make: Option<String>,
    /// Battery-electric share of the view, as a whole percentage.
    pub bev_share_percent: u8,
}

impl DashboardMetrics {
    pub fn compute<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Vehicle>,
    {
        let mut total = 0usize;
        let mut range_sum = 0u64;
        let mut bev = 0usize;
        let mut make_tally = Tally::new();

        for v in records {
            total += 1;
            range_sum += u64::from(v.electric_range);
            if v.drivetrain() == Drivetrain::Bev {
                bev += 1;
            }
            make_tally.bump(&v.make);
        }

        let avg_electric_range = if total == 0 {
            0
        } else {
            (range_sum as f64 / total as f64).round() as u32
        };
        let bev_share_percent = if total == 0 {
            0
        } else {
            ((bev as f64 / total as f64) * 100.0).round() as u8
        };

        DashboardMetrics {
            total_vehicles: total,
            avg_electric_range,
            top_make: make_tally.top(),
            bev_share_percent,
        }
    }
}

// ---------------------------------------------------------------------------
// Per-field counts
// ---------------------------------------------------------------------------

/// Registrations per model year, ascending by year.
pub fn count_by_year<'a, I>(records: I) -> Vec<(u16, usize)>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut counts: BTreeMap<u16, usize> = BTreeMap::new();
    for v in records {
        *counts.entry(v.model_year).or_default() += 1;
    }
    counts.into_iter().collect()
}

/// The `n` most frequent makes, descending by count; ties keep first-seen
/// order.
pub fn top_makes<'a, I>(records: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut tally = Tally::new();
    for v in records {
        tally.bump(&v.make);
    }
    tally.descending(n)
}

/// The `n` counties with the most registrations, descending by count.
pub fn top_counties<'a, I>(records: I, n: usize) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut tally = Tally::new();
    for v in records {
        tally.bump(&v.county);
    }
    tally.descending(n)
}

/// BEV vs PHEV counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DrivetrainSplit {
    pub bev: usize,
    pub phev: usize,
}

pub fn drivetrain_split<'a, I>(records: I) -> DrivetrainSplit
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut split = DrivetrainSplit::default();
    for v in records {
        match v.drivetrain() {
            Drivetrain::Bev => split.bev += 1,
            Drivetrain::Phev => split.phev += 1,
        }
    }
    split
}

/// CAFV eligible vs not.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CafvSplit {
    pub eligible: usize,
    pub not_eligible: usize,
}

pub fn cafv_split<'a, I>(records: I) -> CafvSplit
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut split = CafvSplit::default();
    for v in records {
        match v.cafv_status() {
            CafvStatus::Eligible => split.eligible += 1,
            CafvStatus::NotEligible => split.not_eligible += 1,
        }
    }
    split
}

// ---------------------------------------------------------------------------
// Range histogram
// ---------------------------------------------------------------------------

/// Bucket labels for the range histogram, in display order.
pub const RANGE_BUCKET_LABELS: [&str; 6] =
    ["0-50", "51-100", "101-150", "151-200", "201-250", "250+"];

/// Count records per range bucket. Records with range 0 (unknown) are
/// excluded entirely.
pub fn range_histogram<'a, I>(records: I) -> Vec<(&'static str, usize)>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    let mut counts = [0usize; 6];
    for v in records {
        let slot = match v.electric_range {
            0 => continue,
            1..=50 => 0,
            51..=100 => 1,
            101..=150 => 2,
            151..=200 => 3,
            201..=250 => 4,
            _ => 5,
        };
        counts[slot] += 1;
    }
    RANGE_BUCKET_LABELS.into_iter().zip(counts).collect()
}

// ---------------------------------------------------------------------------
// Table projection
// ---------------------------------------------------------------------------

/// One row of the dashboard's data table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub make: String,
    pub model: String,
    pub model_year: u16,
    pub drivetrain: &'static str,
    pub electric_range: u32,
    pub county: String,
    pub city: String,
}

/// Project the first `limit` records into display rows.
pub fn table_rows<'a, I>(records: I, limit: usize) -> Vec<TableRow>
where
    I: IntoIterator<Item = &'a Vehicle>,
{
    records
        .into_iter()
        .take(limit)
        .map(|v| TableRow {
            make: v.make.clone(),
            model: v.model.clone(),
            model_year: v.model_year,
            drivetrain: v.drivetrain().label(),
            electric_range: v.electric_range,
            county: v.county.clone(),
            city: v.city.clone(),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Counting helper
// ---------------------------------------------------------------------------

/// Occurrence counter that remembers first-seen key order, so ties resolve
/// the same way every run.
struct Tally {
    order: Vec<String>,
    counts: HashMap<String, usize>,
}

impl Tally {
    fn new() -> Self {
        Tally {
            order: Vec::new(),
            counts: HashMap::new(),
        }
    }

    fn bump(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.order.push(key.to_string());
                self.counts.insert(key.to_string(), 1);
            }
        }
    }

    /// The single most frequent key, first-seen winning ties.
    fn top(&self) -> Option<String> {
        let mut best: Option<(&String, usize)> = None;
        for key in &self.order {
            let count = self.counts[key.as_str()];
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((key, count));
            }
        }
        best.map(|(key, _)| key.clone())
    }

    /// All keys descending by count, truncated to `n`; a stable sort keeps
    /// first-seen order among equal counts.
    fn descending(self, n: usize) -> Vec<(String, usize)> {
        let mut entries: Vec<(String, usize)> = self
            .order
            .into_iter()
            .map(|key| {
                let count = self.counts[key.as_str()];
                (key, count)
            })
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries.truncate(n);
        entries
    }
}
