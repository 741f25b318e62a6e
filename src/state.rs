use std::path::Path;

use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::loader;
use crate::data::model::{Dataset, FilterOptions, Vehicle};
use crate::notify::Notification;

// ---------------------------------------------------------------------------
// Session – owns the dataset, the selection, and the filtered view
// ---------------------------------------------------------------------------

/// One dashboard session: the canonical dataset, the current filter
/// selection, and the filtered view derived from them.
///
/// The dataset is fixed for the session's lifetime; the selection is only
/// ever replaced wholesale (apply) or cleared (reset), and the view is
/// rebuilt in full on each change. Consumers read, never write.
pub struct Session {
    dataset: Dataset,
    selection: FilterSelection,
    visible: Vec<usize>,
    /// The degraded-mode warning, if sample data was substituted at load.
    load_notice: Option<Notification>,
    /// Non-fatal per-row parse irregularities from the load.
    row_warnings: Vec<String>,
}

impl Session {
    /// Load the registration CSV at `path` and start with the identity
    /// selection. Always produces a working session; when the source is
    /// unavailable or unparseable the embedded sample dataset stands in
    /// and [`Session::load_notice`] carries the one user-facing warning.
    pub fn load(path: &Path) -> Self {
        let report = loader::load_dataset(path);
        let mut session = Session::from_dataset(report.dataset);
        session.load_notice = report.fallback;
        session.row_warnings = report.row_warnings;
        session
    }

    /// Start a session over an already-built dataset.
    pub fn from_dataset(dataset: Dataset) -> Self {
        let visible = (0..dataset.len()).collect();
        Session {
            dataset,
            selection: FilterSelection::default(),
            visible,
            load_notice: None,
            row_warnings: Vec::new(),
        }
    }

    /// Replace the selection wholesale and rebuild the filtered view.
    pub fn apply_filters(&mut self, selection: FilterSelection) -> Notification {
        self.selection = selection;
        self.refilter();
        log::debug!(
            "filters applied, {} of {} records visible",
            self.visible.len(),
            self.dataset.len()
        );
        Notification::success("Filters applied successfully!")
    }

    /// Clear every predicate and restore full visibility.
    pub fn reset_filters(&mut self) -> Notification {
        self.selection = FilterSelection::default();
        self.refilter();
        Notification::info("Filters reset successfully!")
    }

    fn refilter(&mut self) {
        self.visible = filtered_indices(&self.dataset, &self.selection);
    }

    // ---- Read-only accessors -------------------------------------------

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &FilterOptions {
        self.dataset.options()
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Indices of the filtered view, in dataset order.
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// The filtered view itself, in dataset order.
    pub fn filtered(&self) -> impl Iterator<Item = &Vehicle> {
        self.visible.iter().filter_map(|&i| self.dataset.get(i))
    }

    pub fn load_notice(&self) -> Option<&Notification> {
        self.load_notice.as_ref()
    }

    pub fn row_warnings(&self) -> &[String] {
        &self.row_warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;
    use crate::data::sample::sample_vehicles;
    use crate::notify::Severity;

    fn session() -> Session {
        Session::from_dataset(Dataset::from_vehicles(sample_vehicles()))
    }

    #[test]
    fn fresh_session_shows_everything() {
        let session = session();
        assert!(session.selection().is_empty());
        assert_eq!(session.visible_indices(), &[0, 1, 2]);
        assert!(session.load_notice().is_none());
    }

    #[test]
    fn filter_by_make_then_reset() {
        let mut session = session();

        let notice = session.apply_filters(FilterSelection::from_raw("TESLA", "", "", ""));
        assert_eq!(notice.severity, Severity::Success);

        let visible: Vec<&Vehicle> = session.filtered().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].model, "MODEL Y");
        assert_eq!(visible[0].electric_range, 326);

        let notice = session.reset_filters();
        assert_eq!(notice.severity, Severity::Info);
        assert_eq!(session.filtered().count(), 3);
        assert!(session.selection().is_empty());
    }

    #[test]
    fn filter_by_model_year_selects_the_leaf() {
        let mut session = session();
        session.apply_filters(FilterSelection::from_raw("", "", "2020", ""));

        let visible: Vec<&Vehicle> = session.filtered().collect();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].make, "NISSAN");
        assert_eq!(visible[0].model, "LEAF");
    }

    #[test]
    fn reapplying_the_same_selection_is_stable() {
        let mut session = session();
        let selection = FilterSelection::from_raw("", "", "", "King");

        session.apply_filters(selection.clone());
        let first = session.visible_indices().to_vec();

        session.apply_filters(selection);
        assert_eq!(session.visible_indices(), first.as_slice());
    }

    #[test]
    fn options_stay_stable_while_filtering() {
        let mut session = session();
        let before = session.options().clone();

        session.apply_filters(FilterSelection::from_raw("TESLA", "", "", ""));
        assert_eq!(session.options(), &before);
    }

    #[test]
    fn missing_source_yields_sample_session_with_warning() {
        let session = Session::load(Path::new("does-not-exist/registrations.csv"));

        assert_eq!(session.dataset().len(), 3);
        assert_eq!(session.filtered().count(), 3);

        let notice = session.load_notice().expect("load warning");
        assert_eq!(notice.severity, Severity::Warning);
        assert!(notice.message.contains("registrations.csv"));
    }
}
