use crate::config::DashboardConfig;
use crate::data::filter::{apply, FilterState, FilteredView};
use crate::data::model::Dataset;
use crate::data::summary::{summarize, DerivedSummaries};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// Created once at startup from a loaded [`Dataset`] and never reset. Every
/// mutator that changes the [`FilterState`] runs a complete refresh cycle
/// before returning, so `view` and `summaries` always describe `filters`.
pub struct AppState {
    pub config: DashboardConfig,

    /// Loaded dataset; immutable for the life of the session.
    pub dataset: Dataset,

    /// Current age range and job selection.
    pub filters: FilterState,

    /// Rows passing `filters`.
    pub view: FilteredView,

    /// Chart inputs derived from `view`.
    pub summaries: DerivedSummaries,

    /// Number of refresh cycles run so far.
    pub cycles: u64,
}

impl AppState {
    /// Ingest the dataset, start from the unfiltered state and run the first cycle.
    pub fn new(config: DashboardConfig, dataset: Dataset) -> Self {
        let filters = FilterState::full(&dataset);
        let view = apply(&dataset, &filters);
        let summaries = summarize(&dataset, &view, config.histogram_bins);
        Self {
            config,
            dataset,
            filters,
            view,
            summaries,
            cycles: 1,
        }
    }

    /// Recompute the filtered view and all summaries.
    pub fn refresh(&mut self) {
        self.view = apply(&self.dataset, &self.filters);
        self.summaries = summarize(&self.dataset, &self.view, self.config.histogram_bins);
        self.cycles += 1;
        log::debug!(
            "refresh #{}: ages {:?}, {} of {} jobs selected, {} rows",
            self.cycles,
            self.filters.age_range(),
            self.filters.selected_jobs().len(),
            self.dataset.job_categories.len(),
            self.view.len()
        );
    }

    pub fn set_age_range(&mut self, lo: i64, hi: i64) {
        if self.filters.set_age_range(lo, hi) {
            self.refresh();
        }
    }

    /// Toggle a single job in the selection.
    pub fn set_job_selected(&mut self, job: &str, selected: bool) {
        if self.filters.set_job_selected(job, selected) {
            self.refresh();
        }
    }

    /// Select all job categories.
    pub fn select_all_jobs(&mut self) {
        if self.filters.select_all_jobs() {
            self.refresh();
        }
    }

    /// Deselect all job categories.
    pub fn clear_jobs(&mut self) {
        if self.filters.clear_jobs() {
            self.refresh();
        }
    }
}
