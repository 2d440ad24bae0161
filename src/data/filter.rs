use std::collections::BTreeSet;

use super::model::{Dataset, Record};

// ---------------------------------------------------------------------------
// FilterState – current age range and job selection
// ---------------------------------------------------------------------------

/// User-selected predicate over the dataset.
///
/// Invariants: `age_min <= age_max`, both inside the dataset's age span, and
/// every selected job is one of the dataset's job categories. The mutators
/// keep these true; an empty job selection is allowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    age_min: i64,
    age_max: i64,
    span: (i64, i64),
    selected_jobs: BTreeSet<String>,
    all_jobs: BTreeSet<String>,
}

impl FilterState {
    /// Full age span and every job selected.
    pub fn full(dataset: &Dataset) -> Self {
        let all_jobs: BTreeSet<String> = dataset.job_categories.iter().cloned().collect();
        let (lo, hi) = dataset.age_span;
        FilterState {
            age_min: lo,
            age_max: hi,
            span: dataset.age_span,
            selected_jobs: all_jobs.clone(),
            all_jobs,
        }
    }

    pub fn age_range(&self) -> (i64, i64) {
        (self.age_min, self.age_max)
    }

    pub fn selected_jobs(&self) -> &BTreeSet<String> {
        &self.selected_jobs
    }

    pub fn is_job_selected(&self, job: &str) -> bool {
        self.selected_jobs.contains(job)
    }

    /// True when nothing is filtered out.
    pub fn is_full(&self) -> bool {
        (self.age_min, self.age_max) == self.span && self.selected_jobs == self.all_jobs
    }

    /// Clamp both bounds into the dataset span and apply them.
    ///
    /// An inverted range is rejected and the previous range kept. Returns
    /// whether the state changed.
    pub fn set_age_range(&mut self, lo: i64, hi: i64) -> bool {
        let (span_lo, span_hi) = self.span;
        let lo = lo.clamp(span_lo, span_hi);
        let hi = hi.clamp(span_lo, span_hi);
        if lo > hi || (lo, hi) == (self.age_min, self.age_max) {
            return false;
        }
        self.age_min = lo;
        self.age_max = hi;
        true
    }

    /// Add or remove one job. Unknown jobs are ignored.
    pub fn set_job_selected(&mut self, job: &str, selected: bool) -> bool {
        if !self.all_jobs.contains(job) {
            return false;
        }
        if selected {
            self.selected_jobs.insert(job.to_string())
        } else {
            self.selected_jobs.remove(job)
        }
    }

    pub fn select_all_jobs(&mut self) -> bool {
        if self.selected_jobs == self.all_jobs {
            return false;
        }
        self.selected_jobs = self.all_jobs.clone();
        true
    }

    pub fn clear_jobs(&mut self) -> bool {
        if self.selected_jobs.is_empty() {
            return false;
        }
        self.selected_jobs.clear();
        true
    }

    /// The combined predicate. Rows without a usable age or job never match.
    pub fn matches(&self, record: &Record) -> bool {
        let age_ok = record
            .age()
            .is_some_and(|a| self.age_min <= a && a <= self.age_max);
        age_ok && record.job().is_some_and(|j| self.selected_jobs.contains(j))
    }
}

// ---------------------------------------------------------------------------
// FilteredView – the rows passing the current filter
// ---------------------------------------------------------------------------

/// Indices of matching records, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    pub indices: Vec<usize>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Matching records, in dataset order.
    pub fn records<'a>(&'a self, dataset: &'a Dataset) -> impl Iterator<Item = &'a Record> + 'a {
        self.indices.iter().map(move |&i| &dataset.records[i])
    }

    /// First `n` matching rows as `(dataset index, record)` pairs.
    pub fn head<'a>(&'a self, dataset: &'a Dataset, n: usize) -> Vec<(usize, &'a Record)> {
        self.indices
            .iter()
            .take(n)
            .map(|&i| (i, &dataset.records[i]))
            .collect()
    }
}

/// Return the rows of `dataset` that pass `filters`. Single pass, no side effects.
pub fn apply(dataset: &Dataset, filters: &FilterState) -> FilteredView {
    let indices = dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, r)| filters.matches(r))
        .map(|(i, _)| i)
        .collect();
    FilteredView { indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn dataset(rows: &[(&str, &str)]) -> Dataset {
        Dataset::from_rows(
            vec!["age".into(), "job".into()],
            rows.iter()
                .map(|(a, j)| vec![CellValue::parse(a), CellValue::parse(j)])
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn full_state_spans_dataset() {
        let ds = dataset(&[("25", "admin"), ("60", "retired"), ("40", "admin")]);
        let f = FilterState::full(&ds);
        assert_eq!(f.age_range(), (25, 60));
        assert_eq!(f.selected_jobs().len(), 2);
        assert!(f.is_full());
        assert_eq!(apply(&ds, &f).indices, vec![0, 1, 2]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = dataset(&[("25", "admin"), ("40", "admin"), ("60", "retired")]);
        let mut f = FilterState::full(&ds);
        assert!(f.set_age_range(40, 60));
        assert_eq!(apply(&ds, &f).indices, vec![1, 2]);
    }

    #[test]
    fn out_of_span_bounds_are_clamped() {
        let ds = dataset(&[("25", "admin"), ("60", "retired")]);
        let mut f = FilterState::full(&ds);
        assert!(f.set_age_range(30, 99));
        assert_eq!(f.age_range(), (30, 60));
        assert!(f.set_age_range(-5, 50));
        assert_eq!(f.age_range(), (25, 50));
    }

    #[test]
    fn inverted_range_keeps_last_valid_state() {
        let ds = dataset(&[("25", "admin"), ("60", "retired")]);
        let mut f = FilterState::full(&ds);
        f.set_age_range(30, 50);
        assert!(!f.set_age_range(55, 35));
        assert_eq!(f.age_range(), (30, 50));
    }

    #[test]
    fn unknown_jobs_are_ignored() {
        let ds = dataset(&[("25", "admin")]);
        let mut f = FilterState::full(&ds);
        assert!(!f.set_job_selected("astronaut", true));
        assert!(!f.is_job_selected("astronaut"));
        assert!(f.set_job_selected("admin", false));
        assert!(f.selected_jobs().is_empty());
    }

    #[test]
    fn empty_job_selection_matches_nothing() {
        let ds = dataset(&[("25", "admin"), ("60", "retired")]);
        let mut f = FilterState::full(&ds);
        assert!(f.clear_jobs());
        assert!(apply(&ds, &f).is_empty());
        assert!(f.select_all_jobs());
        assert_eq!(apply(&ds, &f).len(), 2);
    }

    #[test]
    fn rows_with_unusable_age_or_job_are_excluded() {
        let ds = dataset(&[("25", "admin"), ("n/a", "admin"), ("30", ""), ("31.5", "admin")]);
        let f = FilterState::full(&ds);
        assert_eq!(apply(&ds, &f).indices, vec![0]);
    }

    #[test]
    fn head_keeps_dataset_indices() {
        let ds = dataset(&[("25", "admin"), ("40", "retired"), ("50", "retired")]);
        let mut f = FilterState::full(&ds);
        f.set_job_selected("admin", false);
        let view = apply(&ds, &f);
        let head: Vec<usize> = view.head(&ds, 1).into_iter().map(|(i, _)| i).collect();
        assert_eq!(head, vec![1]);
        assert_eq!(view.records(&ds).count(), 2);
    }
}
