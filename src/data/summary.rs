use std::collections::HashMap;

use super::filter::FilteredView;
use super::model::{CellValue, Dataset};

// ---------------------------------------------------------------------------
// Derived summaries – everything the charts need for one refresh
// ---------------------------------------------------------------------------

/// The three chart inputs plus the row count, recomputed every cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedSummaries {
    pub row_count: usize,
    pub histogram: Histogram,
    /// `(job, count)`, highest count first, ties in order of first appearance.
    pub job_counts: Vec<(String, usize)>,
    /// `None` when the dataset has no numeric columns.
    pub correlation: Option<CorrelationMatrix>,
}

/// Compute all summaries for a filtered view.
pub fn summarize(dataset: &Dataset, view: &FilteredView, bins: usize) -> DerivedSummaries {
    let ages: Vec<i64> = view.records(dataset).filter_map(|r| r.age()).collect();
    DerivedSummaries {
        row_count: view.len(),
        histogram: Histogram::from_values(&ages, bins),
        job_counts: job_counts(dataset, view),
        correlation: correlation(dataset, view),
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Histogram {
    pub bins: Vec<HistogramBin>,
}

impl Histogram {
    /// Equal-width bins over the values' own min..max; the last bin is closed.
    ///
    /// When every value is equal the range is widened to `value ± 0.5`.
    /// No values (or zero bins) gives an empty histogram.
    pub fn from_values(values: &[i64], bins: usize) -> Self {
        let (Some(&min), Some(&max)) = (values.iter().min(), values.iter().max()) else {
            return Histogram::default();
        };
        if bins == 0 {
            return Histogram::default();
        }

        let (lo, hi) = if min == max {
            (min as f64 - 0.5, max as f64 + 0.5)
        } else {
            (min as f64, max as f64)
        };
        let width = (hi - lo) / bins as f64;

        let mut counts = vec![0usize; bins];
        for &v in values {
            let slot = ((v as f64 - lo) / width).floor() as usize;
            counts[slot.min(bins - 1)] += 1;
        }

        let bins = counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                start: lo + i as f64 * width,
                end: lo + (i + 1) as f64 * width,
                count,
            })
            .collect();
        Histogram { bins }
    }

    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Job counts
// ---------------------------------------------------------------------------

/// Rows per job in the view, highest count first, ties by first appearance.
pub fn job_counts(dataset: &Dataset, view: &FilteredView) -> Vec<(String, usize)> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for job in view.records(dataset).filter_map(|r| r.job()) {
        match slots.get(job) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(job, counts.len());
                counts.push((job.to_string(), 1));
            }
        }
    }

    // stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pairwise Pearson correlation of the numeric columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// Row-major, `columns.len()` × `columns.len()`.
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn size(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row][col]
    }
}

/// Correlation over the numeric columns of the view; `None` without any.
///
/// Nulls are skipped per pair of columns. A pair with fewer than two
/// complete observations or zero variance yields NaN.
pub fn correlation(dataset: &Dataset, view: &FilteredView) -> Option<CorrelationMatrix> {
    let numeric = dataset.numeric_columns();
    if numeric.is_empty() {
        return None;
    }

    let series: Vec<Vec<Option<f64>>> = numeric
        .iter()
        .map(|&c| {
            view.records(dataset)
                .map(|r| {
                    r.cells
                        .get(c)
                        .and_then(CellValue::as_f64)
                        .filter(|v| v.is_finite())
                })
                .collect()
        })
        .collect();

    let n = numeric.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&series[i], &series[j]);
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Some(CorrelationMatrix {
        columns: numeric.iter().map(|&c| dataset.columns[c].clone()).collect(),
        values,
    })
}

fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let divisor = (sxx * syy).sqrt();
    if divisor == 0.0 {
        return f64::NAN;
    }
    (sxy / divisor).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterState};

    fn dataset(header: &[&str], rows: &[&[&str]]) -> Dataset {
        Dataset::from_rows(
            header.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|c| CellValue::parse(c)).collect())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn histogram_spans_filtered_values() {
        let h = Histogram::from_values(&[20, 30, 40], 20);
        assert_eq!(h.bins.len(), 20);
        assert_eq!(h.bins[0].start, 20.0);
        assert_eq!(h.bins[19].end, 40.0);
        assert_eq!(h.bins[0].count, 1);
        assert_eq!(h.bins[10].count, 1);
        // maximum lands in the closed last bin
        assert_eq!(h.bins[19].count, 1);
        assert_eq!(h.total(), 3);
    }

    #[test]
    fn histogram_of_identical_values_is_widened() {
        let h = Histogram::from_values(&[33, 33], 4);
        assert_eq!(h.bins[0].start, 32.5);
        assert_eq!(h.bins[3].end, 33.5);
        assert_eq!(h.total(), 2);
    }

    #[test]
    fn histogram_of_nothing_is_empty() {
        assert!(Histogram::from_values(&[], 20).is_empty());
    }

    #[test]
    fn job_counts_descend_with_first_seen_ties() {
        let ds = dataset(
            &["age", "job"],
            &[
                &["30", "services"],
                &["31", "admin."],
                &["32", "admin."],
                &["33", "retired"],
                &["34", "services"],
                &["35", "technician"],
            ],
        );
        let view = apply(&ds, &FilterState::full(&ds));
        let counts = job_counts(&ds, &view);
        assert_eq!(
            counts,
            vec![
                ("services".to_string(), 2),
                ("admin.".to_string(), 2),
                ("retired".to_string(), 1),
                ("technician".to_string(), 1),
            ]
        );
        assert_eq!(counts.iter().map(|c| c.1).sum::<usize>(), view.len());
    }

    #[test]
    fn correlation_is_symmetric_with_unit_diagonal() {
        let ds = dataset(
            &["age", "job", "balance", "calls"],
            &[
                &["20", "a", "100", "9"],
                &["30", "a", "210", "7"],
                &["40", "b", "290", "4"],
                &["50", "b", "405", "1"],
            ],
        );
        let view = apply(&ds, &FilterState::full(&ds));
        let m = correlation(&ds, &view).unwrap();

        assert_eq!(m.columns, vec!["age", "balance", "calls"]);
        for i in 0..m.size() {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..m.size() {
                assert_eq!(m.get(i, j), m.get(j, i));
                assert!((-1.0..=1.0).contains(&m.get(i, j)));
            }
        }
        assert!(m.get(0, 1) > 0.99);
        assert!(m.get(0, 2) < -0.98);
    }

    #[test]
    fn zero_variance_yields_nan() {
        let ds = dataset(
            &["age", "job", "constant"],
            &[&["20", "a", "5"], &["30", "a", "5"], &["40", "a", "5"]],
        );
        let view = apply(&ds, &FilterState::full(&ds));
        let m = correlation(&ds, &view).unwrap();
        assert_eq!(m.get(0, 0), 1.0);
        assert!(m.get(1, 1).is_nan());
        assert!(m.get(0, 1).is_nan());
    }

    #[test]
    fn nulls_are_skipped_per_pair() {
        let ds = dataset(
            &["age", "job", "score"],
            &[
                &["20", "a", "1"],
                &["30", "a", ""],
                &["40", "a", "3"],
                &["50", "a", "4"],
            ],
        );
        let view = apply(&ds, &FilterState::full(&ds));
        let m = correlation(&ds, &view).unwrap();
        assert!(m.get(0, 1) > 0.9);
    }

    #[test]
    fn missing_markers_keep_a_column_numeric() {
        let ds = dataset(
            &["age", "job", "score"],
            &[
                &["20", "a", "1"],
                &["30", "a", "n/a"],
                &["40", "a", "#N/A"],
                &["50", "a", "4"],
            ],
        );
        let view = apply(&ds, &FilterState::full(&ds));
        let m = correlation(&ds, &view).unwrap();
        assert_eq!(m.columns, vec!["age", "score"]);
        assert_eq!(m.get(0, 1), 1.0);
    }

    #[test]
    fn correlation_skipped_without_numeric_columns() {
        let ds = dataset(&["age", "job"], &[&["20", "a"], &["x", "b"]]);
        let view = apply(&ds, &FilterState::full(&ds));
        assert!(correlation(&ds, &view).is_none());
    }

    #[test]
    fn empty_view_summarizes_to_empty_state() {
        let ds = dataset(&["age", "job", "calls"], &[&["20", "a", "1"], &["30", "b", "2"]]);
        let mut filters = FilterState::full(&ds);
        filters.clear_jobs();
        let view = apply(&ds, &filters);
        let s = summarize(&ds, &view, 20);

        assert_eq!(s.row_count, 0);
        assert!(s.histogram.is_empty());
        assert!(s.job_counts.is_empty());
        let m = s.correlation.unwrap();
        assert!(m.values.iter().flatten().all(|v| v.is_nan()));
    }
}
