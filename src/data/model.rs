use std::collections::BTreeSet;
use std::fmt;

use super::loader::LoadError;

/// Column holding the customer's age; drives the range slider.
pub const AGE_COLUMN: &str = "age";
/// Column holding the job category; drives the multiselect.
pub const JOB_COLUMN: &str = "job";

/// Tokens read as a missing value: the default `na_values` of pandas' CSV reader.
const NULL_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Integer(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Integer(i) => write!(f, "{i}"),
            // keep the decimal point on whole numbers: 1.0, not 1
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    /// Infer the type of a raw text field.
    pub fn parse(s: &str) -> CellValue {
        if NULL_TOKENS.contains(&s) {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        match s {
            "true" | "True" | "TRUE" => CellValue::Bool(true),
            "false" | "False" | "FALSE" => CellValue::Bool(false),
            _ => CellValue::Text(s.to_string()),
        }
    }

    /// Numeric view of the cell; `None` for non-numeric and null cells.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Whole-number view of the cell. Floats qualify only without a fractional part.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            CellValue::Integer(i) => Some(*i),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => Some(*v as i64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// ColumnKind – inferred dtype of a whole column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    /// Whether the column takes part in the correlation summary.
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Narrowest kind that holds every non-null cell. An all-null column is `Float`.
    fn infer<'a>(cells: impl Iterator<Item = &'a CellValue>) -> ColumnKind {
        let mut kind: Option<ColumnKind> = None;
        for cell in cells {
            let cell_kind = match cell {
                CellValue::Null => continue,
                CellValue::Integer(_) => ColumnKind::Integer,
                CellValue::Float(_) => ColumnKind::Float,
                CellValue::Bool(_) => ColumnKind::Bool,
                CellValue::Text(_) => return ColumnKind::Text,
            };
            kind = Some(match (kind, cell_kind) {
                (None, k) => k,
                (Some(a), b) if a == b => a,
                (Some(ColumnKind::Integer), ColumnKind::Float)
                | (Some(ColumnKind::Float), ColumnKind::Integer) => ColumnKind::Float,
                _ => return ColumnKind::Text,
            });
        }
        kind.unwrap_or(ColumnKind::Float)
    }
}

// ---------------------------------------------------------------------------
// Record – one row of the source table
// ---------------------------------------------------------------------------

/// A single customer record. Immutable once the dataset is built.
#[derive(Debug, Clone)]
pub struct Record {
    /// Cells in column order.
    pub cells: Vec<CellValue>,
    age: Option<i64>,
    job: Option<String>,
}

impl Record {
    /// The record's age, if its `age` cell holds a whole number.
    pub fn age(&self) -> Option<i64> {
        self.age
    }

    /// The record's job category, if its `job` cell is not null.
    pub fn job(&self) -> Option<&str> {
        self.job.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed filter domains.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Trimmed column names, in file order.
    pub columns: Vec<String>,
    /// Inferred kind per column, parallel to `columns`.
    pub kinds: Vec<ColumnKind>,
    /// All records, in file order.
    pub records: Vec<Record>,
    /// Smallest and largest valid age.
    pub age_span: (i64, i64),
    /// Distinct job categories in order of first appearance.
    pub job_categories: Vec<String>,
}

impl Dataset {
    /// Build a dataset from header names and typed rows.
    ///
    /// Column names are trimmed here; a collision after trimming, a missing
    /// `age`/`job` column or the absence of any valid age is a [`LoadError`].
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, LoadError> {
        let columns: Vec<String> = columns.iter().map(|c| c.trim().to_string()).collect();

        let mut seen = BTreeSet::new();
        for name in &columns {
            if !seen.insert(name.as_str()) {
                return Err(LoadError::DuplicateColumn(name.clone()));
            }
        }

        let age_idx = column_position(&columns, AGE_COLUMN)?;
        let job_idx = column_position(&columns, JOB_COLUMN)?;

        let kinds = (0..columns.len())
            .map(|c| ColumnKind::infer(rows.iter().filter_map(|r| r.get(c))))
            .collect();

        let mut span: Option<(i64, i64)> = None;
        let mut job_categories = Vec::new();
        let mut seen_jobs = BTreeSet::new();

        let records: Vec<Record> = rows
            .into_iter()
            .map(|cells| {
                let age = cells.get(age_idx).and_then(CellValue::as_i64);
                let job = cells
                    .get(job_idx)
                    .filter(|c| !c.is_null())
                    .map(|c| c.to_string());

                if let Some(a) = age {
                    span = Some(match span {
                        Some((lo, hi)) => (lo.min(a), hi.max(a)),
                        None => (a, a),
                    });
                }
                if let Some(j) = &job {
                    if seen_jobs.insert(j.clone()) {
                        job_categories.push(j.clone());
                    }
                }
                Record { cells, age, job }
            })
            .collect();

        let age_span = span.ok_or(LoadError::NoAgeValues)?;

        Ok(Dataset {
            columns,
            kinds,
            records,
            age_span,
            job_categories,
        })
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Indices of the `Integer`/`Float` columns, in column order.
    pub fn numeric_columns(&self) -> Vec<usize> {
        self.kinds
            .iter()
            .enumerate()
            .filter(|(_, k)| k.is_numeric())
            .map(|(i, _)| i)
            .collect()
    }

    /// Records lacking a usable age or job; these never pass a filter.
    pub fn unusable_rows(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.age.is_none() || r.job.is_none())
            .count()
    }
}

fn column_position(columns: &[String], name: &str) -> Result<usize, LoadError> {
    columns
        .iter()
        .position(|c| c == name)
        .ok_or_else(|| LoadError::MissingColumn(name.to_string()))
}
