/// Data layer: core types, loading, filtering and summaries.
///
/// Architecture:
/// ```text
///  bank-additional-full copy.csv  (';'-separated, latin-1)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  decode + parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<Record>, column kinds, age span, job categories
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  FilterState predicate → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary  │  histogram, job counts, correlation matrix
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
