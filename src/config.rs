use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Fixed configuration
// ---------------------------------------------------------------------------

/// Default location of the bank-marketing export, relative to the working directory.
pub const DATA_PATH: &str = "bank-additional-full copy.csv";

/// Field separator used by the export.
pub const DELIMITER: u8 = b';';

/// Number of equal-width bins in the age histogram.
pub const HISTOGRAM_BINS: usize = 20;

/// Number of filtered rows shown in the preview table.
pub const PREVIEW_ROWS: usize = 10;

pub const TITLE: &str = "Interactive Bank Dashboard";

/// Text encoding of the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Strict UTF-8; invalid byte sequences are a load error.
    Utf8,
    /// ISO-8859-1: every byte maps to the code point of the same value. Never fails.
    Latin1,
}

/// Everything the dashboard needs to know before it starts.
///
/// The values are compile-time constants; the struct only exists so the
/// loader and the sample generator can be pointed at other files in tests.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub delimiter: u8,
    pub encoding: TextEncoding,
    pub histogram_bins: usize,
    pub preview_rows: usize,
    pub title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DATA_PATH),
            delimiter: DELIMITER,
            encoding: TextEncoding::Latin1,
            histogram_bins: HISTOGRAM_BINS,
            preview_rows: PREVIEW_ROWS,
            title: TITLE.to_string(),
        }
    }
}

impl DashboardConfig {
    /// Same settings, different input file.
    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }
}
