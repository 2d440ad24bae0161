use std::borrow::Cow;
use std::fs::File;
use std::path::{Path, PathBuf};

use csv::ByteRecord;
use thiserror::Error;

use super::model::{CellValue, Dataset};
use crate::config::{DashboardConfig, TextEncoding};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a dataset could not be loaded. All variants are fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed input: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}, column {column}: invalid UTF-8")]
    Encoding { line: u64, column: usize },
    #[error("column name '{0}' appears more than once after trimming")]
    DuplicateColumn(String),
    #[error("required column '{0}' is missing")]
    MissingColumn(String),
    #[error("no row has a whole-number age")]
    NoAgeValues,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the dataset named by the configuration.
pub fn load_dataset(config: &DashboardConfig) -> Result<Dataset, LoadError> {
    load(&config.data_path, config.delimiter, config.encoding)
}

/// Read a delimited file with a header row into a [`Dataset`].
///
/// Every record must have as many fields as the header. Fields are decoded
/// with `encoding`, typed with [`CellValue::parse`], and column names are
/// trimmed before the dataset is built.
pub fn load(path: &Path, delimiter: u8, encoding: TextEncoding) -> Result<Dataset, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(false)
        .from_reader(file);

    let header = reader.byte_headers()?.clone();
    let columns = decode_record(&header, 1, encoding)?
        .into_iter()
        .map(Cow::into_owned)
        .collect();

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    while reader.read_byte_record(&mut record)? {
        let line = record.position().map_or(0, |p| p.line());
        let fields = decode_record(&record, line, encoding)?;
        rows.push(fields.iter().map(|f| CellValue::parse(f)).collect());
    }

    Dataset::from_rows(columns, rows)
}

// ---------------------------------------------------------------------------
// Decoding helpers
// ---------------------------------------------------------------------------

fn decode_record(
    record: &ByteRecord,
    line: u64,
    encoding: TextEncoding,
) -> Result<Vec<Cow<'_, str>>, LoadError> {
    record
        .iter()
        .enumerate()
        .map(|(column, field)| {
            decode_field(field, encoding).ok_or(LoadError::Encoding { line, column })
        })
        .collect()
}

fn decode_field(field: &[u8], encoding: TextEncoding) -> Option<Cow<'_, str>> {
    match encoding {
        TextEncoding::Utf8 => std::str::from_utf8(field).ok().map(Cow::Borrowed),
        TextEncoding::Latin1 => Some(encoding_rs::mem::decode_latin1(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ColumnKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_bytes(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn loads_semicolon_file_with_quoted_fields() {
        let file = write_bytes(
            b"\"age\";\"job\";\"duration\";\"y\"\n\
              56;\"housemaid\";261;\"no\"\n\
              37;\"services\";226;\"yes\"\n",
        );
        let ds = load(file.path(), b';', TextEncoding::Latin1).unwrap();

        assert_eq!(ds.columns, vec!["age", "job", "duration", "y"]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].job(), Some("housemaid"));
        assert_eq!(ds.records[1].age(), Some(37));
        assert_eq!(ds.kinds[2], ColumnKind::Integer);
        assert_eq!(ds.kinds[3], ColumnKind::Text);
    }

    #[test]
    fn latin1_bytes_are_decoded() {
        let file = write_bytes(b"age;job\n30;t\xe9cnico\n");
        let ds = load(file.path(), b';', TextEncoding::Latin1).unwrap();
        assert_eq!(ds.job_categories, vec!["t\u{e9}cnico"]);
    }

    #[test]
    fn latin1_maps_c1_bytes_to_matching_code_points() {
        let file = write_bytes(b"age;job\n30;a\x80b\n31;x\x9fy\n");
        let ds = load(file.path(), b';', TextEncoding::Latin1).unwrap();
        assert_eq!(ds.job_categories, vec!["a\u{80}b", "x\u{9f}y"]);
    }

    #[test]
    fn invalid_utf8_is_an_encoding_error() {
        let file = write_bytes(b"age;job\n30;t\xe9cnico\n");
        let err = load(file.path(), b';', TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, LoadError::Encoding { line: 2, column: 1 }));
    }

    #[test]
    fn unequal_row_lengths_are_rejected() {
        let file = write_bytes(b"age;job;y\n30;admin.;no\n31;admin.\n");
        let err = load(file.path(), b';', TextEncoding::Latin1).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load(
            Path::new("/nonexistent/bank.csv"),
            b';',
            TextEncoding::Latin1,
        )
        .unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/bank.csv"));
    }

    #[test]
    fn config_points_loader_at_file() {
        let file = write_bytes(b" age ; job \n44;admin.\n");
        let config = DashboardConfig::default().with_data_path(file.path());
        let ds = load_dataset(&config).unwrap();
        assert_eq!(ds.columns, vec!["age", "job"]);
        assert_eq!(ds.age_span, (44, 44));
    }
}
