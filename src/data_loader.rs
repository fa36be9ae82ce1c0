// src/data_loader.rs

use std::fs::File;
use std::path::Path;

use strum_macros::{AsRefStr, EnumString};
use tracing::debug;

use crate::error::UpdateError;

/// Raw table contents, column-major, every value kept as the text read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableData {
    pub headers: Vec<String>,
    pub columns: Vec<Vec<String>>,
}

impl TableData {
    pub fn new(headers: Vec<String>, columns: Vec<Vec<String>>) -> Self {
        TableData { headers, columns }
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    /// Cells of row `index` in header order.
    pub fn row(&self, index: usize) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(move |column| column[index].as_str())
    }
}

/// Delimited text formats understood on both the read and write side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum TableFormat {
    Csv,
    Tsv,
}

impl TableFormat {
    pub fn delimiter(self) -> u8 {
        match self {
            TableFormat::Csv => b',',
            TableFormat::Tsv => b'\t',
        }
    }

    pub fn from_extension(extension: &str) -> Result<Self, UpdateError> {
        extension
            .parse()
            .map_err(|_| UpdateError::UnsupportedFormat(extension.to_string()))
    }

    /// Format named by `path`'s extension, falling back to csv when the
    /// extension is missing or not one we know.
    pub fn detect(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
            .unwrap_or(TableFormat::Csv)
    }
}

pub trait DataLoader {
    fn load(&self, path: &Path) -> Result<TableData, UpdateError>;
}

pub struct CsvLoader {
    delimiter: u8,
}

impl CsvLoader {
    pub fn new(format: TableFormat) -> Self {
        CsvLoader {
            delimiter: format.delimiter(),
        }
    }
}

impl DataLoader for CsvLoader {
    fn load(&self, path: &Path) -> Result<TableData, UpdateError> {
        let file = File::open(path).map_err(|source| UpdateError::SourceNotFound {
            path: path.to_path_buf(),
            source,
        })?;
        let malformed = |source| UpdateError::MalformedTable {
            path: path.to_path_buf(),
            source,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .from_reader(file);
        let headers = reader
            .headers()
            .map_err(malformed)?
            .iter()
            .map(String::from)
            .collect::<Vec<String>>();

        let mut columns: Vec<Vec<String>> = headers.iter().map(|_| Vec::new()).collect();

        for result in reader.records() {
            let record = result.map_err(malformed)?;
            for (i, field) in record.iter().enumerate() {
                columns[i].push(field.to_string());
            }
        }

        let data = TableData::new(headers, columns);
        debug!(
            path = %path.display(),
            columns = data.headers.len(),
            rows = data.row_count(),
            "loaded table"
        );
        Ok(data)
    }
}

pub fn get_loader(format: TableFormat) -> Box<dyn DataLoader> {
    Box::new(CsvLoader::new(format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_headers_and_columns_in_file_order() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("first_year_data.csv");
        fs::write(
            &path,
            "course_code,course_name,lecture_hours,practical_hours\n\
             CS101,Programming using C,2,2\n\
             MA101,Calculus,3,0\n",
        )?;

        let data = get_loader(TableFormat::Csv).load(&path)?;
        assert_eq!(
            data.headers,
            vec!["course_code", "course_name", "lecture_hours", "practical_hours"]
        );
        assert_eq!(data.row_count(), 2);
        assert_eq!(data.columns[1], vec!["Programming using C", "Calculus"]);
        assert_eq!(
            data.row(1).collect::<Vec<_>>(),
            vec!["MA101", "Calculus", "3", "0"]
        );
        Ok(())
    }

    #[test]
    fn quoted_fields_are_unquoted_on_load() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("quoted.csv");
        fs::write(
            &path,
            "course_name,lecture_hours,practical_hours\n\"Data Structures, Advanced\",3,2\n",
        )?;

        let data = get_loader(TableFormat::Csv).load(&path)?;
        assert_eq!(data.columns[0], vec!["Data Structures, Advanced"]);
        Ok(())
    }

    #[test]
    fn tsv_uses_tab_delimiter() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("courses.tsv");
        fs::write(&path, "course_name\tlecture_hours\nCalculus, Part I\t3\n")?;

        let data = get_loader(TableFormat::from_extension("TSV")?).load(&path)?;
        assert_eq!(data.headers, vec!["course_name", "lecture_hours"]);
        assert_eq!(data.columns[0], vec!["Calculus, Part I"]);
        Ok(())
    }

    #[test]
    fn header_only_file_has_no_rows() -> anyhow::Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.csv");
        fs::write(&path, "course_name,lecture_hours,practical_hours\n")?;

        let data = get_loader(TableFormat::Csv).load(&path)?;
        assert_eq!(data.headers.len(), 3);
        assert_eq!(data.row_count(), 0);
        Ok(())
    }

    #[test]
    fn missing_file_is_source_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.csv");

        let err = get_loader(TableFormat::Csv).load(&path).unwrap_err();
        assert!(matches!(err, UpdateError::SourceNotFound { .. }), "{err:?}");
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ragged.csv");
        fs::write(&path, "course_name,lecture_hours\nCalculus,3,0\n").unwrap();

        let err = get_loader(TableFormat::Csv).load(&path).unwrap_err();
        assert!(matches!(err, UpdateError::MalformedTable { .. }), "{err:?}");
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.csv");
        fs::write(
            &path,
            b"course_name,lecture_hours,practical_hours\nM\xe9canique,3,0\n",
        )
        .unwrap();

        let err = get_loader(TableFormat::Csv).load(&path).unwrap_err();
        assert!(matches!(err, UpdateError::MalformedTable { .. }), "{err:?}");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let err = TableFormat::from_extension("xlsx").unwrap_err();
        assert!(matches!(err, UpdateError::UnsupportedFormat(ref f) if f == "xlsx"));
    }

    #[test]
    fn format_comes_from_path_extension() {
        assert_eq!(
            TableFormat::detect(Path::new("data/courses/first_year_data.TSV")),
            TableFormat::Tsv
        );
        assert_eq!(
            TableFormat::detect(Path::new("data/courses/first_year_data.csv")),
            TableFormat::Csv
        );
        assert_eq!(
            TableFormat::detect(Path::new("data/courses/first_year_data")),
            TableFormat::Csv
        );
        assert_eq!(TableFormat::detect(Path::new("courses.txt")), TableFormat::Csv);
    }
}
