// src/table_writer.rs

use std::fs;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::data_loader::{TableData, TableFormat};
use crate::error::UpdateError;

pub trait TableWriter {
    /// Replaces whatever is at `path` with `data`: header row first, then
    /// every row in order.
    fn write(&self, path: &Path, data: &TableData) -> Result<(), UpdateError>;
}

pub struct CsvWriter {
    delimiter: u8,
}

impl CsvWriter {
    pub fn new(format: TableFormat) -> Self {
        CsvWriter {
            delimiter: format.delimiter(),
        }
    }
}

impl TableWriter for CsvWriter {
    fn write(&self, path: &Path, data: &TableData) -> Result<(), UpdateError> {
        let fail = |err: std::io::Error| UpdateError::write(path, err);

        // write through symlinks: replace the file the link points at, not the link
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let path = target.as_path();

        // the temp file must share a filesystem with `path` for the rename to be atomic
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(fail)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .delimiter(self.delimiter)
                .from_writer(tmp.as_file_mut());
            writer
                .write_record(&data.headers)
                .map_err(|e| fail(e.into()))?;
            for row in 0..data.row_count() {
                writer
                    .write_record(data.row(row))
                    .map_err(|e| fail(e.into()))?;
            }
            writer.flush().map_err(fail)?;
        }
        tmp.as_file().sync_all().map_err(fail)?;

        // keep the mode of the file being replaced rather than the temp file's 0600
        let permissions = match fs::metadata(path) {
            Ok(metadata) => Some(metadata.permissions()),
            Err(_) => new_file_permissions(),
        };
        if let Some(permissions) = permissions {
            tmp.as_file().set_permissions(permissions).map_err(fail)?;
        }

        tmp.persist(path).map_err(|e| fail(e.error))?;
        debug!(
            path = %path.display(),
            rows = data.row_count(),
            "wrote table"
        );
        Ok(())
    }
}

#[cfg(unix)]
fn new_file_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<fs::Permissions> {
    None
}

pub fn get_writer(format: TableFormat) -> Box<dyn TableWriter> {
    Box::new(CsvWriter::new(format))
}
