// src/updater.rs

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::course_table::{CourseTable, RequiredColumn};
use crate::data_loader::{get_loader, TableFormat};
use crate::error::UpdateError;
use crate::table_writer::get_writer;

/// New hour values for every row whose `course_name` equals `course_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseUpdate {
    pub course_name: String,
    pub lecture_hours: u32,
    pub practical_hours: u32,
}

#[derive(Debug, Clone)]
pub struct UpdateOptions {
    pub source: PathBuf,
    pub update: CourseUpdate,
    /// Overrides the format implied by the source's extension (csv when the
    /// extension says nothing).
    pub format: Option<TableFormat>,
    /// Written instead of `source` when set.
    pub output: Option<PathBuf>,
    pub dry_run: bool,
}

impl UpdateOptions {
    pub fn in_place(source: impl Into<PathBuf>, update: CourseUpdate) -> Self {
        UpdateOptions {
            source: source.into(),
            update,
            format: None,
            output: None,
            dry_run: false,
        }
    }

    pub fn destination(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.source)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateReport {
    pub rows: usize,
    pub matched: usize,
    /// `None` when nothing was written.
    pub destination: Option<PathBuf>,
}

/// Sets both hour fields on every row whose course name matches exactly.
/// Returns how many rows matched; all other cells are left as they were.
pub fn apply_update(table: &mut CourseTable, update: &CourseUpdate) -> usize {
    let matches: Vec<usize> = table
        .records()
        .enumerate()
        .filter(|(_, record)| record.course_name == update.course_name)
        .map(|(row, _)| row)
        .collect();

    let lecture = update.lecture_hours.to_string();
    let practical = update.practical_hours.to_string();
    for &row in &matches {
        table.column_mut(RequiredColumn::LectureHours)[row].clone_from(&lecture);
        table.column_mut(RequiredColumn::PracticalHours)[row].clone_from(&practical);
    }
    matches.len()
}

/// Load, update, and write back. Nothing is written unless loading and the
/// schema check both succeed.
#[instrument(
    level = "info",
    skip(options),
    fields(source = %options.source.display(), course = %options.update.course_name)
)]
pub fn run_update(options: &UpdateOptions) -> Result<UpdateReport, UpdateError> {
    let format = options
        .format
        .unwrap_or_else(|| TableFormat::detect(&options.source));

    let data = get_loader(format).load(&options.source)?;
    let mut table = CourseTable::from_data(data)?;
    let matched = apply_update(&mut table, &options.update);

    info!(
        table_format = format.as_ref(),
        rows = table.len(),
        matched,
        lecture_hours = options.update.lecture_hours,
        practical_hours = options.update.practical_hours,
        "applied update"
    );

    let rows = table.len();
    if options.dry_run {
        info!("dry run; nothing written");
        return Ok(UpdateReport {
            rows,
            matched,
            destination: None,
        });
    }

    let destination = options.destination().to_path_buf();
    get_writer(format).write(&destination, &table.into_data())?;
    info!(destination = %destination.display(), "table written");

    Ok(UpdateReport {
        rows,
        matched,
        destination: Some(destination),
    })
}

/// Overwrites `source` in place with the updated table.
pub fn update_course_hours(
    source: impl AsRef<Path>,
    course_name: &str,
    lecture_hours: u32,
    practical_hours: u32,
) -> Result<(), UpdateError> {
    let update = CourseUpdate {
        course_name: course_name.to_string(),
        lecture_hours,
        practical_hours,
    };
    let options = UpdateOptions {
        format: Some(TableFormat::Csv),
        ..UpdateOptions::in_place(source.as_ref(), update)
    };
    run_update(&options).map(|_| ())
}
