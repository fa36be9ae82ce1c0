// src/course_table.rs

use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, Display, EnumIter};

use crate::data_loader::TableData;
use crate::error::UpdateError;

/// Columns every course table must carry, spelled exactly as in the header row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum RequiredColumn {
    CourseName,
    LectureHours,
    PracticalHours,
}

/// One row seen through the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CourseRecord<'a> {
    pub course_name: &'a str,
    pub lecture_hours: &'a str,
    pub practical_hours: &'a str,
}

/// A table whose required columns have been located.
///
/// Building one is the schema check: afterwards every access by
/// [`RequiredColumn`] is an index lookup that cannot miss.
#[derive(Debug)]
pub struct CourseTable {
    data: TableData,
    course_name: usize,
    lecture_hours: usize,
    practical_hours: usize,
}

impl CourseTable {
    pub fn from_data(data: TableData) -> Result<Self, UpdateError> {
        let position = |column: RequiredColumn| {
            data.headers
                .iter()
                .position(|header| header == column.as_ref())
        };

        let missing: Vec<RequiredColumn> = RequiredColumn::iter()
            .filter(|&column| position(column).is_none())
            .collect();

        match (
            position(RequiredColumn::CourseName),
            position(RequiredColumn::LectureHours),
            position(RequiredColumn::PracticalHours),
        ) {
            (Some(course_name), Some(lecture_hours), Some(practical_hours)) => Ok(CourseTable {
                data,
                course_name,
                lecture_hours,
                practical_hours,
            }),
            _ => Err(UpdateError::Schema { missing }),
        }
    }

    pub fn index_of(&self, column: RequiredColumn) -> usize {
        match column {
            RequiredColumn::CourseName => self.course_name,
            RequiredColumn::LectureHours => self.lecture_hours,
            RequiredColumn::PracticalHours => self.practical_hours,
        }
    }

    pub fn column(&self, column: RequiredColumn) -> &[String] {
        &self.data.columns[self.index_of(column)]
    }

    pub fn column_mut(&mut self, column: RequiredColumn) -> &mut [String] {
        let index = self.index_of(column);
        &mut self.data.columns[index]
    }

    pub fn len(&self) -> usize {
        self.data.row_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> impl Iterator<Item = CourseRecord<'_>> + '_ {
        (0..self.len()).map(move |row| CourseRecord {
            course_name: &self.column(RequiredColumn::CourseName)[row],
            lecture_hours: &self.column(RequiredColumn::LectureHours)[row],
            practical_hours: &self.column(RequiredColumn::PracticalHours)[row],
        })
    }

    pub fn into_data(self) -> TableData {
        self.data
    }
}
