// src/lib.rs

pub mod course_table;
pub mod data_loader;
pub mod error;
pub mod table_writer;
pub mod updater;

pub use course_table::{CourseRecord, CourseTable, RequiredColumn};
pub use data_loader::{get_loader, DataLoader, TableData, TableFormat};
pub use error::UpdateError;
pub use table_writer::{get_writer, TableWriter};
pub use updater::{
    apply_update, run_update, update_course_hours, CourseUpdate, UpdateOptions, UpdateReport,
};
