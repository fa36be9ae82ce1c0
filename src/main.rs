// src/main.rs

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use coursehours::{run_update, CourseUpdate, TableFormat, UpdateOptions, UpdateReport};
use tracing_subscriber::{fmt, EnvFilter};

/// Set lecture and practical hours on every row of a course table whose
/// course_name matches exactly, then write the table back.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Course table to read (and overwrite unless --output is given)
    source: PathBuf,

    /// Exact, case-sensitive value of the course_name column
    course_name: String,

    /// New value for lecture_hours on every matching row
    lecture_hours: u32,

    /// New value for practical_hours on every matching row
    practical_hours: u32,

    /// Table format (csv or tsv); defaults to the source's extension, else csv
    #[arg(short = 'b', long = "format", value_parser = parse_format)]
    format: Option<TableFormat>,

    /// Write the updated table here instead of overwriting the source
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Report how many rows would change without writing anything
    #[arg(long)]
    dry_run: bool,
}

impl Cli {
    fn into_options(self) -> UpdateOptions {
        UpdateOptions {
            source: self.source,
            update: CourseUpdate {
                course_name: self.course_name,
                lecture_hours: self.lecture_hours,
                practical_hours: self.practical_hours,
            },
            format: self.format,
            output: self.output,
            dry_run: self.dry_run,
        }
    }
}

fn parse_format(value: &str) -> Result<TableFormat, String> {
    TableFormat::from_extension(value).map_err(|e| e.to_string())
}

fn run(cli: Cli) -> Result<UpdateReport> {
    let source = cli.source.clone();
    run_update(&cli.into_options())
        .with_context(|| format!("updating course hours in {}", source.display()))
}

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let report = run(Cli::parse())?;
    match &report.destination {
        Some(path) => println!(
            "updated {} of {} rows in {}",
            report.matched,
            report.rows,
            path.display()
        ),
        None => println!(
            "dry run: {} of {} rows would be updated",
            report.matched, report.rows
        ),
    }
    Ok(())
}
