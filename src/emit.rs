//! Spreadsheet output: one workbook per strategy.

use std::path::Path;

use anyhow::{Context, Result};
use log::info;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::catalog::{Section, format_minutes};
use crate::schedule::{AnnotatedSchedule, Schedule};

const HEADERS: [&str; 5] = ["CRSNO", "CLASS TYPE", "DAYS", "START_TIME", "END_TIME"];

fn write_headers(sheet: &mut Worksheet, with_violation: bool) -> Result<()> {
    for (col, header) in HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header)?;
    }
    if with_violation {
        sheet.write_string(0, HEADERS.len() as u16, "Violation")?;
    }
    Ok(())
}

fn write_section(sheet: &mut Worksheet, row: u32, section: &Section) -> Result<()> {
    sheet.write_string(row, 0, section.course_id.as_str())?;
    sheet.write_string(row, 1, section.class_type.to_string())?;
    sheet.write_string(row, 2, section.days.to_string())?;
    sheet.write_string(row, 3, format_minutes(section.start_minute))?;
    sheet.write_string(row, 4, format_minutes(section.end_minute))?;
    Ok(())
}

/// Write the single schedule the declarative strategy produced.
pub fn write_sat_schedule(path: &Path, catalog: &[Section], schedule: &Schedule) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Schedule")?;
    write_headers(sheet, false)?;
    for (row, section) in schedule.sections(catalog).enumerate() {
        write_section(sheet, row as u32 + 1, section)?;
    }
    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!("wrote solver schedule to {}", path.display());
    Ok(())
}

/// Write every schedule the exhaustive strategy found, one worksheet
/// per option, each row carrying its violation label (empty string when
/// the section breaks no calendar rule).
pub fn write_search_solutions(
    path: &Path,
    catalog: &[Section],
    solutions: &[AnnotatedSchedule],
) -> Result<()> {
    let mut workbook = Workbook::new();
    for (i, annotated) in solutions.iter().enumerate() {
        let sheet = workbook.add_worksheet();
        sheet.set_name(format!("Option_{}", i + 1))?;
        write_headers(sheet, true)?;
        for (row, ((_, id), violation)) in annotated
            .schedule
            .entries()
            .iter()
            .zip(&annotated.violations)
            .enumerate()
        {
            let section = &catalog[id.index()];
            write_section(sheet, row as u32 + 1, section)?;
            let label = violation.map(|v| v.to_string()).unwrap_or_default();
            sheet.write_string(row as u32 + 1, HEADERS.len() as u16, label)?;
        }
    }
    workbook
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    info!(
        "wrote {} schedule options to {}",
        solutions.len(),
        path.display()
    );
    Ok(())
}
