//! CSV loading for the section catalog and the requirements list.
//!
//! Any row that fails to parse is fatal: a malformed time, day token or
//! class type aborts the run before any modeling starts.

use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::catalog::{DaySet, Section};
use crate::error::ScheduleError;
use crate::schedule::RequiredCourse;

/// Raw catalog row as it appears in the CSV.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "CRSNO")]
    course_id: String,
    #[serde(rename = "CLASS TYPE")]
    class_type: String,
    #[serde(rename = "DAYS")]
    days: String,
    #[serde(rename = "START_TIME")]
    start_time: String,
    #[serde(rename = "END_TIME")]
    end_time: String,
}

/// Raw requirement row: which course/class-type pairs must be taken.
#[derive(Debug, Deserialize)]
struct RequirementRow {
    #[serde(rename = "CRSNO")]
    course_id: String,
    #[serde(rename = "CLASS TYPE")]
    class_type: String,
}

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>, ScheduleError> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| ScheduleError::MalformedInput(format!("{}: {e}", path.display())))
}

/// Load the available-section catalog.
pub fn load_catalog(path: &Path) -> Result<Vec<Section>, ScheduleError> {
    let mut rdr = reader(path)?;
    let mut catalog = Vec::new();
    for (line, result) in rdr.deserialize::<CatalogRow>().enumerate() {
        let row = result
            .map_err(|e| ScheduleError::MalformedInput(format!("catalog row {}: {e}", line + 1)))?;
        let days: DaySet = row.days.parse()?;
        let section = Section::new(
            row.course_id,
            row.class_type.parse()?,
            days,
            &row.start_time,
            &row.end_time,
        )?;
        catalog.push(section);
    }
    info!("loaded {} catalog sections from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Load the required course/class-type list, in file order.
pub fn load_requirements(path: &Path) -> Result<Vec<RequiredCourse>, ScheduleError> {
    let mut rdr = reader(path)?;
    let mut required = Vec::new();
    for (line, result) in rdr.deserialize::<RequirementRow>().enumerate() {
        let row = result.map_err(|e| {
            ScheduleError::MalformedInput(format!("requirement row {}: {e}", line + 1))
        })?;
        required.push(RequiredCourse::new(row.course_id, row.class_type.parse()?));
    }
    if required.is_empty() {
        return Err(ScheduleError::MalformedInput(format!(
            "{}: no requirements listed",
            path.display()
        )));
    }
    info!("loaded {} requirements from {}", required.len(), path.display());
    Ok(required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ClassType;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("sectsolve-test-{}-{name}", std::process::id()));
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_catalog_rows() {
        let path = write_temp(
            "catalog.csv",
            "CRSNO,CLASS TYPE,DAYS,START_TIME,END_TIME\n\
             AnSc 22n,Lec,MWF,08:00,09:00\n\
             AnSc 22n,Lab,T,13:00,16:00\n",
        );
        let catalog = load_catalog(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].course_id, "AnSc 22n");
        assert_eq!(catalog[0].class_type, ClassType::Lecture);
        assert_eq!(catalog[0].start_minute, 480);
        assert_eq!(catalog[1].class_type, ClassType::Lab);
        assert_eq!(catalog[1].end_minute, 960);
    }

    #[test]
    fn malformed_time_is_fatal() {
        let path = write_temp(
            "bad-time.csv",
            "CRSNO,CLASS TYPE,DAYS,START_TIME,END_TIME\n\
             AnSc 22n,Lec,MWF,8am,09:00\n",
        );
        let err = load_catalog(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ScheduleError::MalformedInput(_)));
    }

    #[test]
    fn missing_column_is_fatal() {
        let path = write_temp(
            "missing-col.csv",
            "CRSNO,DAYS,START_TIME,END_TIME\n\
             AnSc 22n,MWF,08:00,09:00\n",
        );
        let err = load_catalog(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ScheduleError::MalformedInput(_)));
    }

    #[test]
    fn loads_requirements_in_order() {
        let path = write_temp(
            "required.csv",
            "CRSNO,CLASS TYPE\nBiol 22p,Lec\nBiol 22p,Lab\nChem 131,Lec\n",
        );
        let required = load_requirements(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(required.len(), 3);
        assert_eq!(required[0].course_id, "Biol 22p");
        assert_eq!(required[1].class_type, ClassType::Lab);
        assert_eq!(required[2].course_id, "Chem 131");
    }

    #[test]
    fn empty_requirements_are_rejected() {
        let path = write_temp("empty-req.csv", "CRSNO,CLASS TYPE\n");
        let err = load_requirements(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(matches!(err, ScheduleError::MalformedInput(_)));
    }
}
