//! Exam table and roster readers.

use std::fs;
use std::io::Read;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{PlannerError, Result};
use crate::models::ProctorRoster;
use crate::normalize::{HeaderSet, RawExamRow};

/// Rows of an exam table and the header vocabulary they were read with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExamTable {
    pub headers: HeaderSet,
    pub rows: Vec<RawExamRow>,
}

/// Reads an exam table from CSV data with a header row.
///
/// Unknown columns are ignored; missing ones read as absent. Rows keep
/// their file order.
pub fn read_exam_table<R: Read>(reader: R) -> std::result::Result<ExamTable, csv::Error> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = HeaderSet::detect(rdr.headers()?.iter());
    let rows = rdr.deserialize().collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(ExamTable { headers, rows })
}

/// Reads raw exam rows from CSV data with a header row.
pub fn read_exam_rows<R: Read>(reader: R) -> std::result::Result<Vec<RawExamRow>, csv::Error> {
    read_exam_table(reader).map(|table| table.rows)
}

/// Reads an exam table from a CSV file.
pub fn read_exam_file(path: &Path) -> Result<ExamTable> {
    let file = fs::File::open(path).map_err(|e| PlannerError::io(path, e))?;
    let table = read_exam_table(file).map_err(|e| PlannerError::csv(path, e))?;
    info!(
        path = %path.display(),
        rows = table.rows.len(),
        headers = ?table.headers,
        "read exam table"
    );
    Ok(table)
}

/// Parses a roster from TOML.
///
/// ```toml
/// [[departments]]
/// name = "Computer Engineering"
/// proctors = ["Ayse", "Burak"]
/// ```
pub fn parse_roster(text: &str) -> std::result::Result<ProctorRoster, toml::de::Error> {
    toml::from_str(text)
}

/// Loads the roster file. A missing file yields an empty roster, so every
/// exam falls through to the instructor tier.
pub fn load_roster(path: &Path) -> Result<ProctorRoster> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "roster file not found, using an empty roster");
            return Ok(ProctorRoster::new());
        }
        Err(e) => return Err(PlannerError::io(path, e)),
    };

    let roster = parse_roster(&text).map_err(|e| PlannerError::Roster {
        path: path.to_path_buf(),
        source: Box::new(e),
    })?;
    info!(
        path = %path.display(),
        departments = roster.departments().len(),
        proctors = roster.proctor_count(),
        "loaded roster"
    );
    Ok(roster)
}
