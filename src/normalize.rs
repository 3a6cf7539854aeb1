//! Raw row normalization.
//!
//! Converts loosely typed table rows into [`ExamRecord`]s. Coercion never
//! fails: malformed numbers become a default, unparseable dates fall back
//! to the run's start date (with a warning), blank cells become absent.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::models::ExamRecord;

/// Day-first date layouts, tried in order. Two-digit years come before
/// four-digit ones so that `15/03/25` is not read as year 25.
const DATE_FORMATS: [&str; 9] = [
    "%d/%m/%y", "%d/%m/%Y", "%d.%m.%y", "%d.%m.%Y", "%d-%m-%y", "%d-%m-%Y", "%Y-%m-%d",
    "%Y/%m/%d", "%Y.%m.%d",
];

/// Tried only when no day-first layout matches: month-first numeric dates
/// and spelled-out month names.
const FALLBACK_DATE_FORMATS: [&str; 6] = [
    "%m/%d/%y", "%m/%d/%Y", "%d %B %Y", "%d %b %Y", "%d-%b-%Y", "%B %d, %Y",
];

/// One input row exactly as read from the table.
///
/// Column headers are accepted in English or in the Turkish layout of
/// the faculty spreadsheets. Missing columns read as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawExamRow {
    #[serde(default, rename = "Department", alias = "Bölüm")]
    pub department: Option<String>,
    #[serde(default, rename = "Course Code", alias = "Ders Kodu")]
    pub course_code: Option<String>,
    #[serde(default, rename = "Course Name", alias = "Ders Adı")]
    pub course_name: Option<String>,
    #[serde(default, rename = "Instructor", alias = "Öğretim Görevlisi")]
    pub instructor: Option<String>,
    #[serde(default, rename = "Class", alias = "Sınıf")]
    pub class: Option<String>,
    #[serde(default, rename = "Student Count", alias = "Öğrenci Sayısı")]
    pub student_count: Option<String>,
    #[serde(default, rename = "Room", alias = "Derslik")]
    pub room: Option<String>,
    #[serde(default, rename = "Room Capacity", alias = "Derslik Kapasitesi")]
    pub room_capacity: Option<String>,
    #[serde(default, rename = "Exam Date", alias = "Sınav Tarihi")]
    pub exam_date: Option<String>,
    #[serde(default, rename = "Exam Time", alias = "Sınav Saati")]
    pub exam_time: Option<String>,
}

/// Input columns in English, in output order.
const ENGLISH_COLUMNS: [&str; 10] = [
    "Department",
    "Course Code",
    "Course Name",
    "Instructor",
    "Class",
    "Student Count",
    "Room",
    "Room Capacity",
    "Exam Date",
    "Exam Time",
];

/// The same columns in the Turkish layout.
const TURKISH_COLUMNS: [&str; 10] = [
    "Bölüm",
    "Ders Kodu",
    "Ders Adı",
    "Öğretim Görevlisi",
    "Sınıf",
    "Öğrenci Sayısı",
    "Derslik",
    "Derslik Kapasitesi",
    "Sınav Tarihi",
    "Sınav Saati",
];

/// Header vocabulary of an exam table. Output tables are written back in
/// the vocabulary the input used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HeaderSet {
    #[default]
    English,
    Turkish,
}

impl HeaderSet {
    /// Picks the vocabulary with more matching headers. Ties, including a
    /// table with no known column, read as English.
    pub fn detect<'a>(headers: impl IntoIterator<Item = &'a str>) -> Self {
        let (mut english, mut turkish) = (0usize, 0usize);
        for header in headers {
            let header = header.trim();
            if ENGLISH_COLUMNS.iter().any(|c| *c == header) {
                english += 1;
            } else if TURKISH_COLUMNS.iter().any(|c| *c == header) {
                turkish += 1;
            }
        }
        if turkish > english {
            HeaderSet::Turkish
        } else {
            HeaderSet::English
        }
    }

    /// The ten input column names, in output order.
    pub fn columns(self) -> &'static [&'static str; 10] {
        match self {
            HeaderSet::English => &ENGLISH_COLUMNS,
            HeaderSet::Turkish => &TURKISH_COLUMNS,
        }
    }
}

/// Parses a non-negative integer cell.
///
/// The trimmed value must consist only of ASCII digits; anything else
/// (blank, `"N/A"`, `"12.5"`, `"-3"`, overflow, absent) yields `default`.
pub fn safe_int(value: Option<&str>, default: u32) -> u32 {
    let Some(value) = value else {
        return default;
    };
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return default;
    }
    value.parse().unwrap_or(default)
}

/// Parses a date, preferring day-before-month for ambiguous layouts.
///
/// `03/04/2025` is the 3rd of April, while `03/15/2025` has no day-first
/// reading and is taken month-first. Month names (`15 March 2025`,
/// `15-Mar-2025`, `March 15, 2025`) are accepted. A trailing time-of-day
/// (`2025-03-15 00:00:00`, `15/03/2025T09:00`) is ignored. Returns `None`
/// when no layout matches.
pub fn parse_day_first(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(value);

    std::iter::once(value)
        .chain((date_part != value).then_some(date_part))
        .find_map(parse_with_layouts)
}

fn parse_with_layouts(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .chain(FALLBACK_DATE_FORMATS.iter())
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Converts raw rows into exam records for one run.
#[derive(Debug, Clone)]
pub struct Normalizer {
    start_date: NaiveDate,
}

impl Normalizer {
    /// Creates a normalizer. `start_date` replaces unparseable dates.
    pub fn new(start_date: NaiveDate) -> Self {
        Self { start_date }
    }

    /// Normalizes one row. `row` is the 1-based data row, used in
    /// diagnostics only.
    pub fn normalize(&self, row: usize, raw: &RawExamRow) -> ExamRecord {
        ExamRecord {
            department: text(&raw.department),
            course_code: text(&raw.course_code),
            course_name: text(&raw.course_name),
            instructor: text(&raw.instructor),
            class: text(&raw.class),
            student_count: safe_int(raw.student_count.as_deref(), 0),
            room: text(&raw.room),
            room_capacity: safe_int(raw.room_capacity.as_deref(), 0),
            exam_date: self.coerce_date(row, raw.exam_date.as_deref()),
            exam_time: present(raw.exam_time.as_deref()).map(str::to_string),
        }
    }

    /// Normalizes all rows, preserving order.
    pub fn normalize_all(&self, rows: &[RawExamRow]) -> Vec<ExamRecord> {
        rows.iter()
            .enumerate()
            .map(|(i, raw)| self.normalize(i + 1, raw))
            .collect()
    }

    fn coerce_date(&self, row: usize, value: Option<&str>) -> Option<NaiveDate> {
        let value = present(value)?;
        match parse_day_first(value) {
            Some(date) => Some(date),
            None => {
                warn!(
                    row,
                    value,
                    fallback = %self.start_date,
                    "unparseable exam date, using start date"
                );
                Some(self.start_date)
            }
        }
    }
}

/// Text cells keep their content verbatim; absent becomes empty.
fn text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn raw() -> RawExamRow {
        RawExamRow {
            department: Some("Computer Engineering".into()),
            course_code: Some("CENG101".into()),
            course_name: Some("Programming".into()),
            instructor: Some("Dr. Aydin".into()),
            class: Some("CENG-1A".into()),
            student_count: Some("64".into()),
            room: Some("B-201".into()),
            room_capacity: Some("80".into()),
            exam_date: None,
            exam_time: None,
        }
    }

    #[test]
    fn test_header_set_detection() {
        assert_eq!(
            HeaderSet::detect(["Bölüm", "Ders Kodu", "Sınıf", "Ekstra"]),
            HeaderSet::Turkish
        );
        assert_eq!(
            HeaderSet::detect([" Department ", "Course Code", "Class"]),
            HeaderSet::English
        );
        assert_eq!(HeaderSet::detect(["a", "b"]), HeaderSet::English);
        assert_eq!(HeaderSet::Turkish.columns()[9], "Sınav Saati");
    }

    #[test]
    fn test_safe_int() {
        assert_eq!(safe_int(Some("42"), 0), 42);
        assert_eq!(safe_int(Some("  7 "), 0), 7);
        assert_eq!(safe_int(Some("N/A"), 0), 0);
        assert_eq!(safe_int(Some("12.5"), 0), 0);
        assert_eq!(safe_int(Some("-3"), 9), 9);
        assert_eq!(safe_int(Some(""), 5), 5);
        assert_eq!(safe_int(None, 3), 3);
        assert_eq!(safe_int(Some("99999999999999999999"), 0), 0);
    }

    #[test]
    fn test_parse_day_first() {
        assert_eq!(parse_day_first("15/03/2025"), Some(ymd(2025, 3, 15)));
        assert_eq!(parse_day_first("03/04/2025"), Some(ymd(2025, 4, 3)));
        assert_eq!(parse_day_first("15.03.2025"), Some(ymd(2025, 3, 15)));
        assert_eq!(parse_day_first("15-03-25"), Some(ymd(2025, 3, 15)));
        assert_eq!(parse_day_first("2025-03-15"), Some(ymd(2025, 3, 15)));
        assert_eq!(parse_day_first("2025-03-15 00:00:00"), Some(ymd(2025, 3, 15)));
        assert_eq!(parse_day_first("not a date"), None);
        assert_eq!(parse_day_first("31/02/2025"), None);
    }

    #[test]
    fn test_parse_month_first_and_month_names() {
        assert_eq!(parse_day_first("03/15/2025"), Some(ymd(2025, 3, 15)));
        assert_eq!(parse_day_first("03/15/25"), Some(ymd(2025, 3, 15)));
        assert_eq!(parse_day_first("15 March 2025"), Some(ymd(2025, 3, 15)));
        assert_eq!(parse_day_first("15 Mar 2025"), Some(ymd(2025, 3, 15)));
        assert_eq!(parse_day_first("15-Mar-2025"), Some(ymd(2025, 3, 15)));
        assert_eq!(parse_day_first("March 15, 2025"), Some(ymd(2025, 3, 15)));
        // Day-first still wins when both readings are valid.
        assert_eq!(parse_day_first("03/04/2025"), Some(ymd(2025, 4, 3)));
    }

    #[test]
    fn test_month_first_date_is_not_replaced() {
        let n = Normalizer::new(ymd(2025, 6, 2));
        let row = RawExamRow {
            exam_date: Some("03/15/2025".into()),
            ..Default::default()
        };
        assert_eq!(n.normalize(1, &row).exam_date, Some(ymd(2025, 3, 15)));
    }

    #[test]
    fn test_normalize_basic_row() {
        let n = Normalizer::new(ymd(2025, 1, 6));
        let exam = n.normalize(1, &raw());
        assert_eq!(exam.department, "Computer Engineering");
        assert_eq!(exam.course_code, "CENG101");
        assert_eq!(exam.class, "CENG-1A");
        assert_eq!(exam.student_count, 64);
        assert_eq!(exam.room_capacity, 80);
        assert_eq!(exam.exam_date, None);
        assert_eq!(exam.exam_time, None);
    }

    #[test]
    fn test_malformed_student_count_is_zero() {
        let n = Normalizer::new(ymd(2025, 1, 6));
        let mut row = raw();
        row.student_count = Some("N/A".into());
        row.room_capacity = None;
        let exam = n.normalize(1, &row);
        assert_eq!(exam.student_count, 0);
        assert_eq!(exam.room_capacity, 0);
    }

    #[test]
    fn test_fixed_date_and_time() {
        let n = Normalizer::new(ymd(2025, 1, 6));
        let mut row = raw();
        row.exam_date = Some("15/03/2025".into());
        row.exam_time = Some(" 11:00 ".into());
        let exam = n.normalize(1, &row);
        assert_eq!(exam.exam_date, Some(ymd(2025, 3, 15)));
        assert_eq!(exam.exam_time.as_deref(), Some("11:00"));
    }

    #[test]
    fn test_bad_date_falls_back_to_start() {
        let start = ymd(2025, 1, 6);
        let n = Normalizer::new(start);
        let mut row = raw();
        row.exam_date = Some("sometime in March".into());
        assert_eq!(n.normalize(1, &row).exam_date, Some(start));
    }

    #[test]
    fn test_blank_date_and_time_are_absent() {
        let n = Normalizer::new(ymd(2025, 1, 6));
        let mut row = raw();
        row.exam_date = Some("   ".into());
        row.exam_time = Some("".into());
        let exam = n.normalize(1, &row);
        assert_eq!(exam.exam_date, None);
        assert_eq!(exam.exam_time, None);
    }

    #[test]
    fn test_missing_text_fields_are_empty() {
        let n = Normalizer::new(ymd(2025, 1, 6));
        let exam = n.normalize(1, &RawExamRow::default());
        assert_eq!(exam, ExamRecord::default());
    }

    #[test]
    fn test_normalize_all_keeps_order() {
        let n = Normalizer::new(ymd(2025, 1, 6));
        let mut second = raw();
        second.course_code = Some("CENG102".into());
        let exams = n.normalize_all(&[raw(), second]);
        assert_eq!(exams.len(), 2);
        assert_eq!(exams[0].course_code, "CENG101");
        assert_eq!(exams[1].course_code, "CENG102");
    }
}
