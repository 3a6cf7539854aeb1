//! Exam table and statistics writers.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::{PlannerError, Result};
use crate::models::AssignedExam;
use crate::normalize::HeaderSet;
use crate::proctoring::ProctorReport;

/// Output row of the "Exams" table. Field order matches
/// [`HeaderSet::columns`] followed by [`PROCTOR_COLUMN`].
#[derive(Debug, Serialize)]
struct ExamRow<'a> {
    department: &'a str,
    course_code: &'a str,
    course_name: &'a str,
    instructor: &'a str,
    class: &'a str,
    student_count: u32,
    room: &'a str,
    room_capacity: u32,
    exam_date: String,
    exam_time: &'a str,
    proctor: &'a str,
}

impl<'a> From<&'a AssignedExam> for ExamRow<'a> {
    fn from(a: &'a AssignedExam) -> Self {
        let exam = a.exam();
        Self {
            department: &exam.department,
            course_code: &exam.course_code,
            course_name: &exam.course_name,
            instructor: &exam.instructor,
            class: &exam.class,
            student_count: exam.student_count,
            room: &exam.room,
            room_capacity: exam.room_capacity,
            exam_date: a.slot().date.format("%Y-%m-%d").to_string(),
            exam_time: &a.slot().time,
            proctor: a.proctor.as_deref().unwrap_or(""),
        }
    }
}

/// Header of the proctor column in both vocabularies.
pub const PROCTOR_COLUMN: &str = "Proctor";

/// Writes the "Exams" table: every input column plus date, time and
/// proctor, headed in the vocabulary the input used. An unassigned exam
/// has an empty proctor cell. The header row is written even when there
/// are no exams.
pub fn write_exams<W: Write>(
    writer: W,
    exams: &[AssignedExam],
    headers: HeaderSet,
) -> std::result::Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut header: Vec<&str> = headers.columns().to_vec();
    header.push(PROCTOR_COLUMN);
    wtr.write_record(&header)?;

    for exam in exams {
        wtr.serialize(ExamRow::from(exam))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the per-proctor table: name, department, total, then one
/// column per time slot in vocabulary order.
pub fn write_stats<W: Write>(writer: W, report: &ProctorReport) -> std::result::Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["Proctor".to_string(), "Department".to_string(), "TotalTasks".to_string()];
    header.extend(report.time_slots.iter().map(str::to_string));
    wtr.write_record(&header)?;

    for row in &report.rows {
        let mut record = vec![
            row.proctor.clone(),
            row.department.clone(),
            row.total_tasks.to_string(),
        ];
        record.extend(row.per_slot.iter().map(u32::to_string));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the "Exams" table to `path`.
pub fn write_exam_file(path: &Path, exams: &[AssignedExam], headers: HeaderSet) -> Result<()> {
    let file = fs::File::create(path).map_err(|e| PlannerError::io(path, e))?;
    write_exams(file, exams, headers).map_err(|e| PlannerError::csv(path, e))?;
    info!(path = %path.display(), rows = exams.len(), "wrote exam table");
    Ok(())
}

/// Writes the per-proctor table to `path`.
pub fn write_stats_file(path: &Path, report: &ProctorReport) -> Result<()> {
    let file = fs::File::create(path).map_err(|e| PlannerError::io(path, e))?;
    write_stats(file, report).map_err(|e| PlannerError::csv(path, e))?;
    info!(path = %path.display(), rows = report.rows.len(), "wrote proctor statistics");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        AssignmentTier, ExamRecord, ProctorRoster, ScheduledExam, Slot, SlotOrigin, TimeSlots,
    };
    use chrono::NaiveDate;

    fn sample() -> Vec<AssignedExam> {
        let d = NaiveDate::from_ymd_opt(2025, 3, 15).unwrap();
        let exam = ExamRecord::new("CENG101", "CENG-1A")
            .with_department("CENG")
            .with_course_name("Programming, Part I")
            .with_instructor("Dr. Aydin")
            .with_room("B-201", 80)
            .with_student_count(64);
        vec![
            AssignedExam {
                scheduled: ScheduledExam::new(exam.clone(), Slot::new(d, "09:00"), SlotOrigin::Fixed),
                proctor: Some("Ayse".into()),
                tier: AssignmentTier::InDepartment,
            },
            AssignedExam {
                scheduled: ScheduledExam::new(exam, Slot::new(d, "11:00"), SlotOrigin::Placed),
                proctor: None,
                tier: AssignmentTier::Unassigned,
            },
        ]
    }

    #[test]
    fn test_write_exams() {
        let mut buf = Vec::new();
        write_exams(&mut buf, &sample(), HeaderSet::English).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Department,Course Code,Course Name,Instructor,Class,Student Count,Room,Room Capacity,Exam Date,Exam Time,Proctor"
        );
        assert_eq!(
            lines[1],
            "CENG,CENG101,\"Programming, Part I\",Dr. Aydin,CENG-1A,64,B-201,80,2025-03-15,09:00,Ayse"
        );
        assert!(lines[2].ends_with("2025-03-15,11:00,"));
    }

    #[test]
    fn test_write_exams_in_turkish() {
        let mut buf = Vec::new();
        write_exams(&mut buf, &sample(), HeaderSet::Turkish).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(
            lines[0],
            "Bölüm,Ders Kodu,Ders Adı,Öğretim Görevlisi,Sınıf,Öğrenci Sayısı,Derslik,Derslik Kapasitesi,Sınav Tarihi,Sınav Saati,Proctor"
        );
        assert!(lines[1].starts_with("CENG,CENG101,"));
    }

    #[test]
    fn test_write_exams_empty_keeps_header() {
        let mut buf = Vec::new();
        write_exams(&mut buf, &[], HeaderSet::English).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "Department,Course Code,Course Name,Instructor,Class,Student Count,Room,Room Capacity,Exam Date,Exam Time,Proctor\n"
        );
    }

    #[test]
    fn test_write_stats() {
        let roster = ProctorRoster::new().with_department("CENG", ["Ayse", "Burak"]);
        let slots = TimeSlots::parse_list("09:00,11:00").unwrap();
        let report = ProctorReport::calculate(&sample(), &roster, &slots);

        let mut buf = Vec::new();
        write_stats(&mut buf, &report).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Proctor,Department,TotalTasks,09:00,11:00");
        assert_eq!(lines[1], "Ayse,CENG,1,1,0");
        assert_eq!(lines[2], "Burak,CENG,0,0,0");
    }

    #[test]
    fn test_write_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("exams.csv");
        write_exam_file(&path, &sample(), HeaderSet::English).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 3);

        let bad = dir.path().join("missing").join("stats.csv");
        let report = ProctorReport::calculate(&[], &ProctorRoster::new(), &TimeSlots::default());
        assert!(matches!(
            write_stats_file(&bad, &report),
            Err(PlannerError::Io { .. })
        ));
    }
}
