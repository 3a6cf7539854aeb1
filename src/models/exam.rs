//! Exam record model.
//!
//! One exam record corresponds to one row of the input table: a course
//! section sitting an exam in a room, optionally at a date and time that
//! were fixed before scheduling.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A normalized exam row.
///
/// Numeric fields are always valid (bad cells become 0). `exam_date` is
/// either a real calendar date or absent; `exam_time` is either a
/// non-empty label or absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamRecord {
    /// Owning department (roster lookup key).
    pub department: String,
    /// Course code, e.g. `CENG101`.
    pub course_code: String,
    /// Course title.
    pub course_name: String,
    /// Course instructor, last-resort proctor.
    pub instructor: String,
    /// Class/section identifier. Exams sharing it compete for daily capacity.
    pub class: String,
    /// Enrolled students.
    pub student_count: u32,
    /// Room identifier.
    pub room: String,
    /// Seats in the room.
    pub room_capacity: u32,
    /// Pre-fixed exam day, if any.
    pub exam_date: Option<NaiveDate>,
    /// Pre-fixed start time, if any.
    pub exam_time: Option<String>,
}

impl ExamRecord {
    /// Creates a record for a course section.
    pub fn new(course_code: impl Into<String>, class: impl Into<String>) -> Self {
        Self {
            course_code: course_code.into(),
            class: class.into(),
            ..Default::default()
        }
    }

    /// Sets the department.
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = department.into();
        self
    }

    /// Sets the course title.
    pub fn with_course_name(mut self, name: impl Into<String>) -> Self {
        self.course_name = name.into();
        self
    }

    /// Sets the instructor.
    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = instructor.into();
        self
    }

    /// Sets the room and its capacity.
    pub fn with_room(mut self, room: impl Into<String>, capacity: u32) -> Self {
        self.room = room.into();
        self.room_capacity = capacity;
        self
    }

    /// Sets the enrolled student count.
    pub fn with_student_count(mut self, count: u32) -> Self {
        self.student_count = count;
        self
    }

    /// Fixes the exam date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.exam_date = Some(date);
        self
    }

    /// Fixes the start time. A blank label leaves the time absent.
    pub fn with_time(mut self, time: impl Into<String>) -> Self {
        let time = time.into();
        let time = time.trim();
        self.exam_time = (!time.is_empty()).then(|| time.to_string());
        self
    }

    /// Whether the date was fixed before scheduling.
    #[inline]
    pub fn has_fixed_date(&self) -> bool {
        self.exam_date.is_some()
    }
}
