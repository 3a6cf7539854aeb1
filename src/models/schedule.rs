//! Scheduled and assigned exam models.
//!
//! The scheduler turns every [`ExamRecord`] into a [`ScheduledExam`] with a
//! concrete [`Slot`]; the proctor assigner then wraps it into an
//! [`AssignedExam`] carrying the chosen proctor, if any.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{ExamRecord, Slot};

/// How an exam obtained its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotOrigin {
    /// The input already carried a date; passed through.
    Fixed,
    /// The scheduler chose the slot.
    Placed,
}

/// An exam with a date and time.
///
/// `exam.exam_date` and `exam.exam_time` always mirror `slot`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledExam {
    /// The exam row with its date/time filled in.
    pub exam: ExamRecord,
    /// Where the exam sits.
    pub slot: Slot,
    /// Whether the slot was fixed in the input or placed.
    pub origin: SlotOrigin,
}

impl ScheduledExam {
    /// Wraps `exam` at `slot`, writing the slot back into the record.
    pub fn new(mut exam: ExamRecord, slot: Slot, origin: SlotOrigin) -> Self {
        exam.exam_date = Some(slot.date);
        exam.exam_time = Some(slot.time.clone());
        Self { exam, slot, origin }
    }

    /// Whether the scheduler placed this exam.
    #[inline]
    pub fn is_placed(&self) -> bool {
        self.origin == SlotOrigin::Placed
    }
}

/// Fallback level that produced a proctor choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssignmentTier {
    /// Free proctor from the exam's own department.
    InDepartment,
    /// Free proctor from any department.
    AnyDepartment,
    /// The course instructor.
    Instructor,
    /// Nobody was free.
    Unassigned,
}

impl AssignmentTier {
    /// Short label for logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            AssignmentTier::InDepartment => "in-department",
            AssignmentTier::AnyDepartment => "any-department",
            AssignmentTier::Instructor => "instructor",
            AssignmentTier::Unassigned => "unassigned",
        }
    }
}

impl fmt::Display for AssignmentTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scheduled exam with its proctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedExam {
    /// The scheduled exam.
    pub scheduled: ScheduledExam,
    /// Chosen proctor. `None` when nobody was available.
    pub proctor: Option<String>,
    /// Tier that produced the choice.
    pub tier: AssignmentTier,
}

impl AssignedExam {
    /// The underlying exam row.
    #[inline]
    pub fn exam(&self) -> &ExamRecord {
        &self.scheduled.exam
    }

    /// The exam slot.
    #[inline]
    pub fn slot(&self) -> &Slot {
        &self.scheduled.slot
    }

    /// Whether a proctor was found.
    #[inline]
    pub fn is_assigned(&self) -> bool {
        self.proctor.is_some()
    }
}
