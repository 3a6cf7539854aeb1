//! Exam timetabling domain models.
//!
//! Provides the data types shared by the scheduler and the proctor
//! assigner.
//!
//! # Domain Mappings
//!
//! | exam-schedule | Generic scheduling |
//! |---------------|--------------------|
//! | ExamRecord | Task |
//! | Slot | Time bucket |
//! | ProctorRoster | Resource pool |
//! | AssignedExam | Assignment |

mod exam;
mod roster;
mod schedule;
mod slot;

pub use exam::ExamRecord;
pub use roster::{Department, ProctorRoster};
pub use schedule::{AssignedExam, AssignmentTier, ScheduledExam, SlotOrigin};
pub use slot::{Slot, TimeSlots, DEFAULT_TIME_SLOTS};
