//! Proctor assignment and workload statistics.
//!
//! `ProctorAssigner` walks the scheduled exams once, picking one proctor per
//! exam with a tiered greedy rule. `ProctorReport` summarizes the result per
//! proctor and time slot.
//!
//! # Usage
//!
//! ```
//! use chrono::NaiveDate;
//! use exam_schedule::config::PlannerConfig;
//! use exam_schedule::models::{ExamRecord, ProctorRoster};
//! use exam_schedule::proctoring::{ProctorAssigner, ProctorReport};
//! use exam_schedule::scheduler::SlotScheduler;
//!
//! let config = PlannerConfig::new(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
//! let roster = ProctorRoster::new().with_department("Math", ["Noether"]);
//! let exams = vec![ExamRecord::new("MATH1", "M-1").with_department("Math")];
//!
//! let scheduled = SlotScheduler::new(&config).schedule(exams);
//! let assigned = ProctorAssigner::new(&roster).assign(scheduled);
//! let report = ProctorReport::calculate(&assigned, &roster, &config.time_slots);
//! assert_eq!(report.get("Noether").unwrap().total_tasks, 1);
//! ```

mod assigner;
mod stats;

pub use assigner::{ProctorAssigner, ProctorLoad, ProctorState};
pub use stats::{ProctorReport, ProctorStats};
