//! Greedy exam timetabling and proctor assignment.
//!
//! Turns a flat table of exams into a dated, time-slotted calendar and
//! assigns one proctor to each exam while balancing proctor workload.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ExamRecord`, `Slot`, `TimeSlots`,
//!   `ProctorRoster`, `ScheduledExam`, `AssignedExam`
//! - **`normalize`**: Raw table rows → typed exam records
//! - **`scheduler`**: Slot packing under a per-class daily limit
//! - **`proctoring`**: Tiered greedy proctor assignment and workload stats
//! - **`planner`**: The full pipeline over an immutable config and roster
//! - **`validation`**: Roster/config checks and output audit
//! - **`io`**: CSV exam tables, TOML rosters
//! - **`app`**: One command-line run from settings to written tables
//! - **`config`**, **`error`**, **`logging`**: Run settings and plumbing
//!
//! # Architecture
//!
//! The core (normalize → schedule → assign) is infallible, single-threaded
//! and order-dependent: input row order decides both slot placement and
//! proctor tie-breaks. Per-run accumulators (`SchedulerState`,
//! `ProctorState`) are explicit values passed through each step.
//!
//! Not an optimizer: no backtracking, no student-level conflicts, no room
//! capacity checks.

pub mod app;
pub mod config;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod planner;
pub mod proctoring;
pub mod scheduler;
pub mod validation;

pub use app::{run, RunStatus};
pub use config::{PlannerConfig, Settings};
pub use error::{PlannerError, Result};
pub use planner::{ExamPlanner, PlanOutcome, PlanSummary};
