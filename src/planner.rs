//! End-to-end planning pipeline.
//!
//! raw rows → [`Normalizer`] → [`SlotScheduler`] → [`ProctorAssigner`] →
//! [`ProctorReport`]. Everything runs sequentially on one thread; each
//! stage owns its per-run state.

use tracing::info;

use crate::config::PlannerConfig;
use crate::models::{AssignedExam, AssignmentTier, ExamRecord, ProctorRoster};
use crate::normalize::{Normalizer, RawExamRow};
use crate::proctoring::{ProctorAssigner, ProctorReport};
use crate::scheduler::SlotScheduler;

/// Result of one planning run.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    /// Exams in input order, with slot and proctor.
    pub exams: Vec<AssignedExam>,
    /// Per-proctor workload.
    pub report: ProctorReport,
}

/// Headline counts of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanSummary {
    /// Exams processed.
    pub total: usize,
    /// Exams placed by the scheduler.
    pub placed: usize,
    /// Exams with a date fixed in the input.
    pub fixed: usize,
    /// Proctored from the exam's own department.
    pub in_department: usize,
    /// Proctored from another department.
    pub any_department: usize,
    /// Proctored by the instructor.
    pub instructor: usize,
    /// Left without a proctor.
    pub unassigned: usize,
}

impl PlanOutcome {
    /// Counts exams by slot origin and assignment tier.
    pub fn summary(&self) -> PlanSummary {
        let mut s = PlanSummary {
            total: self.exams.len(),
            ..Default::default()
        };
        for exam in &self.exams {
            if exam.scheduled.is_placed() {
                s.placed += 1;
            } else {
                s.fixed += 1;
            }
            match exam.tier {
                AssignmentTier::InDepartment => s.in_department += 1,
                AssignmentTier::AnyDepartment => s.any_department += 1,
                AssignmentTier::Instructor => s.instructor += 1,
                AssignmentTier::Unassigned => s.unassigned += 1,
            }
        }
        s
    }
}

/// Runs the whole pipeline over an immutable config and roster.
#[derive(Debug, Clone)]
pub struct ExamPlanner {
    config: PlannerConfig,
    roster: ProctorRoster,
}

impl ExamPlanner {
    /// Creates a planner.
    pub fn new(config: PlannerConfig, roster: ProctorRoster) -> Self {
        Self { config, roster }
    }

    /// The run parameters.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The proctor roster.
    pub fn roster(&self) -> &ProctorRoster {
        &self.roster
    }

    /// Normalizes, schedules and assigns raw rows.
    pub fn plan(&self, rows: &[RawExamRow]) -> PlanOutcome {
        let exams = Normalizer::new(self.config.start_date).normalize_all(rows);
        self.plan_records(exams)
    }

    /// Schedules and assigns already normalized records.
    pub fn plan_records(&self, exams: Vec<ExamRecord>) -> PlanOutcome {
        let scheduled = SlotScheduler::new(&self.config).schedule(exams);
        let assigned = ProctorAssigner::new(&self.roster).assign(scheduled);
        let report = ProctorReport::calculate(&assigned, &self.roster, &self.config.time_slots);

        let outcome = PlanOutcome {
            exams: assigned,
            report,
        };
        let s = outcome.summary();
        info!(
            total = s.total,
            placed = s.placed,
            fixed = s.fixed,
            in_department = s.in_department,
            any_department = s.any_department,
            instructor = s.instructor,
            unassigned = s.unassigned,
            "planning finished"
        );
        outcome
    }
}
