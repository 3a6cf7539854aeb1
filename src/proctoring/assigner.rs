//! Tiered greedy proctor assignment.
//!
//! # Algorithm
//!
//! For each scheduled exam, in order:
//!
//! 1. Free proctors of the exam's department → least loaded.
//! 2. Free proctors of any department → least loaded.
//! 3. The course instructor, if not busy at the slot.
//! 4. Nobody: the exam stays without a proctor.
//!
//! "Free" means the slot is not in the proctor's busy set. Ties on load go
//! to the proctor listed first in the roster. A choice immediately bumps
//! the proctor's task count and marks the slot busy, so later exams see it.
//!
//! # Complexity
//! O(n * p) where n = exams and p = roster size.

use std::collections::{HashMap, HashSet};

use tracing::{debug, warn};

use crate::models::{
    AssignedExam, AssignmentTier, ExamRecord, ProctorRoster, ScheduledExam, Slot,
};

/// Running load of one proctor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProctorLoad {
    /// Proctor name.
    pub name: String,
    /// Exams assigned so far.
    pub tasks: u32,
    /// Slots already committed.
    pub busy: HashSet<Slot>,
}

impl ProctorLoad {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: 0,
            busy: HashSet::new(),
        }
    }

    /// Whether the proctor can take an exam at `slot`.
    #[inline]
    pub fn is_free(&self, slot: &Slot) -> bool {
        !self.busy.contains(slot)
    }
}

/// Load and busy slots of every proctor for one assignment run.
///
/// Roster proctors are seeded in roster order (each name once); anyone
/// else, typically an instructor, is appended on first assignment.
#[derive(Debug, Clone, Default)]
pub struct ProctorState {
    loads: Vec<ProctorLoad>,
    index: HashMap<String, usize>,
}

impl ProctorState {
    /// Empty state with no known proctors.
    pub fn new() -> Self {
        Self::default()
    }

    /// State with every roster proctor at zero load.
    pub fn from_roster(roster: &ProctorRoster) -> Self {
        let mut state = Self::new();
        for name in roster.proctors() {
            state.entry(name);
        }
        state
    }

    /// Load of `name`, if known.
    pub fn get(&self, name: &str) -> Option<&ProctorLoad> {
        self.index.get(name).map(|&i| &self.loads[i])
    }

    /// Task count of `name` (0 if unknown).
    pub fn tasks(&self, name: &str) -> u32 {
        self.get(name).map_or(0, |l| l.tasks)
    }

    /// Whether `name` is free at `slot`. Unknown people are free.
    pub fn is_free(&self, name: &str, slot: &Slot) -> bool {
        self.get(name).map_or(true, |l| l.is_free(slot))
    }

    /// Commits `name` to `slot`, creating the entry if needed.
    pub fn commit(&mut self, name: &str, slot: &Slot) {
        let load = self.entry(name);
        load.tasks += 1;
        load.busy.insert(slot.clone());
    }

    /// All known proctors in seeding order.
    pub fn loads(&self) -> &[ProctorLoad] {
        &self.loads
    }

    fn entry(&mut self, name: &str) -> &mut ProctorLoad {
        let i = match self.index.get(name) {
            Some(&i) => i,
            None => {
                self.loads.push(ProctorLoad::new(name));
                self.index.insert(name.to_string(), self.loads.len() - 1);
                self.loads.len() - 1
            }
        };
        &mut self.loads[i]
    }

    /// First least-loaded free proctor among `names`.
    fn least_loaded_free<'n>(
        &self,
        names: impl Iterator<Item = &'n str>,
        slot: &Slot,
    ) -> Option<&'n str> {
        names
            .filter(|name| self.is_free(name, slot))
            .min_by_key(|name| self.tasks(name))
    }
}

/// Proctor assigner over an immutable roster.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use exam_schedule::models::{ExamRecord, ProctorRoster, ScheduledExam, Slot, SlotOrigin};
/// use exam_schedule::proctoring::ProctorAssigner;
///
/// let roster = ProctorRoster::new().with_department("Physics", ["Ada", "Emmy"]);
/// let slot = Slot::new(NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(), "09:00");
/// let exam = |code: &str| {
///     ScheduledExam::new(
///         ExamRecord::new(code, code).with_department("Physics"),
///         slot.clone(),
///         SlotOrigin::Placed,
///     )
/// };
///
/// let assigned = ProctorAssigner::new(&roster).assign(vec![exam("PHY1"), exam("PHY2")]);
/// assert_eq!(assigned[0].proctor.as_deref(), Some("Ada"));
/// assert_eq!(assigned[1].proctor.as_deref(), Some("Emmy"));
/// ```
#[derive(Debug, Clone)]
pub struct ProctorAssigner<'a> {
    roster: &'a ProctorRoster,
}

impl<'a> ProctorAssigner<'a> {
    /// Creates an assigner over `roster`.
    pub fn new(roster: &'a ProctorRoster) -> Self {
        Self { roster }
    }

    /// Fresh state for a run over this roster.
    pub fn initial_state(&self) -> ProctorState {
        ProctorState::from_roster(self.roster)
    }

    /// Assigns a proctor to every exam, in order.
    pub fn assign(&self, exams: Vec<ScheduledExam>) -> Vec<AssignedExam> {
        let mut state = self.initial_state();
        exams
            .into_iter()
            .map(|exam| self.step(&mut state, exam))
            .collect()
    }

    /// Assigns one exam and commits the choice into `state`.
    pub fn step(&self, state: &mut ProctorState, scheduled: ScheduledExam) -> AssignedExam {
        let choice = self.choose(state, &scheduled.exam, &scheduled.slot);

        let (proctor, tier) = match choice {
            Some((name, tier)) => {
                state.commit(&name, &scheduled.slot);
                debug!(
                    course = %scheduled.exam.course_code,
                    slot = %scheduled.slot,
                    proctor = %name,
                    %tier,
                    "assigned proctor"
                );
                (Some(name), tier)
            }
            None => {
                warn!(
                    course = %scheduled.exam.course_code,
                    department = %scheduled.exam.department,
                    slot = %scheduled.slot,
                    "no proctor available"
                );
                (None, AssignmentTier::Unassigned)
            }
        };

        AssignedExam {
            scheduled,
            proctor,
            tier,
        }
    }

    /// Picks a proctor for `exam` at `slot` without touching `state`.
    pub fn choose(
        &self,
        state: &ProctorState,
        exam: &ExamRecord,
        slot: &Slot,
    ) -> Option<(String, AssignmentTier)> {
        let in_department = self.roster.candidates(&exam.department);
        if let Some(name) =
            state.least_loaded_free(in_department.iter().map(String::as_str), slot)
        {
            return Some((name.to_string(), AssignmentTier::InDepartment));
        }

        if let Some(name) = state.least_loaded_free(self.roster.proctors(), slot) {
            return Some((name.to_string(), AssignmentTier::AnyDepartment));
        }

        let instructor = exam.instructor.as_str();
        if !instructor.trim().is_empty() && state.is_free(instructor, slot) {
            return Some((instructor.to_string(), AssignmentTier::Instructor));
        }

        None
    }
}
