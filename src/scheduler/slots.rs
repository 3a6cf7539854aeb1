//! Sequential slot-packing scheduler.
//!
//! # Algorithm
//!
//! 1. Walk exams in input order; order alone decides placement.
//! 2. An exam with a fixed date passes through (missing time → first
//!    slot). It consumes no capacity and leaves the cursor alone.
//! 3. Otherwise, if the exam's class already has `max_exams_per_class_per_day`
//!    exams on the cursor's date, advance the cursor by exactly one slot
//!    (wrapping to the next day after the last slot).
//! 4. Place the exam at the cursor and count it against (class, placed date).
//!
//! The advance in step 3 is a single step and the count is not re-checked
//! afterwards, so a class over its daily limit still gets the next slot of
//! the same day. What the walk does guarantee is that no class ever gets
//! more than `max_exams_per_class_per_day` placed exams in one slot;
//! [`audit`](crate::validation::audit) re-checks that on the output.
//!
//! # Complexity
//! O(n) expected, n = number of exams.

use std::collections::HashMap;

use chrono::{Days, NaiveDate};
use tracing::debug;

use crate::config::PlannerConfig;
use crate::models::{ExamRecord, ScheduledExam, Slot, SlotOrigin, TimeSlots};

/// Position of the scheduler in the (date, slot) sequence.
///
/// Only ever moves forward during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SchedulingCursor {
    /// Current exam day.
    pub date: NaiveDate,
    /// Index into the time-slot vocabulary.
    pub slot_index: usize,
}

impl SchedulingCursor {
    /// Cursor at the first slot of `date`.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            slot_index: 0,
        }
    }

    /// Moves to the next slot, rolling over to the next day after the
    /// last one.
    pub fn advance(&mut self, slot_count: usize) {
        self.slot_index += 1;
        if self.slot_index >= slot_count {
            self.slot_index = 0;
            self.date = self
                .date
                .checked_add_days(Days::new(1))
                .unwrap_or(self.date);
        }
    }

    /// The slot under the cursor.
    pub fn slot(&self, time_slots: &TimeSlots) -> Slot {
        let time = time_slots
            .get(self.slot_index)
            .unwrap_or_else(|| time_slots.first());
        Slot::new(self.date, time)
    }
}

/// Exams placed per (class, date) during one run.
#[derive(Debug, Clone, Default)]
pub struct ClassDayLoad {
    counts: HashMap<(String, NaiveDate), u32>,
}

impl ClassDayLoad {
    /// Creates an empty load table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Exams already placed for `class` on `date`.
    pub fn get(&self, class: &str, date: NaiveDate) -> u32 {
        self.counts
            .get(&(class.to_string(), date))
            .copied()
            .unwrap_or(0)
    }

    /// Records one more exam for `class` on `date`.
    pub fn increment(&mut self, class: &str, date: NaiveDate) {
        *self.counts.entry((class.to_string(), date)).or_insert(0) += 1;
    }

    /// Number of (class, date) keys touched.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been placed yet.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Per-run scheduler state, threaded through each placement step.
#[derive(Debug, Clone)]
pub struct SchedulerState {
    /// Where the next placed exam goes (before any capacity advance).
    pub cursor: SchedulingCursor,
    /// Daily class load so far.
    pub load: ClassDayLoad,
}

impl SchedulerState {
    /// Fresh state at the start of `start_date`.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            cursor: SchedulingCursor::new(start_date),
            load: ClassDayLoad::new(),
        }
    }
}

/// Slot-packing scheduler.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use exam_schedule::config::PlannerConfig;
/// use exam_schedule::models::ExamRecord;
/// use exam_schedule::scheduler::SlotScheduler;
///
/// let start = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
/// let config = PlannerConfig::new(start);
/// let exams = vec![
///     ExamRecord::new("CS101", "CS101-A"),
///     ExamRecord::new("CS102", "CS101-A"),
/// ];
///
/// let scheduled = SlotScheduler::new(&config).schedule(exams);
/// assert_eq!(scheduled[0].slot.time, "09:00");
/// assert_eq!(scheduled[1].slot.time, "11:00");
/// ```
#[derive(Debug, Clone)]
pub struct SlotScheduler<'a> {
    config: &'a PlannerConfig,
}

impl<'a> SlotScheduler<'a> {
    /// Creates a scheduler over `config`.
    pub fn new(config: &'a PlannerConfig) -> Self {
        Self { config }
    }

    /// Schedules every exam, preserving input order and length.
    pub fn schedule(&self, exams: Vec<ExamRecord>) -> Vec<ScheduledExam> {
        let mut state = SchedulerState::new(self.config.start_date);
        exams
            .into_iter()
            .map(|exam| self.step(&mut state, exam))
            .collect()
    }

    /// Schedules one exam against `state`.
    pub fn step(&self, state: &mut SchedulerState, exam: ExamRecord) -> ScheduledExam {
        let time_slots = &self.config.time_slots;

        if let Some(date) = exam.exam_date {
            let time = exam
                .exam_time
                .clone()
                .unwrap_or_else(|| time_slots.first().to_string());
            return ScheduledExam::new(exam, Slot::new(date, time), SlotOrigin::Fixed);
        }

        let placed_today = state.load.get(&exam.class, state.cursor.date);
        if placed_today >= self.config.max_exams_per_class_per_day {
            state.cursor.advance(time_slots.len());
        }

        let slot = state.cursor.slot(time_slots);
        state.load.increment(&exam.class, slot.date);
        debug!(
            course = %exam.course_code,
            class = %exam.class,
            slot = %slot,
            "placed exam"
        );

        ScheduledExam::new(exam, slot, SlotOrigin::Placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};
    use std::collections::HashSet;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn config() -> PlannerConfig {
        PlannerConfig::new(ymd(2025, 6, 2))
    }

    #[test]
    fn test_cursor_advance_wraps_to_next_day() {
        let mut c = SchedulingCursor::new(ymd(2025, 6, 2));
        c.advance(3);
        assert_eq!((c.date, c.slot_index), (ymd(2025, 6, 2), 1));
        c.advance(3);
        c.advance(3);
        assert_eq!((c.date, c.slot_index), (ymd(2025, 6, 3), 0));
    }

    #[test]
    fn test_class_day_load() {
        let mut load = ClassDayLoad::new();
        assert!(load.is_empty());
        load.increment("A", ymd(2025, 6, 2));
        load.increment("A", ymd(2025, 6, 2));
        load.increment("B", ymd(2025, 6, 2));
        assert_eq!(load.get("A", ymd(2025, 6, 2)), 2);
        assert_eq!(load.get("B", ymd(2025, 6, 2)), 1);
        assert_eq!(load.get("A", ymd(2025, 6, 3)), 0);
        assert_eq!(load.len(), 2);
    }

    #[test]
    fn test_same_class_gets_different_slots() {
        let cfg = config();
        let out = SlotScheduler::new(&cfg).schedule(vec![
            ExamRecord::new("CS101", "CS101-A"),
            ExamRecord::new("CS102", "CS101-A"),
        ]);
        assert_eq!(out.len(), 2);
        assert_ne!(out[0].slot, out[1].slot);
        assert_eq!(out[0].slot, Slot::new(ymd(2025, 6, 2), "09:00"));
        assert_eq!(out[1].slot, Slot::new(ymd(2025, 6, 2), "11:00"));
    }

    #[test]
    fn test_different_classes_share_slot() {
        let cfg = config();
        let out = SlotScheduler::new(&cfg).schedule(vec![
            ExamRecord::new("CS101", "A"),
            ExamRecord::new("EE101", "B"),
        ]);
        assert_eq!(out[0].slot, out[1].slot);
    }

    #[test]
    fn test_fixed_date_passes_through() {
        let cfg = config();
        let fixed = ymd(2025, 3, 15);
        let out = SlotScheduler::new(&cfg).schedule(vec![
            ExamRecord::new("CS101", "A").with_date(fixed),
            ExamRecord::new("CS102", "A").with_date(fixed).with_time("15:00"),
            ExamRecord::new("CS103", "A"),
        ]);

        assert_eq!(out[0].slot, Slot::new(fixed, "09:00"));
        assert_eq!(out[0].origin, SlotOrigin::Fixed);
        assert_eq!(out[1].slot, Slot::new(fixed, "15:00"));
        // Fixed exams neither consume capacity nor move the cursor.
        assert_eq!(out[2].slot, Slot::new(ymd(2025, 6, 2), "09:00"));
        assert_eq!(out[2].origin, SlotOrigin::Placed);
    }

    #[test]
    fn test_fixed_time_outside_vocabulary_kept() {
        let cfg = config();
        let out = SlotScheduler::new(&cfg).schedule(vec![ExamRecord::new("CS101", "A")
            .with_date(ymd(2025, 3, 15))
            .with_time("10:30")]);
        assert_eq!(out[0].slot.time, "10:30");
    }

    #[test]
    fn test_day_rollover_after_last_slot() {
        let cfg = config();
        let exams = (0..8).map(|i| ExamRecord::new(format!("C{i}"), "A")).collect();
        let out = SlotScheduler::new(&cfg).schedule(exams);

        assert_eq!(out[6].slot, Slot::new(ymd(2025, 6, 2), "21:00"));
        assert_eq!(out[7].slot, Slot::new(ymd(2025, 6, 3), "09:00"));
    }

    #[test]
    fn test_single_step_advance_is_not_a_loop() {
        // Class A is over its limit after A1, yet one advance within the
        // day is all it takes to place A2 and A3 on day one.
        let cfg = config();
        let out = SlotScheduler::new(&cfg).schedule(vec![
            ExamRecord::new("A1", "A"),
            ExamRecord::new("A2", "A"),
            ExamRecord::new("B1", "B"),
            ExamRecord::new("A3", "A"),
        ]);
        assert_eq!(out[1].slot, Slot::new(ymd(2025, 6, 2), "11:00"));
        assert_eq!(out[2].slot, Slot::new(ymd(2025, 6, 2), "11:00"));
        assert_eq!(out[3].slot, Slot::new(ymd(2025, 6, 2), "13:00"));
    }

    #[test]
    fn test_higher_daily_capacity() {
        let cfg = config().with_max_exams_per_class_per_day(2);
        let out = SlotScheduler::new(&cfg).schedule(vec![
            ExamRecord::new("A1", "A"),
            ExamRecord::new("A2", "A"),
            ExamRecord::new("A3", "A"),
        ]);
        assert_eq!(out[0].slot.time, "09:00");
        assert_eq!(out[1].slot.time, "09:00");
        assert_eq!(out[2].slot.time, "11:00");
    }

    #[test]
    fn test_empty_class_is_a_grouping_key() {
        let cfg = config();
        let out = SlotScheduler::new(&cfg)
            .schedule(vec![ExamRecord::new("X", ""), ExamRecord::new("Y", "")]);
        assert_ne!(out[0].slot, out[1].slot);
    }

    #[test]
    fn test_empty_input() {
        let cfg = config();
        assert!(SlotScheduler::new(&cfg).schedule(Vec::new()).is_empty());
    }

    #[test]
    fn test_randomized_invariants() {
        let cfg = config();
        let mut rng = SmallRng::seed_from_u64(7);

        for _ in 0..50 {
            let n = rng.random_range(1..40);
            let exams: Vec<ExamRecord> = (0..n)
                .map(|i| {
                    let class = format!("K{}", rng.random_range(0..4));
                    let exam = ExamRecord::new(format!("E{i}"), class);
                    if rng.random_bool(0.2) {
                        exam.with_date(ymd(2025, 1, 1))
                    } else {
                        exam
                    }
                })
                .collect();

            let out = SlotScheduler::new(&cfg).schedule(exams.clone());
            assert_eq!(out.len(), exams.len());

            let mut last: Option<(NaiveDate, usize)> = None;
            for (input, s) in exams.iter().zip(&out) {
                assert_eq!(input.course_code, s.exam.course_code);
                match input.exam_date {
                    Some(d) => {
                        assert_eq!(s.slot.date, d);
                        assert_eq!(s.slot.time, "09:00");
                    }
                    None => {
                        let pos = (s.slot.date, cfg.time_slots.position(&s.slot.time).unwrap());
                        if let Some(prev) = last {
                            assert!(pos >= prev, "cursor moved backwards");
                        }
                        last = Some(pos);
                    }
                }
            }
        }
    }

    #[test]
    fn test_class_never_reuses_a_slot() {
        let cfg = config();
        let mut rng = SmallRng::seed_from_u64(11);

        for _ in 0..30 {
            let exams: Vec<ExamRecord> = (0..rng.random_range(1..60))
                .map(|i| ExamRecord::new(format!("E{i}"), format!("K{}", rng.random_range(0..5))))
                .collect();

            let out = SlotScheduler::new(&cfg).schedule(exams);
            let mut seen = HashSet::new();
            for s in &out {
                assert!(
                    seen.insert((s.exam.class.clone(), s.slot.clone())),
                    "class {} placed twice at {}",
                    s.exam.class,
                    s.slot
                );
            }
        }
    }
}
