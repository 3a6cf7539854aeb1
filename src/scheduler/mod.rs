//! Exam slot scheduling.
//!
//! Places exams without a fixed date into a forward-only sequence of
//! (date, time) slots, limited per class and day.
//!
//! # Algorithm
//!
//! `SlotScheduler` is a greedy, order-driven, single-pass packer. It never
//! backtracks and never looks at rooms or students; it is a fast baseline,
//! not an optimizer.

mod slots;

pub use slots::{ClassDayLoad, SchedulerState, SchedulingCursor, SlotScheduler};
