//! Per-proctor workload statistics.
//!
//! Summarizes an assignment run: how many exams each proctor got and how
//! they spread over the time-of-day vocabulary.
//!
//! # Rows
//!
//! | Row | Order |
//! |-----|-------|
//! | Roster proctors (even with 0 exams) | roster order, each name once |
//! | Other people who proctored (instructors) | first assignment order |

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{AssignedExam, ProctorRoster, TimeSlots};

/// Workload of one proctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProctorStats {
    /// Proctor name.
    pub proctor: String,
    /// Roster department; empty for people outside the roster.
    pub department: String,
    /// Exams assigned, including any at times outside the vocabulary.
    pub total_tasks: u32,
    /// Exams per vocabulary slot, aligned with [`ProctorReport::time_slots`].
    pub per_slot: Vec<u32>,
}

impl ProctorStats {
    /// Count for the slot `label`, if it belongs to `time_slots`.
    pub fn count_at(&self, time_slots: &TimeSlots, label: &str) -> Option<u32> {
        time_slots
            .position(label)
            .and_then(|i| self.per_slot.get(i).copied())
    }
}

/// Workload table for an entire run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProctorReport {
    /// Column order of every row's `per_slot`.
    pub time_slots: TimeSlots,
    /// One row per proctor.
    pub rows: Vec<ProctorStats>,
}

impl ProctorReport {
    /// Builds the report from assigned exams.
    ///
    /// # Arguments
    /// * `exams` - The assignment output, in processing order.
    /// * `roster` - Source of the proctor rows and departments.
    /// * `time_slots` - Columns of the per-slot breakdown.
    pub fn calculate(exams: &[AssignedExam], roster: &ProctorRoster, time_slots: &TimeSlots) -> Self {
        let mut rows: Vec<ProctorStats> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        let mut row_for = |name: &str, rows: &mut Vec<ProctorStats>| -> usize {
            *index.entry(name.to_string()).or_insert_with(|| {
                rows.push(ProctorStats {
                    proctor: name.to_string(),
                    department: roster.department_of(name).unwrap_or_default().to_string(),
                    total_tasks: 0,
                    per_slot: vec![0; time_slots.len()],
                });
                rows.len() - 1
            })
        };

        for name in roster.proctors() {
            row_for(name, &mut rows);
        }

        for exam in exams {
            let Some(name) = exam.proctor.as_deref() else {
                continue;
            };
            let i = row_for(name, &mut rows);
            rows[i].total_tasks += 1;
            if let Some(col) = time_slots.position(&exam.slot().time) {
                rows[i].per_slot[col] += 1;
            }
        }

        Self {
            time_slots: time_slots.clone(),
            rows,
        }
    }

    /// Row for `proctor`, if present.
    pub fn get(&self, proctor: &str) -> Option<&ProctorStats> {
        self.rows.iter().find(|r| r.proctor == proctor)
    }

    /// Sum of all proctors' tasks.
    pub fn total_tasks(&self) -> u32 {
        self.rows.iter().map(|r| r.total_tasks).sum()
    }

    /// Largest minus smallest task count among roster proctors.
    ///
    /// A rough balance indicator; 0 when the roster is empty.
    pub fn load_spread(&self) -> u32 {
        let roster_rows = self.rows.iter().filter(|r| !r.department.is_empty());
        let (min, max) = roster_rows.fold((u32::MAX, 0), |(lo, hi), r| {
            (lo.min(r.total_tasks), hi.max(r.total_tasks))
        });
        max.saturating_sub(min.min(max))
    }
}

impl fmt::Display for ProctorReport {
    /// Plain-text table, one line per proctor.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .rows
            .iter()
            .map(|r| r.proctor.chars().count())
            .chain(std::iter::once("Proctor".len()))
            .max()
            .unwrap_or(0);
        let dept_width = self
            .rows
            .iter()
            .map(|r| r.department.chars().count())
            .chain(std::iter::once("Department".len()))
            .max()
            .unwrap_or(0);

        write!(f, "{:<name_width$}  {:<dept_width$}  {:>5}", "Proctor", "Department", "Total")?;
        for label in self.time_slots.iter() {
            write!(f, "  {label:>5}")?;
        }
        writeln!(f)?;

        for row in &self.rows {
            write!(
                f,
                "{:<name_width$}  {:<dept_width$}  {:>5}",
                row.proctor, row.department, row.total_tasks
            )?;
            for count in &row.per_slot {
                write!(f, "  {count:>5}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
