//! Time-slot vocabulary and slot model.
//!
//! An exam session is identified by a calendar date and one time-of-day
//! label drawn from a fixed, ordered vocabulary. The vocabulary order is
//! also the order in which the scheduler walks through a day.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Default exam start times, in walking order.
pub const DEFAULT_TIME_SLOTS: [&str; 7] = [
    "09:00", "11:00", "13:00", "15:00", "17:00", "19:00", "21:00",
];

/// Ordered, non-empty vocabulary of exam start times.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TimeSlots {
    labels: Vec<String>,
}

impl TimeSlots {
    /// Creates a vocabulary from labels. Labels are trimmed; blank ones
    /// are dropped.
    ///
    /// # Errors
    /// [`PlannerError::EmptyTimeSlots`] when nothing usable remains.
    pub fn new<I, S>(labels: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let labels: Vec<String> = labels
            .into_iter()
            .map(|l| l.as_ref().trim().to_string())
            .filter(|l| !l.is_empty())
            .collect();

        if labels.is_empty() {
            return Err(PlannerError::EmptyTimeSlots);
        }
        Ok(Self { labels })
    }

    /// Parses a comma-separated list such as `"09:00,13:00,17:00"`.
    pub fn parse_list(list: &str) -> Result<Self> {
        Self::new(list.split(','))
    }

    /// The first label of the day. Missing times on fixed-date exams
    /// default to it.
    #[inline]
    pub fn first(&self) -> &str {
        &self.labels[0]
    }

    /// Label at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Position of `label` in the vocabulary.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Number of labels (always at least one).
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Always `false`; kept for API symmetry with collections.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates labels in vocabulary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }
}

impl Default for TimeSlots {
    fn default() -> Self {
        Self {
            labels: DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for TimeSlots {
    type Error = PlannerError;

    fn try_from(labels: Vec<String>) -> Result<Self> {
        Self::new(labels)
    }
}

impl From<TimeSlots> for Vec<String> {
    fn from(slots: TimeSlots) -> Self {
        slots.labels
    }
}

/// A (date, time-of-day) pair at which an exam takes place.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    /// Exam day.
    pub date: NaiveDate,
    /// Start time label.
    pub time: String,
}

impl Slot {
    /// Creates a slot.
    pub fn new(date: NaiveDate, time: impl Into<String>) -> Self {
        Self {
            date,
            time: time.into(),
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.date.format("%Y-%m-%d"), self.time)
    }
}
