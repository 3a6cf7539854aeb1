//! Run configuration.
//!
//! [`PlannerConfig`] is the immutable parameter set handed to the
//! scheduler and assigner. [`Settings`] is the process-level view read
//! from the environment by the binary: file locations plus the values
//! used to build a `PlannerConfig`.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};
use crate::models::TimeSlots;
use crate::normalize::parse_day_first;

/// Default per-class daily exam limit.
pub const DEFAULT_MAX_EXAMS_PER_CLASS_PER_DAY: u32 = 1;

/// Parameters of one scheduling run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// First exam day; also the fallback for unparseable dates.
    pub start_date: NaiveDate,
    /// Time-of-day vocabulary, in walking order.
    pub time_slots: TimeSlots,
    /// Exams a class may sit on one day before the cursor moves on.
    pub max_exams_per_class_per_day: u32,
}

impl PlannerConfig {
    /// Creates a config starting on `start_date` with default slots and
    /// capacity.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            time_slots: TimeSlots::default(),
            max_exams_per_class_per_day: DEFAULT_MAX_EXAMS_PER_CLASS_PER_DAY,
        }
    }

    /// Sets the time-slot vocabulary.
    pub fn with_time_slots(mut self, time_slots: TimeSlots) -> Self {
        self.time_slots = time_slots;
        self
    }

    /// Sets the per-class daily limit.
    pub fn with_max_exams_per_class_per_day(mut self, max: u32) -> Self {
        self.max_exams_per_class_per_day = max;
        self
    }
}

impl Default for PlannerConfig {
    /// Starts today.
    fn default() -> Self {
        Self::new(Local::now().date_naive())
    }
}

/// Process settings read from environment variables.
///
/// | Variable | Default |
/// |----------|---------|
/// | `INPUT_CSV` | `sample_final.csv` |
/// | `OUTPUT_CSV` | `scheduled_exams.csv` |
/// | `OUTPUT_STATS_CSV` | `proctor_stats.csv` |
/// | `ROSTER_TOML` | `roster.toml` |
/// | `EXAM_START_DATE` | today |
/// | `EXAM_TIME_SLOTS` | `09:00,11:00,...,21:00` |
/// | `MAX_EXAMS_PER_CLASS_PER_DAY` | `1` |
#[derive(Debug, Clone)]
pub struct Settings {
    /// Exam table to read.
    pub input_csv: PathBuf,
    /// Destination of the scheduled exam table.
    pub output_csv: PathBuf,
    /// Destination of the per-proctor statistics table.
    pub output_stats_csv: PathBuf,
    /// Roster file. A missing file means an empty roster.
    pub roster_toml: PathBuf,
    /// Planner parameters.
    pub planner: PlannerConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            input_csv: PathBuf::from("sample_final.csv"),
            output_csv: PathBuf::from("scheduled_exams.csv"),
            output_stats_csv: PathBuf::from("proctor_stats.csv"),
            roster_toml: PathBuf::from("roster.toml"),
            planner: PlannerConfig::default(),
        }
    }
}

impl Settings {
    /// Reads settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which returns the value of a
    /// variable if set. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let default = Self::default();

        let start_date = match get("EXAM_START_DATE") {
            Some(v) => parse_day_first(&v).ok_or(PlannerError::InvalidSetting {
                name: "EXAM_START_DATE",
                value: v,
            })?,
            None => default.planner.start_date,
        };

        let time_slots = match get("EXAM_TIME_SLOTS") {
            Some(v) => TimeSlots::parse_list(&v)?,
            None => default.planner.time_slots,
        };

        let max_per_day = match get("MAX_EXAMS_PER_CLASS_PER_DAY") {
            Some(v) => v
                .trim()
                .parse::<u32>()
                .map_err(|_| PlannerError::InvalidSetting {
                    name: "MAX_EXAMS_PER_CLASS_PER_DAY",
                    value: v,
                })?,
            None => default.planner.max_exams_per_class_per_day,
        };

        Ok(Self {
            input_csv: get("INPUT_CSV").map(PathBuf::from).unwrap_or(default.input_csv),
            output_csv: get("OUTPUT_CSV").map(PathBuf::from).unwrap_or(default.output_csv),
            output_stats_csv: get("OUTPUT_STATS_CSV")
                .map(PathBuf::from)
                .unwrap_or(default.output_stats_csv),
            roster_toml: get("ROSTER_TOML").map(PathBuf::from).unwrap_or(default.roster_toml),
            planner: PlannerConfig::new(start_date)
                .with_time_slots(time_slots)
                .with_max_exams_per_class_per_day(max_per_day),
        })
    }
}
