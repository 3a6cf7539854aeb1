//! Error types for the I/O and configuration layers.
//!
//! The scheduling core itself never fails: bad cells are coerced to
//! defaults and an exam without a proctor is a regular outcome. Only
//! reading inputs, parsing settings and writing outputs produce errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised outside the scheduling core.
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("csv error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid roster file {path}: {source}")]
    Roster {
        path: PathBuf,
        #[source]
        source: Box<toml::de::Error>,
    },

    #[error("invalid value for {name}: {value:?}")]
    InvalidSetting { name: &'static str, value: String },

    #[error("time slot vocabulary must not be empty")]
    EmptyTimeSlots,

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

impl PlannerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PlannerError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        PlannerError::Csv {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for fallible plumbing operations.
pub type Result<T> = std::result::Result<T, PlannerError>;
