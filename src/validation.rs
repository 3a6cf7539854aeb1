//! Input validation and output audit.
//!
//! Checks the static inputs of a run before scheduling:
//! - Duplicate or blank department names
//! - Blank proctor names, proctors listed in several departments
//! - A zero per-class daily limit, repeated time-slot labels
//!
//! and re-checks the invariants of a finished run:
//! - No proctor sits two exams at the same slot
//! - No class exceeds its limit within one placed slot
//!
//! Validation problems are returned all at once. Audit findings are
//! warnings for the operator; the run still produces its outputs.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::config::PlannerConfig;
use crate::models::{AssignedExam, ProctorRoster, Slot};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two departments share a name.
    DuplicateDepartment,
    /// A department or proctor name is blank.
    BlankName,
    /// A proctor appears under more than one department.
    SharedProctor,
    /// The per-class daily limit is zero, so every placement advances.
    ZeroCapacity,
    /// A time-slot label appears twice.
    DuplicateTimeSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates roster structure.
///
/// Shared proctors are tolerated by the assigner (the first department
/// wins for statistics) but usually indicate a copy-paste mistake.
pub fn validate_roster(roster: &ProctorRoster) -> ValidationResult {
    let mut errors = Vec::new();
    let mut departments = HashSet::new();
    let mut owner: HashMap<&str, &str> = HashMap::new();

    for dept in roster.departments() {
        if dept.name.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::BlankName,
                "Department with blank name",
            ));
        }
        if !departments.insert(dept.name.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateDepartment,
                format!("Duplicate department: {}", dept.name),
            ));
        }

        for proctor in &dept.proctors {
            if proctor.trim().is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::BlankName,
                    format!("Blank proctor name in department '{}'", dept.name),
                ));
                continue;
            }
            match owner.get(proctor.as_str()) {
                Some(&first) if first != dept.name => {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::SharedProctor,
                        format!(
                            "Proctor '{}' listed in both '{}' and '{}'",
                            proctor, first, dept.name
                        ),
                    ));
                }
                Some(_) => {}
                None => {
                    owner.insert(proctor, &dept.name);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates planner parameters.
pub fn validate_config(config: &PlannerConfig) -> ValidationResult {
    let mut errors = Vec::new();

    if config.max_exams_per_class_per_day == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::ZeroCapacity,
            "max_exams_per_class_per_day is 0; every placed exam advances the cursor",
        ));
    }

    let mut seen = HashSet::new();
    for label in config.time_slots.iter() {
        if !seen.insert(label) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateTimeSlot,
                format!("Duplicate time slot: {label}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// A problem found in a finished run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Type of violation.
    pub violation_type: ViolationType,
    /// Proctor or class concerned.
    pub entity_id: String,
    /// Slot concerned.
    pub slot: Slot,
    /// Human-readable description.
    pub message: String,
}

/// Classification of audit findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// One person proctors two exams at the same slot.
    DoubleBooked,
    /// A class has more placed exams in one slot than its daily limit.
    ClassSlotOverload,
}

/// Audits assignment output.
///
/// Fixed-date exams are excluded from the class check: the scheduler
/// passes them through untouched.
pub fn audit(exams: &[AssignedExam], config: &PlannerConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    let mut proctor_slots: HashSet<(&str, &Slot)> = HashSet::new();
    for exam in exams {
        if let Some(proctor) = exam.proctor.as_deref() {
            if !proctor_slots.insert((proctor, exam.slot())) {
                violations.push(Violation {
                    violation_type: ViolationType::DoubleBooked,
                    entity_id: proctor.to_string(),
                    slot: exam.slot().clone(),
                    message: format!("{proctor} proctors two exams at {}", exam.slot()),
                });
            }
        }
    }

    let mut class_slots: HashMap<(&str, &Slot), u32> = HashMap::new();
    for exam in exams.iter().filter(|e| e.scheduled.is_placed()) {
        let count = class_slots
            .entry((exam.exam().class.as_str(), exam.slot()))
            .or_insert(0);
        *count += 1;
        if *count == config.max_exams_per_class_per_day.saturating_add(1) {
            violations.push(Violation {
                violation_type: ViolationType::ClassSlotOverload,
                entity_id: exam.exam().class.clone(),
                slot: exam.slot().clone(),
                message: format!(
                    "class '{}' has more than {} exams at {}",
                    exam.exam().class,
                    config.max_exams_per_class_per_day,
                    exam.slot()
                ),
            });
        }
    }

    violations
}
