//! Proctor roster model.
//!
//! Maps each department to the ordered list of assistants who may proctor
//! its exams. Order matters: when several free proctors carry the same
//! workload, the one listed first wins, so the roster is an ordered
//! sequence rather than a hash map.

use serde::{Deserialize, Serialize};

/// A department and its eligible proctors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    /// Department name, matched exactly against [`ExamRecord::department`].
    ///
    /// [`ExamRecord::department`]: crate::models::ExamRecord::department
    pub name: String,
    /// Proctors in tie-break order.
    #[serde(default)]
    pub proctors: Vec<String>,
}

impl Department {
    /// Creates a department with its proctors.
    pub fn new<I, S>(name: impl Into<String>, proctors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            proctors: proctors.into_iter().map(Into::into).collect(),
        }
    }
}

/// Immutable department → proctors lookup.
///
/// Built once before a run and shared read-only by every stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProctorRoster {
    #[serde(default)]
    departments: Vec<Department>,
}

impl ProctorRoster {
    /// Creates an empty roster.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a department.
    pub fn with_department<I, S>(mut self, name: impl Into<String>, proctors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.departments.push(Department::new(name, proctors));
        self
    }

    /// Departments in roster order.
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    /// Eligible proctors for a department. Unknown departments yield an
    /// empty slice.
    pub fn candidates(&self, department: &str) -> &[String] {
        self.departments
            .iter()
            .find(|d| d.name == department)
            .map(|d| d.proctors.as_slice())
            .unwrap_or(&[])
    }

    /// Every proctor, department by department, in roster order.
    pub fn proctors(&self) -> impl Iterator<Item = &str> {
        self.departments
            .iter()
            .flat_map(|d| d.proctors.iter().map(String::as_str))
    }

    /// Department listing `proctor`, first match in roster order.
    pub fn department_of(&self, proctor: &str) -> Option<&str> {
        self.departments
            .iter()
            .find(|d| d.proctors.iter().any(|p| p == proctor))
            .map(|d| d.name.as_str())
    }

    /// Whether `name` appears anywhere in the roster.
    pub fn contains(&self, name: &str) -> bool {
        self.department_of(name).is_some()
    }

    /// Number of listed proctors (duplicates counted).
    pub fn proctor_count(&self) -> usize {
        self.departments.iter().map(|d| d.proctors.len()).sum()
    }

    /// Whether no proctor is listed at all.
    pub fn is_empty(&self) -> bool {
        self.proctor_count() == 0
    }
}
