//! Departments and the fixed registry they are looked up in.

use std::fmt;

use serde::Serialize;

/// A department within the organization.
///
/// Departments are immutable values. Employees hold their own copy, so a
/// department never needs to be resolved through the registry again once
/// assigned.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Department {
    name: String,
    id: String,
}

impl Department {
    /// Creates a department from its display name and identifier.
    #[must_use]
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    /// The display name, e.g. "Human Resources".
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The identifier, e.g. `HR-001`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}

/// The fixed set of departments, keyed by short code.
///
/// The registry is seeded once and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentRegistry {
    entries: Vec<(&'static str, Department)>,
}

impl Default for DepartmentRegistry {
    fn default() -> Self {
        Self {
            entries: vec![
                ("HR", Department::new("Human Resources", "HR-001")),
                ("IT", Department::new("Information Technology", "IT-001")),
                ("SALES", Department::new("Sales", "SALES-001")),
            ],
        }
    }
}

impl DepartmentRegistry {
    /// Looks up a department by its short code, ignoring case.
    #[must_use]
    pub fn find(&self, code: &str) -> Option<&Department> {
        let code = code.trim();
        self.entries
            .iter()
            .find(|(known, _)| known.eq_ignore_ascii_case(code))
            .map(|(_, department)| department)
    }

    /// The registered short codes, in registration order.
    pub fn codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(code, _)| *code)
    }

    /// Iterates over `(code, department)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Department)> + '_ {
        self.entries
            .iter()
            .map(|(code, department)| (*code, department))
    }
}
