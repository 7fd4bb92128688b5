use std::{fmt, str::FromStr};

use serde::Serialize;

/// The job role an employee holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Software developer.
    Developer,
    /// Quality assurance engineer.
    QaEngineer,
    /// Project manager.
    ProjectManager,
    /// Human resources specialist.
    HrSpecialist,
    /// Administrator.
    Administrator,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Developer,
        Self::QaEngineer,
        Self::ProjectManager,
        Self::HrSpecialist,
        Self::Administrator,
    ];

    /// The human-readable label, e.g. "QA Engineer".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Developer => "Developer",
            Self::QaEngineer => "QA Engineer",
            Self::ProjectManager => "Project Manager",
            Self::HrSpecialist => "HR Specialist",
            Self::Administrator => "Administrator",
        }
    }

    /// The constant form, e.g. `QA_ENGINEER`.
    #[must_use]
    pub const fn constant(self) -> &'static str {
        match self {
            Self::Developer => "DEVELOPER",
            Self::QaEngineer => "QA_ENGINEER",
            Self::ProjectManager => "PROJECT_MANAGER",
            Self::HrSpecialist => "HR_SPECIALIST",
            Self::Administrator => "ADMINISTRATOR",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleError;

    /// Parses either the label or the constant form, ignoring case, spaces,
    /// dashes and underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|role| role.constant().replace('_', "") == normalized)
            .ok_or_else(|| UnknownRoleError(s.to_string()))
    }
}

/// Error returned when a string does not name a known role.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error(
    "unknown role '{0}' (expected one of: Developer, QA Engineer, Project Manager, HR \
     Specialist, Administrator)"
)]
pub struct UnknownRoleError(pub String);
