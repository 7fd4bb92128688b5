use std::fmt;

use serde::Serialize;

/// Multiplier applied to a salaried employee's base salary.
pub const SALARIED_UPLIFT: f64 = 1.10;

/// How an employee is paid.
///
/// The variant is chosen when the employee is constructed and cannot change
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Compensation {
    /// Full-time employee on a fixed base salary.
    Salaried {
        /// Base salary before the uplift.
        base_salary: f64,
    },
    /// Part-time employee paid by the hour.
    Hourly {
        /// Pay per hour worked.
        hourly_rate: f64,
        /// Hours worked in the period.
        hours_worked: f64,
    },
}

impl Compensation {
    /// Effective pay for the period.
    ///
    /// Salaried pay is the base salary with a fixed 10% uplift; hourly pay is
    /// rate × hours.
    #[must_use]
    pub fn pay(&self) -> f64 {
        match *self {
            Self::Salaried { base_salary } => base_salary * SALARIED_UPLIFT,
            Self::Hourly {
                hourly_rate,
                hours_worked,
            } => hourly_rate * hours_worked,
        }
    }

    /// The employment kind this compensation belongs to.
    #[must_use]
    pub const fn kind(&self) -> EmploymentKind {
        match self {
            Self::Salaried { .. } => EmploymentKind::FullTime,
            Self::Hourly { .. } => EmploymentKind::PartTime,
        }
    }
}

/// The employment kind, as named on the command line and in the factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EmploymentKind {
    /// Salaried.
    FullTime,
    /// Hourly.
    PartTime,
}

impl EmploymentKind {
    /// Parses `FULLTIME` / `PARTTIME`, ignoring case and separators.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .map(|c| c.to_ascii_uppercase())
            .collect();
        match normalized.as_str() {
            "FULLTIME" | "SALARIED" => Some(Self::FullTime),
            "PARTTIME" | "HOURLY" => Some(Self::PartTime),
            _ => None,
        }
    }
}

impl fmt::Display for EmploymentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::FullTime => f.write_str("full-time"),
            Self::PartTime => f.write_str("part-time"),
        }
    }
}
