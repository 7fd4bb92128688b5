use std::{fmt, str::FromStr};

use crate::domain::Employee;

/// A total order over employees, applied when listing.
///
/// Implementations sort in place and must be stable: employees that compare
/// equal keep their relative input order. Callers that need the unsorted order
/// should sort a copy.
pub trait SortStrategy {
    /// A short name used in logs and headings.
    fn name(&self) -> &'static str;

    /// Sorts the employees in place.
    fn sort(&self, employees: &mut [Employee]);
}

/// Orders employees by last name, ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByLastName;

impl SortStrategy for ByLastName {
    fn name(&self) -> &'static str {
        "last name"
    }

    fn sort(&self, employees: &mut [Employee]) {
        employees.sort_by(|a, b| a.last_name().cmp(b.last_name()));
    }
}

/// Orders employees by department name, ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByDepartment;

impl SortStrategy for ByDepartment {
    fn name(&self) -> &'static str {
        "department"
    }

    fn sort(&self, employees: &mut [Employee]) {
        employees.sort_by(|a, b| a.department().name().cmp(b.department().name()));
    }
}

/// Names a built-in sort strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// [`ByLastName`].
    LastName,
    /// [`ByDepartment`].
    Department,
}

impl SortKey {
    /// Returns the strategy for this key.
    #[must_use]
    pub fn strategy(self) -> Box<dyn SortStrategy> {
        match self {
            Self::LastName => Box::new(ByLastName),
            Self::Department => Box::new(ByDepartment),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastName => f.write_str("last-name"),
            Self::Department => f.write_str("department"),
        }
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "last-name" | "lastname" | "name" => Ok(Self::LastName),
            "department" | "dept" => Ok(Self::Department),
            other => Err(format!(
                "unknown sort key '{other}' (expected 'last-name' or 'department')"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Department, NewEmployee, Role};

    fn employee(id: &str, last_name: &str, department: &str) -> Employee {
        NewEmployee::new(id, "First", last_name, Department::new(department, "X-001"), Role::Developer)
            .salaried(50_000.0)
            .unwrap()
    }

    fn ids(employees: &[Employee]) -> Vec<&str> {
        employees.iter().map(|e| e.id().as_str()).collect()
    }

    #[test]
    fn by_last_name_is_stable() {
        let mut employees = vec![
            employee("E1", "White", "HR"),
            employee("E2", "Smith", "IT"),
            employee("E3", "Smith", "Sales"),
        ];

        ByLastName.sort(&mut employees);

        assert_eq!(ids(&employees), ["E2", "E3", "E1"]);
    }

    #[test]
    fn by_department_groups_departments_in_order() {
        let mut employees = vec![
            employee("E1", "Man", "Sales"),
            employee("E2", "Smith", "Information Technology"),
            employee("E3", "Johnson", "Sales"),
            employee("E4", "White", "Human Resources"),
            employee("E5", "Black", "Information Technology"),
        ];

        ByDepartment.sort(&mut employees);

        assert_eq!(ids(&employees), ["E4", "E2", "E5", "E1", "E3"]);
    }

    #[test]
    fn sort_key_parses_and_selects_strategy() {
        assert_eq!("last_name".parse::<SortKey>().unwrap(), SortKey::LastName);
        assert_eq!("Dept".parse::<SortKey>().unwrap(), SortKey::Department);
        assert!("salary".parse::<SortKey>().is_err());
        assert_eq!(SortKey::Department.strategy().name(), "department");
    }
}
