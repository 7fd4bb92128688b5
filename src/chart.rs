//! Hierarchical rendering of the reporting structure.

use std::fmt;

use serde::Serialize;

use crate::{
    Directory,
    domain::{Employee, EmployeeId, Role},
};

/// Spaces of indentation per level when none is configured.
pub const DEFAULT_INDENT: usize = 2;

/// One row of an [`OrgChart`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartLine {
    /// Distance from the root; roots are at depth 0.
    pub depth: usize,
    /// The employee's ID.
    pub id: EmployeeId,
    /// "First Last".
    pub name: String,
    /// The employee's role.
    pub role: Role,
}

/// A depth-first rendering of the reporting hierarchy.
///
/// Every employee without a manager starts a tree. Each employee appears once,
/// below their manager, and subordinates follow the order of the input slice.
///
/// Employees that cannot be reached from any root (their manager is not in the
/// input, or they sit on a reporting cycle) are not drawn. They are listed in
/// [`OrgChart::detached`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrgChart {
    lines: Vec<ChartLine>,
    detached: Vec<EmployeeId>,
    #[serde(skip)]
    indent: usize,
}

impl OrgChart {
    /// Builds the chart for a directory, in insertion order.
    #[must_use]
    pub fn new(directory: &Directory) -> Self {
        let employees: Vec<&Employee> = directory.iter().collect();
        Self::build(&employees)
    }

    /// Builds the chart for a list of employees, in the given order.
    ///
    /// Callers that want siblings ordered differently can sort the list first.
    #[must_use]
    pub fn from_employees(employees: &[Employee]) -> Self {
        let employees: Vec<&Employee> = employees.iter().collect();
        Self::build(&employees)
    }

    /// Sets the number of spaces per level used by [`fmt::Display`].
    #[must_use]
    pub const fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// The rendered rows, in display order.
    #[must_use]
    pub fn lines(&self) -> &[ChartLine] {
        &self.lines
    }

    /// Employees that are not reachable from any root.
    #[must_use]
    pub fn detached(&self) -> &[EmployeeId] {
        &self.detached
    }

    fn build(employees: &[&Employee]) -> Self {
        let mut visited = vec![false; employees.len()];
        let mut lines = Vec::with_capacity(employees.len());

        for (index, root) in employees.iter().enumerate() {
            if root.manager().is_none() {
                visit(employees, index, 0, &mut visited, &mut lines);
            }
        }

        let detached = employees
            .iter()
            .zip(&visited)
            .filter(|&(_, &seen)| !seen)
            .map(|(employee, _)| employee.id().clone())
            .collect();

        Self {
            lines,
            detached,
            indent: DEFAULT_INDENT,
        }
    }
}

fn visit(
    employees: &[&Employee],
    index: usize,
    depth: usize,
    visited: &mut [bool],
    lines: &mut Vec<ChartLine>,
) {
    if visited[index] {
        return;
    }
    visited[index] = true;

    let employee = employees[index];
    lines.push(ChartLine {
        depth,
        id: employee.id().clone(),
        name: employee.full_name(),
        role: employee.role(),
    });

    for (child, candidate) in employees.iter().enumerate() {
        if candidate.reports_to(employee.id()) {
            visit(employees, child, depth + 1, visited, lines);
        }
    }
}

impl fmt::Display for OrgChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(
                f,
                "{:width$}{} ({})",
                "",
                line.name,
                line.role,
                width = line.depth * self.indent
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Config, Department, NewEmployee};

    fn employee(id: &str, name: &str, manager: Option<&str>) -> Employee {
        let mut draft = NewEmployee::new(
            id,
            name,
            "Doe",
            Department::new("Human Resources", "HR-001"),
            Role::HrSpecialist,
        );
        draft.manager = manager.map(str::to_string);
        draft.salaried(40_000.0).unwrap()
    }

    fn small_org() -> Vec<Employee> {
        vec![
            employee("R", "Rita", None),
            employee("A", "Ann", Some("R")),
            employee("B", "Ben", Some("R")),
            employee("C", "Cal", Some("B")),
        ]
    }

    #[test]
    fn renders_depth_first_in_input_order() {
        let chart = OrgChart::from_employees(&small_org());

        let rows: Vec<_> = chart
            .lines()
            .iter()
            .map(|line| (line.id.as_str(), line.depth))
            .collect();
        assert_eq!(rows, [("R", 0), ("A", 1), ("B", 1), ("C", 2)]);
        assert!(chart.detached().is_empty());
    }

    #[test]
    fn display_indents_two_spaces_per_level() {
        let chart = OrgChart::from_employees(&small_org());
        assert_eq!(
            chart.to_string(),
            "Rita Doe (HR Specialist)\n  Ann Doe (HR Specialist)\n  Ben Doe (HR \
             Specialist)\n    Cal Doe (HR Specialist)\n"
        );
    }

    #[test]
    fn indent_is_configurable() {
        let chart = OrgChart::from_employees(&small_org()[..2]).with_indent(4);
        assert_eq!(
            chart.to_string(),
            "Rita Doe (HR Specialist)\n    Ann Doe (HR Specialist)\n"
        );
    }

    #[test]
    fn multiple_roots_each_start_a_tree() {
        let employees = vec![
            employee("X", "Xan", None),
            employee("Y", "Yul", None),
            employee("X1", "Xia", Some("X")),
        ];

        let ids: Vec<_> = OrgChart::from_employees(&employees)
            .lines()
            .iter()
            .map(|line| line.id.as_str().to_string())
            .collect();

        assert_eq!(ids, ["X", "X1", "Y"]);
    }

    #[test]
    fn unreachable_employees_are_detached() {
        let employees = vec![
            employee("R", "Rita", None),
            employee("O", "Otto", Some("GONE")),
            employee("P", "Pia", Some("Q")),
            employee("Q", "Quin", Some("P")),
        ];

        let chart = OrgChart::from_employees(&employees);

        assert_eq!(chart.lines().len(), 1);
        let detached: Vec<_> = chart.detached().iter().map(EmployeeId::as_str).collect();
        assert_eq!(detached, ["O", "P", "Q"]);
    }

    #[test]
    fn empty_directory_renders_nothing() {
        let directory = Directory::with_config(&Config::default());
        let chart = OrgChart::new(&directory);
        assert!(chart.lines().is_empty());
        assert_eq!(chart.to_string(), "");
    }
}
