use anyhow::Context;
use clap::{Parser, ValueEnum};
use hrm::{
    Config, Directory, Employee,
    domain::{Department, EmploymentKind},
    strategy::SortKey,
};
use regex::Regex;
use tracing::instrument;

use super::{
    money,
    terminal::{self, Colorize},
};

/// Below this many columns the manager and type columns are dropped.
const NARROW_WIDTH: usize = 90;

/// Widest a text cell may grow before it is truncated.
const MAX_CELL: usize = 24;

/// Command arguments for `hrm list`.
#[derive(Debug, Parser)]
#[command(about = "List employees with optional sorting and filters")]
pub struct List {
    /// Sort order: `last-name` or `department` (default: insertion order).
    #[arg(long, value_name = "KEY")]
    sort: Option<SortKey>,

    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Only show employees in these departments (comma-separated codes,
    /// case-insensitive).
    #[arg(long, value_delimiter = ',', value_name = "CODE")]
    department: Vec<String>,

    /// Only show employees without a manager.
    #[arg(long)]
    roots: bool,

    /// Case-insensitive substring match against the full name.
    #[arg(long, conflicts_with = "regex")]
    contains: Option<String>,

    /// Regular expression match against the full name.
    #[arg(long)]
    regex: Option<String>,
}

/// Supported output formats.
#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Table columns, in display order.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Column {
    Id,
    Name,
    Department,
    Role,
    Manager,
    Kind,
    Pay,
}

struct Filters {
    departments: Vec<Department>,
    roots: bool,
    contains: Option<String>,
    regex: Option<Regex>,
}

impl List {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, mut directory: Directory, config: &Config) -> anyhow::Result<()> {
        if let Some(key) = self.sort {
            directory.set_sort_strategy(key.strategy());
        }

        let filters = Filters::new(&self, &directory)?;
        let employees: Vec<Employee> = directory
            .list_sorted()
            .into_iter()
            .filter(|employee| filters.matches(employee))
            .collect();

        match self.output {
            OutputFormat::Table => print_table(&employees, config),
            OutputFormat::Json => {
                serde_json::to_writer_pretty(std::io::stdout(), &employees)
                    .context("failed to render json output")?;
                println!();
            }
            OutputFormat::Csv => print_csv(&employees, config),
        }
        Ok(())
    }
}

impl Filters {
    fn new(cmd: &List, directory: &Directory) -> anyhow::Result<Self> {
        let regex = if let Some(pattern) = &cmd.regex {
            Some(Regex::new(pattern).with_context(|| format!("invalid regex: {pattern}"))?)
        } else {
            None
        };

        let departments = cmd
            .department
            .iter()
            .map(|code| directory.department(code).cloned())
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            departments,
            roots: cmd.roots,
            contains: cmd.contains.as_deref().map(str::to_lowercase),
            regex,
        })
    }

    fn matches(&self, employee: &Employee) -> bool {
        if !self.departments.is_empty() && !self.departments.contains(employee.department()) {
            return false;
        }

        if self.roots && employee.manager().is_some() {
            return false;
        }

        let name = employee.full_name();

        if let Some(search) = &self.contains {
            if !name.to_lowercase().contains(search) {
                return false;
            }
        }

        if let Some(regex) = &self.regex {
            if !regex.is_match(&name) {
                return false;
            }
        }

        true
    }
}

/// Prints employees as an aligned table.
pub fn print_table(employees: &[Employee], config: &Config) {
    if employees.is_empty() {
        println!("{}", "No employees.".dim());
        return;
    }

    let columns = Column::for_width(terminal::width());

    let data: Vec<Vec<String>> = employees
        .iter()
        .map(|employee| {
            columns
                .iter()
                .map(|column| terminal::truncate(&column.value(employee, config), MAX_CELL))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(idx, column)| {
            data.iter()
                .map(|row| row[idx].chars().count())
                .max()
                .unwrap_or(0)
                .max(column.header().len())
        })
        .collect();

    let header: Vec<String> = columns
        .iter()
        .zip(&widths)
        .map(|(column, width)| format!("{:<width$}", column.header()))
        .collect();
    println!("{}", header.join("  ").trim_end().heading());

    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    println!("{}", rule.join("  ").dim());

    for row in data {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(value, width)| pad(value, *width))
            .collect();
        println!("{}", cells.join("  ").trim_end());
    }
}

fn print_csv(employees: &[Employee], config: &Config) {
    let header: Vec<String> = Column::ALL
        .iter()
        .map(|column| csv_escape(column.header()))
        .collect();
    println!("{}", header.join(","));

    for employee in employees {
        let values: Vec<String> = Column::ALL
            .iter()
            .map(|column| csv_escape(&column.value(employee, config)))
            .collect();
        println!("{}", values.join(","));
    }
}

/// Left-aligns `value` in `width` characters.
fn pad(value: &str, width: usize) -> String {
    let fill = width.saturating_sub(value.chars().count());
    format!("{value}{}", " ".repeat(fill))
}

pub fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

impl Column {
    const ALL: [Self; 7] = [
        Self::Id,
        Self::Name,
        Self::Department,
        Self::Role,
        Self::Manager,
        Self::Kind,
        Self::Pay,
    ];

    const NARROW: [Self; 5] = [Self::Id, Self::Name, Self::Department, Self::Role, Self::Pay];

    fn for_width(width: usize) -> &'static [Self] {
        if width < NARROW_WIDTH {
            &Self::NARROW
        } else {
            &Self::ALL
        }
    }

    const fn header(self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::Name => "Name",
            Self::Department => "Department",
            Self::Role => "Role",
            Self::Manager => "Manager",
            Self::Kind => "Type",
            Self::Pay => "Pay",
        }
    }

    fn value(self, employee: &Employee, config: &Config) -> String {
        match self {
            Self::Id => employee.id().to_string(),
            Self::Name => employee.full_name(),
            Self::Department => employee.department().name().to_string(),
            Self::Role => employee.role().to_string(),
            Self::Manager => employee
                .manager()
                .map_or_else(String::new, ToString::to_string),
            Self::Kind => match employee.compensation().kind() {
                EmploymentKind::FullTime => "salaried".to_string(),
                EmploymentKind::PartTime => "hourly".to_string(),
            },
            Self::Pay => money(employee.pay(), config),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use hrm::{NewEmployee, Role};

    use super::*;

    fn employee(id: &str, first: &str, last: &str, code: &str) -> Employee {
        let directory = Directory::new();
        let department = directory.find_department(code).unwrap().clone();
        NewEmployee::new(id, first, last, department, Role::Developer)
            .salaried(50_000.0)
            .unwrap()
    }

    fn list(args: &[&str]) -> List {
        List::try_parse_from(std::iter::once("list").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn department_filter_is_case_insensitive() {
        let directory = Directory::new();
        let filters = Filters::new(&list(&["--department", "it,sales"]), &directory).unwrap();

        assert!(filters.matches(&employee("E1", "Alice", "Smith", "IT")));
        assert!(filters.matches(&employee("E2", "Bob", "Johnson", "SALES")));
        assert!(!filters.matches(&employee("E3", "Carol", "White", "HR")));
    }

    #[test]
    fn unknown_department_is_an_error() {
        let directory = Directory::new();
        assert!(Filters::new(&list(&["--department", "LEGAL"]), &directory).is_err());
    }

    #[test]
    fn contains_and_regex_match_full_name() {
        let directory = Directory::new();
        let alice = employee("E1", "Alice", "Smith", "IT");

        let contains = Filters::new(&list(&["--contains", "SMITH"]), &directory).unwrap();
        assert!(contains.matches(&alice));

        let regex = Filters::new(&list(&["--regex", "^Bob "]), &directory).unwrap();
        assert!(!regex.matches(&alice));
    }

    #[test]
    fn sort_key_is_parsed_from_flag() {
        assert_eq!(list(&["--sort", "department"]).sort, Some(SortKey::Department));
        assert!(List::try_parse_from(["list", "--sort", "salary"]).is_err());
    }

    #[test]
    fn narrow_terminals_drop_columns() {
        assert_eq!(Column::for_width(80).len(), 5);
        assert_eq!(Column::for_width(120), Column::ALL);
    }

    #[test]
    fn csv_values_with_commas_are_quoted() {
        assert_eq!(csv_escape("Smith, Jr."), "\"Smith, Jr.\"");
        assert_eq!(csv_escape("Smith"), "Smith");
    }
}
