//! Interactive console menu

use clap::Parser;
use dialoguer::{Input, Select};
use hrm::{
    Config, Department, Directory, EmployeeId, EmployeeUpdate, ManagerUpdate, NewEmployee, Role,
    notifier::listeners::{ItProvisioning, Payroll},
    strategy::SortKey,
};

use super::{chart, list, payroll, report_failures, terminal::Colorize};

/// Command arguments for `hrm menu`.
#[derive(Debug, Default, Parser)]
pub struct Menu {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    List,
    Add,
    Update,
    Delete,
    Calculate,
    SortByLastName,
    SortByDepartment,
    Chart,
    Exit,
}

impl Action {
    const ALL: [Self; 9] = [
        Self::List,
        Self::Add,
        Self::Update,
        Self::Delete,
        Self::Calculate,
        Self::SortByLastName,
        Self::SortByDepartment,
        Self::Chart,
        Self::Exit,
    ];

    const fn label(self) -> &'static str {
        match self {
            Self::List => "List employees",
            Self::Add => "Add employee",
            Self::Update => "Update employee",
            Self::Delete => "Delete employee",
            Self::Calculate => "Calculate all salaries",
            Self::SortByLastName => "Sort by last name",
            Self::SortByDepartment => "Sort by department",
            Self::Chart => "Print organization chart",
            Self::Exit => "Exit",
        }
    }
}

impl Menu {
    pub fn run(self, mut directory: Directory, config: &Config) -> anyhow::Result<()> {
        directory.subscribe(ItProvisioning::stdout());
        directory.subscribe(Payroll::stdout());

        let items: Vec<&str> = Action::ALL.iter().map(|action| action.label()).collect();

        loop {
            let selection = Select::new()
                .with_prompt("HR directory")
                .items(&items)
                .default(0)
                .interact()?;

            let action = Action::ALL[selection];
            if action == Action::Exit {
                return Ok(());
            }

            if let Err(error) = perform(action, &mut directory, config) {
                println!("{}", format!("Error: {error:#}").warning());
            }
        }
    }
}

fn perform(action: Action, directory: &mut Directory, config: &Config) -> anyhow::Result<()> {
    match action {
        Action::List => list::print_table(&directory.list_all(), config),
        Action::Add => add(directory)?,
        Action::Update => update(directory)?,
        Action::Delete => {
            let id: String = Input::new().with_prompt("Employee ID").interact_text()?;
            let termination = directory.remove(&id)?;
            report_failures(&termination.report);
            println!(
                "{}",
                format!("Removed {}", termination.employee.full_name()).success()
            );
        }
        Action::Calculate => payroll::print(&directory.payroll()?, config),
        Action::SortByLastName | Action::SortByDepartment => {
            let key = if action == Action::SortByLastName {
                SortKey::LastName
            } else {
                SortKey::Department
            };
            directory.set_sort_strategy(key.strategy());
            list::print_table(&directory.list_sorted(), config);
        }
        Action::Chart => {
            chart::print(&hrm::OrgChart::new(directory).with_indent(config.chart_indent()));
        }
        Action::Exit => {}
    }
    Ok(())
}

fn add(directory: &mut Directory) -> anyhow::Result<()> {
    let id: String = Input::new().with_prompt("Employee ID").interact_text()?;
    let first_name: String = Input::new().with_prompt("First name").interact_text()?;
    let last_name: String = Input::new().with_prompt("Last name").interact_text()?;
    let department = select_department(directory, "Department", false)?
        .ok_or_else(|| anyhow::anyhow!("a department is required"))?;
    let role = select_role("Role", false)?.ok_or_else(|| anyhow::anyhow!("a role is required"))?;
    let manager: String = Input::new()
        .with_prompt("Manager ID (empty for none)")
        .allow_empty(true)
        .interact_text()?;

    let types = ["FULLTIME", "PARTTIME"];
    let employment_type = types[Select::new()
        .with_prompt("Employment type")
        .items(&types)
        .default(0)
        .interact()?];

    let params = if employment_type == "FULLTIME" {
        vec![Input::<f64>::new().with_prompt("Base salary").interact_text()?]
    } else {
        vec![
            Input::<f64>::new().with_prompt("Hourly rate").interact_text()?,
            Input::<f64>::new().with_prompt("Hours worked").interact_text()?,
        ]
    };

    let employee = NewEmployee::new(id, first_name, last_name, department, role)
        .reporting_to(manager)
        .with_employment_type(employment_type, &params)?;
    let name = employee.full_name();

    let report = directory.add(employee)?;
    report_failures(&report);
    println!("{}", format!("Added {name}").success());
    Ok(())
}

fn update(directory: &mut Directory) -> anyhow::Result<()> {
    let id: String = Input::new().with_prompt("Employee ID").interact_text()?;
    let current = directory
        .find_by_id(&id)
        .ok_or_else(|| anyhow::anyhow!("employee {id} not found"))?;
    println!("{}", format!("Editing {}. Leave blank to keep.", current.full_name()).dim());

    let changes = EmployeeUpdate {
        first_name: optional_text("First name")?,
        last_name: optional_text("Last name")?,
        department: select_department(directory, "Department", true)?,
        role: select_role("Role", true)?,
        manager: manager_update(
            &Input::<String>::new()
                .with_prompt("Manager ID ('-' for none)")
                .allow_empty(true)
                .interact_text()?,
        )?,
    };

    if changes.is_empty() {
        println!("{}", "Nothing to change.".dim());
        return Ok(());
    }

    let updated = directory.update(&id, changes)?;
    println!("{}", format!("Updated {}", updated.full_name()).success());
    Ok(())
}

fn optional_text(prompt: &str) -> anyhow::Result<Option<String>> {
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    Ok(Some(value).filter(|value| !value.trim().is_empty()))
}

/// Prompts for a department. With `keep`, the first item leaves it unchanged.
fn select_department(
    directory: &Directory,
    prompt: &str,
    keep: bool,
) -> anyhow::Result<Option<Department>> {
    let departments: Vec<&Department> = directory.departments().iter().map(|(_, d)| d).collect();
    let mut items: Vec<String> = departments.iter().map(ToString::to_string).collect();
    if keep {
        items.insert(0, "(keep)".to_string());
    }

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    let index = if keep { selection.checked_sub(1) } else { Some(selection) };
    Ok(index.map(|index| departments[index].clone()))
}

/// Prompts for a role. With `keep`, the first item leaves it unchanged.
fn select_role(prompt: &str, keep: bool) -> anyhow::Result<Option<Role>> {
    let mut items: Vec<&str> = Role::ALL.iter().map(|role| role.label()).collect();
    if keep {
        items.insert(0, "(keep)");
    }

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&items)
        .default(0)
        .interact()?;

    let index = if keep { selection.checked_sub(1) } else { Some(selection) };
    Ok(index.map(|index| Role::ALL[index]))
}

/// Interprets the manager field of the update form.
///
/// Blank keeps the current manager, `-` clears it, anything else names the new
/// manager.
fn manager_update(input: &str) -> anyhow::Result<ManagerUpdate> {
    Ok(match input.trim() {
        "" => ManagerUpdate::Keep,
        "-" => ManagerUpdate::Clear,
        id => ManagerUpdate::Set(EmployeeId::new(id)?),
    })
}
