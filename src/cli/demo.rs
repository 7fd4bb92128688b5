use clap::Parser;
use hrm::{
    Config, Directory, DirectoryError, Employee, NewEmployee, OrgChart, Role,
    notifier::listeners::{ItProvisioning, Payroll},
    strategy::{PayStrategy, SalariedPay, SortKey, strategy_for},
};

use super::{chart, list, money, report_failures, terminal::Colorize};

/// Command arguments for `hrm demo`.
#[derive(Debug, Default, Parser)]
pub struct Demo {}

impl Demo {
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let mut directory = Directory::with_config(config);
        directory.subscribe(ItProvisioning::stdout());
        directory.subscribe(Payroll::stdout());

        section("Hiring");
        seed(&mut directory)?;

        section("All employees");
        list::print_table(&directory.list_all(), config);

        section("Salaries");
        for employee in directory.iter() {
            print_pay(strategy_for(employee.compensation()), employee, config);
        }
        if let Some(bob) = directory.find_by_id("E002") {
            println!("{}", "Applying the salaried strategy to an hourly employee:".dim());
            print_pay(&SalariedPay, bob, config);
        }

        for key in [SortKey::LastName, SortKey::Department] {
            section(&format!("Sorted by {key}"));
            directory.set_sort_strategy(key.strategy());
            list::print_table(&directory.list_sorted(), config);
        }

        section("Terminations");
        match directory.remove("E000") {
            Err(error @ DirectoryError::HasSubordinates { .. }) => {
                println!("{}", format!("Refused: {error}").warning());
            }
            Err(error) => return Err(error.into()),
            Ok(termination) => report_failures(&termination.report),
        }
        let termination = directory.remove("E002")?;
        report_failures(&termination.report);

        section("Organization chart");
        chart::print(&OrgChart::new(&directory).with_indent(config.chart_indent()));

        Ok(())
    }
}

/// Adds the demo roster to the directory.
///
/// # Errors
///
/// Fails if an employee cannot be built or added, e.g. because the directory
/// already holds one of the demo IDs.
pub fn seed(directory: &mut Directory) -> anyhow::Result<()> {
    for employee in roster(directory)? {
        let report = directory.add(employee)?;
        report_failures(&report);
    }
    Ok(())
}

fn roster(directory: &Directory) -> anyhow::Result<Vec<Employee>> {
    let hr = directory.department("HR")?;
    let it = directory.department("IT")?;
    let sales = directory.department("SALES")?;

    Ok(vec![
        NewEmployee::new("E000", "Boss", "Man", hr.clone(), Role::Administrator)
            .with_employment_type("FULLTIME", &[150_000.0])?,
        NewEmployee::new("E001", "Alice", "Smith", it.clone(), Role::Developer)
            .reporting_to("E000")
            .with_employment_type("FULLTIME", &[75_000.0])?,
        NewEmployee::new("E002", "Bob", "Johnson", sales.clone(), Role::Administrator)
            .reporting_to("E001")
            .with_employment_type("PARTTIME", &[25.0, 120.0])?,
        NewEmployee::new("E003", "Carol", "White", hr.clone(), Role::HrSpecialist)
            .reporting_to("E000")
            .with_employment_type("FULLTIME", &[60_000.0])?,
    ])
}

fn section(title: &str) {
    println!("\n{}", format!("== {title} ==").heading());
}

fn print_pay(strategy: &dyn PayStrategy, employee: &Employee, config: &Config) {
    match strategy.calculate(employee) {
        Ok(pay) => println!(
            "{} ({}): {}",
            employee.full_name(),
            strategy.name(),
            money(pay, config)
        ),
        Err(error) => println!("{}", format!("Error: {error}").warning()),
    }
}
