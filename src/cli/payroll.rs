use anyhow::Context;
use clap::Parser;
use hrm::{Config, Directory, PayrollSummary, domain::EmploymentKind};

use super::{
    list::{OutputFormat, csv_escape},
    money,
    terminal::Colorize,
};

/// Command arguments for `hrm payroll`.
#[derive(Debug, Parser)]
pub struct Payroll {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

impl Payroll {
    pub fn run(self, directory: &Directory, config: &Config) -> anyhow::Result<()> {
        let summary = directory.payroll()?;

        match self.output {
            OutputFormat::Json => {
                serde_json::to_writer_pretty(std::io::stdout(), &summary)
                    .context("failed to render json output")?;
                println!();
            }
            OutputFormat::Csv => {
                println!("ID,Name,Type,Pay");
                for line in &summary.lines {
                    println!(
                        "{},{},{},{:.2}",
                        csv_escape(line.id.as_str()),
                        csv_escape(&line.name),
                        line.kind,
                        line.pay
                    );
                }
            }
            OutputFormat::Table => print(&summary, config),
        }
        Ok(())
    }
}

/// Prints one line per employee and the total.
pub fn print(summary: &PayrollSummary, config: &Config) {
    if summary.lines.is_empty() {
        println!("{}", "No employees.".dim());
        return;
    }

    let name_width = summary
        .lines
        .iter()
        .map(|line| line.name.chars().count())
        .max()
        .unwrap_or(0);

    for line in &summary.lines {
        let kind = match line.kind {
            EmploymentKind::FullTime => "salaried",
            EmploymentKind::PartTime => "hourly",
        };
        println!(
            "{:<6} {:<name_width$}  {}  {:>14}",
            line.id.as_str(),
            line.name,
            format!("{kind:<8}").dim(),
            money(line.pay, config)
        );
    }

    println!(
        "{}",
        format!("Total: {}", money(summary.total, config)).success()
    );
}
