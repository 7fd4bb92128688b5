use clap::Parser;
use hrm::{Config, Directory, OrgChart, strategy::SortKey};

use super::terminal::Colorize;

/// Command arguments for `hrm chart`.
#[derive(Debug, Parser)]
pub struct Chart {
    /// Order siblings by `last-name` or `department` (default: insertion
    /// order).
    #[arg(long, value_name = "KEY")]
    sort: Option<SortKey>,

    /// Spaces of indentation per level (overrides the configuration).
    #[arg(long)]
    indent: Option<usize>,
}

impl Chart {
    pub fn run(self, mut directory: Directory, config: &Config) -> anyhow::Result<()> {
        let chart = match self.sort {
            Some(key) => {
                directory.set_sort_strategy(key.strategy());
                OrgChart::from_employees(&directory.list_sorted())
            }
            None => OrgChart::new(&directory),
        };

        print(&chart.with_indent(self.indent.unwrap_or_else(|| config.chart_indent())));
        Ok(())
    }
}

/// Prints a chart, followed by any employees it could not place.
pub fn print(chart: &OrgChart) {
    if chart.lines().is_empty() {
        println!("{}", "No employees.".dim());
    } else {
        print!("{chart}");
    }

    if !chart.detached().is_empty() {
        let ids: Vec<&str> = chart.detached().iter().map(|id| id.as_str()).collect();
        println!(
            "{}",
            format!("Not reachable from any root: {}", ids.join(", ")).warning()
        );
    }
}
