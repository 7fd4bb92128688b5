use std::path::{Path, PathBuf};

mod chart;
mod config;
mod demo;
mod list;
mod menu;
mod payroll;
mod terminal;

use anyhow::Context;
use chart::Chart;
use clap::ArgAction;
use config::ConfigCommand;
use demo::Demo;
use hrm::{Config, Directory, DispatchReport};
use list::List;
use menu::Menu;
use payroll::Payroll;
use terminal::Colorize;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the configuration file
    #[arg(short, long, default_value = "hrm.toml", global = true)]
    config: PathBuf,

    /// Start from an empty directory instead of the demo roster
    #[arg(long, global = true)]
    empty: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command
            .unwrap_or_else(|| Command::Menu(Menu::default()))
            .run(&self.config, self.empty)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Interactive menu (default)
    Menu(Menu),

    /// Scripted walkthrough of every operation on the demo roster
    Demo(Demo),

    /// List employees
    List(List),

    /// Print the organization chart
    Chart(Chart),

    /// Calculate pay for every employee
    Payroll(Payroll),

    /// Show or modify configuration settings
    Config(ConfigCommand),
}

impl Command {
    fn run(self, config_path: &Path, empty: bool) -> anyhow::Result<()> {
        match self {
            Self::Menu(command) => {
                let (directory, config) = session(config_path, empty)?;
                command.run(directory, &config)?;
            }
            Self::Demo(command) => command.run(&load_config(config_path)?)?,
            Self::List(command) => {
                let (directory, config) = session(config_path, empty)?;
                command.run(directory, &config)?;
            }
            Self::Chart(command) => {
                let (directory, config) = session(config_path, empty)?;
                command.run(directory, &config)?;
            }
            Self::Payroll(command) => {
                let (directory, config) = session(config_path, empty)?;
                command.run(&directory, &config)?;
            }
            Self::Config(command) => command.run(config_path)?,
        }
        Ok(())
    }
}

/// Loads the configuration file if it exists, otherwise the defaults.
fn load_config(path: &Path) -> anyhow::Result<Config> {
    if path.exists() {
        Config::load(path).map_err(|e| anyhow::anyhow!("{e}"))
    } else {
        tracing::debug!("No config file at {}, using defaults", path.display());
        Ok(Config::default())
    }
}

/// Loads the configuration and builds a directory holding the demo roster, or
/// nothing when `empty` is set.
fn session(config_path: &Path, empty: bool) -> anyhow::Result<(Directory, Config)> {
    let config = load_config(config_path)?;
    let mut directory = Directory::with_config(&config);
    if !empty {
        demo::seed(&mut directory).context("failed to seed demo roster")?;
    }
    Ok((directory, config))
}

/// Prints listener failures as warnings.
fn report_failures(report: &DispatchReport) {
    for failure in &report.failures {
        eprintln!("{}", format!("warning: {failure}").warning());
    }
}

/// Formats a pay amount with the configured currency.
fn money(amount: f64, config: &Config) -> String {
    format!("{amount:.2} {}", config.currency())
}
