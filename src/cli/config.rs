use std::path::Path;

use clap::Parser;
use hrm::Config;
use tracing::instrument;

use super::{load_config, terminal::Colorize};

/// Command arguments for `hrm config`.
#[derive(Debug, Parser)]
pub struct ConfigCommand {
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, clap::Subcommand)]
enum Action {
    /// Show the effective configuration (default)
    Show,

    /// Write a configuration file with default values
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key to set
        key: String,

        /// Value to set
        value: String,
    },
}

impl ConfigCommand {
    #[instrument(skip(self))]
    pub fn run(self, path: &Path) -> anyhow::Result<()> {
        match self.action.unwrap_or(Action::Show) {
            Action::Show => {
                let config = load_config(path)?;
                let source = if path.exists() {
                    path.display().to_string()
                } else {
                    "defaults".to_string()
                };

                println!("Configuration ({}):", source.dim());
                println!("  require_known_manager: {}", config.require_known_manager);
                println!("  chart_indent: {}", config.chart_indent());
                println!("  currency: {}", config.currency());
            }
            Action::Init { force } => {
                if path.exists() && !force {
                    anyhow::bail!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    );
                }
                Config::default()
                    .save(path)
                    .map_err(|e| anyhow::anyhow!("{e}"))?;
                println!(
                    "{}",
                    format!("Wrote default configuration to {}", path.display()).success()
                );
            }
            Action::Set { key, value } => {
                let mut config = load_config(path)?;
                apply(&mut config, &key, &value)?;
                config.save(path).map_err(|e| anyhow::anyhow!("{e}"))?;
                println!("{}", format!("{key} = {value}").success());
            }
        }

        Ok(())
    }
}

fn apply(config: &mut Config, key: &str, value: &str) -> anyhow::Result<()> {
    match key {
        "require_known_manager" => {
            config.require_known_manager = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Value must be 'true' or 'false'"))?;
        }
        "chart_indent" => {
            let indent = value
                .parse()
                .map_err(|_| anyhow::anyhow!("Value must be a non-negative integer"))?;
            config.set_chart_indent(indent);
        }
        "currency" => config.set_currency(value),
        _ => anyhow::bail!(
            "Unknown configuration key: '{key}'\nSupported keys: require_known_manager, \
             chart_indent, currency"
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn set_updates_known_keys() {
        let mut config = Config::default();

        apply(&mut config, "require_known_manager", "false").unwrap();
        apply(&mut config, "chart_indent", "4").unwrap();
        apply(&mut config, "currency", "USD").unwrap();

        assert!(!config.require_known_manager);
        assert_eq!(config.chart_indent(), 4);
        assert_eq!(config.currency(), "USD");
    }

    #[test]
    fn set_rejects_bad_values_and_keys() {
        let mut config = Config::default();
        assert!(apply(&mut config, "chart_indent", "-1").is_err());
        assert!(apply(&mut config, "require_known_manager", "yes").is_err());
        assert!(apply(&mut config, "colour", "red").is_err());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hrm.toml");
        let init = |force| ConfigCommand {
            action: Some(Action::Init { force }),
        };

        init(false).run(&path).unwrap();
        assert!(init(false).run(&path).is_err());
        init(true).run(&path).unwrap();

        assert_eq!(Config::load(&path).unwrap(), Config::default());
    }
}
