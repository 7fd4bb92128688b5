use std::path::Path;

use serde::{Deserialize, Serialize};

/// Configuration for the HR directory.
///
/// Controls how strictly manager references are validated and how listings
/// and charts are presented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Whether a newly added employee's manager must already be in the
    /// directory.
    ///
    /// When `false`, an employee may name a manager that has not been added
    /// yet. Such employees are reported as detached by the org chart until
    /// their manager arrives.
    pub require_known_manager: bool,

    /// The number of spaces each level of the org chart is indented by.
    chart_indent: usize,

    /// Suffix printed after pay amounts.
    currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            require_known_manager: true,
            chart_indent: default_chart_indent(),
            currency: default_currency(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration, falling back to the defaults if the file is
    /// missing or invalid.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config from {}: {e}", path.display());
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), String> {
        let content =
            toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize config: {e}"))?;
        std::fs::write(path, content).map_err(|e| format!("Failed to write config file: {e}"))
    }

    /// Returns the org chart indent width.
    #[must_use]
    pub const fn chart_indent(&self) -> usize {
        self.chart_indent
    }

    /// Returns the currency suffix.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Sets the org chart indent width.
    pub const fn set_chart_indent(&mut self, indent: usize) {
        self.chart_indent = indent;
    }

    /// Sets the currency suffix.
    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
    }
}

const fn default_chart_indent() -> usize {
    2
}

fn default_currency() -> String {
    "€".to_string()
}

const fn default_true() -> bool {
    true
}

/// On-disk configuration formats, selected by the `_version` key.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_true")]
        require_known_manager: bool,

        #[serde(default = "default_chart_indent")]
        chart_indent: usize,

        #[serde(default = "default_currency")]
        currency: String,
    },
}

impl From<Versions> for super::Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                require_known_manager,
                chart_indent,
                currency,
            } => Self {
                require_known_manager,
                chart_indent,
                currency,
            },
        }
    }
}

impl From<super::Config> for Versions {
    fn from(config: super::Config) -> Self {
        Self::V1 {
            require_known_manager: config.require_known_manager,
            chart_indent: config.chart_indent,
            currency: config.currency,
        }
    }
}
