//! Roller configuration loaded from the environment.

use std::str::FromStr;

use anyhow::Context;
use knucklebones_domain::FaceCount;

const DEFAULT_DIE_VAR: &str = "KNUCKLEBONES_DEFAULT_DIE";
const OUTPUT_VAR: &str = "KNUCKLEBONES_OUTPUT";
const LOG_VAR: &str = "KNUCKLEBONES_LOG";

const DEFAULT_LOG_FILTER: &str = "knucklebones_roller=info";

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON value per line
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown output format: {other} (expected text or json)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RollerConfig {
    /// Die rolled when `roll` is given no argument
    pub default_die: FaceCount,
    pub output: OutputFormat,
    /// Fallback tracing filter when RUST_LOG is unset
    pub log_filter: String,
}

impl Default for RollerConfig {
    fn default() -> Self {
        Self {
            default_die: FaceCount::DEFAULT,
            output: OutputFormat::Text,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl RollerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup. Unset or blank keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let defaults = Self::default();

        let default_die = match lookup(DEFAULT_DIE_VAR) {
            Some(value) => FaceCount::try_from(value.as_str())
                .with_context(|| format!("invalid {DEFAULT_DIE_VAR}"))?,
            None => defaults.default_die,
        };

        let output = match lookup(OUTPUT_VAR) {
            Some(value) => value
                .parse::<OutputFormat>()
                .with_context(|| format!("invalid {OUTPUT_VAR}"))?,
            None => defaults.output,
        };

        let log_filter = lookup(LOG_VAR).unwrap_or(defaults.log_filter);

        Ok(Self {
            default_die,
            output,
            log_filter,
        })
    }
}
