use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};

use crate::classifier::exclusion::ExclusionMode;
use crate::rules::store::RuleSource;

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// `ICP_RULES_PATH`; the embedded catalogue is used when unset.
    pub rules_path: Option<PathBuf>,
    pub exclusion_mode: ExclusionMode,
    pub max_batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            rules_path: None,
            exclusion_mode: ExclusionMode::Substring,
            max_batch_size: 500,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: match std::env::var("PORT") {
                Ok(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
                Err(_) => defaults.port,
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            rules_path: std::env::var("ICP_RULES_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            exclusion_mode: match std::env::var("ICP_EXCLUSION_MODE") {
                Ok(v) => v
                    .parse::<ExclusionMode>()
                    .map_err(|e| anyhow!(e))
                    .context("ICP_EXCLUSION_MODE is invalid")?,
                Err(_) => defaults.exclusion_mode,
            },
            max_batch_size: match std::env::var("ICP_MAX_BATCH_SIZE") {
                Ok(v) => v
                    .parse::<usize>()
                    .context("ICP_MAX_BATCH_SIZE must be a positive integer")?,
                Err(_) => defaults.max_batch_size,
            },
        })
    }

    pub fn rule_source(&self) -> RuleSource {
        match &self.rules_path {
            Some(path) => RuleSource::File(path.clone()),
            None => RuleSource::Embedded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 8080);
        assert_eq!(config.exclusion_mode, ExclusionMode::Substring);
        assert_eq!(config.rule_source(), RuleSource::Embedded);
    }

    #[test]
    fn test_rule_source_from_path() {
        let config = Config {
            rules_path: Some(PathBuf::from("/etc/icp/rules.json")),
            ..Config::default()
        };
        assert_eq!(
            config.rule_source(),
            RuleSource::File(PathBuf::from("/etc/icp/rules.json"))
        );
    }
}
