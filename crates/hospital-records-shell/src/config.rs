//! Runtime configuration from the environment and command line.

use std::env;

use serde::Serialize;

pub const LOG_FILTER_VAR: &str = "RUST_LOG";
pub const NO_SEED_VAR: &str = "HOSPITAL_RECORDS_NO_SEED";
pub const ASSUME_YES_VAR: &str = "HOSPITAL_RECORDS_ASSUME_YES";

/// Log filter when nothing else is configured.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Shell configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppConfig {
    /// Start with the demonstration rows
    pub seed_data: bool,
    /// Skip delete confirmations
    pub assume_yes: bool,
    /// Explicit tracing filter, e.g. `hospital_records_core=debug`
    pub log_filter: Option<String>,
    /// Count of `-v` flags
    pub verbosity: u8,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_data: true,
            assume_yes: false,
            log_filter: None,
            verbosity: 0,
        }
    }
}

impl AppConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Read configuration through a variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            seed_data: !lookup(NO_SEED_VAR).is_some_and(|v| is_truthy(&v)),
            assume_yes: lookup(ASSUME_YES_VAR).is_some_and(|v| is_truthy(&v)),
            log_filter: lookup(LOG_FILTER_VAR).filter(|v| !v.trim().is_empty()),
            ..defaults
        }
    }

    /// Apply command-line flags. Flags only ever switch a setting on.
    pub fn with_overrides(
        mut self,
        no_seed: bool,
        assume_yes: bool,
        log_level: Option<String>,
        verbosity: u8,
    ) -> Self {
        if no_seed {
            self.seed_data = false;
        }
        if assume_yes {
            self.assume_yes = true;
        }
        if log_level.is_some() {
            self.log_filter = log_level;
        }
        self.verbosity = self.verbosity.max(verbosity);
        self
    }

    /// Filter for the tracing subscriber. `-v` flags raise the default but
    /// an explicit filter wins.
    pub fn effective_log_filter(&self) -> String {
        if let Some(filter) = &self.log_filter {
            return filter.clone();
        }
        match self.verbosity {
            0 => DEFAULT_LOG_FILTER.to_string(),
            1 => "info".to_string(),
            _ => "debug".to_string(),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_vars(vars(&[]));
        assert_eq!(config, AppConfig::default());
        assert!(config.seed_data);
        assert_eq!(config.effective_log_filter(), "warn");
    }

    #[test]
    fn test_env_values() {
        let config = AppConfig::from_vars(vars(&[
            (NO_SEED_VAR, "true"),
            (ASSUME_YES_VAR, "1"),
            (LOG_FILTER_VAR, "hospital_records_core=debug"),
        ]));
        assert!(!config.seed_data);
        assert!(config.assume_yes);
        assert_eq!(config.effective_log_filter(), "hospital_records_core=debug");
    }

    #[test]
    fn test_falsy_values_ignored() {
        let config = AppConfig::from_vars(vars(&[(NO_SEED_VAR, "0"), (ASSUME_YES_VAR, "no")]));
        assert!(config.seed_data);
        assert!(!config.assume_yes);
    }

    #[test]
    fn test_flags_override_env() {
        let config = AppConfig::from_vars(vars(&[(LOG_FILTER_VAR, "error")]))
            .with_overrides(true, true, Some("trace".into()), 0);
        assert!(!config.seed_data);
        assert!(config.assume_yes);
        assert_eq!(config.effective_log_filter(), "trace");
    }

    #[test]
    fn test_verbosity_levels() {
        let config = AppConfig::default().with_overrides(false, false, None, 1);
        assert_eq!(config.effective_log_filter(), "info");
        let config = config.with_overrides(false, false, None, 3);
        assert_eq!(config.effective_log_filter(), "debug");
    }
}
