//! Logger settings for the harness: optional YAML file, then `ROTALOG_*`
//! environment variables, then command-line flags.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use rotalog::{LoggerConfig, Persistence, Severity};
use tracing::{debug, warn};

/// Read `path` if given, otherwise start from defaults, then apply the environment.
pub fn load(path: Option<&Path>) -> Result<LoggerConfig> {
    let config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: LoggerConfig = serde_yaml::from_str(&raw)
                .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;
            debug!(path = %path.display(), "Loaded logger config");
            config
        }
        None => LoggerConfig::default(),
    };
    Ok(apply_env(config))
}

pub fn apply_env(config: LoggerConfig) -> LoggerConfig {
    apply_env_with(config, &std::env::vars().collect())
}

/// Apply `ROTALOG_*` overrides from the given map (useful for testing).
/// Unparseable values are ignored with a warning.
pub fn apply_env_with(mut config: LoggerConfig, env: &HashMap<String, String>) -> LoggerConfig {
    if let Some(name) = env.get("ROTALOG_NAME") {
        config.name = name.clone();
    }
    if let Some(dir) = env.get("ROTALOG_DIR") {
        config.directory = dir.clone();
    }
    if let Some(level) = env.get("ROTALOG_LEVEL") {
        match level.parse::<Severity>() {
            Ok(level) => config.level = level,
            Err(e) => warn!(error = %e, "Ignoring ROTALOG_LEVEL"),
        }
    }
    if let Some(size) = env.get("ROTALOG_SIZE_MB") {
        match size.trim().parse::<u64>() {
            Ok(size) => config.size_mb = size,
            Err(e) => warn!(value = %size, error = %e, "Ignoring ROTALOG_SIZE_MB"),
        }
    }
    if let Some(flag) = env.get("ROTALOG_PERSIST_ALL") {
        if is_truthy(flag) {
            config.persistence = Persistence::All;
        }
    }
    if let Some(flag) = env.get("ROTALOG_COLOR") {
        config.color = is_truthy(flag);
    }
    config
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn environment_overrides_defaults() {
        let cfg = apply_env_with(
            LoggerConfig::default(),
            &env(&[
                ("ROTALOG_NAME", "svc"),
                ("ROTALOG_LEVEL", "2"),
                ("ROTALOG_SIZE_MB", "50"),
                ("ROTALOG_PERSIST_ALL", "yes"),
            ]),
        );
        assert_eq!(cfg.name, "svc");
        assert_eq!(cfg.level, Severity::Warning);
        assert_eq!(cfg.size_mb, 50);
        assert_eq!(cfg.persistence, Persistence::All);
    }

    #[test]
    fn bad_values_keep_previous_setting() {
        let base = LoggerConfig::default().with_size_mb(3);
        let cfg = apply_env_with(
            base,
            &env(&[("ROTALOG_LEVEL", "loud"), ("ROTALOG_SIZE_MB", "lots")]),
        );
        assert_eq!(cfg.level, Severity::Debug);
        assert_eq!(cfg.size_mb, 3);
    }
}
