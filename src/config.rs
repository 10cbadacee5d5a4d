use crate::detection::RuleSet;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_API_KEY_ENV: &str = "SCAM_INTEL_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// YAML rule set replacing the built-in tables.
    #[serde(default)]
    pub rules_file: Option<String>,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Shared secret callers must present. Prefer `api_key_env` so the secret
    /// stays out of the config file.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_key_env: default_api_key_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rules_file: None,
            api: ApiConfig::default(),
            logging: Some(LoggingConfig {
                level: "info".to_string(),
            }),
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }

    pub fn to_file(&self, path: &str) -> Result<()> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {path}"))?;
        Ok(())
    }

    /// Explicit key wins; otherwise read the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api
            .api_key
            .clone()
            .or_else(|| std::env::var(&self.api.api_key_env).ok())
            .filter(|key| !key.is_empty())
    }

    pub fn load_rules(&self) -> Result<RuleSet> {
        match &self.rules_file {
            Some(path) => RuleSet::load_from_file(path),
            None => Ok(RuleSet::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> String {
        std::env::temp_dir()
            .join(format!("scam-intel-{}-{name}", std::process::id()))
            .to_string_lossy()
            .to_string()
    }

    #[test]
    fn test_config_file_round_trip() {
        let path = temp_path("config.yaml");
        let mut config = Config::default();
        config.api.api_key_env = "OTHER_KEY_VAR".to_string();
        config.to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.api.api_key_env, "OTHER_KEY_VAR");
        assert!(loaded.rules_file.is_none());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("rules_file: rules.yaml\n").unwrap();
        assert_eq!(config.rules_file.as_deref(), Some("rules.yaml"));
        assert_eq!(config.api.api_key_env, DEFAULT_API_KEY_ENV);
    }

    #[test]
    fn test_explicit_key_wins_over_env() {
        let mut config = Config::default();
        config.api.api_key = Some("from-config".to_string());
        config.api.api_key_env = "SCAM_INTEL_TEST_UNUSED_VAR".to_string();
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-config"));
    }

    #[test]
    fn test_key_from_env() {
        let mut config = Config::default();
        config.api.api_key_env = "SCAM_INTEL_TEST_KEY_FROM_ENV".to_string();
        std::env::set_var("SCAM_INTEL_TEST_KEY_FROM_ENV", "from-env");
        assert_eq!(config.resolve_api_key().as_deref(), Some("from-env"));
        std::env::remove_var("SCAM_INTEL_TEST_KEY_FROM_ENV");
    }

    #[test]
    fn test_no_key_configured() {
        let mut config = Config::default();
        config.api.api_key_env = "SCAM_INTEL_TEST_NEVER_SET".to_string();
        assert!(config.resolve_api_key().is_none());
    }

    #[test]
    fn test_rules_file_loaded() {
        let path = temp_path("rules.yaml");
        std::fs::write(&path, RuleSet::default().to_yaml().unwrap()).unwrap();
        let config = Config {
            rules_file: Some(path.clone()),
            ..Config::default()
        };
        assert_eq!(config.load_rules().unwrap(), RuleSet::default());
        std::fs::remove_file(&path).ok();

        let missing = Config {
            rules_file: Some("/nonexistent/rules.yaml".to_string()),
            ..Config::default()
        };
        assert!(missing.load_rules().is_err());
    }
}
