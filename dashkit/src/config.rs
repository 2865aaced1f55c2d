use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::errors::{DashError, Result};
use crate::theme::Theme;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const ENV_PREFIX: &str = "NIRIKSHAN";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    pub analysis: AnalysisConfig,
    pub ui: UiConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnalysisConfig {
    pub base_url: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl AnalysisConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(DashError::ConfigError("analysis.base_url is empty".to_string()));
        }

        let url = reqwest::Url::parse(trimmed).map_err(|e| {
            DashError::ConfigError(format!("analysis.base_url '{}' is invalid: {}", trimmed, e))
        })?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(DashError::ConfigError(format!(
                "analysis.base_url must use http or https, got '{}'",
                other
            ))),
        }
    }

    /// Full URL of the dashboard endpoint; trailing slashes on the base are ignored.
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim().trim_end_matches('/'), DASHBOARD_PATH)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    pub default_theme: Theme,
    pub refresh_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_theme: Theme::Light,
            refresh_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Defaults, then the file at `path`, then `NIRIKSHAN__*` environment overrides.
/// A path that was asked for must exist.
pub fn load_config(path: Option<&str>) -> Result<DashboardConfig> {
    load_layers(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX).separator("__")
}

fn load_layers(path: Option<&str>, env: Environment) -> Result<DashboardConfig> {
    let mut builder = Config::builder().add_source(Config::try_from(&DashboardConfig::default())?);

    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path));
    }

    let config: DashboardConfig = builder.add_source(env).build()?.try_deserialize()?;

    config.analysis.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slashes() {
        assert_eq!(
            AnalysisConfig::new("https://analysis.example.com/").endpoint(),
            "https://analysis.example.com/dashboard"
        );
        assert_eq!(AnalysisConfig::default().endpoint(), "http://127.0.0.1:8000/dashboard");
    }

    #[test]
    fn validate_rejects_empty_and_foreign_schemes() {
        assert!(AnalysisConfig::new("").validate().is_err());
        assert!(AnalysisConfig::new("ftp://files.example.com").validate().is_err());
        assert!(AnalysisConfig::new("not a url").validate().is_err());
        assert!(AnalysisConfig::new("http://localhost:8000").validate().is_ok());
    }

    fn isolated_env(vars: &[(&str, &str)]) -> Environment {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<config::Map<_, _>>();
        environment().source(Some(vars))
    }

    fn write_yaml(name: &str, body: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("dashkit-config-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dashboard.yaml");
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn no_path_uses_defaults() {
        let config = load_layers(None, isolated_env(&[])).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.analysis.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.ui.refresh_ms, 100);
    }

    #[test]
    fn missing_explicit_file_is_a_config_error() {
        let err = load_layers(Some("/typo/dashbaord.yaml"), isolated_env(&[])).unwrap_err();
        assert!(matches!(err, DashError::ConfigError(_)));

        let err = load_layers(
            Some("/typo/dashbaord.yaml"),
            isolated_env(&[("NIRIKSHAN__ANALYSIS__BASE_URL", "https://env.example.com")]),
        )
        .unwrap_err();
        assert!(matches!(err, DashError::ConfigError(_)));
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let path = write_yaml(
            "yaml",
            "analysis:\n  base_url: https://analysis.example.com\nui:\n  default_theme: dark\n",
        );

        let config = load_layers(path.to_str(), isolated_env(&[])).unwrap();
        assert_eq!(config.analysis.base_url, "https://analysis.example.com");
        assert_eq!(config.ui.default_theme, Theme::Dark);
        assert_eq!(config.observability.log_level, "info");

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn env_overrides_file() {
        let path = write_yaml("env", "analysis:\n  base_url: https://file.example.com\n");

        let config = load_layers(
            path.to_str(),
            isolated_env(&[
                ("NIRIKSHAN__ANALYSIS__BASE_URL", "https://env.example.com"),
                ("NIRIKSHAN__UI__REFRESH_MS", "250"),
            ]),
        )
        .unwrap();
        assert_eq!(config.analysis.base_url, "https://env.example.com");
        assert_eq!(config.ui.refresh_ms, 250);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }

    #[test]
    fn capitalised_theme_in_yaml_is_accepted() {
        let path = write_yaml("theme", "ui:\n  default_theme: Dark\n");

        let config = load_layers(path.to_str(), isolated_env(&[])).unwrap();
        assert_eq!(config.ui.default_theme, Theme::Dark);

        std::fs::remove_dir_all(path.parent().unwrap()).ok();
    }
}
