//! Configuration management for Guides.
//!
//! Parses `guides.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.project`
//! - `site.branch`
//! - `site.user`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "guides.toml";

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site title.
    pub title: Option<String>,
    /// Override build environment.
    pub environment: Option<Environment>,
    /// Override analytics enabled flag.
    pub analytics_enabled: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration.
    pub site: SiteConfig,
    /// Analytics configuration.
    pub analytics: AnalyticsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Build environment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local builds, served from the root.
    #[default]
    Development,
    /// Published builds, served under a per-project prefix.
    Production,
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Fallback site title when a page carries none.
    pub title: String,
    /// Project name.
    pub project: String,
    /// Branch the site is built from.
    pub branch: String,
    /// User the site is built for.
    pub user: String,
    /// Build environment.
    pub environment: Environment,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "MongoDB Guides".to_owned(),
            project: "guides".to_owned(),
            branch: "master".to_owned(),
            user: "docs".to_owned(),
            environment: Environment::Development,
        }
    }
}

impl SiteConfig {
    /// URL prefix pages are served under.
    ///
    /// `/{project}/{user}/{branch}` in production, `/` otherwise.
    #[must_use]
    pub fn path_prefix(&self) -> String {
        match self.environment {
            Environment::Production => {
                format!("/{}/{}/{}", self.project, self.user, self.branch)
            }
            Environment::Development => "/".to_owned(),
        }
    }
}

/// Analytics configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Whether tab selections are reported.
    pub enabled: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.branch`").
        field: String,
        /// Error message (e.g., "${`GUIDES_BRANCH`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `guides.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// CLI settings are applied last and the result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing or
    /// expansion fails, or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => {
                tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
                Self::default()
            }
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Search for a config file in `start` and its parents.
    fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(title) = &settings.title {
            self.site.title.clone_from(title);
        }
        if let Some(environment) = settings.environment {
            self.site.environment = environment;
        }
        if let Some(enabled) = settings.analytics_enabled {
            self.analytics.enabled = enabled;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;

        if self.site.environment == Environment::Production {
            require_non_empty(&self.site.project, "site.project")?;
            require_non_empty(&self.site.user, "site.user")?;
            require_non_empty(&self.site.branch, "site.branch")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        self.site.project = expand::expand_env(&self.site.project, "site.project")?;
        self.site.branch = expand::expand_env(&self.site.branch, "site.branch")?;
        self.site.user = expand::expand_env(&self.site.user, "site.user")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn assert_validation_error(config: &Config, needles: &[&str]) {
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        let message = err.to_string();
        for needle in needles {
            assert!(message.contains(needle), "'{message}' lacks '{needle}'");
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.site.title, "MongoDB Guides");
        assert_eq!(config.site.project, "guides");
        assert_eq!(config.site.environment, Environment::Development);
        assert!(config.analytics.enabled);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.branch, "master");
        assert_eq!(config.site.user, "docs");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
title = "Atlas Guides"
project = "atlas"
branch = "v1.0"
user = "builder"
environment = "production"

[analytics]
enabled = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Atlas Guides");
        assert_eq!(config.site.environment, Environment::Production);
        assert!(!config.analytics.enabled);
    }

    #[test]
    fn test_parse_unknown_environment_fails() {
        let result: Result<Config, _> = toml::from_str("[site]\nenvironment = \"staging\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_path_prefix() {
        let mut site = SiteConfig {
            project: "guides".to_owned(),
            user: "jdoe".to_owned(),
            branch: "DOCSP-1".to_owned(),
            ..SiteConfig::default()
        };
        assert_eq!(site.path_prefix(), "/");

        site.environment = Environment::Production;
        assert_eq!(site.path_prefix(), "/guides/jdoe/DOCSP-1");
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[site]\ntitle = \"From file\"\n");

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.title, "From file");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[site\n");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "");
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(Config::discover_from(&nested), Some(path));
    }

    #[test]
    fn test_discover_none() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("empty");
        std::fs::create_dir_all(&nested).unwrap();

        // Parents of a temp dir may hold a config in odd environments; only
        // check that a hit is never inside the temp dir itself.
        let found = Config::discover_from(&nested);
        assert!(found.is_none_or(|path| !path.starts_with(dir.path())));
    }

    #[test]
    fn test_expand_env_vars_on_load() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("GUIDES_CONFIG_TEST_BRANCH", "feature");
            std::env::remove_var("GUIDES_CONFIG_TEST_SITE");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[site]
project = "${GUIDES_CONFIG_TEST_SITE:-guides}"
branch = "${GUIDES_CONFIG_TEST_BRANCH}"
"#,
        );

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.project, "guides");
        assert_eq!(config.site.branch, "feature");
        unsafe {
            std::env::remove_var("GUIDES_CONFIG_TEST_BRANCH");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("GUIDES_CONFIG_TEST_MISSING");
        }
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[site]\nuser = \"${GUIDES_CONFIG_TEST_MISSING}\"\n");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("site.user"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "[analytics]\nenabled = true\n");
        let settings = CliSettings {
            title: Some("Override".to_owned()),
            environment: Some(Environment::Production),
            analytics_enabled: Some(false),
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.site.title, "Override");
        assert_eq!(config.site.environment, Environment::Production);
        assert!(!config.analytics.enabled);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default();
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.site.title, "MongoDB Guides");
        assert!(config.analytics.enabled);
    }

    #[test]
    fn test_validate_default_config_passes() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_validate_title_empty() {
        let mut config = Config::default();
        config.site.title = String::new();
        assert_validation_error(&config, &["site.title", "empty"]);
    }

    #[test]
    fn test_validate_production_requires_branch() {
        let mut config = Config::default();
        config.site.environment = Environment::Production;
        config.site.branch = String::new();
        assert_validation_error(&config, &["site.branch"]);
    }

    #[test]
    fn test_validate_development_allows_empty_user() {
        let mut config = Config::default();
        config.site.user = String::new();
        assert!(config.validate().is_ok());
    }
}
