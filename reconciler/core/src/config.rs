//! TOML Configuration
//!
//! Optional configuration file at `$XDG_CONFIG_HOME/siws-ui/ui.toml`.
//!
//! # Configuration Priority
//!
//! 1. Environment variables
//! 2. TOML configuration file
//! 3. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [labels]
//! login = "Sign in"
//! signing = "Approve in your wallet..."
//!
//! [truncation]
//! head = 6
//! tail = 4
//!
//! [selectors]
//! error_banner = "#login-error"
//!
//! [markup]
//! title = "Sign in with Solana"
//! repository_url = "https://github.com/example/siws-demo"
//! ```
//!
//! # Environment Variables
//!
//! - `SIWS_UI_LABEL_LOGIN`, `SIWS_UI_LABEL_PREPARING`,
//!   `SIWS_UI_LABEL_LOGGING_IN`, `SIWS_UI_LABEL_SIGNING`: login button labels
//! - `SIWS_UI_TRUNCATE_HEAD`, `SIWS_UI_TRUNCATE_TAIL`: identifier shortening

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::display::{LoginLabels, Presentation, TruncationPolicy};
use crate::markup::MarkupConfig;
use crate::registry::{ElementName, Selectors};

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Upper bound for `truncation.head` and `truncation.tail`
pub const MAX_TRUNCATION_LENGTH: usize = 64;

/// `#name` where name is a plain HTML id
fn is_id_selector(selector: &str) -> bool {
    selector.strip_prefix('#').is_some_and(|id| {
        !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    })
}

/// Complete UI configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Login button labels
    pub labels: LoginLabels,
    /// Identifier shortening
    pub truncation: TruncationPolicy,
    /// Element selectors
    pub selectors: Selectors,
    /// Static page content
    pub markup: MarkupConfig,
}

impl UiConfig {
    /// Settings used to derive the UI state
    #[must_use]
    pub fn presentation(&self) -> Presentation {
        Presentation {
            labels: self.labels.clone(),
            truncation: self.truncation,
        }
    }

    /// Reject values the UI cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let labels = [
            ("labels.login", &self.labels.login),
            ("labels.preparing", &self.labels.preparing),
            ("labels.logging_in", &self.labels.logging_in),
            ("labels.signing", &self.labels.signing),
        ];
        for (key, value) in labels {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{key} must not be empty")));
            }
        }

        let lengths = [
            ("truncation.head", self.truncation.head),
            ("truncation.tail", self.truncation.tail),
        ];
        for (key, value) in lengths {
            if !(1..=MAX_TRUNCATION_LENGTH).contains(&value) {
                return Err(ConfigError::ValidationError(format!(
                    "{key} must be between 1 and {MAX_TRUNCATION_LENGTH}, got {value}"
                )));
            }
        }

        for name in ElementName::ALL {
            let selector = self.selectors.selector(name);
            if selector.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "selectors.{name} must not be empty"
                )));
            }
            // The static markup renders managed elements by id
            if name != ElementName::AppContainer && !is_id_selector(selector) {
                return Err(ConfigError::ValidationError(format!(
                    "selectors.{name} must be an id selector like #name, got {selector}"
                )));
            }
        }

        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from `lookup` (environment-shaped key/value source)
    pub fn apply_env_from(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        let labels = [
            ("SIWS_UI_LABEL_LOGIN", &mut self.labels.login),
            ("SIWS_UI_LABEL_PREPARING", &mut self.labels.preparing),
            ("SIWS_UI_LABEL_LOGGING_IN", &mut self.labels.logging_in),
            ("SIWS_UI_LABEL_SIGNING", &mut self.labels.signing),
        ];
        for (key, slot) in labels {
            if let Some(value) = lookup(key) {
                *slot = value;
            }
        }

        let lengths = [
            ("SIWS_UI_TRUNCATE_HEAD", &mut self.truncation.head),
            ("SIWS_UI_TRUNCATE_TAIL", &mut self.truncation.tail),
        ];
        for (key, slot) in lengths {
            if let Some(value) = lookup(key) {
                *slot = value.trim().parse().map_err(|_| {
                    ConfigError::ValidationError(format!("{key}={value} is not a valid length"))
                })?;
            }
        }

        Ok(())
    }
}

/// Default config file location
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("siws-ui").join("ui.toml"))
}

/// Parse configuration text without environment overrides
pub fn parse_config(text: &str) -> Result<UiConfig, ConfigError> {
    let config: UiConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load from `path` (which must exist), then apply environment overrides
pub fn load_config_from_path(path: &Path) -> Result<UiConfig, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = parse_config(&text)?;
    config.apply_env()?;
    config.validate()?;
    tracing::info!(path = %path.display(), "Loaded UI configuration");
    Ok(config)
}

/// Load from the default location, falling back to defaults when absent
pub fn load_config() -> Result<UiConfig, ConfigError> {
    match default_config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => {
            let mut config = UiConfig::default();
            config.apply_env()?;
            config.validate()?;
            tracing::debug!("No UI configuration file, using defaults");
            Ok(config)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = UiConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.presentation(), Presentation::default());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = parse_config(
            r##"
            [labels]
            login = "Sign in"

            [selectors]
            error_banner = "#login-error"
            "##,
        )
        .unwrap();

        assert_eq!(config.labels.login, "Sign in");
        assert_eq!(config.labels.preparing, "Preparing...");
        assert_eq!(config.selectors.error_banner, "#login-error");
        assert_eq!(config.selectors.login_button, "#loginButton");
        assert_eq!(config.truncation, TruncationPolicy::default());
    }

    #[test]
    fn test_invalid_toml() {
        let err = parse_config("[labels\nlogin = 1").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_empty_label_rejected() {
        let err = parse_config("[labels]\nsigning = \"  \"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: labels.signing must not be empty"
        );
    }

    #[test]
    fn test_zero_truncation_rejected() {
        let err = parse_config("[truncation]\nhead = 0").unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_empty_selector_rejected() {
        let err = parse_config("[selectors]\nprincipal = \"\"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: selectors.principal must not be empty"
        );
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("SIWS_UI_LABEL_LOGIN", "Go"),
            ("SIWS_UI_TRUNCATE_HEAD", "6"),
        ]
        .into_iter()
        .collect();

        let mut config = UiConfig::default();
        config
            .apply_env_from(|key| env.get(key).map(|v| (*v).to_string()))
            .unwrap();

        assert_eq!(config.labels.login, "Go");
        assert_eq!(config.truncation.head, 6);
        assert_eq!(config.truncation.tail, 4);
    }

    #[test]
    fn test_oversized_truncation_rejected() {
        let err = parse_config("[truncation]\ntail = 65").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: truncation.tail must be between 1 and 64, got 65"
        );
    }

    #[test]
    fn test_env_truncation_overflow_rejected() {
        let env: HashMap<&str, String> = [
            ("SIWS_UI_TRUNCATE_HEAD", usize::MAX.to_string()),
            ("SIWS_UI_TRUNCATE_TAIL", "1".to_string()),
        ]
        .into_iter()
        .collect();

        let mut config = UiConfig::default();
        config
            .apply_env_from(|key| env.get(key).cloned())
            .unwrap();

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
        assert!(err.to_string().contains("truncation.head"));
    }

    #[test]
    fn test_non_id_selector_rejected() {
        let err = parse_config("[selectors]\nerror_banner = \"div.error\"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: selectors.error_banner must be an id selector like #name, \
             got div.error"
        );

        assert!(parse_config("[selectors]\nlogin_button = \".login\"").is_err());
        assert!(parse_config("[selectors]\nlogin_button = \"#\"").is_err());
        assert!(parse_config("[selectors]\napp_container = \"main > .app\"").is_ok());
    }

    #[test]
    fn test_env_bad_length() {
        let mut config = UiConfig::default();
        let err = config
            .apply_env_from(|key| (key == "SIWS_UI_TRUNCATE_TAIL").then(|| "four".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains("SIWS_UI_TRUNCATE_TAIL=four"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[truncation]\nhead = 3\ntail = 3").unwrap();

        let config = load_config_from_path(file.path()).unwrap();
        assert_eq!(config.truncation, TruncationPolicy { head: 3, tail: 3 });
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from_path(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }
}
