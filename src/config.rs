//! Editor configuration
//!
//! Read from the JS object passed to the editor constructor, or from JSON
//! text by native hosts. Every field has a default, so `{}` is a valid config.

use crate::error::{StyleError, StyleResult};
use crate::tree::DEFAULT_PLACEHOLDER;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Character that marks otherwise empty leaves as caret landing points
    pub placeholder: char,

    /// Maximum log level ("off", "error", "warn", "info", "debug", "trace")
    pub log_level: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            placeholder: DEFAULT_PLACEHOLDER,
            log_level: "debug".to_string(),
        }
    }
}

impl EditorConfig {
    pub fn from_json(json: &str) -> StyleResult<Self> {
        serde_json::from_str(json).map_err(|e| StyleError::Config(e.to_string()))
    }

    /// Parsed log level; unknown names fall back to debug
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or_else(|_| {
            log::warn!("Unknown log level '{}', using debug", self.log_level);
            LevelFilter::Debug
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let config = EditorConfig::from_json("{}").unwrap();
        assert_eq!(config, EditorConfig::default());
        assert_eq!(config.placeholder, '\u{200B}');
    }

    #[test]
    fn test_camel_case_fields() {
        let config = EditorConfig::from_json(r#"{"placeholder":"~","logLevel":"warn"}"#).unwrap();
        assert_eq!(config.placeholder, '~');
        assert_eq!(config.level_filter(), LevelFilter::Warn);
    }

    #[test]
    fn test_unknown_level_falls_back() {
        let config = EditorConfig {
            log_level: "loud".to_string(),
            ..EditorConfig::default()
        };
        assert_eq!(config.level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        assert!(matches!(
            EditorConfig::from_json("{"),
            Err(StyleError::Config(_))
        ));
    }
}
