//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use browse_commerce::live::LiveConfig;
use browse_observability::LogFormat;
use serde::{Deserialize, Serialize};

/// Names searched for, in order, in each directory up from the working one.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["browse.toml", ".browse.toml", "browse.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrowseConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Live query tuning (`debounce_ms`).
    #[serde(default)]
    pub search: LiveConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl BrowseConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(path, &content)
    }

    /// Parse by extension: `.json` is JSON, anything else TOML.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }
}

/// Where the product dataset comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// JSON file of products, relative to the config file. Unset means the
    /// bundled sample.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Color swatches shown per product before "+N".
    #[serde(default = "default_swatch_limit")]
    pub swatch_limit: usize,

    /// Format of session log lines on stderr.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_swatch_limit() -> usize {
    4
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            swatch_limit: default_swatch_limit(),
            log_format: LogFormat::default(),
        }
    }
}

/// Generate a default browse.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Product browse configuration

[catalog]
# JSON array of products; the bundled sample is used when unset.
# path = "catalog.json"

[search]
# Quiet period before typed text is searched.
debounce_ms = {debounce}

[display]
swatch_limit = {swatches}
log_format = "human"
"#,
        debounce = LiveConfig::DEFAULT_DEBOUNCE.as_millis(),
        swatches = default_swatch_limit(),
    )
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_generated_config_parses_to_default() {
        let config = BrowseConfig::parse(Path::new("browse.toml"), &generate_default_config()).unwrap();
        assert_eq!(config, BrowseConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let source = r#"
            [catalog]
            path = "phones.json"

            [search]
            debounce_ms = 250
        "#;
        let config = BrowseConfig::parse(Path::new("browse.toml"), source).unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("phones.json"));
        assert_eq!(config.search.debounce, Duration::from_millis(250));
        assert_eq!(config.display.swatch_limit, 4);
        assert_eq!(config.display.log_format, LogFormat::Human);
    }

    #[test]
    fn test_json_config() {
        let source = r#"{"display": {"swatch_limit": 2, "log_format": "json"}}"#;
        let config = BrowseConfig::parse(Path::new("browse.json"), source).unwrap();
        assert_eq!(config.display.swatch_limit, 2);
        assert_eq!(config.display.log_format, LogFormat::Json);
        assert_eq!(config.search, LiveConfig::default());
    }

    #[test]
    fn test_bad_toml_is_reported() {
        let err = BrowseConfig::parse(Path::new("browse.toml"), "[search]\ndebounce_ms = \"soon\"").unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse TOML config"));
    }
}
