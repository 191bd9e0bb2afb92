//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use jewel_commerce::search::SearchConfig;
use jewel_observability::{LogFormat, LogLevel};
use serde::{Deserialize, Serialize};

/// Config file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["jewel.toml", ".jewel.toml", "jewel.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Search tuning.
    #[serde(default)]
    pub search: SearchConfig,

    /// Catalog source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Collect every problem with the config, errors and warnings separately.
    pub fn check(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if let Err(e) = self.search.validate() {
            errors.push(e.to_string());
        }

        if self.logging.level().is_none() {
            errors.push(format!("logging.level '{}' is not a known level", self.logging.level));
        }

        if self.logging.format().is_none() {
            errors.push(format!(
                "logging.format '{}' must be 'human' or 'json'",
                self.logging.format
            ));
        }

        if self.search.debounce_ms == 0 {
            warnings.push("search.debounce_ms is 0; every keystroke will search".to_string());
        } else if self.search.debounce_ms > 1000 {
            warnings.push(format!(
                "search.debounce_ms {} will feel sluggish",
                self.search.debounce_ms
            ));
        }

        if self.search.similarity_threshold < 0.5 {
            warnings.push(format!(
                "search.similarity_threshold {} may suggest unrelated terms",
                self.search.similarity_threshold
            ));
        }

        if let Some(ref path) = self.catalog.path {
            let ext = Path::new(path).extension().and_then(|e| e.to_str());
            if !matches!(ext, Some("json") | Some("toml")) {
                errors.push(format!("catalog.path '{}' must be a .json or .toml file", path));
            }
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "json")
}

/// Where the catalog comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Catalog file (.json or .toml). The built-in fixture is used when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level (trace, debug, info, warn, error).
    #[serde(default = "default_level")]
    pub level: String,

    /// Output format (human, json).
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_format() -> String {
    "human".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: default_format(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Option<LogLevel> {
        LogLevel::parse(&self.level)
    }

    pub fn format(&self) -> Option<LogFormat> {
        LogFormat::parse(&self.format)
    }
}

/// Generate a default jewel.toml config file.
pub fn generate_default_config(catalog: Option<&str>) -> String {
    let catalog_line = match catalog {
        Some(path) => format!("path = \"{}\"", path),
        None => "# path = \"catalog.json\"".to_string(),
    };

    format!(
        r#"# Jewellery storefront search configuration

[search]
min_query_len = 2
max_suggestions = 8
similarity_threshold = 0.6
debounce_ms = 150

[catalog]
{catalog_line}

[logging]
level = "info"     # trace | debug | info | warn | error
format = "human"   # human | json
"#,
        catalog_line = catalog_line
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_config_parses_to_defaults() {
        let config: CliConfig = toml::from_str(&generate_default_config(None)).unwrap();
        assert_eq!(config, CliConfig::default());

        let config: CliConfig =
            toml::from_str(&generate_default_config(Some("shop.toml"))).unwrap();
        assert_eq!(config.catalog.path.as_deref(), Some("shop.toml"));
    }

    #[test]
    fn test_partial_config() {
        let config: CliConfig = toml::from_str(
            r#"
[search]
max_suggestions = 5

[logging]
format = "json"
"#,
        )
        .unwrap();
        assert_eq!(config.search.max_suggestions, 5);
        assert_eq!(config.search.debounce_ms, 150);
        assert_eq!(config.logging.level(), Some(LogLevel::Info));
        assert_eq!(config.logging.format(), Some(LogFormat::Json));
    }

    #[test]
    fn test_check_reports_errors_and_warnings() {
        let (errors, warnings) = CliConfig::default().check();
        assert!(errors.is_empty());
        assert!(warnings.is_empty());

        let mut config = CliConfig::default();
        config.search.max_suggestions = 20;
        config.logging.level = "loud".to_string();
        config.catalog.path = Some("catalog.csv".to_string());
        config.search.debounce_ms = 0;
        let (errors, warnings) = config.check();
        assert_eq!(errors.len(), 3);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_save_and_load_json() {
        let dir = std::env::temp_dir().join(format!("jewel-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("jewel.json");

        let mut config = CliConfig::default();
        config.search.similarity_threshold = 0.7;
        config.save(&path).unwrap();

        assert_eq!(CliConfig::load(&path).unwrap(), config);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
