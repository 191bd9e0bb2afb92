//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use jewel_commerce::catalog::{Catalog, LoadReport};
use jewel_commerce::search::SearchConfig;
use jewel_observability::{LogLevel, QueryId, StructuredLogger};

use crate::config::{CliConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Catalog path given on the command line.
    pub catalog_override: Option<String>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&str>,
        catalog_override: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            (CliConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            // Try to find config in current directory or parent directories
            match find_config(&cwd) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            }
        };

        Ok(Self {
            config,
            config_path,
            catalog_override,
            output,
            cwd,
        })
    }

    /// Route library diagnostics to stderr.
    pub fn init_tracing(&self) {
        let level = if self.output.is_verbose() {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(level)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Validated search settings.
    pub fn search_config(&self) -> Result<SearchConfig> {
        self.config
            .search
            .validate()
            .context("Invalid [search] configuration")?;
        Ok(self.config.search.clone())
    }

    /// Catalog path in effect: command line first, then config.
    ///
    /// Config paths are relative to the config file's directory.
    pub fn catalog_path(&self) -> Option<PathBuf> {
        if let Some(ref path) = self.catalog_override {
            return Some(self.resolve_path(path));
        }

        let path = self.config.catalog.path.as_ref()?;
        let base = self
            .config_path
            .as_ref()
            .and_then(|p| p.parent())
            .filter(|p| !p.as_os_str().is_empty());
        Some(match base {
            Some(dir) if Path::new(path).is_relative() => self.resolve_path(dir).join(path),
            _ => self.resolve_path(path),
        })
    }

    /// Load the catalog in effect, or the built-in fixture.
    pub fn load_catalog(&self) -> Result<LoadReport> {
        let report = match self.catalog_path() {
            Some(path) => {
                self.output
                    .debug(&format!("Loading catalog: {}", path.display()));
                Catalog::load(&path)
                    .with_context(|| format!("Failed to load catalog {}", path.display()))?
            }
            None => {
                self.output.debug("Using built-in catalog");
                LoadReport {
                    catalog: Catalog::builtin().context("Built-in catalog is invalid")?,
                    issues: Vec::new(),
                }
            }
        };

        for issue in &report.issues {
            self.output.warn(&format!("Skipped: {}", issue));
        }

        Ok(report)
    }

    /// Logger for one query, honoring `[logging]` and `--verbose`.
    pub fn logger(&self, query_id: QueryId, component: &str) -> StructuredLogger {
        let level = if self.output.is_verbose() {
            LogLevel::Debug
        } else {
            self.config.logging.level().unwrap_or_default()
        };
        let format = self.config.logging.format().unwrap_or_default();

        StructuredLogger::new(query_id)
            .with_component(component)
            .with_min_level(level)
            .with_format(format)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: impl AsRef<Path>) -> PathBuf {
        let path = path.as_ref();
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}

/// Find a config file in the directory tree.
pub fn find_config(start: &Path) -> Option<(PathBuf, CliConfig)> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                if let Ok(config) = CliConfig::load(&config_path) {
                    return Some((config_path, config));
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Find the config file in a single directory, without parsing it.
pub fn config_file_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("jewel-ctx-{}-{}", tag, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_find_config_walks_up() {
        let root = temp_dir("walk");
        let nested = root.join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.join(".jewel.toml"), "[search]\nmax_suggestions = 4\n").unwrap();

        let (path, config) = find_config(&nested).unwrap();
        assert_eq!(path, root.join(".jewel.toml"));
        assert_eq!(config.search.max_suggestions, 4);
        assert_eq!(config_file_in(&root), Some(root.join(".jewel.toml")));
        assert_eq!(config_file_in(&nested), None);

        std::fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_catalog_path_relative_to_config() {
        let root = temp_dir("catalog");
        let ctx = Context {
            config: CliConfig {
                catalog: crate::config::CatalogConfig {
                    path: Some("shop.json".to_string()),
                },
                ..CliConfig::default()
            },
            config_path: Some(root.join("jewel.toml")),
            catalog_override: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("/tmp"),
        };
        assert_eq!(ctx.catalog_path(), Some(root.join("shop.json")));

        let ctx = Context {
            catalog_override: Some("other.toml".to_string()),
            ..ctx
        };
        assert_eq!(ctx.catalog_path(), Some(PathBuf::from("/tmp/other.toml")));

        std::fs::remove_dir_all(&root).unwrap();
    }
}
