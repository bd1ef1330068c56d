//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use browse_commerce::catalog::CatalogStore;
use browse_observability::{SessionId, StructuredLogger};

use crate::config::{BrowseConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    pub config: BrowseConfig,
    /// File the config was read from, if any.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => {
                let path = resolve(&cwd, path);
                (BrowseConfig::load(&path)?, Some(path))
            }
            None => match find_config(&cwd) {
                Some(path) => (BrowseConfig::load(&path)?, Some(path)),
                None => (BrowseConfig::default(), None),
            },
        };

        if let Some(ref path) = config_path {
            output.debug(&format!("Using config {}", path.display()));
        }

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Load the configured catalog, or the bundled sample.
    pub fn catalog(&self) -> Result<CatalogStore> {
        let Some(ref path) = self.config.catalog.path else {
            return Ok(CatalogStore::sample());
        };

        let path = resolve(self.config_dir(), path);
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read catalog: {}", path.display()))?;
        let catalog = CatalogStore::from_json(&json)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))?;

        self.output
            .debug(&format!("Loaded {} products from {}", catalog.len(), path.display()));
        Ok(catalog)
    }

    /// A session logger in the configured format.
    pub fn logger(&self, component: &str) -> StructuredLogger {
        StructuredLogger::new(SessionId::generate())
            .with_component(component)
            .with_format(self.config.display.log_format)
    }

    /// Directory relative config paths resolve against.
    pub fn config_dir(&self) -> &Path {
        self.config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path())
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        resolve(&self.cwd, path)
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}

/// Find a config file in the directory tree.
fn find_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_FILE_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
