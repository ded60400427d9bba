//! Configuration file support for malaria-demo.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/malaria-demo/config.toml` (lowest priority)
//! - Project-local: `.malaria-demo.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Longest step delay accepted from config or CLI, in milliseconds.
pub const MAX_STEP_DELAY_MS: u64 = 10_000;

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Engine pacing settings.
    pub engine: EngineConfig,
    /// Built-in sample settings.
    pub samples: SamplesConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Engine configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pause before each progress step, in milliseconds.
    pub step_delay_ms: Option<u64>,
    /// Seed for reproducible progress steps.
    pub seed: Option<u64>,
}

/// Built-in sample configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SamplesConfig {
    /// Prefix the built-in samples are published under.
    pub base: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "json", "jsonl" or "text".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/malaria-demo/config.toml`
    /// 2. Project-local: `.malaria-demo.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are reported as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(ms) = self.engine.step_delay_ms {
            if ms > MAX_STEP_DELAY_MS {
                return Err(format!(
                    "engine.step_delay_ms must be at most {MAX_STEP_DELAY_MS}, got {ms}"
                ));
            }
        }

        if let Some(ref base) = self.samples.base {
            if base.trim().is_empty() {
                return Err("samples.base must not be blank".to_string());
            }
        }

        if let Some(ref f) = self.output.format {
            if !matches!(f.as_str(), "json" | "jsonl" | "text") {
                return Err(format!(
                    "output.format must be 'json', 'jsonl' or 'text', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Engine
        self.engine.step_delay_ms = other.engine.step_delay_ms.or(self.engine.step_delay_ms);
        self.engine.seed = other.engine.seed.or(self.engine.seed);

        // Samples
        self.samples.base = other.samples.base.or_else(|| self.samples.base.take());

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("malaria-demo").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.malaria-demo.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".malaria-demo.toml"))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
