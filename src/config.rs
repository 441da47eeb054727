//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.multierror.toml` files.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".multierror.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Check settings.
    #[serde(default)]
    pub checks: ChecksConfig,

    /// Report settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Number of concurrent checks.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            verbose: false,
        }
    }
}

fn default_concurrency() -> usize {
    4
}

/// File check settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// File extensions to include when walking directories. Empty means all.
    #[serde(default)]
    pub extensions: Vec<String>,

    /// Names to skip when walking directories.
    #[serde(default = "default_excludes")]
    pub excludes: Vec<String>,

    /// Maximum file size in bytes.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Reject files that are not valid UTF-8.
    #[serde(default = "default_true")]
    pub require_utf8: bool,

    /// Accept empty files.
    #[serde(default = "default_true")]
    pub allow_empty: bool,
}

impl Default for ChecksConfig {
    fn default() -> Self {
        Self {
            extensions: Vec::new(),
            excludes: default_excludes(),
            max_file_size: default_max_file_size(),
            require_utf8: true,
            allow_empty: true,
        }
    }
}

fn default_excludes() -> Vec<String> {
    vec![".git", "target", "node_modules", "vendor", "dist", "build"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_max_file_size() -> u64 {
    1024 * 1024 // 1MB
}

fn default_true() -> bool {
    true
}

/// Report output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    Text,
    /// JSON
    Json,
}

/// Report settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Write the report to this file instead of stdout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load configuration from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were given explicitly.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(concurrency) = args.concurrency {
            self.general.concurrency = concurrency;
        }
        if args.verbose {
            self.general.verbose = true;
        }

        if let Some(max_file_size) = args.max_file_size {
            self.checks.max_file_size = max_file_size;
        }
        if let Some(ref extensions) = args.extensions {
            self.checks.extensions = extensions.clone();
        }
        if let Some(ref excludes) = args.exclude {
            self.checks.excludes = excludes.clone();
        }
        if args.no_utf8 {
            self.checks.require_utf8 = false;
        }

        if let Some(format) = args.format {
            self.report.format = format;
        }
        if let Some(ref output) = args.output {
            self.report.output = Some(output.clone());
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
