//! Command-line interface argument parsing.
//!
//! This module handles all CLI argument parsing using clap,
//! including validation. Options that also live in the configuration file
//! are `Option`s so an absent flag never overrides a configured value.

use crate::config::OutputFormat;
use clap::Parser;
use std::path::PathBuf;

/// multierror - validate many files at once and report every failure
///
/// Each path is checked independently and concurrently. Directories are
/// walked recursively. All failures are collected and printed as one
/// combined error.
///
/// Examples:
///   multierror src/ Cargo.toml
///   multierror --extensions rs,toml --max-file-size 65536 .
///   multierror --format json --output report.json data/
///   multierror --init-config
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Args {
    /// Files or directories to check
    #[arg(value_name = "PATHS", required_unless_present = "init_config")]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    ///
    /// If not specified, looks for .multierror.toml in the current directory
    #[arg(short, long, value_name = "FILE", env = "MULTIERROR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,

    /// Run in quiet mode (errors only)
    #[arg(short, long)]
    pub quiet: bool,

    /// Number of concurrent checks
    #[arg(long, value_name = "NUM")]
    pub concurrency: Option<usize>,

    /// Maximum file size in bytes
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// File extensions to include when walking directories (comma-separated)
    ///
    /// Example: --extensions rs,toml
    #[arg(long, value_name = "EXTS", value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Directory entry names to skip (comma-separated)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Do not require files to be valid UTF-8
    #[arg(long)]
    pub no_utf8: bool,

    /// Report format (text, json)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write the report to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Generate a default .multierror.toml configuration file
    #[arg(long)]
    pub init_config: bool,
}

impl Args {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate the parsed arguments.
    pub fn validate(&self) -> Result<(), String> {
        if self.init_config {
            return Ok(());
        }

        if self.concurrency == Some(0) {
            return Err("Concurrency must be at least 1".to_string());
        }

        if self.max_file_size == Some(0) {
            return Err("Max file size must be at least 1 byte".to_string());
        }

        if self.verbose && self.quiet {
            return Err("Cannot use both --verbose and --quiet".to_string());
        }

        Ok(())
    }

    /// Returns the log level based on the verbosity flags and the
    /// configured `[general] verbose` default. `--quiet` always wins.
    pub fn log_level(&self, verbose_by_config: bool) -> tracing::Level {
        if self.quiet {
            tracing::Level::ERROR
        } else if self.verbose || verbose_by_config {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args() -> Args {
        Args::parse_from(["multierror", "src"])
    }

    #[test]
    fn test_parse_paths_and_lists() {
        let args = Args::parse_from([
            "multierror",
            "a.txt",
            "dir",
            "--extensions",
            "rs,toml",
            "--format",
            "json",
        ]);
        assert_eq!(args.paths, vec![PathBuf::from("a.txt"), PathBuf::from("dir")]);
        assert_eq!(
            args.extensions,
            Some(vec!["rs".to_string(), "toml".to_string()])
        );
        assert_eq!(args.format, Some(OutputFormat::Json));
    }

    #[test]
    fn test_paths_required_without_init_config() {
        assert!(Args::try_parse_from(["multierror"]).is_err());
        assert!(Args::try_parse_from(["multierror", "--init-config"]).is_ok());
    }

    #[test]
    fn test_validation_zero_concurrency() {
        let mut args = make_args();
        args.concurrency = Some(0);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_validation_conflicting_options() {
        let mut args = make_args();
        args.verbose = true;
        args.quiet = true;
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_log_level() {
        let mut args = make_args();
        assert_eq!(args.log_level(false), tracing::Level::INFO);
        assert_eq!(args.log_level(true), tracing::Level::DEBUG);

        args.verbose = true;
        assert_eq!(args.log_level(false), tracing::Level::DEBUG);

        args.verbose = false;
        args.quiet = true;
        assert_eq!(args.log_level(false), tracing::Level::ERROR);
        assert_eq!(args.log_level(true), tracing::Level::ERROR);
    }
}
