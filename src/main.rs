//! multierror - validate many files concurrently and report every failure
//!
//! Exit codes:
//!   0 - Success (all checks passed)
//!   1 - Runtime error (bad arguments, config, report write failure)
//!   2 - One or more checks failed

use anyhow::{Context, Result};
use multierror::checks::{CheckConfig, FileChecker};
use multierror::cli::Args;
use multierror::config::{Config, OutputFormat, CONFIG_FILE_NAME};
use multierror::models::CheckReport;
use multierror::{report, BatchRunner};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse_args();

    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config is read before logging starts so `[general] verbose` can set the level.
    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(&args, &config);

    info!("multierror v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    log_config_source(source);

    match run_checks(args, config).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Run failed: {:#}", e);
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .multierror.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!("{} already exists. Remove it first or edit it manually.", CONFIG_FILE_NAME);
        std::process::exit(1);
    }

    std::fs::write(path, Config::default_toml())
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("Created {} with default settings.", CONFIG_FILE_NAME);
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args, config: &Config) {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level(config.general.verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Run every check and emit the report. Returns exit code (0 or 2).
async fn run_checks(args: Args, config: Config) -> Result<i32> {
    let start_time = Instant::now();

    debug!("Effective config: {:?}", config);

    let checker = FileChecker::new(CheckConfig::from(&config.checks));
    let files = checker.expand(&args.paths);
    info!(
        "Checking {} files with concurrency {}",
        files.len(),
        config.general.concurrency
    );

    let runner = BatchRunner::new(config.general.concurrency);
    let outcome = runner
        .run(files, |path| checker.check_async(path))
        .await;

    let check_report = CheckReport::from_outcome(outcome, start_time.elapsed().as_secs_f64());

    let output = match config.report.format {
        OutputFormat::Json => report::generate_json_report(&check_report)?,
        OutputFormat::Text => report::generate_text_report(&check_report),
    };

    match &config.report.output {
        Some(path) => {
            report::write_report(&output, path)?;
            info!("Report saved to {}", path.display());
        }
        None => print!("{}", output),
    }

    if check_report.passed() {
        return Ok(0);
    }

    warn!(
        "{} of {} checks failed",
        check_report.metadata.files_failed, check_report.metadata.files_checked
    );
    Ok(2)
}

/// Where the effective configuration came from.
enum ConfigSource {
    Explicit(PathBuf),
    DefaultFile,
    Builtin,
    /// The default file exists but could not be loaded.
    Invalid(anyhow::Error),
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<(Config, ConfigSource)> {
    if let Some(ref config_path) = args.config {
        let config = Config::load(config_path)?;
        return Ok((config, ConfigSource::Explicit(config_path.clone())));
    }

    match Config::load_default() {
        Ok(Some(config)) => Ok((config, ConfigSource::DefaultFile)),
        Ok(None) => Ok((Config::default(), ConfigSource::Builtin)),
        Err(e) => Ok((Config::default(), ConfigSource::Invalid(e))),
    }
}

fn log_config_source(source: ConfigSource) {
    match source {
        ConfigSource::Explicit(path) => info!("Loaded config from: {}", path.display()),
        ConfigSource::DefaultFile => info!("Loaded default config from {}", CONFIG_FILE_NAME),
        ConfigSource::Builtin => debug!("No config file found, using defaults"),
        ConfigSource::Invalid(e) => warn!("Failed to load config: {:#}", e),
    }
}
