//! Configuration management

use crate::names::DEFAULT_MAX_ATTEMPTS;
use crate::types::RenamerError;
use clap::Parser;
use std::path::PathBuf;

/// Default directory for per-run log files (relative to the working directory)
pub const DEFAULT_LOG_DIR: &str = "logs";

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "box-renamer",
    version,
    about = "Replaces unsafe characters in file and folder names before uploading files to Box.",
    after_help = "Unsafe characters (\" : < > | * ? !) are replaced with '-'. \
                  Name collisions get a .CONFLICT-<n> suffix."
)]
pub struct Cli {
    /// The directory through which the renamer should recurse
    #[arg(value_name = "rootDirectory")]
    pub root_directory: PathBuf,

    /// Performs a dry run without making any changes
    #[arg(long = "dryRun", visible_alias = "dry-run")]
    pub dry_run: bool,

    /// Directory for the per-run log file
    #[arg(long, value_name = "DIR", default_value = DEFAULT_LOG_DIR)]
    pub log_dir: PathBuf,

    /// Give up on an entry after this many name collisions
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: u32,

    /// Skip entries matching this glob (repeatable)
    #[arg(long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Write a JSON report of every rename to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Hide the progress spinner
    #[arg(short, long)]
    pub quiet: bool,
}

/// Global configuration for a run
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory whence the renamer recurses (never renamed itself)
    pub root: PathBuf,

    /// Dry run (log planned renames, don't execute)
    pub dry_run: bool,

    /// Log file directory
    pub log_dir: PathBuf,

    /// Ceiling on collision retries per entry
    pub max_attempts: u32,

    /// Exclude patterns (globs)
    pub exclude_patterns: Vec<String>,

    /// Optional JSON report path
    pub report: Option<PathBuf>,

    pub quiet: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            dry_run: false,
            log_dir: PathBuf::from(DEFAULT_LOG_DIR),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            exclude_patterns: Vec::new(),
            report: None,
            quiet: false,
        }
    }
}

impl Config {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), RenamerError> {
        if !self.root.exists() {
            return Err(RenamerError::Config(format!(
                "Root directory does not exist: {:?}",
                self.root
            )));
        }

        if !self.root.is_dir() {
            return Err(RenamerError::Config(format!(
                "Root path is not a directory: {:?}",
                self.root
            )));
        }

        if self.max_attempts == 0 {
            return Err(RenamerError::Config(
                "--max-attempts must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

impl TryFrom<Cli> for Config {
    type Error = RenamerError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let config = Config {
            root: cli.root_directory,
            dry_run: cli.dry_run,
            log_dir: cli.log_dir,
            max_attempts: cli.max_attempts,
            exclude_patterns: cli.exclude,
            report: cli.report,
            quiet: cli.quiet,
        };
        config.validate()?;
        Ok(config)
    }
}
