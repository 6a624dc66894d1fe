use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::cli::Cli;
use crate::scanner::DEFAULT_EXTENSIONS;

/// Optional defaults loaded from a TOML file passed with `--config`.
///
/// Every key is optional; values given on the command line win.
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub extensions: Option<Vec<String>>,
    pub threads: Option<usize>,
    pub case_sensitive: Option<bool>,
    pub show_duplicates_only: Option<bool>,
    pub no_progress: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: '{}'", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: '{}'", path.display()))
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    pub path: PathBuf,
    pub extensions: Vec<String>,
    pub output_file: Option<PathBuf>,
    pub show_duplicates_only: bool,
    pub threads: usize,
    pub case_sensitive: bool,
    pub progress: bool,
}

impl Settings {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(cli, file))
    }

    /// CLI > config file > built-in default. Flags are OR-ed.
    pub fn merge(cli: &Cli, file: FileConfig) -> Self {
        let extensions = cli
            .extensions
            .clone()
            .or(file.extensions)
            .unwrap_or_else(|| DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect());

        let threads = cli
            .threads
            .or(file.threads)
            .unwrap_or_else(default_threads)
            .max(1);

        Self {
            path: cli.path.clone(),
            extensions,
            output_file: cli.output_file.clone(),
            show_duplicates_only: cli.show_duplicates_only
                || file.show_duplicates_only.unwrap_or(false),
            threads,
            case_sensitive: cli.case_sensitive || file.case_sensitive.unwrap_or(false),
            progress: !(cli.no_progress || file.no_progress.unwrap_or(false)),
        }
    }
}

fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}
