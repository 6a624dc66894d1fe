use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "check-photo-dups")]
#[command(version, about = "Find duplicate photos in a directory tree by content hash")]
pub struct Cli {
    /// Directory to scan for photos
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Comma separated glob patterns or bare extensions (default: common photo formats)
    #[arg(long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Write a CSV report of every scanned file to this path
    #[arg(long)]
    pub output_file: Option<PathBuf>,

    /// Only list duplicate groups on the console
    #[arg(long)]
    pub show_duplicates_only: bool,

    /// Number of parallel threads for hashing (default: number of CPU cores)
    #[arg(short, long)]
    pub threads: Option<usize>,

    /// Match patterns case sensitively
    #[arg(long)]
    pub case_sensitive: bool,

    /// Load defaults from a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hide progress bars
    #[arg(long)]
    pub no_progress: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}
