use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use glob::{MatchOptions, Pattern};
use log::{debug, info, warn};
use walkdir::WalkDir;

/// Photo formats scanned when no extensions are given.
pub const DEFAULT_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp", "heic", "raw", "cr2", "nef", "arw",
    "dng",
];

/// Canonicalizes the scan root. Anything that is not an existing, readable
/// directory is fatal.
pub fn resolve_root(path: &Path) -> Result<PathBuf> {
    let absolute = path
        .canonicalize()
        .with_context(|| format!("Failed to resolve path: '{}'", path.display()))?;

    if !absolute.is_dir() {
        bail!("Path is not a directory: '{}'", absolute.display());
    }

    fs::read_dir(&absolute)
        .with_context(|| format!("Failed to read directory: '{}'", absolute.display()))?;

    Ok(absolute)
}

/// A set of glob patterns matched against file base names.
#[derive(Debug)]
pub struct PatternSet {
    patterns: Vec<Pattern>,
    options: MatchOptions,
}

impl PatternSet {
    /// Builds the set from user supplied tokens.
    ///
    /// Bare extensions (`jpg`, `.jpg`) are expanded to `*.jpg`; tokens that
    /// already contain glob syntax are used as is. Blank tokens are ignored.
    pub fn new<S: AsRef<str>>(tokens: &[S], case_sensitive: bool) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut patterns = Vec::new();

        for token in tokens {
            let Some(glob) = normalize_token(token.as_ref()) else {
                continue;
            };
            if !seen.insert(glob.clone()) {
                continue;
            }
            let pattern = Pattern::new(&glob)
                .with_context(|| format!("Invalid extension pattern: '{}'", glob))?;
            patterns.push(pattern);
        }

        Ok(Self {
            patterns,
            options: MatchOptions {
                case_sensitive,
                require_literal_separator: false,
                require_literal_leading_dot: false,
            },
        })
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.patterns
            .iter()
            .any(|p| p.matches_with(file_name, self.options))
    }

    pub fn as_strs(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.as_str()).collect()
    }
}

fn normalize_token(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if token.contains(['*', '?', '[']) {
        return Some(token.to_string());
    }
    let ext = token.trim_start_matches('.');
    if ext.is_empty() {
        return None;
    }
    Some(format!("*.{}", ext))
}

/// Recursively lists every regular file under `root` whose name matches
/// `patterns`. Each path appears at most once, in walk order (sorted by file
/// name within each directory). Unreadable entries are skipped with a warning.
pub fn discover(root: &Path, patterns: &PatternSet) -> Vec<PathBuf> {
    if patterns.is_empty() {
        info!("No extension patterns given, nothing to scan");
        return Vec::new();
    }

    info!("Scanning {} for {}", root.display(), patterns.as_strs().join(", "));

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !patterns.matches(&name) {
            continue;
        }

        let path = entry.into_path();
        if seen.insert(path.clone()) {
            debug!("Found file: '{}'", path.display());
            files.push(path);
        }
    }

    info!("Found {} matching files", files.len());
    files
}
