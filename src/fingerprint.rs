use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use rayon::prelude::*;
use sha2::{Digest, Sha256};
use thiserror::Error;
use time::OffsetDateTime;

/// A successfully hashed file. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub full_path: PathBuf,
    pub file_name: String,
    pub directory: PathBuf,
    pub size_bytes: u64,
    /// Lowercase hex SHA-256 of the full content.
    pub content_hash: String,
    pub last_modified: OffsetDateTime,
    /// Not every filesystem records a birth time.
    pub created: Option<OffsetDateTime>,
}

#[derive(Debug, Error)]
pub enum FingerprintError {
    #[error("failed to open '{}': {source}", .path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("failed to read metadata for '{}': {source}", .path.display())]
    Metadata { path: PathBuf, source: io::Error },

    #[error("failed to read '{}': {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
}

/// Output of a fingerprinting pass: records in discovery order plus the
/// number of files that could not be hashed.
#[derive(Debug, Default)]
pub struct FingerprintBatch {
    pub records: Vec<FileRecord>,
    pub skipped: usize,
}

/// Hashes one file and captures its metadata from the same open handle.
pub fn fingerprint(path: &Path) -> Result<FileRecord, FingerprintError> {
    debug!("Calculating hash for: '{}'", path.display());

    let mut file = File::open(path).map_err(|source| FingerprintError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let metadata_err = |source| FingerprintError::Metadata {
        path: path.to_path_buf(),
        source,
    };
    let metadata = file.metadata().map_err(metadata_err)?;
    let last_modified = metadata.modified().map_err(metadata_err)?;
    let created = metadata.created().ok();

    let mut hasher = Sha256::new();
    let mut buffer = [0; 8192];
    let mut total_bytes = 0u64;

    loop {
        let bytes_read = file.read(&mut buffer).map_err(|source| FingerprintError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
        total_bytes += bytes_read as u64;
    }

    let content_hash = format!("{:x}", hasher.finalize());
    debug!(
        "Hash calculated for '{}': {} ({} bytes)",
        path.display(),
        content_hash,
        total_bytes
    );

    Ok(FileRecord {
        full_path: path.to_path_buf(),
        file_name: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        directory: path.parent().map(Path::to_path_buf).unwrap_or_default(),
        size_bytes: metadata.len(),
        content_hash,
        last_modified: OffsetDateTime::from(last_modified),
        created: created.map(OffsetDateTime::from),
    })
}

/// Fingerprints `paths` on a pool of `threads` workers.
///
/// `on_progress(processed, total)` fires after every file, failed or not.
/// Failures are logged and counted, never propagated. The returned records
/// keep the order of `paths` regardless of completion order.
pub fn fingerprint_all<F>(paths: &[PathBuf], threads: usize, on_progress: F) -> Result<FingerprintBatch>
where
    F: Fn(usize, usize) + Sync,
{
    let total = paths.len();
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .context("Failed to build hashing thread pool")?;

    info!("Hashing {} files (worker threads: {})", total, threads.max(1));

    let processed = AtomicUsize::new(0);
    let results: Vec<Result<FileRecord, FingerprintError>> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let result = fingerprint(path);
                if let Err(e) = &result {
                    warn!("Skipping file: {}", e);
                }
                let done = processed.fetch_add(1, Ordering::Relaxed) + 1;
                on_progress(done, total);
                result
            })
            .collect()
    });

    let mut batch = FingerprintBatch::default();
    for result in results {
        match result {
            Ok(record) => batch.records.push(record),
            Err(_) => batch.skipped += 1,
        }
    }

    info!(
        "Hashed {} files, skipped {}",
        batch.records.len(),
        batch.skipped
    );
    Ok(batch)
}
