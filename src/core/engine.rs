//! Concurrent hash engine
//!
//! Every input path owns exactly one pre-allocated result slot. Workers
//! write only to their own slot, so the result vector needs no locking;
//! returning from the pool is the join barrier. The pool is sized by
//! [`EngineConfig::effective_workers`], which bounds the number of files
//! open at the same time.

use crate::config::EngineConfig;
use crate::core::outcome::{FileFailure, FileOutcome};
use crate::error::{HashBridgeError, Result};
use crate::hash::hash_file_with_buffer;
use rayon::prelude::*;
use rayon::ThreadPool;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Hashes files one at a time or in ordered batches
///
/// The worker pool is built once in [`HashEngine::new`] and reused by every
/// [`HashEngine::hash_many`] call on the same engine. Building an engine
/// spawns up to `max_in_flight` OS threads, so callers hashing repeatedly
/// should keep one engine around.
#[derive(Debug, Clone)]
pub struct HashEngine {
    config: EngineConfig,
    pool: Option<Arc<ThreadPool>>,
}

impl HashEngine {
    /// Create an engine with a validated configuration
    ///
    /// If the worker pool cannot be built the engine still works, hashing
    /// batches sequentially on the calling thread.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;

        let workers = config.effective_workers(usize::MAX);
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("hashbridge-{}", i))
            .build()
            .map_err(|e| HashBridgeError::ThreadPoolError(e.to_string()))
        {
            Ok(pool) => Some(Arc::new(pool)),
            Err(e) => {
                tracing::warn!("{}; batches will be hashed sequentially", e);
                None
            }
        };

        Ok(Self { config, pool })
    }

    /// Create an engine without a worker pool
    ///
    /// Batches run on the calling thread. Used for single-file hashing,
    /// where spawning a pool would cost more than the hash.
    pub fn sequential(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, pool: None })
    }

    /// Hash a single file identified by raw path bytes
    ///
    /// Open and read failures are returned as [`FileOutcome::Failed`].
    pub fn hash_one(&self, path: &[u8]) -> FileOutcome {
        let fs_path = path_from_bytes(path);
        match hash_file_with_buffer(&fs_path, self.config.algorithm, self.config.buffer_size) {
            Ok(digest) => {
                tracing::trace!("Hashed {:?} ({} bytes)", fs_path, digest.size);
                FileOutcome::Hashed(digest)
            }
            Err(e) => {
                tracing::warn!("Failed to hash {:?}: {}", fs_path, e);
                FileOutcome::Failed(FileFailure::from_error(path, &e))
            }
        }
    }

    /// Hash every path, returning one outcome per path in input order
    pub fn hash_many<P>(&self, paths: &[P]) -> Vec<FileOutcome>
    where
        P: AsRef<[u8]> + Sync,
    {
        let start = Instant::now();
        tracing::debug!(
            "Hashing {} files with {} ({} workers)",
            paths.len(),
            self.config.algorithm.name(),
            self.config.effective_workers(paths.len())
        );

        let results = self.fill_slots(paths, |path| self.hash_one(path));

        let failed = results.iter().filter(|r| r.is_failure()).count();
        tracing::debug!(
            "Hashed {} files ({} failed) in {:?}",
            paths.len(),
            failed,
            start.elapsed()
        );

        results
    }

    /// Run `work` once per path, each call writing only its own slot
    fn fill_slots<P, F>(&self, paths: &[P], work: F) -> Vec<FileOutcome>
    where
        P: AsRef<[u8]> + Sync,
        F: Fn(&[u8]) -> FileOutcome + Sync,
    {
        let mut results: Vec<FileOutcome> = (0..paths.len()).map(|_| FileOutcome::Pending).collect();
        if paths.is_empty() {
            return results;
        }

        match &self.pool {
            Some(pool) => pool.install(|| {
                results
                    .par_iter_mut()
                    .zip(paths.par_iter())
                    .for_each(|(slot, path)| *slot = work(path.as_ref()));
            }),
            None => {
                for (slot, path) in results.iter_mut().zip(paths) {
                    *slot = work(path.as_ref());
                }
            }
        }

        debug_assert!(results.iter().all(FileOutcome::is_complete));
        results
    }
}

/// Convert raw path bytes into a filesystem path
#[cfg(unix)]
pub fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::os::unix::ffi::OsStrExt;
    PathBuf::from(std::ffi::OsStr::from_bytes(bytes))
}

/// Convert raw path bytes into a filesystem path
#[cfg(not(unix))]
pub fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

/// Raw bytes of a filesystem path
#[cfg(unix)]
pub fn path_to_bytes(path: &Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

/// Raw bytes of a filesystem path
#[cfg(not(unix))]
pub fn path_to_bytes(path: &Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}
