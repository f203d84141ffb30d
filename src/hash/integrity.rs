//! Streaming content digests
//!
//! Supports SHA-256 (the boundary default), BLAKE3, XXHash3 and XXHash64.
//! File content is fed through the hasher in fixed-size chunks so memory
//! use does not depend on file size.

use crate::config::HashAlgorithm;
use crate::error::{IoResultExt, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Content digest of a file or buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Digest {
    /// The hash algorithm used
    pub algorithm: HashAlgorithm,
    /// Hash value as lowercase hex string
    pub hex: String,
    /// Number of bytes hashed
    pub size: u64,
}

impl Digest {
    /// Create a new digest
    pub fn new(algorithm: HashAlgorithm, hex: String, size: u64) -> Self {
        Self { algorithm, hex, size }
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex)
    }
}

/// Unified hasher that supports all algorithms
pub enum Hasher {
    /// SHA-256
    Sha256(sha2::Sha256),
    /// BLAKE3
    Blake3(Box<blake3::Hasher>),
    /// XXHash3 128-bit
    XXHash3(Box<xxhash_rust::xxh3::Xxh3>),
    /// XXHash64
    XXHash64(xxhash_rust::xxh64::Xxh64),
}

impl Hasher {
    /// Create a new hasher for the given algorithm
    pub fn new(algorithm: HashAlgorithm) -> Self {
        match algorithm {
            HashAlgorithm::Sha256 => {
                use sha2::Digest as _;
                Self::Sha256(sha2::Sha256::new())
            }
            HashAlgorithm::Blake3 => Self::Blake3(Box::new(blake3::Hasher::new())),
            HashAlgorithm::XXHash3 => Self::XXHash3(Box::new(xxhash_rust::xxh3::Xxh3::new())),
            HashAlgorithm::XXHash64 => Self::XXHash64(xxhash_rust::xxh64::Xxh64::new(0)),
        }
    }

    /// Get the algorithm this hasher uses
    pub fn algorithm(&self) -> HashAlgorithm {
        match self {
            Self::Sha256(_) => HashAlgorithm::Sha256,
            Self::Blake3(_) => HashAlgorithm::Blake3,
            Self::XXHash3(_) => HashAlgorithm::XXHash3,
            Self::XXHash64(_) => HashAlgorithm::XXHash64,
        }
    }

    /// Update the hasher with more data
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Self::Sha256(h) => {
                use sha2::Digest as _;
                h.update(data);
            }
            Self::Blake3(h) => {
                h.update(data);
            }
            Self::XXHash3(h) => h.update(data),
            Self::XXHash64(h) => h.update(data),
        }
    }

    /// Finalize and get the hash as lowercase hex string
    pub fn finalize(self) -> String {
        match self {
            Self::Sha256(h) => {
                use sha2::Digest as _;
                hex::encode(h.finalize())
            }
            Self::Blake3(h) => h.finalize().to_hex().to_string(),
            Self::XXHash3(h) => format!("{:032x}", h.digest128()),
            Self::XXHash64(h) => format!("{:016x}", h.digest()),
        }
    }
}

/// Hasher that also counts the bytes it has seen
pub struct StreamingHasher {
    hasher: Hasher,
    bytes_processed: u64,
}

impl StreamingHasher {
    /// Create a new streaming hasher
    pub fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            hasher: Hasher::new(algorithm),
            bytes_processed: 0,
        }
    }

    /// Process a chunk of data
    pub fn process(&mut self, data: &[u8]) {
        self.hasher.update(data);
        self.bytes_processed += data.len() as u64;
    }

    /// Finalize and get the digest
    pub fn finalize(self) -> Digest {
        let algorithm = self.hasher.algorithm();
        Digest::new(algorithm, self.hasher.finalize(), self.bytes_processed)
    }
}

/// Compute the digest of a file with a custom read buffer size
///
/// The file handle is released when this function returns, on every path.
pub fn hash_file_with_buffer(
    path: &Path,
    algorithm: HashAlgorithm,
    buffer_size: usize,
) -> Result<Digest> {
    let file = File::open(path).with_path(path)?;
    hash_reader(file, algorithm, buffer_size).with_path(path)
}

/// Stream a reader to EOF through a hasher
pub fn hash_reader<R: Read>(
    mut reader: R,
    algorithm: HashAlgorithm,
    buffer_size: usize,
) -> std::io::Result<Digest> {
    let mut hasher = StreamingHasher::new(algorithm);
    let mut buffer = vec![0u8; buffer_size.max(1)];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.process(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize())
}

/// Compute the digest of data in memory
pub fn hash_bytes(data: &[u8], algorithm: HashAlgorithm) -> Digest {
    let mut hasher = StreamingHasher::new(algorithm);
    hasher.process(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_BUFFER_SIZE;
    use std::io::Write;
    use tempfile::TempDir;

    const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

    fn create_test_file(dir: &Path, content: &[u8]) -> std::path::PathBuf {
        let path = dir.join("test.bin");
        let mut file = File::create(&path).unwrap();
        file.write_all(content).unwrap();
        path
    }

    #[test]
    fn test_hash_algorithms() {
        let data = b"Hello, World!";

        for algorithm in [
            HashAlgorithm::Sha256,
            HashAlgorithm::Blake3,
            HashAlgorithm::XXHash3,
            HashAlgorithm::XXHash64,
        ] {
            let digest = hash_bytes(data, algorithm);
            assert_eq!(digest.hex.len(), algorithm.hex_len());
            assert!(digest.hex.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
            assert_eq!(digest.size, data.len() as u64);

            // Verify determinism
            assert_eq!(digest, hash_bytes(data, algorithm));
        }
    }

    #[test]
    fn test_empty_file_sha256() {
        let dir = TempDir::new().unwrap();
        let path = create_test_file(dir.path(), b"");

        let digest = hash_file_with_buffer(&path, HashAlgorithm::Sha256, DEFAULT_BUFFER_SIZE).unwrap();
        assert_eq!(digest.hex, EMPTY_SHA256);
        assert_eq!(digest.size, 0);
    }

    #[test]
    fn test_known_sha256() {
        let digest = hash_bytes(b"abc", HashAlgorithm::Sha256);
        assert_eq!(
            digest.hex,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_file_matches_memory() {
        let dir = TempDir::new().unwrap();
        let content: Vec<u8> = (0..300_000u32).map(|i| (i % 251) as u8).collect();
        let path = create_test_file(dir.path(), &content);

        // Small buffer forces many read iterations
        let file_digest = hash_file_with_buffer(&path, HashAlgorithm::Blake3, 4096).unwrap();
        let memory_digest = hash_bytes(&content, HashAlgorithm::Blake3);

        assert_eq!(file_digest, memory_digest);
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.bin");

        let err = hash_file_with_buffer(&missing, HashAlgorithm::Sha256, DEFAULT_BUFFER_SIZE).unwrap_err();
        assert!(matches!(err, crate::error::HashBridgeError::Io { ref path, .. } if path == &missing));
    }

    #[test]
    fn test_streaming_hasher() {
        let mut hasher = StreamingHasher::new(HashAlgorithm::Sha256);

        hasher.process(b"Hello, ");
        hasher.process(b"World!");

        let result = hasher.finalize();
        let direct = hash_bytes(b"Hello, World!", HashAlgorithm::Sha256);

        assert_eq!(result.hex, direct.hex);
        assert_eq!(result.size, 13);
    }
}
