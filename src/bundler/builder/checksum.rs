//! Distribution checksum calculation.
//!
//! Hashes a directory tree in a deterministic order so two builds of the
//! same inputs report the same digest.

use crate::bundler::error::{Error, ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::{fs::File, io::Read, path::Path};

/// SHA-256 digest and total byte size of a directory tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeDigest {
    /// Hex-encoded SHA-256 (64 characters).
    pub sha256: String,
    /// Sum of file sizes in bytes.
    pub size: u64,
}

/// Hashes every file under `dir`.
///
/// Each file contributes its relative path and then its content, visited in
/// lexicographic path order.
pub async fn digest_tree(dir: &Path) -> Result<TreeDigest> {
    let dir = dir.to_path_buf();
    tokio::task::spawn_blocking(move || digest_tree_blocking(&dir))
        .await
        .map_err(|e| Error::GenericError(format!("Checksum task panicked: {e}")))?
}

fn digest_tree_blocking(dir: &Path) -> Result<TreeDigest> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            entries.push(entry.into_path());
        }
    }
    entries.sort();

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];
    let mut size = 0u64;

    for path in entries {
        if let Ok(rel_path) = path.strip_prefix(dir) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
        }

        let mut file = File::open(&path).fs_context("opening file for hashing", &path)?;
        loop {
            let n = file
                .read(&mut buffer)
                .fs_context("reading file for hash calculation", &path)?;
            if n == 0 {
                break;
            }
            size += n as u64;
            hasher.update(&buffer[..n]);
        }
    }

    Ok(TreeDigest {
        sha256: format!("{:x}", hasher.finalize()),
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn digest_is_stable_and_counts_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("sub")).unwrap();
        std::fs::write(tmp.path().join("a.dll"), b"abc").unwrap();
        std::fs::write(tmp.path().join("sub/b.json"), b"{}").unwrap();

        let first = digest_tree(tmp.path()).await.unwrap();
        let second = digest_tree(tmp.path()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.size, 5);
        assert_eq!(first.sha256.len(), 64);
    }

    #[tokio::test]
    async fn content_changes_change_the_digest() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("a.dll"), b"abc").unwrap();
        let before = digest_tree(tmp.path()).await.unwrap();
        std::fs::write(tmp.path().join("a.dll"), b"abd").unwrap();
        let after = digest_tree(tmp.path()).await.unwrap();
        assert_ne!(before.sha256, after.sha256);
    }
}
