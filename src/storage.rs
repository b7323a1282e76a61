//! Object storage boundary
//!
//! Buckets are directories below a root; object names may contain `/`.

use crate::error::StorageError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path, PathBuf};

/// Read and write whole objects by bucket and name
pub trait ObjectStore: Send + Sync {
    /// Full contents of an object
    fn read(&self, bucket: &str, name: &str) -> Result<Vec<u8>, StorageError>;

    /// Create or overwrite an object
    fn write(
        &self,
        bucket: &str,
        name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError>;
}

/// Object store backed by a local directory tree
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of an object, rejecting names that would escape the bucket
    pub fn object_path(&self, bucket: &str, name: &str) -> Result<PathBuf, StorageError> {
        let mut path = self.root.clone();
        path.push(checked_segment(bucket)?);
        if name.is_empty() {
            return Err(StorageError::InvalidName(name.to_string()));
        }
        for component in Path::new(name).components() {
            match component {
                Component::Normal(part) => path.push(part),
                _ => return Err(StorageError::InvalidName(name.to_string())),
            }
        }
        Ok(path)
    }
}

fn checked_segment(bucket: &str) -> Result<&str, StorageError> {
    if bucket.is_empty() || bucket.contains('/') || bucket == "." || bucket == ".." {
        return Err(StorageError::InvalidName(bucket.to_string()));
    }
    Ok(bucket)
}

fn map_io(err: std::io::Error, bucket: &str, name: &str) -> StorageError {
    match err.kind() {
        ErrorKind::NotFound => StorageError::NotFound {
            bucket: bucket.to_string(),
            name: name.to_string(),
        },
        ErrorKind::PermissionDenied => StorageError::PermissionDenied {
            bucket: bucket.to_string(),
            name: name.to_string(),
        },
        _ => StorageError::Io(err),
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, bucket: &str, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.object_path(bucket, name)?;
        fs::read(&path).map_err(|e| map_io(e, bucket, name))
    }

    fn write(
        &self,
        bucket: &str,
        name: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<(), StorageError> {
        let path = self.object_path(bucket, name)?;
        let dir = path
            .parent()
            .ok_or_else(|| StorageError::InvalidName(name.to_string()))?;
        fs::create_dir_all(dir).map_err(|e| map_io(e, bucket, name))?;

        // Stage next to the target so the rename stays on one filesystem
        let mut staged = tempfile::NamedTempFile::new_in(dir).map_err(|e| map_io(e, bucket, name))?;
        staged
            .write_all(bytes)
            .map_err(|e| map_io(e, bucket, name))?;
        staged
            .persist(&path)
            .map_err(|e| map_io(e.error, bucket, name))?;

        tracing::debug!(
            "Wrote {} bytes ({}) to {}",
            bytes.len(),
            content_type,
            path.display()
        );
        Ok(())
    }
}
