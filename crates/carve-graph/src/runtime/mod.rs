//! Filesystem probe abstraction.
//!
//! The resolver and graph builder never touch the filesystem directly. All
//! existence checks, metadata lookups and reads go through the [`Runtime`]
//! trait so that builds can run against the real disk ([`native::NativeRuntime`]),
//! a temporary test project, or any other backing store a caller provides.

pub mod native;

// Test utilities (available in test builds)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Result type for runtime operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;

/// Errors that can occur during runtime operations
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// File not found
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(String),

    /// Other runtime error
    #[error("Runtime error: {0}")]
    Other(String),
}

impl RuntimeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::FileNotFound(_))
    }
}

/// File metadata
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// File size in bytes
    pub size: u64,
    /// Whether this is a directory
    pub is_dir: bool,
    /// Whether this is a regular file
    pub is_file: bool,
    /// Last modified timestamp (milliseconds since epoch)
    pub modified: Option<u64>,
}

/// Platform runtime trait
///
/// Implementations provide read-only access to module sources. Only
/// [`read_file`](Runtime::read_file) and [`metadata`](Runtime::metadata) may
/// fail with an I/O fault; a path that does not exist is reported by
/// [`exists`](Runtime::exists) returning `false`.
///
/// # Example
///
/// ```rust,ignore
/// use carve_graph::runtime::{FileMetadata, Runtime, RuntimeResult};
/// use async_trait::async_trait;
///
/// #[derive(Debug)]
/// struct MyRuntime;
///
/// #[async_trait]
/// impl Runtime for MyRuntime {
///     async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
///         // Platform-specific implementation
///     }
///
///     // ... implement other methods
/// }
/// ```
#[async_trait]
pub trait Runtime: Send + Sync + std::fmt::Debug {
    /// Read a file from the filesystem
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>>;

    /// Get file metadata
    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Get the current working directory
    fn get_cwd(&self) -> RuntimeResult<PathBuf>;

    /// Check whether `path` exists and is a regular file.
    ///
    /// Missing paths are `Ok(false)`; any other metadata failure is an I/O fault.
    async fn is_file(&self, path: &Path) -> RuntimeResult<bool> {
        if !self.exists(path) {
            return Ok(false);
        }
        match self.metadata(path).await {
            Ok(metadata) => Ok(metadata.is_file),
            Err(err) if err.is_not_found() => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// Read a file and decode it as UTF-8 text.
    async fn read_text(&self, path: &Path) -> RuntimeResult<String> {
        let bytes = self.read_file(path).await?;
        String::from_utf8(bytes).map_err(|e| {
            RuntimeError::Io(format!("Invalid UTF-8 in {}: {}", path.display(), e))
        })
    }
}
