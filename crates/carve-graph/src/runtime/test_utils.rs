//! Test utilities for carve-graph.
//!
//! `TestRuntime` runs against real files in a temporary directory instead of
//! mocking the filesystem, so path cleaning and directory/file distinctions are
//! exercised exactly as they are in production. `DelayedRuntime` wraps another
//! runtime and stalls reads of selected files, which lets tests control the
//! order in which concurrent branches finish.

// Test utilities are allowed to use std::fs since they only run on native platforms
#![allow(clippy::disallowed_methods)]

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use super::{FileMetadata, Runtime, RuntimeError, RuntimeResult};

/// Simple test runtime that wraps std::fs for native tests.
///
/// ## Usage Example
///
/// ```rust,ignore
/// use tempfile::TempDir;
/// use carve_graph::runtime::Runtime;
/// use carve_graph::test_utils::TestRuntime;
/// use std::fs;
///
/// let temp = TempDir::new().unwrap();
/// let cwd = temp.path().to_path_buf();
/// let runtime = TestRuntime::new(cwd.clone());
///
/// fs::write(cwd.join("index.ts"), b"export {}").unwrap();
///
/// let content = runtime.read_file(&cwd.join("index.ts")).await.unwrap();
/// assert_eq!(content, b"export {}");
/// ```
#[derive(Debug)]
pub struct TestRuntime {
    cwd: PathBuf,
}

impl TestRuntime {
    /// Create a new test runtime with the specified working directory.
    pub fn new(cwd: PathBuf) -> Self {
        Self { cwd }
    }
}

#[async_trait]
impl Runtime for TestRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        std::fs::read(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RuntimeError::FileNotFound(path.to_path_buf())
            } else {
                RuntimeError::Io(e.to_string())
            }
        })
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                RuntimeError::FileNotFound(path.to_path_buf())
            } else {
                RuntimeError::Io(e.to_string())
            }
        })?;
        Ok(FileMetadata {
            size: metadata.len(),
            is_file: metadata.is_file(),
            is_dir: metadata.is_dir(),
            modified: metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(std::time::UNIX_EPOCH).ok())
                .map(|d| d.as_millis() as u64),
        })
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        Ok(self.cwd.clone())
    }
}

/// Runtime wrapper that delays reads of chosen files.
#[derive(Debug)]
pub struct DelayedRuntime {
    inner: Arc<dyn Runtime>,
    delays: FxHashMap<PathBuf, Duration>,
}

impl DelayedRuntime {
    pub fn new(inner: Arc<dyn Runtime>) -> Self {
        Self {
            inner,
            delays: FxHashMap::default(),
        }
    }

    /// Delay every read of `path` by `delay`.
    pub fn delay(mut self, path: impl Into<PathBuf>, delay: Duration) -> Self {
        self.delays.insert(path.into(), delay);
        self
    }
}

#[async_trait]
impl Runtime for DelayedRuntime {
    async fn read_file(&self, path: &Path) -> RuntimeResult<Vec<u8>> {
        if let Some(delay) = self.delays.get(path) {
            tokio::time::sleep(*delay).await;
        }
        self.inner.read_file(path).await
    }

    async fn metadata(&self, path: &Path) -> RuntimeResult<FileMetadata> {
        self.inner.metadata(path).await
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }

    fn get_cwd(&self) -> RuntimeResult<PathBuf> {
        self.inner.get_cwd()
    }
}

/// Create a project in `root` from `(relative path, content)` pairs.
pub fn create_test_project(root: &Path, files: &[(&str, &str)]) -> PathBuf {
    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("Failed to create parent directory for {path}: {e}"));
        }
        std::fs::write(&file_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file {path}: {e}"));
    }

    root.to_path_buf()
}
