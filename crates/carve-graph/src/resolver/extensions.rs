//! Extension resolution for module files.
//!
//! Turns an extension-less or directory candidate into a concrete file by
//! appending each configured extension, then each `/index` + extension.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::trace;

use super::options::ResolveResult;
use crate::runtime::{Runtime, RuntimeError};

/// Ensure an extension has exactly one leading dot (`ts` -> `.ts`).
pub fn normalize_extension(extension: &str) -> Option<String> {
    let trimmed = extension.trim().trim_start_matches('.');
    (!trimmed.is_empty()).then(|| format!(".{trimmed}"))
}

/// Whether the file name of `path` ends in one of `extensions`.
pub fn has_supported_extension(path: &Path, extensions: &[String]) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    extensions
        .iter()
        .any(|ext| name.len() > ext.len() && name.ends_with(ext.as_str()))
}

/// Candidates probed after the path itself, in order: every extension
/// appended to the path, then every `index` file inside it.
pub fn candidates(base_path: &Path, extensions: &[String]) -> Vec<PathBuf> {
    let appended = extensions.iter().map(|ext| {
        let mut raw = OsString::from(base_path.as_os_str());
        raw.push(ext);
        PathBuf::from(raw)
    });
    let index_files = extensions
        .iter()
        .map(|ext| base_path.join(format!("index{ext}")));

    appended.chain(index_files).collect()
}

/// Resolve a cleaned absolute candidate to a file.
///
/// Missing files are not errors. Only metadata failures other than
/// "not found" propagate.
pub async fn resolve_with_extensions(
    candidate: PathBuf,
    extensions: &[String],
    runtime: &dyn Runtime,
) -> Result<ResolveResult, RuntimeError> {
    let is_file = runtime.is_file(&candidate).await?;
    if is_file && has_supported_extension(&candidate, extensions) {
        return Ok(ResolveResult::Local(candidate));
    }

    for probe in candidates(&candidate, extensions) {
        trace!(path = %probe.display(), "probing");
        if runtime.is_file(&probe).await? {
            return Ok(ResolveResult::Local(probe));
        }
    }

    if is_file {
        Ok(ResolveResult::Unsupported(candidate))
    } else {
        Ok(ResolveResult::NotFound(candidate))
    }
}
