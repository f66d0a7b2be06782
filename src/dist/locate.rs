//! Locating the distribution directory and the archives inside it.

use anyhow::{Context, Result};
use log::debug;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::ArchiveKind;
use crate::runtime::Runtime;

/// An archive file discovered in the distribution directory.
/// Immutable once discovered; lives only for the duration of a run.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl Candidate {
    pub fn file_name(&self) -> &str {
        self.path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default()
    }
}

/// Resolve the directory holding distribution archives.
///
/// Searched in order: the start directory itself, its `dist` child, and
/// a `dist` child of its parent. A match must be a directory whose
/// resolved name is exactly `dist`; without one, the current directory
/// is used.
#[tracing::instrument(skip(runtime))]
pub fn detect_dist_dir<R: Runtime>(runtime: &R, start: &Path) -> Result<PathBuf> {
    let search = [
        start.to_path_buf(),
        start.join("dist"),
        start.join("..").join("dist"),
    ];

    for candidate in search {
        if !runtime.is_dir(&candidate) {
            continue;
        }
        let resolved = runtime
            .canonicalize(&candidate)
            .unwrap_or_else(|_| candidate.clone());
        if resolved.file_name().is_some_and(|name| name == "dist") {
            debug!("using distribution directory {}", candidate.display());
            return Ok(candidate);
        }
    }

    debug!(
        "no dist directory near {}, falling back to the current directory",
        start.display()
    );
    runtime.current_dir()
}

/// Enumerate regular, readable archive files in `dir` with the
/// extension for `kind`, sorted by name for deterministic selection.
#[tracing::instrument(skip(runtime))]
pub fn find_candidates<R: Runtime>(
    runtime: &R,
    dir: &Path,
    kind: ArchiveKind,
) -> Result<Vec<Candidate>> {
    let extension = kind.extension();
    let mut candidates = Vec::new();

    let entries = runtime
        .read_dir(dir)
        .with_context(|| format!("Failed to list {}", dir.display()))?;

    for path in entries {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            continue;
        };
        if !name.ends_with(extension) {
            continue;
        }
        if !runtime.is_file(&path) || !runtime.is_readable(&path) {
            debug!("skipping unreadable entry {}", path.display());
            continue;
        }
        let modified = match runtime.modified(&path) {
            Ok(modified) => modified,
            Err(error) => {
                debug!("skipping {}: {:#}", path.display(), error);
                continue;
            }
        };
        candidates.push(Candidate { path, modified });
    }

    candidates.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(candidates)
}
