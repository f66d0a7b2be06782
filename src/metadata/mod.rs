//! Package metadata extraction from distribution archives.
//!
//! Both supported containers embed a manifest describing the package:
//! sdists carry a `PKG-INFO` header block, wheels a `*.dist-info`
//! directory with either a JSON manifest or the same header format.

mod sdist;
mod wheel;

use anyhow::{Context, Result, bail};
use std::path::Path;

use crate::runtime::Runtime;

/// Name and version read from an archive's embedded manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    pub name: String,
    pub version: String,
}

/// Read metadata from a distribution archive, dispatching on the file
/// extension to the tar or zip reader.
#[tracing::instrument(skip(runtime))]
pub fn read_metadata<R: Runtime>(runtime: &R, archive: &Path) -> Result<PackageMetadata> {
    let name = archive
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_lowercase();

    if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
        sdist::read(runtime, archive)
    } else if name.ends_with(".whl") || name.ends_with(".zip") {
        wheel::read(runtime, archive)
    } else {
        bail!("Unsupported archive format: {}", archive.display())
    }
}

const ARCHIVE_EXTENSIONS: [&str; 4] = [".tar.gz", ".tgz", ".whl", ".zip"];

/// Approximate the package name from an archive filename, for use when
/// the embedded manifest cannot be read.
///
/// `/path/to/archive-0.3.tar.gz` yields `archive`. Name segments run
/// up to the first one that starts with a digit, so
/// `some-pkg-0.3.tar.gz` yields `some-pkg`.
pub fn name_from_filename(archive: &Path) -> Option<String> {
    let file_name = archive.file_name()?.to_str()?;
    let stem = ARCHIVE_EXTENSIONS
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .unwrap_or(file_name);

    let name: Vec<&str> = stem
        .split('-')
        .take_while(|part| !part.starts_with(|c: char| c.is_ascii_digit()))
        .collect();

    (!name.is_empty()).then(|| name.join("-"))
}

/// Look up a field in an RFC 822 style header block, as used by both
/// `PKG-INFO` manifests and `pip show` output. Field names match
/// case-insensitively; the first occurrence wins.
pub(crate) fn header_field(block: &str, field: &str) -> Option<String> {
    block.lines().find_map(|line| {
        let (key, value) = line.split_once(':')?;
        key.trim()
            .eq_ignore_ascii_case(field)
            .then(|| value.trim().to_string())
    })
}

pub(crate) fn metadata_from_headers(block: &str, origin: &str) -> Result<PackageMetadata> {
    let name =
        header_field(block, "Name").with_context(|| format!("field 'Name' not found in {origin}"))?;
    let version = header_field(block, "Version")
        .with_context(|| format!("field 'Version' not found in {origin}"))?;
    Ok(PackageMetadata { name, version })
}
