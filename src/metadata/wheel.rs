//! Metadata extraction from `.whl` (zip container) distributions.

use anyhow::{Context, Result, bail};
use log::debug;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use zip::ZipArchive;

use super::{PackageMetadata, metadata_from_headers};
use crate::runtime::Runtime;

/// The subset of `metadata.json` a wheel's dist-info may carry.
#[derive(Deserialize)]
struct WheelManifest {
    name: String,
    version: String,
}

/// Read name and version from a wheel's `*.dist-info` directory.
/// Older wheels ship a JSON manifest; newer ones only the `METADATA`
/// header block, so both are tried in that order.
pub(super) fn read<R: Runtime>(runtime: &R, archive_path: &Path) -> Result<PackageMetadata> {
    let mut reader = runtime
        .open(archive_path)
        .with_context(|| format!("Failed to open archive at {:?}", archive_path))?;

    // zip requires Read + Seek while the runtime hands out a plain
    // reader, so buffer the archive in memory first.
    let mut buffer = Vec::new();
    reader
        .read_to_end(&mut buffer)
        .with_context(|| format!("Failed to read archive {:?}", archive_path))?;
    let mut archive = ZipArchive::new(std::io::Cursor::new(buffer))
        .context("Failed to parse wheel archive")?;

    if let Some(name) = entry_with_suffix(&archive, ".dist-info/metadata.json") {
        debug!("found {} in {}", name, archive_path.display());
        let contents = read_entry(&mut archive, &name)?;
        let manifest: WheelManifest =
            serde_json::from_str(&contents).context("Failed to parse metadata.json")?;
        return Ok(PackageMetadata {
            name: manifest.name,
            version: manifest.version,
        });
    }

    if let Some(name) = entry_with_suffix(&archive, ".dist-info/METADATA") {
        debug!("found {} in {}", name, archive_path.display());
        let contents = read_entry(&mut archive, &name)?;
        return metadata_from_headers(&contents, "METADATA");
    }

    bail!("no metadata entry found in {}", archive_path.display())
}

fn entry_with_suffix<R: Read + std::io::Seek>(
    archive: &ZipArchive<R>,
    suffix: &str,
) -> Option<String> {
    archive
        .file_names()
        .find(|name| name.ends_with(suffix))
        .map(str::to_string)
}

fn read_entry<R: Read + std::io::Seek>(archive: &mut ZipArchive<R>, name: &str) -> Result<String> {
    let mut entry = archive
        .by_name(name)
        .with_context(|| format!("Failed to read zip entry {name}"))?;
    let mut contents = String::new();
    entry
        .read_to_string(&mut contents)
        .with_context(|| format!("Failed to read zip entry {name}"))?;
    Ok(contents)
}
