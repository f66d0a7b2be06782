//! Metadata extraction from `.tar.gz` source distributions.

use anyhow::{Context, Result, bail};
use flate2::read::GzDecoder;
use log::debug;
use std::io::Read;
use std::path::Path;
use tar::Archive;

use super::{PackageMetadata, metadata_from_headers};
use crate::runtime::Runtime;

/// Locate the `PKG-INFO` entry inside a gzipped tarball and parse its
/// header block. The file handle is scoped to this call and closed on
/// every exit path.
pub(super) fn read<R: Runtime>(runtime: &R, archive_path: &Path) -> Result<PackageMetadata> {
    let file = runtime
        .open(archive_path)
        .with_context(|| format!("Failed to open archive at {:?}", archive_path))?;
    let mut archive = Archive::new(GzDecoder::new(file));

    for entry in archive.entries().context("Failed to read tar archive")? {
        let mut entry = entry.context("Failed to read tar entry")?;
        let is_manifest = entry
            .path()
            .ok()
            .is_some_and(|path| path.file_name().is_some_and(|name| name == "PKG-INFO"));
        if !is_manifest {
            continue;
        }

        debug!("found PKG-INFO in {}", archive_path.display());
        let mut block = String::new();
        entry
            .read_to_string(&mut block)
            .context("Failed to read PKG-INFO entry")?;
        return metadata_from_headers(&block, "PKG-INFO");
    }

    bail!("no PKG-INFO entry found in {}", archive_path.display())
}
