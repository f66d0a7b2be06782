//! Per-run configuration assembled from the command line.

use anyhow::Result;
use std::path::PathBuf;

use crate::dist::{ArchiveKind, Strategy};
use crate::pip::{PackageManager, PipCli, PipVariant, locate_pip};
use crate::runtime::Runtime;

/// Parsed command-line options. Constructed once per invocation and
/// read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub variant: PipVariant,
    pub strategy: Strategy,
    pub kind: ArchiveKind,
    pub dry_run: bool,
    pub system: bool,
    pub continue_on_decline: bool,
    /// Directory to search for an archive.
    pub package_dir: PathBuf,
    /// Explicit archive path, bypassing the directory search.
    pub target: Option<PathBuf>,
}

/// Everything a run needs, wired together once.
pub struct Config<R: Runtime, M: PackageManager> {
    pub runtime: R,
    pub manager: M,
    pub options: Options,
}

impl<R: Runtime> Config<R, PipCli> {
    /// Resolve the pip executable and freeze the run configuration.
    pub fn new(runtime: R, options: Options) -> Result<Self> {
        let executable = locate_pip(options.variant)?;
        Ok(Config {
            runtime,
            manager: PipCli::new(executable),
            options,
        })
    }
}
