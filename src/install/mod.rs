//! The orchestrated install flow: resolve an archive, read its
//! metadata, offer to uninstall any existing installation, then offer
//! to install the archive.

pub mod config;

use anyhow::{Context, Result, bail};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::dist::{detect_dist_dir, find_candidates, select};
use crate::metadata::{name_from_filename, read_metadata};
use crate::pip::{PackageManager, QueryOutcome};
use crate::runtime::Runtime;

pub use config::{Config, Options};

/// How a run ended when no error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Completed,
    /// The user answered a confirmation prompt with no.
    Declined,
}

enum PromptResult {
    Proceed,
    Declined,
}

/// Entry point wired by main: build the configuration, then run.
#[tracing::instrument(skip(runtime))]
pub async fn install<R: Runtime>(runtime: R, options: Options) -> Result<Outcome> {
    let config = Config::new(runtime, options)?;
    run(config).await
}

/// Drive one full install sequence against an already-wired
/// configuration.
#[tracing::instrument(skip(config))]
pub async fn run<R: Runtime, M: PackageManager>(config: Config<R, M>) -> Result<Outcome> {
    if !config.options.system && config.runtime.is_privileged() {
        warn!("running privileged; pass --system to skip the --user install");
    }

    let archive = resolve_archive(&config)?;
    info!("selected archive {}", archive.display());

    // A failed metadata read degrades to a filename-derived name and
    // skips the installed-package check entirely.
    let metadata = match read_metadata(&config.runtime, &archive) {
        Ok(meta) => {
            debug!("archive metadata: {} {}", meta.name, meta.version);
            Some(meta)
        }
        Err(error) => {
            warn!("unable to read archive metadata: {:#}", error);
            if let Some(name) = name_from_filename(&archive) {
                debug!("filename suggests package name '{}'", name);
            }
            None
        }
    };

    if let Some(meta) = &metadata {
        match offer_uninstall(&config, &meta.name).await? {
            PromptResult::Proceed => {}
            PromptResult::Declined if config.options.continue_on_decline => {
                info!("uninstall declined; continuing to the install prompt");
            }
            PromptResult::Declined => return Ok(Outcome::Declined),
        }
    }

    offer_install(&config, &archive).await
}

/// Resolve exactly one archive for this run: the explicit target when
/// one was given, otherwise the selected candidate from the dist
/// directory search.
fn resolve_archive<R: Runtime, M: PackageManager>(config: &Config<R, M>) -> Result<PathBuf> {
    if let Some(target) = &config.options.target {
        if !config.runtime.is_file(target) || !config.runtime.is_readable(target) {
            bail!("archive {} is not a readable file", target.display());
        }
        return Ok(target.clone());
    }

    let dir = detect_dist_dir(&config.runtime, &config.options.package_dir)?;
    let candidates = find_candidates(&config.runtime, &dir, config.options.kind)?;
    if candidates.is_empty() {
        bail!(
            "no package archive matching '*{}' found in {}",
            config.options.kind.extension(),
            dir.display()
        );
    }

    let selected = select(
        &candidates,
        config.options.strategy,
        config.options.kind.extension(),
    )
    .context("no archive could be selected")?;
    Ok(selected.path.clone())
}

async fn offer_uninstall<R: Runtime, M: PackageManager>(
    config: &Config<R, M>,
    package: &str,
) -> Result<PromptResult> {
    let installed = match config.manager.show(package).await? {
        QueryOutcome::Installed(installed) => installed,
        QueryOutcome::NotInstalled => {
            debug!("'{}' is not currently installed", package);
            return Ok(PromptResult::Proceed);
        }
        QueryOutcome::TimedOut => {
            warn!("query for '{}' timed out; skipping the uninstall step", package);
            return Ok(PromptResult::Proceed);
        }
    };

    println!("Name: {}", installed.name);
    println!("Version: {}", installed.version);
    println!(
        "Location: {}",
        installed.location.as_deref().unwrap_or("(unknown)")
    );
    println!("---------");

    let prompt = format!("Are you sure you'd like to uninstall '{}'?", installed.name);
    if !config.runtime.confirm(&prompt)? {
        return Ok(PromptResult::Declined);
    }

    let command = config.manager.uninstall_command(&installed.name);
    if config.options.dry_run {
        println!("DRY RUN: {}", command);
    } else {
        config.manager.execute(&command).await?;
    }
    Ok(PromptResult::Proceed)
}

async fn offer_install<R: Runtime, M: PackageManager>(
    config: &Config<R, M>,
    archive: &Path,
) -> Result<Outcome> {
    let display_path = config
        .runtime
        .canonicalize(archive)
        .unwrap_or_else(|_| archive.to_path_buf());
    println!("PACKAGE PATH: {}", display_path.display());

    let prompt = format!("Are you sure you'd like to install '{}'?", archive.display());
    if !config.runtime.confirm(&prompt)? {
        return Ok(Outcome::Declined);
    }

    let command = config
        .manager
        .install_command(archive, !config.options.system);
    if config.options.dry_run {
        println!("DRY RUN: {}", command);
    } else {
        config.manager.execute(&command).await?;
    }
    Ok(Outcome::Completed)
}
