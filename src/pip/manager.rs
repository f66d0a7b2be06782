//! Subprocess-backed package manager operations.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

use super::{PipCommand, install_command, show_command, uninstall_command};
use crate::metadata::header_field;

/// How long a `show` query may run before it is written off as hung.
/// Install and uninstall are deliberately unbounded; they are
/// long-running and their output is user-visible.
const SHOW_TIMEOUT: Duration = Duration::from_secs(5);

/// What the package manager knows about an installed package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledPackage {
    pub name: String,
    pub version: String,
    pub location: Option<String>,
}

/// Result of asking the package manager about a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    Installed(InstalledPackage),
    NotInstalled,
    /// The query process overran its deadline. Handled like
    /// NotInstalled, but logged so the difference stays visible.
    TimedOut,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Command line that would install the given archive.
    fn install_command(&self, archive: &Path, user: bool) -> PipCommand;

    /// Command line that would uninstall the given package.
    fn uninstall_command(&self, package: &str) -> PipCommand;

    /// Ask whether a package is currently installed.
    async fn show(&self, package: &str) -> Result<QueryOutcome>;

    /// Run a state-changing command, surfacing a non-zero exit as an
    /// error. No retries.
    async fn execute(&self, command: &PipCommand) -> Result<()>;
}

/// The real pip CLI, driven through subprocess argument arrays.
pub struct PipCli {
    executable: PathBuf,
    show_timeout: Duration,
}

impl PipCli {
    pub fn new(executable: PathBuf) -> Self {
        PipCli {
            executable,
            show_timeout: SHOW_TIMEOUT,
        }
    }

    #[cfg(test)]
    fn with_show_timeout(executable: PathBuf, show_timeout: Duration) -> Self {
        PipCli {
            executable,
            show_timeout,
        }
    }
}

#[async_trait]
impl PackageManager for PipCli {
    fn install_command(&self, archive: &Path, user: bool) -> PipCommand {
        install_command(&self.executable, archive, user)
    }

    fn uninstall_command(&self, package: &str) -> PipCommand {
        uninstall_command(&self.executable, package)
    }

    #[tracing::instrument(skip(self))]
    async fn show(&self, package: &str) -> Result<QueryOutcome> {
        let command = show_command(&self.executable, package);
        debug!("querying installed package: {}", command);

        // kill_on_drop reaps the child when the deadline lapses.
        let mut process = Command::new(&command.program);
        process.args(&command.args).kill_on_drop(true);

        let output = match timeout(self.show_timeout, process.output()).await {
            Ok(result) => {
                result.with_context(|| format!("Failed to run {}", command))?
            }
            Err(_) => {
                warn!(
                    "'{}' gave no answer within {:?}; treating '{}' as not installed",
                    command, self.show_timeout, package
                );
                return Ok(QueryOutcome::TimedOut);
            }
        };

        if !output.status.success() {
            debug!("'{}' reported no such package ({})", command, output.status);
            return Ok(QueryOutcome::NotInstalled);
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(match parse_show_output(&stdout) {
            Some(installed) => QueryOutcome::Installed(installed),
            None => QueryOutcome::NotInstalled,
        })
    }

    #[tracing::instrument(skip(self))]
    async fn execute(&self, command: &PipCommand) -> Result<()> {
        info!("running {}", command);
        let mut process = Command::new(&command.program);
        process.args(&command.args);
        let status = process
            .status()
            .await
            .with_context(|| format!("Failed to run {}", command))?;

        if !status.success() {
            bail!("'{}' exited with {}", command, status);
        }
        Ok(())
    }
}

/// Parse the header block `pip show` prints for an installed package.
/// Missing name or version means the output did not describe one.
fn parse_show_output(stdout: &str) -> Option<InstalledPackage> {
    let name = header_field(stdout, "Name")?;
    let version = header_field(stdout, "Version")?;
    let location = header_field(stdout, "Location");
    Some(InstalledPackage {
        name,
        version,
        location,
    })
}
