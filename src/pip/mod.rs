//! The pip boundary: executable discovery and structured command lines.

mod manager;

pub use manager::{InstalledPackage, PackageManager, PipCli, QueryOutcome};

#[cfg(test)]
pub use manager::MockPackageManager;

use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

/// Which pip executable services the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipVariant {
    #[default]
    Pip3,
    Pip2,
}

impl PipVariant {
    pub fn executable_name(self) -> &'static str {
        match self {
            PipVariant::Pip3 => "pip3",
            PipVariant::Pip2 => "pip2",
        }
    }
}

/// Locate the pip executable on PATH. A missing executable is fatal
/// for the whole run, so this is resolved once at startup and never
/// re-attempted.
#[tracing::instrument]
pub fn locate_pip(variant: PipVariant) -> Result<PathBuf> {
    let name = variant.executable_name();
    which::which(name).with_context(|| format!("'{}' is not available", name))
}

/// A fully resolved external command: program plus argument array.
///
/// Arguments are never joined into a shell string for execution; the
/// Display output exists for logs and dry runs only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl PipCommand {
    fn new<I, S>(program: &Path, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PipCommand {
            program: program.to_path_buf(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for PipCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

pub fn show_command(executable: &Path, package: &str) -> PipCommand {
    PipCommand::new(executable, ["show", package])
}

pub fn install_command(executable: &Path, archive: &Path, user: bool) -> PipCommand {
    let mut args = vec!["install".to_string()];
    if user {
        args.push("--user".to_string());
    }
    args.push(archive.display().to_string());
    PipCommand {
        program: executable.to_path_buf(),
        args,
    }
}

/// The interactive confirmation has already happened by the time this
/// command runs, so pip's own prompt is suppressed with `--yes`.
pub fn uninstall_command(executable: &Path, package: &str) -> PipCommand {
    PipCommand::new(executable, ["uninstall", "--yes", package])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_executable_names() {
        assert_eq!(PipVariant::Pip3.executable_name(), "pip3");
        assert_eq!(PipVariant::Pip2.executable_name(), "pip2");
        assert_eq!(PipVariant::default(), PipVariant::Pip3);
    }

    #[test]
    fn test_install_command_rendering() {
        let pip = Path::new("/usr/bin/pip3");

        let user = install_command(pip, Path::new("/tmp/pkg-1.0.tar.gz"), true);
        assert_eq!(
            user.to_string(),
            "/usr/bin/pip3 install --user /tmp/pkg-1.0.tar.gz"
        );

        let system = install_command(pip, Path::new("/tmp/pkg-1.0.tar.gz"), false);
        assert_eq!(system.to_string(), "/usr/bin/pip3 install /tmp/pkg-1.0.tar.gz");
    }

    #[test]
    fn test_uninstall_and_show_command_rendering() {
        let pip = Path::new("/usr/bin/pip3");

        assert_eq!(
            uninstall_command(pip, "demo").to_string(),
            "/usr/bin/pip3 uninstall --yes demo"
        );
        assert_eq!(
            show_command(pip, "demo").to_string(),
            "/usr/bin/pip3 show demo"
        );
    }

    #[test]
    fn test_command_args_are_a_structured_array() {
        // No shell string anywhere: a path with spaces stays one argument.
        let command = install_command(
            Path::new("/usr/bin/pip3"),
            Path::new("/tmp/my dists/pkg-1.0.tar.gz"),
            true,
        );
        assert_eq!(
            command.args,
            vec!["install", "--user", "/tmp/my dists/pkg-1.0.tar.gz"]
        );
    }
}
