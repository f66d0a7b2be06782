use anyhow::Result;
use clap::Parser;
use distup::dist::{ArchiveKind, Strategy};
use distup::install::{self, Options, Outcome};
use distup::pip::PipVariant;
use distup::runtime::RealRuntime;
use std::path::PathBuf;
use std::process::ExitCode;

/// distup - install a locally built Python distribution archive
///
/// Looks for the highest-version tarball under a dist/ directory,
/// offers to uninstall any version of the package that pip already
/// knows about, then installs the archive with pip.
///
/// Examples:
///   distup                        # highest-version tarball from ./dist
///   distup -w -n                  # most recently built wheel
///   distup dist/pkg-1.0.tar.gz    # exactly this archive
#[derive(Parser, Debug)]
#[command(version = env!("DISTUP_VERSION"), about)]
struct Cli {
    /// Use pip2 instead of pip3
    #[arg(short = '2', long = "pip2")]
    pip2: bool,

    /// Print the commands that would run without executing them
    #[arg(short = 'd', long = "dry-run")]
    dry_run: bool,

    /// Prefer the most recently modified archive over the highest
    /// version
    #[arg(short = 'n', long = "new")]
    new: bool,

    /// Directory to search for an archive
    #[arg(
        short = 'p',
        long = "package",
        value_name = "DIR",
        default_value = ".",
        env = "DISTUP_DIST_DIR"
    )]
    package: PathBuf,

    /// Install into the system site instead of the per-user location
    #[arg(short = 's', long = "system")]
    system: bool,

    /// Emit informational logging
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,

    /// Search for wheel archives instead of tarballs
    #[arg(short = 'w', long = "wheel")]
    wheel: bool,

    /// Go on to the install prompt even when the uninstall prompt is
    /// declined
    #[arg(short = 'c', long = "continue-on-decline")]
    continue_on_decline: bool,

    /// Explicit archive to install, bypassing the directory search
    #[arg(value_name = "ARCHIVE")]
    target: Option<PathBuf>,
}

impl Cli {
    fn into_options(self) -> Options {
        Options {
            variant: if self.pip2 {
                PipVariant::Pip2
            } else {
                PipVariant::Pip3
            },
            strategy: if self.new {
                Strategy::Newest
            } else {
                Strategy::HighestVersion
            },
            kind: if self.wheel {
                ArchiveKind::Wheel
            } else {
                ArchiveKind::Sdist
            },
            dry_run: self.dry_run,
            system: self.system,
            continue_on_decline: self.continue_on_decline,
            package_dir: self.package,
            target: self.target,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match install::install(RealRuntime, cli.into_options()).await? {
        Outcome::Completed => Ok(ExitCode::SUCCESS),
        // A declined prompt is a normal abort, not an error to report.
        Outcome::Declined => Ok(ExitCode::FAILURE),
    }
}
