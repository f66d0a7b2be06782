//! Selection of exactly one archive among the discovered candidates.

use log::debug;

use super::Candidate;
use super::version::{compare_versions, is_version_like, version_token};

/// Pre-release suffixes checked against the chosen base version, in
/// fixed priority order.
const PRERELEASE_SUFFIXES: [&str; 8] = [
    "-rev", ".rev", "-dev", ".dev", "-beta", ".beta", "-alpha", ".alpha",
];

/// How to pick one archive when several are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Greatest file modification time wins.
    Newest,
    /// Greatest parsed version token wins, refined by pre-release
    /// suffix preference.
    #[default]
    HighestVersion,
}

/// Pick one candidate, or nothing when the list is empty.
pub fn select<'a>(
    candidates: &'a [Candidate],
    strategy: Strategy,
    extension: &str,
) -> Option<&'a Candidate> {
    match strategy {
        Strategy::Newest => candidates.iter().max_by_key(|c| c.modified),
        Strategy::HighestVersion => select_highest_version(candidates, extension),
    }
}

fn select_highest_version<'a>(
    candidates: &'a [Candidate],
    extension: &str,
) -> Option<&'a Candidate> {
    let versioned: Vec<(&Candidate, &str)> = candidates
        .iter()
        .filter_map(|candidate| {
            version_token(candidate.file_name(), extension)
                .filter(|token| is_version_like(token))
                .map(|token| (candidate, token))
        })
        .collect();

    let base = match versioned
        .iter()
        .max_by(|(_, a), (_, b)| compare_versions(a, b))
    {
        Some(&(candidate, _)) => candidate,
        // No filename carries a parseable version token: order by the
        // names themselves rather than failing the run.
        None => candidates
            .iter()
            .max_by(|a, b| a.file_name().cmp(b.file_name()))?,
    };

    prerelease_variant(candidates, base, extension).or(Some(base))
}

/// Look for a pre-release sibling of the chosen base version, e.g.
/// `pkg-2.0-beta.tar.gz` next to `pkg-2.0.tar.gz`.
fn prerelease_variant<'a>(
    candidates: &'a [Candidate],
    base: &Candidate,
    extension: &str,
) -> Option<&'a Candidate> {
    let stem = base.file_name().strip_suffix(extension)?;

    for suffix in PRERELEASE_SUFFIXES {
        let wanted = format!("{stem}{suffix}{extension}");
        if let Some(found) = candidates
            .iter()
            .find(|candidate| candidate.file_name() == wanted)
        {
            debug!("preferring pre-release variant {}", wanted);
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::{Duration, UNIX_EPOCH};

    fn candidate(name: &str, mtime_secs: u64) -> Candidate {
        Candidate {
            path: PathBuf::from(name),
            modified: UNIX_EPOCH + Duration::from_secs(mtime_secs),
        }
    }

    #[test]
    fn test_empty_input_selects_nothing() {
        assert!(select(&[], Strategy::Newest, ".tar.gz").is_none());
        assert!(select(&[], Strategy::HighestVersion, ".tar.gz").is_none());
    }

    #[test]
    fn test_newest_wins_regardless_of_version() {
        let candidates = vec![
            candidate("pkg-9.0.tar.gz", 100),
            candidate("pkg-1.0.tar.gz", 200),
        ];
        let selected = select(&candidates, Strategy::Newest, ".tar.gz").unwrap();
        assert_eq!(selected.file_name(), "pkg-1.0.tar.gz");
    }

    #[test]
    fn test_highest_version_wins() {
        let candidates = vec![
            candidate("pkg-1.0.tar.gz", 200),
            candidate("pkg-2.0.tar.gz", 100),
        ];
        let selected = select(&candidates, Strategy::HighestVersion, ".tar.gz").unwrap();
        assert_eq!(selected.file_name(), "pkg-2.0.tar.gz");
    }

    #[test]
    fn test_two_digit_components_sort_numerically() {
        let candidates = vec![
            candidate("pkg-1.9.tar.gz", 0),
            candidate("pkg-1.10.tar.gz", 0),
        ];
        let selected = select(&candidates, Strategy::HighestVersion, ".tar.gz").unwrap();
        assert_eq!(selected.file_name(), "pkg-1.10.tar.gz");
    }

    #[test]
    fn test_prerelease_variant_of_base_version_is_preferred() {
        let candidates = vec![
            candidate("pkg-1.0.tar.gz", 0),
            candidate("pkg-2.0.tar.gz", 0),
            candidate("pkg-2.0-beta.tar.gz", 0),
        ];
        let selected = select(&candidates, Strategy::HighestVersion, ".tar.gz").unwrap();
        assert_eq!(selected.file_name(), "pkg-2.0-beta.tar.gz");
    }

    #[test]
    fn test_prerelease_of_lower_version_is_ignored() {
        let candidates = vec![
            candidate("pkg-1.0.tar.gz", 0),
            candidate("pkg-1.0-beta.tar.gz", 0),
            candidate("pkg-2.0.tar.gz", 0),
        ];
        let selected = select(&candidates, Strategy::HighestVersion, ".tar.gz").unwrap();
        assert_eq!(selected.file_name(), "pkg-2.0.tar.gz");
    }

    #[test]
    fn test_prerelease_suffix_priority_order() {
        let candidates = vec![
            candidate("pkg-2.0.tar.gz", 0),
            candidate("pkg-2.0-beta.tar.gz", 0),
            candidate("pkg-2.0-rev.tar.gz", 0),
        ];
        // -rev outranks -beta in the fixed suffix order
        let selected = select(&candidates, Strategy::HighestVersion, ".tar.gz").unwrap();
        assert_eq!(selected.file_name(), "pkg-2.0-rev.tar.gz");
    }

    #[test]
    fn test_dotted_prerelease_suffix_is_recognized() {
        let candidates = vec![
            candidate("pkg-2.0.tar.gz", 0),
            candidate("pkg-2.0.dev.tar.gz", 0),
        ];
        let selected = select(&candidates, Strategy::HighestVersion, ".tar.gz").unwrap();
        assert_eq!(selected.file_name(), "pkg-2.0.dev.tar.gz");
    }

    #[test]
    fn test_unparseable_tokens_fall_back_to_filename_order() {
        let candidates = vec![
            candidate("alpha-build.whl", 0),
            candidate("zeta-build.whl", 0),
        ];
        let selected = select(&candidates, Strategy::HighestVersion, ".whl").unwrap();
        assert_eq!(selected.file_name(), "zeta-build.whl");
    }
}
