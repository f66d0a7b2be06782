//! Version token extraction and ordering for archive filenames.

use std::cmp::Ordering;

/// Extract the version token from an archive filename: the component
/// between the last `-` and the extension.
///
/// `pkg-0.3.tar.gz` yields `0.3`; a name without a `-` yields nothing.
pub fn version_token<'a>(file_name: &'a str, extension: &str) -> Option<&'a str> {
    let stem = file_name.strip_suffix(extension)?;
    let (_, token) = stem.rsplit_once('-')?;
    (!token.is_empty()).then_some(token)
}

/// Whether a token plausibly denotes a version number rather than a
/// stray word such as `beta` split off a pre-release filename.
pub(crate) fn is_version_like(token: &str) -> bool {
    token.starts_with(|c: char| c.is_ascii_digit())
}

/// Numeric-aware ordering over dotted version tokens.
///
/// Segments that both parse as integers compare numerically, so `1.10`
/// sorts above `1.9`; any other segment pair falls back to plain string
/// comparison. Unparseable input therefore never fails, it just orders
/// lexicographically.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.cmp(r),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_token_extraction() {
        assert_eq!(version_token("pkg-0.3.tar.gz", ".tar.gz"), Some("0.3"));
        assert_eq!(version_token("some-pkg-1.2.3.tar.gz", ".tar.gz"), Some("1.2.3"));
        assert_eq!(version_token("pkg-2.0-beta.tar.gz", ".tar.gz"), Some("beta"));
        assert_eq!(
            version_token("pkg-1.0-py3-none-any.whl", ".whl"),
            Some("any")
        );
        assert_eq!(version_token("package.tar.gz", ".tar.gz"), None);
        assert_eq!(version_token("pkg-1.0.tar.gz", ".whl"), None);
    }

    #[test]
    fn test_numeric_segments_compare_numerically() {
        assert_eq!(compare_versions("1.0", "2.0"), Ordering::Less);
        assert_eq!(compare_versions("1.10", "1.9"), Ordering::Greater);
        assert_eq!(compare_versions("1.2.3", "1.2.3"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.3", "1.2"), Ordering::Greater);
    }

    #[test]
    fn test_non_numeric_segments_fall_back_to_strings() {
        assert_eq!(compare_versions("1.0a", "1.0b"), Ordering::Less);
        assert_eq!(compare_versions("beta", "alpha"), Ordering::Greater);
        // Mixed segments never panic
        assert_eq!(compare_versions("1.x", "1.2"), Ordering::Greater);
    }
}
