//! Dotted version comparison and extraction.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::LazyLock;

/// Compare two dotted version strings numerically.
///
/// Components are compared as integers from left to right and missing
/// trailing components count as `0`, so `"1.0"` equals `"1.0.0"` and
/// `"1.10.0"` is newer than `"1.2.0"`. Components that are not plain
/// integers also count as `0`.
///
/// # Example
///
/// ```
/// use std::cmp::Ordering;
/// use installkit::detection::version::compare_versions;
///
/// assert_eq!(compare_versions("1.2.0", "1.10.0"), Ordering::Less);
/// assert_eq!(compare_versions("1.0", "1.0.0"), Ordering::Equal);
/// ```
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = parse_components(a);
    let right = parse_components(b);
    let len = left.len().max(right.len());

    for i in 0..len {
        let l = left.get(i).copied().unwrap_or(0);
        let r = right.get(i).copied().unwrap_or(0);
        match l.cmp(&r) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// Whether `version` meets `minimum` under [`compare_versions`].
pub fn meets_minimum(version: &str, minimum: &str) -> bool {
    compare_versions(version, minimum) != Ordering::Less
}

fn parse_components(version: &str) -> Vec<u64> {
    version
        .trim()
        .split('.')
        .map(|part| part.trim().parse().unwrap_or(0))
        .collect()
}

/// Extract the first digits-and-dots run captured by `pattern`.
///
/// The pattern's first capture group is used when present, otherwise the
/// whole match. Trailing dots are dropped so `"curl 7.81.0."` yields `7.81.0`.
pub fn extract_version(output: &str, pattern: &Regex) -> Option<String> {
    let caps = pattern.captures(output)?;
    let m = caps.get(1).or_else(|| caps.get(0))?;
    let version = m.as_str().trim_end_matches('.');
    if version.is_empty() || !version.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(version.to_string())
}

// --- Compiled regexes (one-time via LazyLock) ---

static ANY_VERSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d[\d.]*)").unwrap());

/// The generic "first run of digits and dots" pattern.
pub fn any_version_pattern() -> &'static Regex {
    &ANY_VERSION
}
