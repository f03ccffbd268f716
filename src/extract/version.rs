//! Version extraction from link text and filenames.
//!
//! An ordered set of patterns is tried against the primary text first and a
//! fallback text second. The `regex` crate has no lookaround, so the
//! "version must not touch a word character or dot" boundary rule is
//! expressed with one-character context guards around the capture group.

use std::sync::LazyLock;

use regex::Regex;

/// Source-specific patterns, strictest first. Group 1 is the version.
static EXTRACT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // 2-4 numeric groups with an optional alphanumeric suffix: 12.4.1-beta2
        Regex::new(r"(?:^|[^\w.\-])[vV]?(\d+(?:\.\d+){1,3}(?:(?:[-._]?[a-zA-Z0-9]+)+)?)(?:[^.\w]|$)")
            .unwrap(),
        // plain 2-3 numeric groups: 4.2.1
        Regex::new(r"(?:^|[^\w.\-])[vV]?(\d+(?:\.\d+){1,2})(?:[^.\w]|$)").unwrap(),
    ]
});

/// Permissive last resort: anything that at least looks like N.N.
static PERMISSIVE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+\.\d+(?:\.\d+){0,2}(?:[.-]?[a-zA-Z0-9]+)*)").unwrap());

/// Destructive variants of the same shapes, used to scrub versions out of
/// candidate app names. Anchored to whitespace so surrounding words survive.
static CLEANING_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"\s*\b[vV]?\d+(?:\.\d+){1,3}(?:(?:[-._]?[a-zA-Z0-9]+)+)?").unwrap(),
        Regex::new(r"\s*\b[vV]?\d+(?:\.\d+){1,2}").unwrap(),
        // lone numbers that look like a version fragment
        Regex::new(r"\s+\d+(?:\.\d+)*").unwrap(),
    ]
});

/// Find a version string in `text`, then in `fallback_text`.
///
/// Returns `None` when nothing version-like appears anywhere; callers treat
/// that as "skip this entry", never as a failure.
pub fn extract_version(text: &str, fallback_text: &str) -> Option<String> {
    for source in [text, fallback_text] {
        if source.is_empty() {
            continue;
        }
        for pattern in EXTRACT_PATTERNS.iter() {
            if let Some(found) = capture_version(pattern, source) {
                return Some(found);
            }
        }
    }

    for source in [text, fallback_text] {
        if source.is_empty() {
            continue;
        }
        if let Some(found) = capture_version(&PERMISSIVE_PATTERN, source) {
            return Some(found);
        }
    }

    None
}

fn capture_version(pattern: &Regex, source: &str) -> Option<String> {
    pattern
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_matches(['-', '_', ' ']).to_string())
        .filter(|v| !v.is_empty())
}

/// Scrub every version-shaped substring out of `name`.
pub fn strip_versions(name: &str) -> String {
    let mut cleaned = name.to_string();
    for pattern in CLEANING_PATTERNS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").to_string();
    }
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_basic_forms() {
        assert_eq!(extract_version("App 4.2.1", ""), Some("4.2.1".to_string()));
        assert_eq!(extract_version("App v12.4", ""), Some("12.4".to_string()));
        assert_eq!(
            extract_version("release 12.4.1-beta2 here", ""),
            Some("12.4.1-beta2".to_string())
        );
        assert_eq!(
            extract_version("update 1.2.3.4", ""),
            Some("1.2.3.4".to_string())
        );
    }

    #[test]
    fn test_extract_falls_back_to_filename() {
        // callers hand over the filename stem, extension already stripped
        assert_eq!(
            extract_version("متن لینک بدون نسخه", "app-premium-4.2.1"),
            Some("4.2.1".to_string())
        );
    }

    #[test]
    fn test_permissive_suffix_is_greedy_on_raw_filenames() {
        // with the extension still attached, the permissive suffix eats it;
        // this is why version extraction runs on the stem
        assert_eq!(
            extract_version("", "app-premium-4.2.1.apk"),
            Some("4.2.1.apk".to_string())
        );
    }

    #[test]
    fn test_extract_nothing_found() {
        assert_eq!(extract_version("no numbers here", "plain.apk"), None);
        assert_eq!(extract_version("", ""), None);
    }

    #[test]
    fn test_extract_ignores_embedded_build_ids() {
        // 20240115 has no dots; abc1.2.3def touches word characters on both
        // sides, so the strict patterns must not fire inside it.
        assert_eq!(extract_version("build20240115", ""), None);
        let got = extract_version("token abc1.2.3def end 7.8.9", "");
        assert_eq!(got, Some("7.8.9".to_string()));
    }

    #[test]
    fn test_extract_version_marker_case_insensitive() {
        assert_eq!(extract_version("App V3.1.0", ""), Some("3.1.0".to_string()));
    }

    #[test]
    fn test_permissive_fallback() {
        // dotted pair glued to a word character: strict patterns reject it,
        // the permissive one still pulls it out.
        assert_eq!(extract_version("build7.5x", ""), Some("7.5x".to_string()));
    }

    #[test]
    fn test_strip_versions() {
        assert_eq!(strip_versions("Telegram 10.2.1"), "Telegram");
        assert_eq!(strip_versions("Spotify v8.9.10.456 Mod"), "Spotify Mod");
        assert_eq!(strip_versions("App 4.2.1-beta2 Extra"), "App Extra");
        assert_eq!(strip_versions("NoVersion"), "NoVersion");
    }
}
