//! Update decision: is a freshly extracted version newer than the stored one?
//!
//! Versions are compared as semantic versions behind a lenient coercion;
//! anything unparsable degrades to a lexicographic string comparison. The
//! string fallback is not a correct general version ordering ("10" sorts
//! before "9"), but persisted tracking state depends on this exact tiebreak,
//! so it is preserved as-is.

use std::cmp::Ordering;

use semver::{BuildMetadata, Prerelease, Version};
use tracing::debug;

/// Placeholder meaning "never seen before" in the persisted history.
pub const NEVER_SEEN: &str = "0.0.0";

/// Decide whether `current` is an update over `last_known`.
///
/// Never panics and never errors; malformed input degrades to the string
/// comparison fallback.
pub fn is_update(current: &str, last_known: Option<&str>) -> bool {
    if current.is_empty() {
        debug!("empty current version, not an update");
        return false;
    }
    let last = match last_known {
        None => return true,
        Some(l) if l.is_empty() || l == NEVER_SEEN => return true,
        Some(l) => l,
    };

    match (parse_lenient(current), parse_lenient(last)) {
        (Some(cur), Some(prev)) => match cur.cmp_precedence(&prev) {
            Ordering::Greater => true,
            Ordering::Less => false,
            Ordering::Equal => {
                // equal parsed values, possibly different raw strings
                // (pre-release suffix spelling, fourth numeric group)
                current != last && current > last
            }
        },
        _ => {
            debug!(current, last, "unparsable version, using string fallback");
            current != last && current > last
        }
    }
}

/// Coerce loose version strings into `semver::Version`.
///
/// Accepts an optional `v`/`V` marker, 1-4 dot-separated numeric groups
/// (padded to three; a fourth becomes build metadata, which
/// `cmp_precedence` ignores), and a `-`/`.`/`_`-separated suffix mapped to a
/// pre-release. Returns `None` for anything else.
pub fn parse_lenient(version: &str) -> Option<Version> {
    let trimmed = version.trim();
    let trimmed = trimmed
        .strip_prefix(['v', 'V'])
        .unwrap_or(trimmed);
    if trimmed.is_empty() {
        return None;
    }

    // split numeric core from any suffix
    let core_end = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(trimmed.len());
    let (core, suffix) = trimmed.split_at(core_end);

    let groups: Vec<u64> = core
        .trim_matches('.')
        .split('.')
        .map(|g| g.parse::<u64>())
        .collect::<Result<_, _>>()
        .ok()?;
    if groups.is_empty() || groups.len() > 4 {
        return None;
    }

    let mut version = Version::new(
        groups[0],
        groups.get(1).copied().unwrap_or(0),
        groups.get(2).copied().unwrap_or(0),
    );
    if let Some(fourth) = groups.get(3) {
        version.build = BuildMetadata::new(&fourth.to_string()).ok()?;
    }

    let pre = suffix.trim_matches(['-', '.', '_']);
    if !pre.is_empty() {
        let normalized = pre.replace(['_', '-'], ".");
        version.pre = Prerelease::new(&normalized).ok()?;
    }

    Some(version)
}
