//! File extension resolution for download URLs.

use std::sync::LazyLock;

use regex::Regex;

/// Extensions returned verbatim when found in the URL.
pub const KNOWN_EXTENSIONS: &[&str] = &[
    ".apk",
    ".xapk",
    ".apks",
    ".obb",
    ".ipa",
    ".zip",
    ".rar",
    ".7z",
    ".tar.gz",
    ".tar.bz2",
    ".tar.xz",
    ".exe",
    ".msi",
    ".dmg",
    ".pkg",
    ".deb",
    ".rpm",
    ".appimage",
    ".jar",
    ".pdf",
    ".doc",
    ".docx",
    ".epub",
    ".txt",
    ".png",
    ".jpg",
    ".jpeg",
    ".gif",
    ".webp",
    ".svg",
    ".mp3",
    ".ogg",
    ".flac",
    ".wav",
    ".mp4",
    ".mkv",
    ".avi",
    ".webm",
    ".ttf",
    ".otf",
    ".woff",
    ".woff2",
];

/// Two-segment archive forms, checked before naive suffix extraction.
const COMPOUND_EXTENSIONS: &[&str] = &[".tar.gz", ".tar.bz2", ".tar.xz"];

/// Placeholder when neither the URL nor the search text says anything.
pub const FALLBACK_EXTENSION: &str = ".bin";

/// Category keywords used to infer an extension when the URL carries none.
static WINDOWS_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(windows|ویندوز)\b").unwrap());
static MACOS_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(macos|mac|osx)\b").unwrap());
static LINUX_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(linux|لینوکس)\b").unwrap());
static ARCHIVE_HINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(data|obb|font|دیتا|فونت)\b").unwrap());

/// Resolve the canonical extension for a download URL.
///
/// Never fails; an unrecognizable URL is an expected case and degrades to a
/// keyword guess, then to the raw suffix, then to [`FALLBACK_EXTENSION`].
pub fn resolve_extension(download_url: &str, search_text: &str) -> String {
    let filename = filename_from_url(download_url).unwrap_or_default();
    let lower = filename.to_lowercase();

    for compound in COMPOUND_EXTENSIONS {
        if lower.ends_with(compound) {
            return (*compound).to_string();
        }
    }

    let raw = raw_extension(&lower);
    if let Some(ref ext) = raw {
        if KNOWN_EXTENSIONS.contains(&ext.as_str()) {
            return ext.clone();
        }
    }

    if WINDOWS_HINT.is_match(search_text) {
        return ".exe".to_string();
    }
    if MACOS_HINT.is_match(search_text) {
        return ".dmg".to_string();
    }
    if LINUX_HINT.is_match(search_text) {
        return ".appimage".to_string();
    }
    if ARCHIVE_HINT.is_match(search_text) {
        return ".zip".to_string();
    }

    raw.unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

/// Strip a recognized extension from a filename, compound forms first.
/// Version extraction runs on the stem so the greedy suffix patterns do not
/// swallow the extension into the version.
pub fn strip_known_extension(filename: &str) -> &str {
    for ext in COMPOUND_EXTENSIONS.iter().chain(KNOWN_EXTENSIONS) {
        let Some(cut) = filename.len().checked_sub(ext.len()) else {
            continue;
        };
        // ASCII-only suffix match; lowercasing the whole name could shift
        // byte offsets for characters with multi-byte case folds
        if filename.is_char_boundary(cut) && filename[cut..].eq_ignore_ascii_case(ext) {
            return &filename[..cut];
        }
    }
    filename
}

/// True for Android package payloads.
pub fn is_android_package(extension: &str) -> bool {
    matches!(
        extension.to_lowercase().as_str(),
        ".apk" | ".xapk" | ".apks"
    )
}

/// Extract the filename from a URL, dropping query string and fragment.
pub fn filename_from_url(url: &str) -> Option<String> {
    let main = url.split(['?', '#']).next().unwrap_or(url);
    let segment = main.rsplit('/').next().unwrap_or(main).trim();
    if segment.is_empty() || segment.contains("://") {
        None
    } else {
        Some(segment.to_string())
    }
}

/// The raw `.suffix` of a filename; short alphanumeric segments only, so a
/// dotted product name does not masquerade as an extension.
fn raw_extension(filename: &str) -> Option<String> {
    let (_, suffix) = filename.rsplit_once('.')?;
    if suffix.is_empty()
        || suffix.len() > 8
        || !suffix.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }
    Some(format!(".{suffix}"))
}
