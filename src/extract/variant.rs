//! Variant classification: one generic loop over the taxonomy table.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use super::filetype::{is_android_package, KNOWN_EXTENSIONS};
use super::taxonomy::VariantTaxonomy;

/// Boilerplate that must not reach the keyword scan: site attribution,
/// "direct link" phrasing, bare numbers.
static BOILERPLATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        Regex::new(r"(?i)\(?(?:www\.)?farsroid\.com\)?").unwrap(),
        Regex::new(r"(?i)direct\s+link").unwrap(),
        Regex::new(r"لینک\s+مستقیم").unwrap(),
        Regex::new(r"دانلود\s+مستقیم").unwrap(),
        Regex::new(r"\b\d+(?:\.\d+)*\b").unwrap(),
    ]
});

/// Residual generic keywords hinting at the unmodified Android build.
static UNIVERSAL_HINTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(universal|original|default|اصلی|معمولی)\b").unwrap());
static MAIN_HINT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\bmain\b").unwrap());

/// Category tags inferred purely from a file extension; a last resort when
/// no taxonomy keyword matched.
const EXTENSION_CATEGORIES: &[(&str, &[&str])] = &[
    ("Windows", &[".exe", ".msi"]),
    ("macOS", &[".dmg", ".pkg"]),
    ("Linux", &[".appimage", ".deb", ".rpm"]),
    ("Archive", &[".zip", ".rar", ".7z", ".tar.gz", ".tar.bz2", ".tar.xz"]),
    ("Image", &[".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"]),
    ("Audio", &[".mp3", ".ogg", ".flac", ".wav"]),
    ("Video", &[".mp4", ".mkv", ".avi", ".webm"]),
    ("Document", &[".pdf", ".doc", ".docx", ".epub", ".txt"]),
    ("Font", &[".ttf", ".otf", ".woff", ".woff2"]),
];

/// Tags carrying no build-specific signal; omitted from filenames when they
/// are the only variant part.
pub fn is_generic_category(tag: &str) -> bool {
    tag == "Default" || EXTENSION_CATEGORIES.iter().any(|(t, _)| *t == tag)
}

/// Classify one download entry into an ordered, deduplicated tag set.
///
/// `extension` is the already-resolved file extension (see
/// [`super::filetype::resolve_extension`]); it drives the no-keyword
/// fallbacks only.
pub fn classify(
    link_text: &str,
    filename: &str,
    extension: &str,
    taxonomy: &VariantTaxonomy,
) -> Vec<String> {
    let mut search = format!("{} {}", filename.to_lowercase(), link_text.to_lowercase());
    for pattern in BOILERPLATE.iter() {
        search = pattern.replace_all(&search, " ").to_string();
    }

    let mut tags: Vec<String> = Vec::new();
    let mut suppressed: HashSet<&'static str> = HashSet::new();

    for (index, rule) in taxonomy.rules().iter().enumerate() {
        if suppressed.contains(rule.tag) {
            continue;
        }
        if taxonomy.rule_matches(index, &search) {
            tags.push(rule.tag.to_string());
            suppressed.extend(rule.suppresses);
        }
    }

    if tags.is_empty() {
        if is_android_package(extension) {
            if UNIVERSAL_HINTS.is_match(&search) {
                tags.push("Universal".to_string());
            } else if MAIN_HINT.is_match(&search) {
                tags.push("Main".to_string());
            }
        } else if let Some(category) = category_for_extension(extension) {
            tags.push(category.to_string());
        }
    }

    if tags.is_empty() {
        let placeholder = if is_android_package(extension) {
            "Universal"
        } else {
            "Default"
        };
        tags.push(placeholder.to_string());
    }

    tags.sort();
    tags.dedup();
    tags
}

/// Join a tag set for display.
pub fn variant_label(tags: &[String]) -> String {
    tags.join("-")
}

fn category_for_extension(extension: &str) -> Option<&'static str> {
    let ext = extension.to_lowercase();
    if !KNOWN_EXTENSIONS.contains(&ext.as_str()) {
        return None;
    }
    EXTENSION_CATEGORIES
        .iter()
        .find(|(_, exts)| exts.contains(&ext.as_str()))
        .map(|(tag, _)| *tag)
}
