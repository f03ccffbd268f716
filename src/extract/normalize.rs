//! App-name cleaning.
//!
//! Two modes: `Light` keeps descriptive words that may be part of the
//! branded product name, `Aggressive` also scrubs all taxonomy vocabulary to
//! produce a bare canonical identity for the tracking key. The fallback
//! chain (aggressive, then light, then URL-derived, then placeholder) is an
//! explicit [`NameResolver`] so each stage is testable on its own.

use std::sync::LazyLock;

use regex::Regex;

use super::taxonomy::VariantTaxonomy;
use super::version::strip_versions;

/// Placeholder identity when no name source yields anything.
pub const UNKNOWN_APP: &str = "UnknownApp";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeMode {
    /// Strip versions and site boilerplate only.
    Light,
    /// Additionally scrub all taxonomy vocabulary.
    Aggressive,
}

/// Imperative "Download " prefixes, Latin and Persian.
static DOWNLOAD_PREFIXES: &[&str] = &["دانلود ", "download "];

/// Trailing site attribution: "(farsroid.com ...)" and "- Farsroid".
static SITE_ATTRIBUTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\((?:www\.)?farsroid\.com.*?\)\s*$").unwrap());
static SITE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*[-–—]\s*Farsroid\s*$").unwrap());

/// Trailing segments a page <title> carries after the real name.
static TITLE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*[-|–—]\s*(?:فارسروید|دانلود.*)$").unwrap());
static TITLE_TAGLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*–\s*اپلیکیشن.*$").unwrap());

static WHITESPACE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Generic words dropped from URL-derived names.
static URL_GENERIC_WORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(دانلود|Download|برنامه|App|Apk|Mod|Hack|Premium|Pro|Full|Unlocked|Final|Update|Android|Farsroid|Arm\w*|x86\w*|Beta|Lite|Ultra|VIP|Plus|Clone|Patched|AdFree|Persian|English|Data|Windows|Universal|Original|Main|Default)\b",
    )
    .unwrap()
});

/// Page-path extensions stripped before deriving a name from a URL.
static URL_NAME_EXTENSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.(apk|zip|html|php|asp|aspx)$").unwrap());

/// Clean a candidate app name.
pub fn normalize(name: &str, mode: NormalizeMode, taxonomy: &VariantTaxonomy) -> String {
    let mut cleaned = name.trim().to_string();

    for prefix in DOWNLOAD_PREFIXES {
        if cleaned.to_lowercase().starts_with(prefix) {
            cleaned = cleaned[prefix.len()..].trim_start().to_string();
            break;
        }
    }

    cleaned = SITE_ATTRIBUTION.replace(&cleaned, "").to_string();
    cleaned = SITE_SUFFIX.replace(&cleaned, "").to_string();
    cleaned = strip_versions(&cleaned);

    if mode == NormalizeMode::Aggressive {
        // Keyword removal can expose further keywords; iterate to a fixpoint.
        loop {
            let scrubbed = collapse(&taxonomy.scrub_synonyms(&cleaned));
            if scrubbed == cleaned {
                break;
            }
            cleaned = scrubbed;
        }
    }

    collapse(&cleaned)
}

/// Trim the noisy tail a <title> element carries ("... - فارسروید", "... – اپلیکیشن ...").
pub fn trim_title_suffix(title: &str) -> String {
    let trimmed = TITLE_SUFFIX.replace(title, "").to_string();
    TITLE_TAGLINE.replace(&trimmed, "").trim().to_string()
}

fn collapse(text: &str) -> String {
    WHITESPACE_RUNS
        .replace_all(text, " ")
        .trim_matches([' ', '-', '–', '—', '_'])
        .to_string()
}

fn is_degenerate(name: &str) -> bool {
    !name.chars().any(|c| c.is_alphanumeric())
}

/// The name fallback chain.
pub struct NameResolver<'a> {
    taxonomy: &'a VariantTaxonomy,
}

impl<'a> NameResolver<'a> {
    pub fn new(taxonomy: &'a VariantTaxonomy) -> Self {
        Self { taxonomy }
    }

    /// Stage 1 + 2: aggressive clean of the page heading/title candidate,
    /// falling back to light when aggressive destroys the whole name.
    pub fn from_candidate(&self, candidate: &str) -> Option<String> {
        let aggressive = normalize(candidate, NormalizeMode::Aggressive, self.taxonomy);
        if !is_degenerate(&aggressive) {
            return Some(aggressive);
        }
        let light = normalize(candidate, NormalizeMode::Light, self.taxonomy);
        if !is_degenerate(&light) {
            return Some(light);
        }
        None
    }

    /// Stage 3: derive a name from the page URL's last path segment.
    pub fn from_url(&self, page_url: &str) -> Option<String> {
        let path = url::Url::parse(page_url).ok()?.path().to_string();
        let segment = path.split('/').filter(|s| !s.is_empty()).next_back()?.to_string();
        let decoded = urlencoding::decode(&segment)
            .map(|d| d.into_owned())
            .unwrap_or(segment);

        let mut guessed = URL_NAME_EXTENSION.replace(&decoded, "").to_string();
        guessed = strip_versions(&guessed)
            .trim_matches(['-', '_', ' '])
            .to_string();

        let titled = guessed
            .split(['-', '_'])
            .filter(|w| !w.is_empty())
            .map(capitalize)
            .collect::<Vec<_>>()
            .join(" ");

        let cleaned = collapse(&URL_GENERIC_WORDS.replace_all(&titled, ""));
        if is_degenerate(&cleaned) {
            None
        } else {
            Some(cleaned)
        }
    }

    /// Run the whole chain; always yields a usable display name.
    pub fn resolve(&self, candidate: Option<&str>, page_url: &str) -> String {
        if let Some(raw) = candidate {
            if let Some(name) = self.from_candidate(raw) {
                return name;
            }
        }
        self.from_url(page_url)
            .unwrap_or_else(|| UNKNOWN_APP.to_string())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> VariantTaxonomy {
        VariantTaxonomy::new()
    }

    #[test]
    fn test_light_keeps_descriptive_words() {
        let tax = taxonomy();
        let got = normalize(
            "Download Telegram Premium 10.2.1 (farsroid.com)",
            NormalizeMode::Light,
            &tax,
        );
        assert_eq!(got, "Telegram Premium");
    }

    #[test]
    fn test_aggressive_scrubs_taxonomy_words() {
        let tax = taxonomy();
        let got = normalize(
            "Download Telegram Premium 10.2.1 (farsroid.com)",
            NormalizeMode::Aggressive,
            &tax,
        );
        assert_eq!(got, "Telegram");
    }

    #[test]
    fn test_persian_download_prefix() {
        let tax = taxonomy();
        let got = normalize("دانلود Spotify 8.9.10", NormalizeMode::Light, &tax);
        assert_eq!(got, "Spotify");
    }

    #[test]
    fn test_site_suffix_removed() {
        let tax = taxonomy();
        let got = normalize("WhatsApp 2.24.1 - Farsroid", NormalizeMode::Light, &tax);
        assert_eq!(got, "WhatsApp");
    }

    #[test]
    fn test_title_suffix_trimming() {
        assert_eq!(
            trim_title_suffix("Telegram 10.2 - فارسروید"),
            "Telegram 10.2"
        );
        assert_eq!(
            trim_title_suffix("Telegram – اپلیکیشن پیام رسان"),
            "Telegram"
        );
    }

    #[test]
    fn test_candidate_falls_back_to_light() {
        let tax = taxonomy();
        let resolver = NameResolver::new(&tax);
        // the whole candidate is taxonomy vocabulary; aggressive would leave
        // nothing, so light must win
        let got = resolver.from_candidate("Premium Mod 1.2.3").unwrap();
        assert_eq!(got, "Premium Mod");
    }

    #[test]
    fn test_name_from_url() {
        let tax = taxonomy();
        let resolver = NameResolver::new(&tax);
        let got = resolver
            .from_url("https://example.com/sample-music-player-4.2.1.html")
            .unwrap();
        assert_eq!(got, "Sample Music Player");
    }

    #[test]
    fn test_resolve_placeholder_when_everything_fails() {
        let tax = taxonomy();
        let resolver = NameResolver::new(&tax);
        let got = resolver.resolve(Some("1.2.3"), "https://example.com/download/");
        assert_eq!(got, UNKNOWN_APP);
    }

    #[test]
    fn test_resolve_is_version_invariant() {
        let tax = taxonomy();
        let resolver = NameResolver::new(&tax);
        let a = resolver.resolve(Some("Telegram 10.2.1 Mod"), "https://example.com/x");
        let b = resolver.resolve(Some("Telegram  11.0.0  Mod"), "https://example.com/x");
        assert_eq!(a, b);
    }
}
