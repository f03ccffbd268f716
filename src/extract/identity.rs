//! Tracking key and suggested filename construction.
//!
//! The tracking key depends only on app identity and variant, never on
//! version or link phrasing, so it stays stable across runs. The suggested
//! filename is the human-facing counterpart and keeps descriptive words.

use std::sync::LazyLock;

use regex::Regex;

use super::normalize::{normalize, NormalizeMode};
use super::taxonomy::VariantTaxonomy;
use super::variant::is_generic_category;

static UNDERSCORE_RUNS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_+").unwrap());
static FILENAME_FORBIDDEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[<>:"/\\|?*()\[\]]"#).unwrap());
static BRACKETS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()\[\]]").unwrap());
static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Build the stable tracking key and the suggested filename for one entry.
pub fn build_identity(
    display_name: &str,
    version: &str,
    variant_tags: &[String],
    extension: &str,
    taxonomy: &VariantTaxonomy,
) -> (String, String) {
    let variant_label = variant_tags.join("-");
    let tracking_key = build_tracking_key(display_name, version, &variant_label, taxonomy);
    let suggested_filename =
        build_filename(display_name, version, variant_tags, extension, taxonomy);
    (tracking_key, suggested_filename)
}

fn build_tracking_key(
    display_name: &str,
    version: &str,
    variant_label: &str,
    taxonomy: &VariantTaxonomy,
) -> String {
    let mut identity = normalize(display_name, NormalizeMode::Aggressive, taxonomy);

    // If the extracted version somehow survived cleaning, remove that exact
    // substring too; the key must never depend on it.
    if !version.is_empty() {
        let escaped = regex::escape(version);
        if let Ok(residual) = Regex::new(&format!(r"(?i)\s*[vV]?{escaped}\b")) {
            identity = residual.replace_all(&identity, "").to_string();
        }
        identity = identity.trim_matches(['-', '_', ' ']).to_string();
    }
    if identity.is_empty() {
        identity = "App".to_string();
    }

    let key = format!(
        "{}_{}",
        sanitize_key_part(&identity),
        sanitize_key_part(variant_label)
    )
    .to_lowercase();
    UNDERSCORE_RUNS
        .replace_all(&key, "_")
        .trim_matches('_')
        .to_string()
}

fn build_filename(
    display_name: &str,
    version: &str,
    variant_tags: &[String],
    extension: &str,
    taxonomy: &VariantTaxonomy,
) -> String {
    let name_base = {
        let light = normalize(display_name, NormalizeMode::Light, taxonomy);
        if light.is_empty() {
            "App".to_string()
        } else {
            light
        }
    };
    let name_part = sanitize_filename_part(&name_base);

    let mut parts: Vec<String> = vec![name_part.clone()];
    if !version.is_empty() {
        parts.push(format!(
            "v{}",
            sanitize_filename_part(version).replace('.', "_")
        ));
    }

    // Keep a generic category tag only when a more specific tag rides along.
    let only_generic = variant_tags.iter().all(|t| is_generic_category(t));
    for tag in variant_tags {
        if tag == "Default" || (only_generic && is_generic_category(tag)) {
            continue;
        }
        let token = sanitize_filename_part(tag);
        // a tag already implied by the name is noise, whether it stands as
        // its own token or sits inside a compound one
        if token.is_empty() || name_part.contains(&token) {
            continue;
        }
        parts.push(token);
    }

    let joined = parts.join("_");
    let collapsed = UNDERSCORE_RUNS.replace_all(&joined, "_");
    let deduplicated = collapse_adjacent_tokens(collapsed.trim_matches('_'));
    format!("{deduplicated}{extension}")
}

/// Lowercase, dash-normalized, bracket-free, whitespace to underscores.
fn sanitize_key_part(text: &str) -> String {
    let mut out = text.trim().to_lowercase();
    out = out.replace(['–', '—'], "-");
    out = BRACKETS.replace_all(&out, "").to_string();
    out = WHITESPACE.replace_all(&out, "_").to_string();
    // stray dashes next to separators are incidental punctuation, not identity
    out = out.replace("-_", "_").replace("_-", "_");
    out = UNDERSCORE_RUNS.replace_all(&out, "_").to_string();
    out.trim_matches(['_', '-']).to_string()
}

/// Filesystem-safe token: forbidden characters and whitespace become
/// underscores, separator runs collapse.
fn sanitize_filename_part(text: &str) -> String {
    let mut out = text.trim().to_lowercase();
    out = out.replace(['–', '—'], "-");
    out = FILENAME_FORBIDDEN.replace_all(&out, "_").to_string();
    out = WHITESPACE.replace_all(&out, "_").to_string();
    out = out.replace("-_", "_").replace("_-", "_");
    out = UNDERSCORE_RUNS.replace_all(&out, "_").to_string();
    out.trim_matches('_').to_string()
}

fn collapse_adjacent_tokens(joined: &str) -> String {
    let mut tokens: Vec<&str> = Vec::new();
    for token in joined.split('_') {
        if token.is_empty() {
            continue;
        }
        if tokens.last() != Some(&token) {
            tokens.push(token);
        }
    }
    tokens.join("_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taxonomy() -> VariantTaxonomy {
        VariantTaxonomy::new()
    }

    fn tags(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_tracking_key_shape() {
        let tax = taxonomy();
        let (key, _) = build_identity(
            "Telegram Premium",
            "10.2.1",
            &tags(&["Premium"]),
            ".apk",
            &tax,
        );
        assert_eq!(key, "telegram_premium");
    }

    #[test]
    fn test_tracking_key_version_invariant() {
        let tax = taxonomy();
        let (a, _) = build_identity("Sample App 1.0.0", "1.0.0", &tags(&["Universal"]), ".apk", &tax);
        let (b, _) = build_identity("Sample  App  1.2.0", "1.2.0", &tags(&["Universal"]), ".apk", &tax);
        assert_eq!(a, b);
        assert_eq!(a, "sample_app_universal");
    }

    #[test]
    fn test_tracking_key_ignores_link_phrasing_noise() {
        let tax = taxonomy();
        let (a, _) = build_identity("My Player (beta page)", "2.0", &tags(&["Mod"]), ".apk", &tax);
        let (b, _) = build_identity("My  Player - beta page", "2.1", &tags(&["Mod"]), ".apk", &tax);
        assert_eq!(a, b);
    }

    #[test]
    fn test_filename_shape() {
        let tax = taxonomy();
        let (_, filename) = build_identity(
            "Telegram",
            "10.2.1",
            &tags(&["Arm64-v8a", "Premium"]),
            ".apk",
            &tax,
        );
        assert_eq!(filename, "telegram_v10_2_1_arm64-v8a_premium.apk");
    }

    #[test]
    fn test_filename_no_adjacent_duplicate_tokens() {
        let tax = taxonomy();
        let (_, filename) = build_identity(
            "Sample Premium",
            "4.2.1",
            &tags(&["Premium"]),
            ".apk",
            &tax,
        );
        let stem = filename.trim_end_matches(".apk");
        let tokens: Vec<&str> = stem.split('_').collect();
        for pair in tokens.windows(2) {
            assert_ne!(pair[0], pair[1], "duplicate token in {filename}");
        }
        assert_eq!(filename, "sample_premium_v4_2_1.apk");
    }

    #[test]
    fn test_generic_category_omitted_when_alone() {
        let tax = taxonomy();
        let (_, filename) =
            build_identity("Sample", "1.0", &tags(&["Archive"]), ".zip", &tax);
        assert_eq!(filename, "sample_v1_0.zip");
    }

    #[test]
    fn test_generic_category_kept_with_specific_tag() {
        let tax = taxonomy();
        let (_, filename) = build_identity(
            "Sample",
            "1.0",
            &tags(&["Archive", "Persian"]),
            ".zip",
            &tax,
        );
        assert_eq!(filename, "sample_v1_0_archive_persian.zip");
    }

    #[test]
    fn test_default_tag_never_in_filename() {
        let tax = taxonomy();
        let (_, filename) = build_identity("Sample", "1.0", &tags(&["Default"]), ".bin", &tax);
        assert_eq!(filename, "sample_v1_0.bin");
    }

    #[test]
    fn test_variant_token_embedded_in_name_omitted() {
        let tax = taxonomy();
        let (_, filename) =
            build_identity("SuperMod Cleaner", "1.0", &tags(&["Mod"]), ".apk", &tax);
        // "mod" already sits inside "supermod"; repeating it adds nothing
        assert_eq!(filename, "supermod_cleaner_v1_0.apk");
    }

    #[test]
    fn test_empty_identity_falls_back() {
        let tax = taxonomy();
        let (key, _) = build_identity("Premium Mod", "1.0", &tags(&["Mod"]), ".apk", &tax);
        // aggressive cleaning eats the whole name; the key part degrades to
        // the fixed fallback rather than going empty
        assert_eq!(key, "app_mod");
    }
}
