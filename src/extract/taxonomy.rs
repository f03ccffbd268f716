//! Variant vocabulary: an ordered, declarative table of tags.
//!
//! Each rule names a canonical tag, its Latin and Persian surface forms, and
//! the coarser tags it suppresses once matched. One generic loop in
//! [`crate::extract::variant`] processes the table; precedence lives here in
//! data, not in branching code.

use std::sync::LazyLock;

use regex::Regex;

/// Broad grouping used for the fixed scan priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// How the build was altered (Mod, Patched, Ad-Free, ...).
    Modification,
    /// License tier (Premium, VIP, Full, ...).
    License,
    /// Interface language.
    Language,
    /// CPU architecture.
    Architecture,
    /// Platform or payload category (Windows, Data, ...).
    Platform,
}

/// One entry of the variant taxonomy.
pub struct TagRule {
    pub tag: &'static str,
    pub kind: TagKind,
    pub synonyms: &'static [&'static str],
    /// Tags that must not be added once this one matched.
    pub suppresses: &'static [&'static str],
}

/// Scan order: modification type, then license tier, then language, then
/// architecture, then platform. Every `suppresses` target appears later in
/// the table than its suppressor, so a single forward pass resolves
/// precedence.
const RULES: &[TagRule] = &[
    TagRule {
        tag: "Mod-Extra",
        kind: TagKind::Modification,
        synonyms: &["mod-extra", "mod extra", "modextra", "مود اکسترا", "موداکسترا"],
        suppresses: &["Mod", "Premium", "Full"],
    },
    TagRule {
        tag: "Mod-Lite",
        kind: TagKind::Modification,
        synonyms: &["mod-lite", "mod lite", "modlite", "مود لایت", "مودلایت"],
        suppresses: &["Mod", "Lite", "Premium", "Full"],
    },
    TagRule {
        tag: "Mod",
        kind: TagKind::Modification,
        synonyms: &["mod", "modded", "مود شده", "مود"],
        suppresses: &["Premium", "Full"],
    },
    TagRule {
        tag: "Ultra",
        kind: TagKind::Modification,
        synonyms: &["ultra", "اولترا"],
        suppresses: &[],
    },
    TagRule {
        tag: "Ad-Free",
        kind: TagKind::Modification,
        synonyms: &["ad-free", "adfree", "بدون تبلیغات"],
        suppresses: &[],
    },
    TagRule {
        tag: "Patched",
        kind: TagKind::Modification,
        synonyms: &["patched", "پچ شده"],
        suppresses: &[],
    },
    TagRule {
        tag: "Clone",
        kind: TagKind::Modification,
        synonyms: &["clone", "کلون"],
        suppresses: &[],
    },
    TagRule {
        tag: "Beta",
        kind: TagKind::Modification,
        synonyms: &["beta", "بتا"],
        suppresses: &[],
    },
    TagRule {
        tag: "Lite",
        kind: TagKind::Modification,
        synonyms: &["lite", "لایت"],
        suppresses: &[],
    },
    TagRule {
        tag: "Premium",
        kind: TagKind::License,
        synonyms: &["premium", "پرمیوم"],
        suppresses: &["Full"],
    },
    TagRule {
        tag: "Unlocked",
        kind: TagKind::License,
        synonyms: &["unlocked", "آنلاک"],
        suppresses: &["Full"],
    },
    TagRule {
        tag: "VIP",
        kind: TagKind::License,
        synonyms: &["vip"],
        suppresses: &["Full"],
    },
    TagRule {
        tag: "Plus",
        kind: TagKind::License,
        synonyms: &["plus", "پلاس"],
        suppresses: &["Full"],
    },
    TagRule {
        tag: "Full",
        kind: TagKind::License,
        synonyms: &["full", "کامل"],
        suppresses: &[],
    },
    TagRule {
        tag: "Persian",
        kind: TagKind::Language,
        synonyms: &["persian", "فارسی"],
        suppresses: &["English"],
    },
    TagRule {
        tag: "English",
        kind: TagKind::Language,
        synonyms: &["english", "انگلیسی"],
        suppresses: &[],
    },
    TagRule {
        tag: "Arm64-v8a",
        kind: TagKind::Architecture,
        synonyms: &["arm64-v8a", "arm64 v8a", "arm64"],
        suppresses: &["Armeabi-v7a", "Arm", "x86_64", "x86"],
    },
    TagRule {
        tag: "Armeabi-v7a",
        kind: TagKind::Architecture,
        synonyms: &["armeabi-v7a", "armeabi v7a", "armv7", "armeabi"],
        suppresses: &["Arm", "x86_64", "x86"],
    },
    TagRule {
        tag: "Arm",
        kind: TagKind::Architecture,
        synonyms: &["arm"],
        suppresses: &["x86_64", "x86"],
    },
    TagRule {
        tag: "x86_64",
        kind: TagKind::Architecture,
        synonyms: &["x86_64", "x86-64", "x64"],
        suppresses: &["x86"],
    },
    TagRule {
        tag: "x86",
        kind: TagKind::Architecture,
        synonyms: &["x86"],
        suppresses: &[],
    },
    TagRule {
        tag: "Windows",
        kind: TagKind::Platform,
        synonyms: &["windows", "ویندوز"],
        suppresses: &[],
    },
    TagRule {
        tag: "Data",
        kind: TagKind::Platform,
        synonyms: &["data", "obb", "دیتا"],
        suppresses: &[],
    },
];

/// Compiled taxonomy: the rule table plus one whole-word matcher per rule
/// and one combined scrubbing matcher for aggressive name cleaning.
///
/// Built once at startup and passed by reference into the components that
/// need it; nothing here is mutated after construction.
pub struct VariantTaxonomy {
    matchers: Vec<Regex>,
    scrubber: Regex,
}

impl VariantTaxonomy {
    pub fn new() -> Self {
        let matchers = RULES
            .iter()
            .map(|rule| whole_word_matcher(rule.synonyms))
            .collect();

        // Longest synonym first, so "mod extra" is scrubbed before "mod".
        let mut all: Vec<&str> = RULES.iter().flat_map(|r| r.synonyms).copied().collect();
        all.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
        let alternation = all
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        let scrubber = Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap();

        Self { matchers, scrubber }
    }

    pub fn rules(&self) -> &'static [TagRule] {
        RULES
    }

    /// Whole-word match of rule `index` against lowercase search text.
    pub fn rule_matches(&self, index: usize, text: &str) -> bool {
        self.matchers[index].is_match(text)
    }

    /// Remove one round of taxonomy vocabulary from `name`. Callers loop to
    /// a fixpoint because removals can join two halves of another keyword's
    /// surroundings.
    pub fn scrub_synonyms(&self, name: &str) -> String {
        self.scrubber.replace_all(name, " ").to_string()
    }
}

impl Default for VariantTaxonomy {
    fn default() -> Self {
        Self::new()
    }
}

fn whole_word_matcher(synonyms: &[&str]) -> Regex {
    let mut sorted: Vec<&str> = synonyms.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = sorted
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{alternation})\b")).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(tag: &str) -> usize {
        RULES.iter().position(|r| r.tag == tag).unwrap()
    }

    #[test]
    fn test_whole_word_not_substring() {
        let tax = VariantTaxonomy::new();
        let mod_idx = index_of("Mod");
        assert!(tax.rule_matches(mod_idx, "telegram mod apk"));
        assert!(!tax.rule_matches(mod_idx, "modern combat"));
        assert!(!tax.rule_matches(mod_idx, "commodore"));
    }

    #[test]
    fn test_persian_synonyms_match_whole_word() {
        let tax = VariantTaxonomy::new();
        assert!(tax.rule_matches(index_of("Premium"), "دانلود نسخه پرمیوم"));
        assert!(tax.rule_matches(index_of("Mod"), "نسخه مود شده"));
        assert!(!tax.rule_matches(index_of("Data"), "نسخه اصلی"));
    }

    #[test]
    fn test_arch_synonyms_do_not_bleed() {
        let tax = VariantTaxonomy::new();
        // "arm" inside "arm64" is not a whole word
        assert!(!tax.rule_matches(index_of("Arm"), "app-arm64-v8a.apk"));
        assert!(tax.rule_matches(index_of("Arm64-v8a"), "app-arm64-v8a.apk"));
        assert!(tax.rule_matches(index_of("x86_64"), "app x86_64 build"));
    }

    #[test]
    fn test_suppression_targets_come_after_suppressors() {
        for (i, rule) in RULES.iter().enumerate() {
            for target in rule.suppresses {
                let pos = RULES.iter().position(|r| r.tag == *target);
                let pos = pos.unwrap_or_else(|| panic!("unknown tag {target}"));
                assert!(pos > i, "{} must precede {}", rule.tag, target);
            }
        }
    }

    #[test]
    fn test_scrub_removes_longest_first() {
        let tax = VariantTaxonomy::new();
        let scrubbed = tax.scrub_synonyms("App Mod Extra Premium");
        assert!(!scrubbed.to_lowercase().contains("mod"));
        assert!(!scrubbed.to_lowercase().contains("premium"));
        assert!(scrubbed.contains("App"));
    }
}
