//! Canonical affiliate names for raw assignee strings.

use indexmap::IndexMap;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Group key for records with a blank assignee
pub const UNKNOWN_AFFILIATE: &str = "Unknown";

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static regex"));

static TRAILING_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s.,;:]+$").expect("static regex"));

/// Lookup key for an assignee: lowercase, whitespace collapsed, trailing
/// punctuation dropped.
#[must_use]
pub fn normalize_assignee(raw: &str) -> String {
    let collapsed = WHITESPACE.replace_all(raw.trim(), " ");
    TRAILING_PUNCT.replace(&collapsed, "").to_lowercase()
}

/// Built-in alias table: canonical affiliate -> historical and legal-entity names.
#[must_use]
pub fn builtin_aliases() -> IndexMap<String, Vec<String>> {
    let table: [(&str, &[&str]); 6] = [
        (
            "Broadcom",
            &[
                "Broadcom Inc.",
                "Broadcom Corporation",
                "Broadcom Corp.",
                "Broadcom International Pte. Ltd.",
            ],
        ),
        (
            "Avago",
            &[
                "Avago Technologies",
                "Avago Technologies General IP (Singapore) Pte. Ltd.",
                "Avago Technologies International Sales Pte. Limited",
            ],
        ),
        ("LSI", &["LSI Corporation", "LSI Logic Corporation"]),
        (
            "CA Technologies",
            &["CA, Inc.", "Computer Associates Think, Inc."],
        ),
        (
            "Symantec",
            &["Symantec Corporation", "Symantec Corp.", "NortonLifeLock Inc."],
        ),
        ("VMware", &["VMware, Inc.", "VMware LLC", "Nicira, Inc."]),
    ];

    table
        .iter()
        .map(|(canonical, aliases)| {
            (
                (*canonical).to_string(),
                aliases.iter().map(|a| (*a).to_string()).collect(),
            )
        })
        .collect()
}

/// Resolves raw assignee strings to canonical affiliate names.
#[derive(Debug, Clone, Default)]
pub struct AffiliateResolver {
    /// normalized alias -> canonical display name
    alias_to_canonical: HashMap<String, String>,
    /// canonical display name -> raw aliases, in registration order
    canonical_to_aliases: IndexMap<String, Vec<String>>,
}

impl AffiliateResolver {
    /// A resolver with no aliases; every assignee is its own affiliate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_builtins() -> Self {
        Self::from_table(&builtin_aliases())
    }

    /// Build from a canonical -> aliases table.
    #[must_use]
    pub fn from_table(table: &IndexMap<String, Vec<String>>) -> Self {
        let mut resolver = Self::new();
        for (canonical, aliases) in table {
            resolver.add_aliases(canonical, aliases);
        }
        resolver
    }

    /// Register aliases for a canonical name. The canonical name is its own alias.
    /// A later registration of the same alias wins.
    pub fn add_aliases<S: AsRef<str>>(&mut self, canonical: &str, aliases: &[S]) {
        let canonical = canonical.trim().to_string();
        self.alias_to_canonical
            .insert(normalize_assignee(&canonical), canonical.clone());

        let entry = self.canonical_to_aliases.entry(canonical.clone()).or_default();
        for alias in aliases {
            let alias = alias.as_ref();
            self.alias_to_canonical
                .insert(normalize_assignee(alias), canonical.clone());
            entry.push(alias.to_string());
        }
    }

    /// The affiliate group key for a raw assignee string.
    #[must_use]
    pub fn resolve(&self, assignee: &str) -> String {
        let trimmed = assignee.trim();
        if trimmed.is_empty() {
            return UNKNOWN_AFFILIATE.to_string();
        }
        self.canonical(trimmed)
            .map_or_else(|| trimmed.to_string(), str::to_string)
    }

    /// The canonical name for an alias, if registered.
    #[must_use]
    pub fn canonical(&self, assignee: &str) -> Option<&str> {
        self.alias_to_canonical
            .get(&normalize_assignee(assignee))
            .map(String::as_str)
    }

    /// Canonical name -> registered aliases, in registration order.
    #[must_use]
    pub const fn table(&self) -> &IndexMap<String, Vec<String>> {
        &self.canonical_to_aliases
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alias_to_canonical.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alias_to_canonical.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization() {
        assert_eq!(normalize_assignee("  VMware,   Inc. "), "vmware, inc");
        assert_eq!(normalize_assignee("LSI Corporation."), "lsi corporation");
        assert_eq!(normalize_assignee("CA, Inc.;"), "ca, inc");
    }

    #[test]
    fn test_builtin_lookup() {
        let resolver = AffiliateResolver::with_builtins();
        assert_eq!(resolver.resolve("VMware, Inc."), "VMware");
        assert_eq!(resolver.resolve("vmware llc"), "VMware");
        assert_eq!(
            resolver.resolve("Avago Technologies General IP (Singapore) Pte. Ltd"),
            "Avago"
        );
        assert_eq!(resolver.resolve("broadcom"), "Broadcom");
    }

    #[test]
    fn test_unmatched_and_blank() {
        let resolver = AffiliateResolver::with_builtins();
        assert_eq!(resolver.resolve("  Acme Widgets  "), "Acme Widgets");
        assert_eq!(resolver.resolve("   "), UNKNOWN_AFFILIATE);
        assert!(resolver.canonical("Acme Widgets").is_none());
    }

    #[test]
    fn test_custom_aliases() {
        let mut resolver = AffiliateResolver::new();
        resolver.add_aliases("Acme", &["Acme Corp", "ACME Holdings"]);

        assert_eq!(resolver.resolve("acme corp."), "Acme");
        assert_eq!(resolver.resolve("ACME HOLDINGS"), "Acme");
        assert_eq!(
            resolver.table().get("Acme").map(Vec::len),
            Some(2)
        );
    }
}
