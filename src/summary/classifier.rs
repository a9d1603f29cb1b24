//! Rule-based mapping from free-text sector labels to super-sectors.
//!
//! Rules are evaluated in declaration order and the first match wins.
//! Several keyword families overlap on purpose ("network-threat-detection"
//! carries both a network and a security token), so the order of
//! [`SECTOR_RULES`] and the exclusions on the network and computing rules
//! decide the outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse technology bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuperSector {
    Security,
    Network,
    Video,
    Wireless,
    Computing,
    AiMl,
    Imaging,
    Other,
}

impl SuperSector {
    /// All buckets in rule order, `Other` last.
    pub const ALL: [Self; 8] = [
        Self::Security,
        Self::Network,
        Self::Video,
        Self::Wireless,
        Self::Computing,
        Self::AiMl,
        Self::Imaging,
        Self::Other,
    ];

    /// Stable machine code, e.g. `AI_ML`.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Security => "SECURITY",
            Self::Network => "NETWORK",
            Self::Video => "VIDEO",
            Self::Wireless => "WIRELESS",
            Self::Computing => "COMPUTING",
            Self::AiMl => "AI_ML",
            Self::Imaging => "IMAGING",
            Self::Other => "OTHER",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Security => "Security",
            Self::Network => "Network",
            Self::Video => "Video & Streaming",
            Self::Wireless => "Wireless",
            Self::Computing => "Computing & Systems",
            Self::AiMl => "AI & Machine Learning",
            Self::Imaging => "Imaging & Optics",
            Self::Other => "Other",
        }
    }

    /// Classify a raw sector label.
    #[must_use]
    pub fn classify(sector: &str) -> Self {
        let label = normalize_label(sector);
        SECTOR_RULES
            .iter()
            .find(|rule| rule.matches(&label))
            .map_or(Self::Other, |rule| rule.bucket)
    }
}

impl fmt::Display for SuperSector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One ordered classification rule.
#[derive(Debug)]
pub struct SectorRule {
    pub bucket: SuperSector,
    /// Substrings, any of which triggers the rule
    pub contains_any: &'static [&'static str],
    /// Whole words (split on `-`), any of which triggers the rule
    pub word_any: &'static [&'static str],
    /// Substrings that veto the rule even when it would trigger
    pub excludes: &'static [&'static str],
}

impl SectorRule {
    /// Test a label already passed through [`normalize_label`].
    #[must_use]
    pub fn matches(&self, label: &str) -> bool {
        let triggered = self.contains_any.iter().any(|t| label.contains(t))
            || label.split('-').any(|w| self.word_any.contains(&w));
        triggered && !self.excludes.iter().any(|t| label.contains(t))
    }
}

const SECURITY_TOKENS: &[&str] = &[
    "threat",
    "auth",
    "crypto",
    "security",
    "secure",
    "protection",
    "pii",
];

/// Classification rules in precedence order. `Other` has no rule.
pub static SECTOR_RULES: [SectorRule; 7] = [
    SectorRule {
        bucket: SuperSector::Security,
        contains_any: SECURITY_TOKENS,
        word_any: &[],
        excludes: &[],
    },
    SectorRule {
        bucket: SuperSector::Network,
        contains_any: &[
            "network",
            "routing",
            "router",
            "switching",
            "packet",
            "ethernet",
            "protocol",
            "traffic",
            "bandwidth",
            "optical-transport",
        ],
        word_any: &["sdn", "cdn", "ip", "tcp", "wan", "lan"],
        excludes: SECURITY_TOKENS,
    },
    SectorRule {
        bucket: SuperSector::Video,
        contains_any: &[
            "video",
            "streaming",
            "codec",
            "broadcast",
            "transcod",
            "multimedia",
            "television",
        ],
        word_any: &["tv", "media"],
        excludes: &[],
    },
    SectorRule {
        bucket: SuperSector::Wireless,
        contains_any: &[
            "wireless",
            "cellular",
            "radio",
            "antenna",
            "wifi",
            "wi-fi",
            "bluetooth",
            "spectrum",
            "baseband",
        ],
        word_any: &["5g", "4g", "lte", "rf", "mobile"],
        excludes: &[],
    },
    SectorRule {
        bucket: SuperSector::Computing,
        contains_any: &[
            "computing",
            "processor",
            "memory",
            "storage",
            "cloud",
            "virtualization",
            "server",
            "software",
            "database",
            "semiconductor",
            "datacenter",
            "data-center",
            "operating-system",
        ],
        word_any: &["cpu", "chip", "compute", "hardware"],
        excludes: &["security", "auth", "protection"],
    },
    SectorRule {
        bucket: SuperSector::AiMl,
        contains_any: &[
            "artificial-intelligence",
            "machine-learning",
            "neural",
            "deep-learning",
            "cognitive",
            "natural-language",
        ],
        word_any: &["ai", "ml", "nlp"],
        excludes: &[],
    },
    SectorRule {
        bucket: SuperSector::Imaging,
        contains_any: &[
            "imaging",
            "image",
            "camera",
            "optic",
            "lens",
            "photo",
            "lidar",
            "computer-vision",
        ],
        word_any: &["sensor", "sensors"],
        excludes: &[],
    },
];

/// Lowercase and join words with `-` so "Machine Learning" and
/// "machine_learning" read alike.
#[must_use]
pub fn normalize_label(sector: &str) -> String {
    sector
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '_' || c == '/')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn security_bucket() {
        assert_eq!(SuperSector::classify("threat-intelligence"), SuperSector::Security);
        assert_eq!(SuperSector::classify("Cryptography"), SuperSector::Security);
        assert_eq!(SuperSector::classify("pii-handling"), SuperSector::Security);
    }

    #[test]
    fn network_threat_is_security_not_network() {
        assert_eq!(
            SuperSector::classify("network-threat-detection"),
            SuperSector::Security
        );
        // The network rule vetoes itself even when checked in isolation.
        assert!(!SECTOR_RULES[1].matches("network-threat-detection"));
    }

    #[test]
    fn network_bucket() {
        assert_eq!(SuperSector::classify("network-switching"), SuperSector::Network);
        assert_eq!(SuperSector::classify("SDN controllers"), SuperSector::Network);
        assert_eq!(SuperSector::classify("wireless-network"), SuperSector::Network);
    }

    #[test]
    fn video_bucket() {
        assert_eq!(SuperSector::classify("video-codec"), SuperSector::Video);
        assert_eq!(SuperSector::classify("Live Streaming"), SuperSector::Video);
    }

    #[test]
    fn wireless_bucket() {
        assert_eq!(SuperSector::classify("cellular-baseband"), SuperSector::Wireless);
        assert_eq!(SuperSector::classify("5g-radio-access"), SuperSector::Wireless);
    }

    #[test]
    fn computing_bucket_and_exclusion() {
        assert_eq!(SuperSector::classify("cloud-storage"), SuperSector::Computing);
        assert_eq!(SuperSector::classify("virtualization"), SuperSector::Computing);
        assert_eq!(SuperSector::classify("secure-storage"), SuperSector::Security);
        assert!(!SECTOR_RULES[4].matches("storage-protection"));
    }

    #[test]
    fn ai_ml_bucket() {
        assert_eq!(SuperSector::classify("Machine Learning"), SuperSector::AiMl);
        assert_eq!(SuperSector::classify("ai-inference"), SuperSector::AiMl);
        // "ml" is a word token, not a substring
        assert_eq!(SuperSector::classify("html-rendering"), SuperSector::Other);
    }

    #[test]
    fn imaging_bucket() {
        assert_eq!(SuperSector::classify("image-sensors"), SuperSector::Imaging);
        assert_eq!(SuperSector::classify("optics"), SuperSector::Imaging);
    }

    #[test]
    fn unmatched_is_other() {
        assert_eq!(SuperSector::classify("medical-devices"), SuperSector::Other);
        assert_eq!(SuperSector::classify(""), SuperSector::Other);
    }

    #[test]
    fn earlier_rules_win_overlaps() {
        // video before imaging, network before wireless
        assert_eq!(SuperSector::classify("video-image-processing"), SuperSector::Video);
        assert_eq!(SuperSector::classify("radio-network-planning"), SuperSector::Network);
    }

    #[test]
    fn codes_and_display_names() {
        assert_eq!(SuperSector::AiMl.code(), "AI_ML");
        assert_eq!(SuperSector::Video.display_name(), "Video & Streaming");
        assert_eq!(
            serde_json::to_string(&SuperSector::AiMl).expect("serialize"),
            "\"AI_ML\""
        );
        for (bucket, rule) in SuperSector::ALL.iter().zip(SECTOR_RULES.iter()) {
            assert_eq!(*bucket, rule.bucket);
        }
    }
}
