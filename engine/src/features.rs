use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    types::{FEATURE_COUNT, FEATURE_NAMES, SUSPICIOUS_WORDS},
    validator::ParsedUrl,
};

// Four dot-separated groups of 1-3 ASCII digits, not touching another digit.
// Octets are not range checked and the quad may sit inside a longer token.
static DOTTED_QUAD_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|[^0-9])[0-9]{1,3}(?:\.[0-9]{1,3}){3}(?:[^0-9]|$)").unwrap()
});

/// Fixed, ordered feature vector. Field order matches `FEATURE_NAMES` and is
/// preserved when serialized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub url_length: usize,
    pub count_dots: usize,
    pub count_hyphens: usize,
    pub count_slashes: usize,
    pub count_digits: usize,
    pub has_ip: u8,
    pub has_https: u8,
    pub suspicious_word_count: usize,
    pub domain_length: usize,
    pub subdomain_count: usize,
}

impl FeatureVector {
    /// Values in contract order.
    pub fn values(&self) -> [f64; FEATURE_COUNT] {
        [
            self.url_length as f64,
            self.count_dots as f64,
            self.count_hyphens as f64,
            self.count_slashes as f64,
            self.count_digits as f64,
            self.has_ip as f64,
            self.has_https as f64,
            self.suspicious_word_count as f64,
            self.domain_length as f64,
            self.subdomain_count as f64,
        ]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.values())
    }
}

/// Compute the feature vector for an already validated URL.
///
/// `raw` must be the same trimmed string that was validated. Lengths count
/// Unicode scalar values; digits are ASCII only.
pub fn extract(raw: &str, parsed: &ParsedUrl) -> FeatureVector {
    FeatureVector {
        url_length: raw.chars().count(),
        count_dots: raw.matches('.').count(),
        count_hyphens: raw.matches('-').count(),
        count_slashes: raw.matches('/').count(),
        count_digits: raw.chars().filter(|c| c.is_ascii_digit()).count(),
        has_ip: has_ip(raw) as u8,
        has_https: (parsed.scheme == "https") as u8,
        suspicious_word_count: suspicious_word_count(raw),
        domain_length: parsed.registered_domain.chars().count(),
        subdomain_count: parsed.subdomain_labels.len(),
    }
}

pub fn has_ip(raw: &str) -> bool {
    DOTTED_QUAD_PATTERN.is_match(raw)
}

/// Number of lexicon words found anywhere in the lowercased URL. Each word
/// counts once regardless of repetitions.
pub fn suspicious_word_count(raw: &str) -> usize {
    let lower = raw.to_lowercase();
    SUSPICIOUS_WORDS.iter().filter(|word| lower.contains(*word)).count()
}
