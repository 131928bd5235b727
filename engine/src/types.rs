use serde::{Deserialize, Serialize};

/// Number of slots in a feature vector.
pub const FEATURE_COUNT: usize = 10;

/// Feature names in the order the classifier was trained on.
///
/// This order is the train/serve contract: the featurizer writes CSV columns
/// in this order and `StudentModel` refuses weights declared in any other.
/// Changing it requires a new model version.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "url_length",
    "count_dots",
    "count_hyphens",
    "count_slashes",
    "count_digits",
    "has_ip",
    "has_https",
    "suspicious_word_count",
    "domain_length",
    "subdomain_count",
];

/// Lowercase lexicon matched as substrings of the lowercased raw URL.
pub const SUSPICIOUS_WORDS: [&str; 10] = [
    "login", "secure", "account", "update", "verify",
    "bank", "free", "confirm", "signin", "payment",
];

pub const DEFAULT_THRESHOLD: f64 = 0.35;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Label {
    Phishing,
    Legitimate,
}

impl Label {
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Phishing => "phishing",
            Label::Legitimate => "legitimate",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    pub url: String,
    pub prediction: Label,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub model_loaded: bool,
}
