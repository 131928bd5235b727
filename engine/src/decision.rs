use serde::Serialize;

use crate::types::Label;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Verdict {
    pub label: Label,
    /// Probability rounded to 3 decimal places for display.
    pub confidence: f64,
    #[serde(skip)]
    pub probability: f64,
}

/// Apply the decision threshold. The comparison is inclusive: a probability
/// equal to the threshold is phishing.
pub fn decide(probability: f64, threshold: f64) -> Verdict {
    let label = if probability >= threshold {
        Label::Phishing
    } else {
        Label::Legitimate
    };

    Verdict {
        label,
        confidence: round3(probability),
        probability,
    }
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
