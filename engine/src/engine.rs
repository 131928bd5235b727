use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    decision::{decide, Verdict},
    error::AppError,
    features::{extract, FeatureVector},
    model::{Classifier, InferenceError},
    validator::{trimmed, validate},
};

/// Outcome of scoring one URL.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub url: String,
    pub features: FeatureVector,
    pub verdict: Verdict,
}

/// Validation, feature extraction, inference and decision for a single URL.
///
/// Holds the classifier loaded at startup; `None` when loading failed, in
/// which case every prediction fails with `ClassifierUnavailable`.
pub struct PhishingEngine {
    classifier: Option<Arc<dyn Classifier>>,
    threshold: f64,
}

impl PhishingEngine {
    pub fn new(classifier: Option<Arc<dyn Classifier>>, threshold: f64) -> Self {
        Self {
            classifier,
            threshold,
        }
    }

    pub fn model_loaded(&self) -> bool {
        self.classifier.is_some()
    }

    pub fn score(&self, raw: &str) -> Result<Prediction, AppError> {
        let classifier = self
            .classifier
            .as_ref()
            .ok_or(AppError::ClassifierUnavailable)?;

        let url = trimmed(raw);
        let parsed = validate(url)?;
        let features = extract(url, &parsed);
        debug!(?features, host = %parsed.host, "Extracted features");

        let probability = classifier.predict_probability(&features)?;
        if !(0.0..=1.0).contains(&probability) {
            return Err(InferenceError::OutOfRange(probability).into());
        }

        let verdict = decide(probability, self.threshold);
        info!(
            model = classifier.version(),
            "{} → {} ({:.3})",
            url,
            verdict.label,
            probability
        );

        Ok(Prediction {
            url: url.to_string(),
            features,
            verdict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{types::Label, validator::UrlRejection};

    struct Fixed(f64);

    impl Classifier for Fixed {
        fn predict_probability(&self, _: &FeatureVector) -> Result<f64, InferenceError> {
            Ok(self.0)
        }

        fn version(&self) -> &str {
            "fixed"
        }
    }

    fn engine(p: f64) -> PhishingEngine {
        PhishingEngine::new(Some(Arc::new(Fixed(p))), 0.35)
    }

    #[test]
    fn test_score_phishing() {
        let prediction = engine(0.9)
            .score("http://secure-verify-bank-login.com/account/update")
            .unwrap();
        assert_eq!(prediction.verdict.label, Label::Phishing);
        assert_eq!(prediction.verdict.confidence, 0.9);
        assert_eq!(prediction.features.suspicious_word_count, 6);
    }

    #[test]
    fn test_score_trims_input() {
        let prediction = engine(0.1).score("  https://example.com/  ").unwrap();
        assert_eq!(prediction.url, "https://example.com/");
        assert_eq!(prediction.features.url_length, 20);
        assert_eq!(prediction.verdict.label, Label::Legitimate);
    }

    #[test]
    fn test_validation_fails_before_inference() {
        let err = engine(0.9).score("ftp://example.com").unwrap_err();
        assert!(matches!(
            err,
            AppError::Rejected(UrlRejection::UnsupportedScheme(_))
        ));
    }

    #[test]
    fn test_out_of_range_probability() {
        let err = engine(1.5).score("http://example.com").unwrap_err();
        assert!(matches!(
            err,
            AppError::Inference(InferenceError::OutOfRange(_))
        ));

        let err = engine(f64::NAN).score("http://example.com").unwrap_err();
        assert!(matches!(err, AppError::Inference(_)));
    }

    #[test]
    fn test_no_classifier() {
        let engine = PhishingEngine::new(None, 0.35);
        assert!(!engine.model_loaded());
        assert!(matches!(
            engine.score("http://example.com"),
            Err(AppError::ClassifierUnavailable)
        ));
    }
}
