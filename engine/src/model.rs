use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::{
    features::FeatureVector,
    types::{FEATURE_COUNT, FEATURE_NAMES},
};

/// A pre-trained classifier mapping a feature vector to a phishing
/// probability. Loaded once and shared read-only across requests.
pub trait Classifier: Send + Sync {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, InferenceError>;

    fn version(&self) -> &str;
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum InferenceError {
    #[error("probability {0} outside [0, 1]")]
    OutOfRange(f64),

    #[error("classifier failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum ModelError {
    #[error("failed to read model file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("feature order mismatch at position {position}: model has {found:?}, extractor produces {expected:?}")]
    FeatureOrder {
        position: usize,
        expected: String,
        found: String,
    },

    #[error("model declares {0} features, extractor produces {}", FEATURE_COUNT)]
    FeatureCount(usize),

    #[error("model has {weights} weights for {features} features")]
    WeightCount { weights: usize, features: usize },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StudentWeights {
    pub version: String,
    pub intercept: f64,
    pub weights: Vec<f64>,
    pub feature_order: Vec<String>,
}

/// Logistic model over the ordered feature vector.
#[derive(Clone, Debug)]
pub struct StudentModel {
    weights: StudentWeights,
}

impl StudentModel {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let weights: StudentWeights = serde_json::from_str(&data)?;
        let model = Self::from_weights(weights)?;
        info!(
            "Loaded student model from {}: version {}",
            path.display(),
            model.weights.version
        );
        Ok(model)
    }

    /// Build a model, refusing weights trained against a different feature
    /// layout.
    pub fn from_weights(weights: StudentWeights) -> Result<Self, ModelError> {
        if weights.feature_order.len() != FEATURE_COUNT {
            return Err(ModelError::FeatureCount(weights.feature_order.len()));
        }
        for (position, (found, expected)) in weights
            .feature_order
            .iter()
            .zip(FEATURE_NAMES)
            .enumerate()
        {
            if found != expected {
                return Err(ModelError::FeatureOrder {
                    position,
                    expected: expected.to_string(),
                    found: found.clone(),
                });
            }
        }
        if weights.weights.len() != FEATURE_COUNT {
            return Err(ModelError::WeightCount {
                weights: weights.weights.len(),
                features: FEATURE_COUNT,
            });
        }
        Ok(Self { weights })
    }
}

impl Classifier for StudentModel {
    fn predict_probability(&self, features: &FeatureVector) -> Result<f64, InferenceError> {
        let z = self.weights.intercept
            + self
                .weights
                .weights
                .iter()
                .zip(features.values())
                .map(|(w, x)| w * x)
                .sum::<f64>();
        let p = 1.0 / (1.0 + (-z).exp());
        if p.is_nan() {
            return Err(InferenceError::Failed(format!("non-finite logit {}", z)));
        }
        Ok(p)
    }

    fn version(&self) -> &str {
        &self.weights.version
    }
}
