//! Phishing URL scoring: validation, feature extraction and threshold
//! decisions, plus the HTTP surface that serves them.

pub mod config;
pub mod decision;
pub mod domain;
pub mod engine;
pub mod error;
pub mod features;
pub mod model;
pub mod routes;
pub mod types;
pub mod validator;

pub use decision::{decide, Verdict};
pub use engine::{PhishingEngine, Prediction};
pub use error::AppError;
pub use features::{extract, FeatureVector};
pub use model::{Classifier, InferenceError, StudentModel};
pub use types::{FEATURE_COUNT, FEATURE_NAMES};
pub use validator::{validate, ParsedUrl, UrlRejection};
