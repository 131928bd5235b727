use std::{env, net::SocketAddr, path::PathBuf};
use thiserror::Error;

use crate::types::DEFAULT_THRESHOLD;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid {var}: {value:?} ({reason})")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub model_path: PathBuf,
    pub threshold: f64,
    pub metrics_addr: Option<SocketAddr>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a configuration from any key lookup; `load` uses the process
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = parse_addr("PHISHGUARD_BIND", lookup("PHISHGUARD_BIND"))?
            .unwrap_or_else(|| SocketAddr::from(([127, 0, 0, 1], 5000)));

        let model_path = lookup("PHISHGUARD_MODEL")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("engine/models/student.json"));

        let threshold = match lookup("PHISHGUARD_THRESHOLD") {
            Some(value) => parse_threshold(&value)?,
            None => DEFAULT_THRESHOLD,
        };

        let metrics_addr = parse_addr("PHISHGUARD_METRICS_BIND", lookup("PHISHGUARD_METRICS_BIND"))?;

        Ok(Config {
            bind_addr,
            model_path,
            threshold,
            metrics_addr,
        })
    }
}

fn parse_addr(var: &'static str, value: Option<String>) -> Result<Option<SocketAddr>, ConfigError> {
    value
        .map(|v| {
            v.parse().map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                var,
                value: v.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}

fn parse_threshold(value: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: &str| ConfigError::Invalid {
        var: "PHISHGUARD_THRESHOLD",
        value: value.to_string(),
        reason: reason.to_string(),
    };
    let threshold: f64 = value.trim().parse().map_err(|_| invalid("not a number"))?;
    if !(0.0..=1.0).contains(&threshold) {
        return Err(invalid("must be within [0, 1]"));
    }
    Ok(threshold)
}
