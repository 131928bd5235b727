use thiserror::Error;
use url::{Host, Url};

use crate::domain::split_host;

const ALLOWED_SCHEMES: [&str; 2] = ["http", "https"];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UrlRejection {
    #[error("url must not be empty")]
    Empty,

    #[error("malformed url: {0}")]
    Malformed(String),

    #[error("unsupported scheme: {0:?}")]
    UnsupportedScheme(String),

    #[error("url has no host")]
    MissingHost,
}

/// Structural parts of a URL accepted for scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub registered_domain: String,
    pub subdomain_labels: Vec<String>,
    pub is_ip_host: bool,
}

/// Validate a raw URL string and derive the parts feature extraction needs.
///
/// Input is trimmed once here; callers compute features over the same trimmed
/// text (see `trimmed`).
pub fn validate(raw: &str) -> Result<ParsedUrl, UrlRejection> {
    let raw = trimmed(raw);
    if raw.is_empty() {
        return Err(UrlRejection::Empty);
    }

    let (scheme, rest) =
        split_scheme(raw).ok_or_else(|| UrlRejection::UnsupportedScheme(String::new()))?;
    if !ALLOWED_SCHEMES.contains(&scheme.as_str()) {
        return Err(UrlRejection::UnsupportedScheme(scheme));
    }

    let url = Url::parse(raw).map_err(|e| match e {
        url::ParseError::EmptyHost => UrlRejection::MissingHost,
        other => UrlRejection::Malformed(other.to_string()),
    })?;

    // WHATWG parsing repairs `http:///path` into `http://path/`, so the host
    // is taken from the raw authority instead.
    let host = authority_host(rest);
    if host.is_empty() {
        return Err(UrlRejection::MissingHost);
    }

    let is_ip_host = matches!(url.host(), Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)));
    let parts = split_host(&host, is_ip_host);

    Ok(ParsedUrl {
        scheme,
        host,
        path: url.path().to_string(),
        registered_domain: parts.registered_domain,
        subdomain_labels: parts.subdomain_labels,
        is_ip_host,
    })
}

/// The single trim applied at the boundary.
pub fn trimmed(raw: &str) -> &str {
    raw.trim()
}

/// Split `scheme:rest`, returning the lowercased scheme.
fn split_scheme(raw: &str) -> Option<(String, &str)> {
    let (scheme, rest) = raw.split_once(':')?;
    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }
    Some((scheme.to_ascii_lowercase(), rest))
}

/// Host from the text following `scheme:`, lowercased, without userinfo,
/// port or IPv6 brackets. Empty when there is no `//` authority.
fn authority_host(rest: &str) -> String {
    let Some(after) = rest.strip_prefix("//") else {
        return String::new();
    };
    let authority = after
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or("");
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, h)| h);

    let host = if let Some(bracketed) = host_port.strip_prefix('[') {
        bracketed.split(']').next().unwrap_or("")
    } else {
        host_port.split(':').next().unwrap_or("")
    };
    host.to_lowercase()
}
