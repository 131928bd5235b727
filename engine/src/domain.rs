//! Public-suffix aware host splitting.
//!
//! Uses the compiled Public Suffix List so multi-label suffixes such as
//! `co.uk` or `com.br` are not mistaken for subdomains:
//! - a.b.example.co.uk -> example.co.uk, subdomains ["a", "b"]
//! - example.com       -> example.com, no subdomains
//!
//! Hosts without a known suffix, without a registrable domain, or that are IP
//! literals fail open: the whole host is the registered domain and there are
//! no subdomains.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    pub registered_domain: String,
    pub subdomain_labels: Vec<String>,
}

impl DomainParts {
    fn whole_host(host: &str) -> Self {
        Self {
            registered_domain: host.to_string(),
            subdomain_labels: Vec::new(),
        }
    }
}

/// Split a lowercased host into registered domain and subdomain labels.
pub fn split_host(host: &str, is_ip: bool) -> DomainParts {
    if is_ip || host.is_empty() {
        return DomainParts::whole_host(host);
    }

    let name = host.strip_suffix('.').unwrap_or(host);
    let registered = match psl::domain(name.as_bytes()) {
        Some(domain) if domain.suffix().is_known() => domain,
        _ => return DomainParts::whole_host(name),
    };

    let registered = match std::str::from_utf8(registered.as_bytes()) {
        Ok(s) => s,
        Err(_) => return DomainParts::whole_host(name),
    };

    let prefix = &name[..name.len() - registered.len()];
    let subdomain_labels = match prefix.strip_suffix('.') {
        Some(sub) if !sub.is_empty() => sub.split('.').map(String::from).collect(),
        _ => Vec::new(),
    };

    DomainParts {
        registered_domain: registered.to_string(),
        subdomain_labels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multi_label_suffix() {
        let parts = split_host("a.b.example.co.uk", false);
        assert_eq!(parts.registered_domain, "example.co.uk");
        assert_eq!(parts.subdomain_labels, vec!["a", "b"]);
    }

    #[test]
    fn test_plain_registered_domain() {
        let parts = split_host("example.com", false);
        assert_eq!(parts.registered_domain, "example.com");
        assert!(parts.subdomain_labels.is_empty());
    }

    #[test]
    fn test_single_subdomain() {
        let parts = split_host("login.paypal.com", false);
        assert_eq!(parts.registered_domain, "paypal.com");
        assert_eq!(parts.subdomain_labels, vec!["login"]);
    }

    #[test]
    fn test_brazilian_suffix() {
        let parts = split_host("www.loja.com.br", false);
        assert_eq!(parts.registered_domain, "loja.com.br");
        assert_eq!(parts.subdomain_labels, vec!["www"]);
    }

    #[test]
    fn test_single_label_host_fails_open() {
        let parts = split_host("localhost", false);
        assert_eq!(parts.registered_domain, "localhost");
        assert!(parts.subdomain_labels.is_empty());
    }

    #[test]
    fn test_unknown_suffix_fails_open() {
        let parts = split_host("foo.bar.notarealtld", false);
        assert_eq!(parts.registered_domain, "foo.bar.notarealtld");
        assert!(parts.subdomain_labels.is_empty());
    }

    #[test]
    fn test_ip_host_is_whole_domain() {
        let parts = split_host("192.168.0.1", true);
        assert_eq!(parts.registered_domain, "192.168.0.1");
        assert!(parts.subdomain_labels.is_empty());
    }

    #[test]
    fn test_trailing_root_dot_ignored() {
        let parts = split_host("www.example.com.", false);
        assert_eq!(parts.registered_domain, "example.com");
        assert_eq!(parts.subdomain_labels, vec!["www"]);
    }
}
