//! Cookie scope domain derivation.
//!
//! Assumes single-label TLDs (`.com`, not `.co.uk`). Hosts under a
//! multi-label public suffix get a scope covering the suffix itself.

/// Derive the domain-wide cookie scope from a `Host` header value.
///
/// The port is stripped, the two right-most labels are kept and a leading
/// `.` is prepended. Single-label hosts degrade to `.label`.
pub fn scope_domain(host: &str) -> String {
    let hostname = host.split(':').next().unwrap_or_default();
    let labels: Vec<&str> = hostname.split('.').collect();
    let apex = &labels[labels.len().saturating_sub(2)..];

    format!(".{}", apex.join("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_domain_examples() {
        assert_eq!(scope_domain("localhost"), ".localhost");
        assert_eq!(scope_domain("track.my.jobs"), ".my.jobs");
        assert_eq!(scope_domain("this.is.a.long.host.com"), ".host.com");
        assert_eq!(scope_domain("example.com"), ".example.com");
    }

    #[test]
    fn test_scope_domain_strips_port() {
        assert_eq!(scope_domain("example.com:8080"), ".example.com");
        assert_eq!(scope_domain("localhost:5000"), ".localhost");
        assert_eq!(scope_domain("a.b.example.com:443"), ".example.com");
    }

    #[test]
    fn test_scope_domain_degenerate_hosts() {
        // Never fails, whatever the input looks like
        assert_eq!(scope_domain(""), ".");
        assert_eq!(scope_domain(":8080"), ".");
        assert_eq!(scope_domain("127.0.0.1:3000"), ".0.1");
    }

    #[test]
    fn test_scope_domain_always_dot_prefixed() {
        for host in ["x", "x.y", "w.x.y.z", "foo.bar:1", "a.b:c.d"] {
            let domain = scope_domain(host);
            assert!(domain.starts_with('.'), "{host} -> {domain}");
            assert!(!domain.starts_with(".."), "{host} -> {domain}");
        }
    }
}
