//! Host matching module
//!
//! Supports exact match, wildcard prefix (*.), and catch-all (*).

/// Strip the port from a host value ("example.com:8080" -> "example.com")
///
/// Bracketed IPv6 literals keep their brackets ("[::1]:8080" -> "[::1]").
pub fn strip_port(host: &str) -> &str {
    match host.rsplit_once(':') {
        Some((name, port))
            if port.bytes().all(|b| b.is_ascii_digit())
                && (name.ends_with(']') || !name.contains(':')) =>
        {
            name
        }
        _ => host,
    }
}

/// Match a domain against a pattern
///
/// Supports:
/// - Exact match: "api.example.com" matches "api.example.com"
/// - Wildcard prefix: "*.example.com" matches "api.example.com", "www.example.com"
/// - Catch-all: "*" matches any domain
///
/// Comparison is ASCII case-insensitive; the host's port is ignored.
pub fn match_domain(pattern: &str, host: &str) -> bool {
    let host = strip_port(host);

    if pattern == "*" {
        return true;
    }

    if pattern.eq_ignore_ascii_case(host) {
        return true;
    }

    if pattern.starts_with("*.") {
        return match_wildcard_domain(pattern, host);
    }

    false
}

/// True if any pattern matches
pub fn match_any_domain<S: AsRef<str>>(patterns: &[S], host: &str) -> bool {
    patterns
        .iter()
        .any(|pattern| match_domain(pattern.as_ref(), host))
}

/// Match wildcard domain pattern (*.example.com)
fn match_wildcard_domain(pattern: &str, host: &str) -> bool {
    // "*.example.com" should match:
    // - "api.example.com" (one level)
    // - "www.api.example.com" (multiple levels)
    // - "example.com" (the domain itself, without subdomain)
    let host = host.to_ascii_lowercase();
    let pattern = pattern.to_ascii_lowercase();

    let suffix = &pattern[1..]; // ".example.com"
    if host.ends_with(suffix) {
        return true;
    }

    let bare_domain = &pattern[2..]; // "example.com"
    host == bare_domain
}
