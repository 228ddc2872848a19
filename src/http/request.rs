//! Request inspection.
//!
//! # Responsibilities
//! - Extract the host used for cookie scoping
//! - Parse `Cookie` headers into name/value pairs
//! - Read diagnostic inputs (user agent, raw query)
//!
//! # Design Decisions
//! - Permissive: unreadable headers are skipped, never rejected
//! - First occurrence of a cookie name wins

use std::collections::HashMap;

use axum::http::{header, HeaderMap, Uri};

/// Host of the request: `Host` header, else the URI authority, else empty.
pub fn request_host(headers: &HeaderMap, uri: &Uri) -> String {
    headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_string)
        .or_else(|| uri.authority().map(|a| a.as_str().to_string()))
        .unwrap_or_default()
}

/// Collect cookies from every `Cookie` header.
pub fn request_cookies(headers: &HeaderMap) -> HashMap<String, String> {
    let mut cookies = HashMap::new();

    for value in headers.get_all(header::COOKIE) {
        let Ok(value) = value.to_str() else {
            continue;
        };
        for pair in value.split(';') {
            let Some((name, raw)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let raw = raw.trim();
            let raw = raw
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(raw);
            cookies
                .entry(name.to_string())
                .or_insert_with(|| raw.to_string());
        }
    }

    cookies
}

/// `User-Agent` header, if present and readable.
pub fn user_agent(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::USER_AGENT)
        .and_then(|h| h.to_str().ok())
}
