//! Response assembly for tracked and redirected requests.
//!
//! # Responsibilities
//! - Render cookie directives as `Set-Cookie` headers
//! - Attach the P3P policy and content type
//! - Optionally echo `X-User-Agent` / `X-Uri-Query` diagnostics
//! - Build permanent redirects to the canonical origin

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
};

use crate::cookies::Reconciliation;
use crate::http::request::user_agent;

pub const P3P: HeaderName = HeaderName::from_static("p3p");
pub const X_USER_AGENT: HeaderName = HeaderName::from_static("x-user-agent");
pub const X_URI_QUERY: HeaderName = HeaderName::from_static("x-uri-query");

/// Diagnostic values echoed back on tracked responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEcho {
    pub user_agent: String,
    pub uri_query: String,
}

impl DiagnosticEcho {
    /// User agent with `+` for spaces, and the raw query joined with the
    /// cookie pairs that were set.
    pub fn new(headers: &HeaderMap, uri: &Uri, reconciliation: &Reconciliation) -> Self {
        let user_agent = user_agent(headers).unwrap_or("-").replace(' ', "+");

        let cookie_qs = reconciliation.cookie_pairs().collect::<Vec<_>>().join("&");
        let uri_query = [uri.query().unwrap_or_default(), cookie_qs.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("&");

        Self {
            user_agent,
            uri_query,
        }
    }
}

/// Static payload plus identifier cookies and policy headers.
pub fn tracked_response(
    body: Bytes,
    content_type: &'static str,
    reconciliation: &Reconciliation,
    echo: Option<DiagnosticEcho>,
) -> Response {
    let mut response = (StatusCode::OK, Body::from(body)).into_response();
    let headers = response.headers_mut();

    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(P3P, HeaderValue::from_static(reconciliation.policy));

    for directive in &reconciliation.directives {
        match HeaderValue::from_str(&directive.to_string()) {
            Ok(value) => {
                headers.append(header::SET_COOKIE, value);
            }
            Err(e) => {
                tracing::warn!(cookie = %directive.name, error = %e, "Skipping unrepresentable cookie");
            }
        }
    }

    if let Some(echo) = echo {
        insert_lossy(headers, X_USER_AGENT, &echo.user_agent);
        insert_lossy(headers, X_URI_QUERY, &echo.uri_query);
    }

    response
}

fn insert_lossy(headers: &mut HeaderMap, name: HeaderName, value: &str) {
    match HeaderValue::from_str(value) {
        Ok(value) => {
            headers.insert(name, value);
        }
        Err(e) => {
            tracing::debug!(header = %name, error = %e, "Dropping diagnostic header");
        }
    }
}

/// `Location` for a path on the canonical origin.
pub fn redirect_location(origin: &str, path: &str) -> String {
    format!("{}{}", origin.trim_end_matches('/'), path)
}

/// 301 to the canonical origin, keeping the request path.
pub fn permanent_redirect(origin: &str, path: &str) -> Response {
    let location = redirect_location(origin, path);
    match HeaderValue::from_str(&location) {
        Ok(value) => (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, value)]).into_response(),
        Err(e) => {
            tracing::error!(location = %location, error = %e, "Invalid redirect location");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
