//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses, cookie names and value ranges
//! - Validate the redirect origin
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: TrackerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::TrackerConfig;

/// Upper bound on cookie lifetime, keeps expiry dates well inside range.
const MAX_TTL_DAYS: u32 = 100 * 366;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address {value:?}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid cookie name {value:?}")]
    InvalidCookieName { field: &'static str, value: String },

    #[error("cookies: primary and secondary cookie names are both {0:?}")]
    DuplicateCookieName(String),

    #[error("cookies.ttl_days: must be between 1 and 36600, got {0}")]
    InvalidTtl(u32),

    #[error("timeouts.request_secs: must be greater than zero")]
    ZeroTimeout,

    #[error("redirect.origin: {0}")]
    InvalidRedirect(String),
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &TrackerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(
        "listener.bind_address",
        &config.listener.bind_address,
        &mut errors,
    );
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    let cookies = &config.cookies;
    check_cookie_name("cookies.primary_name", &cookies.primary_name, &mut errors);
    check_cookie_name("cookies.secondary_name", &cookies.secondary_name, &mut errors);
    if cookies.primary_name == cookies.secondary_name {
        errors.push(ValidationError::DuplicateCookieName(
            cookies.primary_name.clone(),
        ));
    }
    if cookies.ttl_days == 0 || cookies.ttl_days > MAX_TTL_DAYS {
        errors.push(ValidationError::InvalidTtl(cookies.ttl_days));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if let Err(reason) = check_redirect_origin(&config.redirect.origin) {
        errors.push(ValidationError::InvalidRedirect(reason));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

/// Cookie names must be RFC 6265 tokens.
fn check_cookie_name(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let is_token = !value.is_empty()
        && value.bytes().all(|b| {
            b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b)
        });
    if !is_token {
        errors.push(ValidationError::InvalidCookieName {
            field,
            value: value.to_string(),
        });
    }
}

fn check_redirect_origin(origin: &str) -> Result<(), String> {
    let url = Url::parse(origin).map_err(|e| e.to_string())?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme {:?}", url.scheme()));
    }
    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }
    if url.path() != "/" || url.query().is_some() || url.fragment().is_some() {
        return Err("must not carry a path, query or fragment".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&TrackerConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = TrackerConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.cookies.secondary_name = "aguid".into();
        config.cookies.ttl_days = 0;
        config.timeouts.request_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::DuplicateCookieName("aguid".into())));
        assert!(errors.contains(&ValidationError::InvalidTtl(0)));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
    }

    #[test]
    fn test_rejects_bad_cookie_names() {
        for name in ["", "a guid", "a;b", "a=b", "ümlaut"] {
            let mut config = TrackerConfig::default();
            config.cookies.primary_name = name.into();
            let errors = validate_config(&config).unwrap_err();
            assert!(
                matches!(errors[0], ValidationError::InvalidCookieName { .. }),
                "{name:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_redirect_origin_rules() {
        assert!(check_redirect_origin("http://www.my.jobs").is_ok());
        assert!(check_redirect_origin("https://example.com/").is_ok());
        assert!(check_redirect_origin("https://example.com:8443").is_ok());

        assert!(check_redirect_origin("www.my.jobs").is_err());
        assert!(check_redirect_origin("ftp://example.com").is_err());
        assert!(check_redirect_origin("http://example.com/landing").is_err());
        assert!(check_redirect_origin("http://example.com/?a=b").is_err());
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = TrackerConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
