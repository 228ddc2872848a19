//! Per-request identifier reconciliation.
//!
//! # Responsibilities
//! - Mint or refresh the primary identifier (always re-set)
//! - Refresh a valid secondary identifier, clear an invalid one
//! - Produce ordered cookie directives: primary, then secondary
//!
//! # Design Decisions
//! - Pure function of (cookies, host, now) plus entropy for minting
//! - No failure modes: bad input is minted over or cleared

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::config::CookieConfig;
use crate::cookies::directive::CookieDirective;
use crate::cookies::domain::scope_domain;
use crate::cookies::identifier::Identifier;

/// Compact P3P policy attached to every tracked response.
pub const P3P_POLICY: &str = r#"CP="ALL DSP COR CURa IND PHY UNR""#;

/// What happened to one identifier cookie during reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierOutcome {
    /// No usable value was presented; a new identifier was issued.
    Minted,
    /// A valid value was presented and its expiry extended.
    Refreshed,
    /// An invalid value was presented and deleted.
    Cleared,
    /// No cookie was presented and none was issued.
    Absent,
}

impl IdentifierOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            IdentifierOutcome::Minted => "minted",
            IdentifierOutcome::Refreshed => "refreshed",
            IdentifierOutcome::Cleared => "cleared",
            IdentifierOutcome::Absent => "absent",
        }
    }
}

/// The result of reconciling one request's identifier cookies.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Cookie directives in emission order.
    pub directives: Vec<CookieDirective>,
    /// Resolved primary identifier.
    pub primary: Identifier,
    pub primary_outcome: IdentifierOutcome,
    /// Resolved secondary identifier, if one survived.
    pub secondary: Option<Identifier>,
    pub secondary_outcome: IdentifierOutcome,
    /// Value for the `P3P` response header.
    pub policy: &'static str,
}

impl Reconciliation {
    /// `name=value` pairs of every directive that stores a value.
    pub fn cookie_pairs(&self) -> impl Iterator<Item = String> + '_ {
        self.directives
            .iter()
            .filter(|d| !d.is_clear() && !d.value.is_empty())
            .map(CookieDirective::pair)
    }
}

/// Decides identifier cookie actions for incoming requests.
#[derive(Debug, Clone)]
pub struct Reconciler {
    config: CookieConfig,
    ttl: Duration,
}

impl Reconciler {
    pub fn new(config: CookieConfig) -> Self {
        let ttl = Duration::days(i64::from(config.ttl_days));
        Self { config, ttl }
    }

    pub fn config(&self) -> &CookieConfig {
        &self.config
    }

    /// Reconcile the identifier cookies of one request.
    pub fn reconcile(
        &self,
        cookies: &HashMap<String, String>,
        host: &str,
        now: DateTime<Utc>,
    ) -> Reconciliation {
        let domain = scope_domain(host);
        let expires = now
            .checked_add_signed(self.ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        let mut directives = Vec::with_capacity(2);

        let presented = cookies
            .get(&self.config.primary_name)
            .and_then(|raw| Identifier::parse(raw).ok());
        let (primary, primary_outcome) = match presented {
            Some(id) => (id, IdentifierOutcome::Refreshed),
            None => (Identifier::mint(), IdentifierOutcome::Minted),
        };
        directives.push(CookieDirective::set(
            &self.config.primary_name,
            primary.to_hex(),
            &domain,
            expires,
        ));

        let (secondary, secondary_outcome) = if self.config.secondary_enabled {
            match cookies.get(&self.config.secondary_name) {
                None => (None, IdentifierOutcome::Absent),
                Some(raw) => match Identifier::parse(raw) {
                    Ok(id) => {
                        directives.push(CookieDirective::set(
                            &self.config.secondary_name,
                            id.to_hex(),
                            &domain,
                            expires,
                        ));
                        (Some(id), IdentifierOutcome::Refreshed)
                    }
                    Err(e) => {
                        tracing::debug!(
                            cookie = %self.config.secondary_name,
                            error = %e,
                            "Clearing invalid identifier cookie"
                        );
                        directives.push(CookieDirective::clear(
                            &self.config.secondary_name,
                            &domain,
                        ));
                        (None, IdentifierOutcome::Cleared)
                    }
                },
            }
        } else {
            (None, IdentifierOutcome::Absent)
        };

        Reconciliation {
            directives,
            primary,
            primary_outcome,
            secondary,
            secondary_outcome,
            policy: P3P_POLICY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
    }

    fn cookies(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn reconciler() -> Reconciler {
        Reconciler::new(CookieConfig::default())
    }

    #[test]
    fn test_mints_primary_when_absent() {
        let result = reconciler().reconcile(&HashMap::new(), "localhost", now());

        assert_eq!(result.primary_outcome, IdentifierOutcome::Minted);
        assert_eq!(result.secondary_outcome, IdentifierOutcome::Absent);
        assert_eq!(result.secondary, None);
        assert_eq!(result.directives.len(), 1);

        let aguid = &result.directives[0];
        assert_eq!(aguid.name, "aguid");
        assert_eq!(aguid.value, result.primary.to_hex());
        assert_eq!(aguid.domain, ".localhost");
        assert_eq!(aguid.expires, now() + Duration::days(365));
        assert_eq!(result.policy, r#"CP="ALL DSP COR CURa IND PHY UNR""#);
    }

    #[test]
    fn test_refreshes_valid_primary() {
        for raw in [
            "83259f2911124311ab03b5bae64e7c73",
            "83259f29-1112-4311-ab03-b5bae64e7c73",
        ] {
            let result =
                reconciler().reconcile(&cookies(&[("aguid", raw)]), "track.my.jobs", now());

            assert_eq!(result.primary_outcome, IdentifierOutcome::Refreshed);
            let aguid = &result.directives[0];
            assert_eq!(aguid.value, "83259f2911124311ab03b5bae64e7c73");
            assert_eq!(aguid.domain, ".my.jobs");
            assert_eq!(aguid.expires, now() + Duration::days(365));
        }
    }

    #[test]
    fn test_replaces_invalid_primary() {
        for raw in ["notavalidaguid", "", "{}", "83259f29"] {
            let result = reconciler().reconcile(&cookies(&[("aguid", raw)]), "localhost", now());

            assert_eq!(result.primary_outcome, IdentifierOutcome::Minted);
            let value = &result.directives[0].value;
            assert_ne!(value, raw);
            assert!(Identifier::parse(value).is_ok());
        }
    }

    #[test]
    fn test_refreshes_valid_secondary() {
        let jar = cookies(&[
            ("aguid", "83259f2911124311ab03b5bae64e7c73"),
            ("myguid", "12349f2911124311ab03b5bae64e7c73"),
        ]);
        let result = reconciler().reconcile(&jar, "www.example.com:8080", now());

        assert_eq!(result.secondary_outcome, IdentifierOutcome::Refreshed);
        assert_eq!(result.directives.len(), 2);
        assert_eq!(result.directives[0].name, "aguid");

        let myguid = &result.directives[1];
        assert_eq!(myguid.name, "myguid");
        assert_eq!(myguid.value, "12349f2911124311ab03b5bae64e7c73");
        assert_eq!(myguid.domain, ".example.com");
        assert_eq!(myguid.expires, now() + Duration::days(365));
        assert_eq!(
            result.secondary.map(|id| id.to_hex()).as_deref(),
            Some("12349f2911124311ab03b5bae64e7c73")
        );
    }

    #[test]
    fn test_clears_invalid_secondary() {
        let result = reconciler().reconcile(
            &cookies(&[("myguid", "notavalidaguid")]),
            "localhost",
            now(),
        );

        assert_eq!(result.secondary_outcome, IdentifierOutcome::Cleared);
        assert_eq!(result.secondary, None);

        let myguid = &result.directives[1];
        assert!(myguid.is_clear());
        assert_eq!(myguid.value, "");
        assert_eq!(myguid.domain, ".localhost");
        assert!(myguid.expires < now());
        assert!(Identifier::parse(&myguid.value).is_err());
    }

    #[test]
    fn test_secondary_ignored_when_disabled() {
        let config = CookieConfig {
            secondary_enabled: false,
            ..CookieConfig::default()
        };
        let result = Reconciler::new(config).reconcile(
            &cookies(&[("myguid", "notavalidaguid")]),
            "localhost",
            now(),
        );

        assert_eq!(result.directives.len(), 1);
        assert_eq!(result.secondary_outcome, IdentifierOutcome::Absent);
    }

    #[test]
    fn test_reconcile_is_idempotent_on_primary() {
        let first = reconciler().reconcile(&HashMap::new(), "localhost", now());
        let value = first.directives[0].value.clone();

        let later = now() + Duration::hours(1);
        let second = reconciler().reconcile(&cookies(&[("aguid", value.as_str())]), "localhost", later);

        assert_eq!(second.directives[0].value, value);
        assert_eq!(second.primary, first.primary);
        assert_eq!(second.directives[0].expires, later + Duration::days(365));
    }

    #[test]
    fn test_custom_names_and_ttl() {
        let config = CookieConfig {
            primary_name: "anon".into(),
            secondary_name: "known".into(),
            secondary_enabled: true,
            ttl_days: 30,
        };
        let jar = cookies(&[("anon", "83259f2911124311ab03b5bae64e7c73"), ("aguid", "x")]);
        let result = Reconciler::new(config).reconcile(&jar, "a.b.c", now());

        assert_eq!(result.directives.len(), 1);
        assert_eq!(result.directives[0].name, "anon");
        assert_eq!(result.directives[0].domain, ".b.c");
        assert_eq!(result.directives[0].expires, now() + Duration::days(30));
    }

    #[test]
    fn test_cookie_pairs_skip_cleared() {
        let jar = cookies(&[
            ("aguid", "83259f2911124311ab03b5bae64e7c73"),
            ("myguid", "bogus"),
        ]);
        let result = reconciler().reconcile(&jar, "localhost", now());
        let pairs: Vec<String> = result.cookie_pairs().collect();

        assert_eq!(pairs, vec!["aguid=83259f2911124311ab03b5bae64e7c73".to_string()]);
    }
}
