//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Detect provider paths that collide with each other or with resolver routes
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: QuickSearchConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::QuickSearchConfig;
use crate::journey::countries;

/// Path prefixes owned by the resolver routes.
pub const RESERVED_PREFIXES: &[&str] = &["/mac", "/url", "/url-go", "/ip", "/train"];

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    ZeroValue(&'static str),

    #[error("provider '{0}' has no paths")]
    NoPaths(String),

    #[error("provider '{name}': path '{path}' must start with '/' and contain no other '/'")]
    BadPath { name: String, path: String },

    #[error("path '{0}' is registered more than once")]
    DuplicatePath(String),

    #[error("provider '{0}' url must contain exactly one %s placeholder")]
    BadPlaceholder(String),

    #[error("journey.endpoint must contain a {{number}} placeholder")]
    MissingNumberPlaceholder,

    #[error("journey.home_country '{0}' is not a known country code")]
    UnknownCountry(String),

    #[error("journey.time_zone '{0}' is not a known IANA zone")]
    UnknownTimeZone(String),
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &QuickSearchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    for (field, value) in [
        ("timeouts.request_secs", config.timeouts.request_secs),
        ("timeouts.lookup_secs", config.timeouts.lookup_secs),
        ("timeouts.fetch_secs", config.timeouts.fetch_secs),
    ] {
        if value == 0 {
            errors.push(ValidationError::ZeroValue(field));
        }
    }

    if config.modules.search {
        validate_providers(config, &mut errors);
    }

    if config.modules.train_journey {
        let journey = &config.journey;
        if !journey.endpoint.contains("{number}") {
            errors.push(ValidationError::MissingNumberPlaceholder);
        }
        if countries::numeric_prefix(&journey.home_country).is_none() {
            errors.push(ValidationError::UnknownCountry(journey.home_country.clone()));
        }
        if journey.time_zone.parse::<chrono_tz::Tz>().is_err() {
            errors.push(ValidationError::UnknownTimeZone(journey.time_zone.clone()));
        }
        if journey.max_depth == 0 {
            errors.push(ValidationError::ZeroValue("journey.max_depth"));
        }
        if journey.max_nodes == 0 {
            errors.push(ValidationError::ZeroValue("journey.max_nodes"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_providers(config: &QuickSearchConfig, errors: &mut Vec<ValidationError>) {
    let mut seen: HashSet<&str> = RESERVED_PREFIXES.iter().copied().collect();

    for provider in &config.providers {
        if provider.paths.is_empty() {
            errors.push(ValidationError::NoPaths(provider.name.clone()));
        }
        if provider.url.matches("%s").count() != 1 {
            errors.push(ValidationError::BadPlaceholder(provider.name.clone()));
        }
        for path in &provider.paths {
            if !path.starts_with('/') || path.len() < 2 || path[1..].contains('/') {
                errors.push(ValidationError::BadPath {
                    name: provider.name.clone(),
                    path: path.clone(),
                });
            } else if !seen.insert(path.as_str()) {
                errors.push(ValidationError::DuplicatePath(path.clone()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::ProviderConfig;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&QuickSearchConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_every_error() {
        let mut config = QuickSearchConfig::default();
        config.listener.bind_address = "not-an-address".to_string();
        config.timeouts.lookup_secs = 0;
        config.journey.home_country = "XX".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.contains(&ValidationError::ZeroValue("timeouts.lookup_secs")));
        assert!(errors.contains(&ValidationError::UnknownCountry("XX".to_string())));
    }

    #[test]
    fn test_unravel_bounds_must_be_positive() {
        let mut config = QuickSearchConfig::default();
        config.journey.max_depth = 0;
        config.journey.max_nodes = 0;

        let errors = validate_config(&config).unwrap_err();
        assert!(errors.contains(&ValidationError::ZeroValue("journey.max_depth")));
        assert!(errors.contains(&ValidationError::ZeroValue("journey.max_nodes")));
    }

    #[test]
    fn test_provider_paths_cannot_shadow_resolvers() {
        let mut config = QuickSearchConfig::default();
        config.providers.push(ProviderConfig {
            name: "shadow".to_string(),
            paths: vec!["/mac".to_string(), "/g".to_string()],
            url: "https://example.com/?q=%s".to_string(),
        });

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::DuplicatePath("/mac".to_string()),
                ValidationError::DuplicatePath("/g".to_string()),
            ]
        );
    }

    #[test]
    fn test_provider_placeholder_required() {
        let mut config = QuickSearchConfig::default();
        config.providers = vec![ProviderConfig {
            name: "broken".to_string(),
            paths: vec!["/b".to_string()],
            url: "https://example.com/".to_string(),
        }];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::BadPlaceholder("broken".to_string())]);
    }

    #[test]
    fn test_disabled_modules_skip_their_checks() {
        let mut config = QuickSearchConfig::default();
        config.modules.train_journey = false;
        config.journey.time_zone = "Mars/Olympus".to_string();
        assert!(validate_config(&config).is_ok());
    }
}
