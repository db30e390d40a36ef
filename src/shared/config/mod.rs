//! Resolver configuration
//!
//! Provides the settings the asset resolver runs with: the grants written into
//! a brand-new user record and the time budget of each ledger query.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

/// Per-source ledger timeout used when none is configured
pub const DEFAULT_LEDGER_TIMEOUT: Duration = Duration::from_millis(2000);

/// Starting resources granted to a user on first access
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AssetDefaults {
    pub water: f64,
    pub fertilizer: f64,
    pub token: f64,
    pub potato: f64,
    pub barley: f64,
}

impl AssetDefaults {
    /// Initial resource document for a freshly created user record
    pub fn to_document(&self) -> serde_json::Value {
        json!({
            "water": self.water,
            "fertilizer": self.fertilizer,
            "token": self.token,
            "potato": self.potato,
            "barley": self.barley,
        })
    }

    fn entries(&self) -> [(&'static str, f64); 5] {
        [
            ("water", self.water),
            ("fertilizer", self.fertilizer),
            ("token", self.token),
            ("potato", self.potato),
            ("barley", self.barley),
        ]
    }
}

/// Asset resolver configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ResolverConfig {
    /// Grants for new user records
    pub defaults: AssetDefaults,
    /// Upper bound on each individual ledger query
    pub ledger_timeout: Duration,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            defaults: AssetDefaults::default(),
            ledger_timeout: DEFAULT_LEDGER_TIMEOUT,
        }
    }
}

impl ResolverConfig {
    /// Create a new ResolverConfigBuilder
    pub fn builder() -> ResolverConfigBuilder {
        ResolverConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger_timeout.is_zero() {
            return Err(ConfigError::InvalidValue {
                key: "ledger_timeout",
                reason: "must be greater than zero".to_string(),
            });
        }

        for (key, value) in self.defaults.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue {
                    key,
                    reason: format!("default grant must be a finite non-negative number, got {}", value),
                });
            }
        }

        Ok(())
    }
}

/// Builder for ResolverConfig
#[derive(Debug, Default)]
pub struct ResolverConfigBuilder {
    defaults: Option<AssetDefaults>,
    ledger_timeout: Option<Duration>,
}

impl ResolverConfigBuilder {
    /// Set the grants for new user records
    pub fn defaults(mut self, defaults: AssetDefaults) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Set the per-ledger timeout
    pub fn ledger_timeout(mut self, timeout: Duration) -> Self {
        self.ledger_timeout = Some(timeout);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<ResolverConfig, ConfigError> {
        let config = ResolverConfig {
            defaults: self.defaults.unwrap_or_default(),
            ledger_timeout: self.ledger_timeout.unwrap_or(DEFAULT_LEDGER_TIMEOUT),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
    #[error("missing value: {0}")]
    MissingValue(&'static str),
}
