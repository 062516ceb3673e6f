//! Lending configuration, loadable from TOML.
//!
//! ```toml
//! actor_buffer = 64
//!
//! [policy]
//! loan_period_days = 14
//! borrow_limit = 5
//! daily_late_fee = 0.50
//! max_late_fee = 15.00
//! ```
//!
//! Every field is optional and falls back to the values above
//! (`actor_buffer` defaults to 32).

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: String, reason: String },
}

const MAX_LOAN_PERIOD_DAYS: i64 = 3650;

/// Business rules for lending and late fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LendingPolicy {
    /// Days between borrow date and due date.
    pub loan_period_days: i64,
    /// A patron holding more than this many active loans cannot borrow.
    pub borrow_limit: usize,
    pub daily_late_fee: f64,
    /// Cap on the fee charged for a single book.
    pub max_late_fee: f64,
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            loan_period_days: 14,
            borrow_limit: 5,
            daily_late_fee: 0.50,
            max_late_fee: 15.00,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Channel capacity of each resource actor.
    pub actor_buffer: usize,
    pub policy: LendingPolicy,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            actor_buffer: 32,
            policy: LendingPolicy::default(),
        }
    }
}

impl LibraryConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.actor_buffer == 0 {
            return Err(invalid("actor_buffer", "must be at least 1"));
        }
        let policy = &self.policy;
        if !(1..=MAX_LOAN_PERIOD_DAYS).contains(&policy.loan_period_days) {
            return Err(invalid("policy.loan_period_days", "must be between 1 and 3650"));
        }
        if !(policy.daily_late_fee.is_finite() && policy.daily_late_fee >= 0.0) {
            return Err(invalid("policy.daily_late_fee", "must be a non-negative amount"));
        }
        if !(policy.max_late_fee.is_finite() && policy.max_late_fee >= 0.0) {
            return Err(invalid("policy.max_late_fee", "must be a non-negative amount"));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
