//! Provider configuration

use std::time::Duration;

use thiserror::Error;
use voicegw_core::provider::{Operation, Timeouts};
use voicegw_core::resource::{Attributes, Value};

/// Environment variable consulted when `subscription_id` is not configured
pub const SUBSCRIPTION_ID_ENV: &str = "ARM_SUBSCRIPTION_ID";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("subscription_id must be configured or set through {}", SUBSCRIPTION_ID_ENV)]
    MissingSubscriptionId,

    #[error("Invalid type for {attribute}: expected {expected}")]
    InvalidType {
        attribute: String,
        expected: &'static str,
    },

    #[error("Unknown timeout operation {0:?}: expected one of create, read, update, delete")]
    UnknownTimeout(String),

    #[error("Timeout for {operation} must be a positive number of minutes, got {minutes}")]
    InvalidTimeout { operation: String, minutes: i64 },
}

/// Settings of the Azure provider
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    pub subscription_id: String,
    pub timeouts: Timeouts,
}

impl ProviderConfig {
    pub fn new(subscription_id: impl Into<String>) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            timeouts: Timeouts::default(),
        }
    }

    /// Build the configuration from provider block attributes, falling back to
    /// the process environment
    pub fn from_attributes(attributes: &Attributes) -> Result<Self, ConfigError> {
        Self::from_attributes_with_env(attributes, |key| std::env::var(key).ok())
    }

    pub fn from_attributes_with_env<F>(attributes: &Attributes, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let subscription_id = match attributes.get("subscription_id") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::String(_)) | None => env(SUBSCRIPTION_ID_ENV)
                .filter(|s| !s.is_empty())
                .ok_or(ConfigError::MissingSubscriptionId)?,
            Some(_) => {
                return Err(ConfigError::InvalidType {
                    attribute: "subscription_id".to_string(),
                    expected: "String",
                });
            }
        };

        let timeouts = match attributes.get("timeouts") {
            None => Timeouts::default(),
            Some(Value::Map(map)) => {
                let mut timeouts = Timeouts::default();
                for (name, value) in map {
                    let operation = match name.as_str() {
                        "create" => Operation::Create,
                        "read" => Operation::Read,
                        "update" => Operation::Update,
                        "delete" => Operation::Delete,
                        other => return Err(ConfigError::UnknownTimeout(other.to_string())),
                    };
                    let minutes = match value {
                        Value::Int(m) => *m,
                        _ => {
                            return Err(ConfigError::InvalidType {
                                attribute: format!("timeouts.{}", name),
                                expected: "Int",
                            });
                        }
                    };
                    if minutes <= 0 {
                        return Err(ConfigError::InvalidTimeout {
                            operation: name.clone(),
                            minutes,
                        });
                    }
                    timeouts = timeouts.with(operation, Duration::from_secs(minutes as u64 * 60));
                }
                timeouts
            }
            Some(_) => {
                return Err(ConfigError::InvalidType {
                    attribute: "timeouts".to_string(),
                    expected: "Map",
                });
            }
        };

        Ok(Self {
            subscription_id,
            timeouts,
        })
    }
}
