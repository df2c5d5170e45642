//! Runtime configuration read from the environment.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::stores::kubernetes::DEFAULT_READ_TIMEOUT;

/// Default path to webhook TLS certificate
pub const WEBHOOK_CERT_PATH: &str = "/etc/webhook/certs/tls.crt";
/// Default path to webhook TLS private key
pub const WEBHOOK_KEY_PATH: &str = "/etc/webhook/certs/tls.key";
/// Default webhook server port
pub const WEBHOOK_PORT: u16 = 9443;
/// Default health server port
pub const HEALTH_PORT: u16 = 8080;

/// Errors in the runtime configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

/// What the webhook answers when a policy could not be evaluated because a
/// store read failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Deny the request
    #[default]
    Fail,
    /// Allow the request with a warning
    Ignore,
}

impl FromStr for FailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fail" => Ok(FailurePolicy::Fail),
            "ignore" => Ok(FailurePolicy::Ignore),
            other => Err(format!("expected 'fail' or 'ignore', got '{}'", other)),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub webhook_port: u16,
    pub health_port: u16,
    pub cert_path: String,
    pub key_path: String,
    pub failure_policy: FailurePolicy,
    /// Deadline for each store read
    pub store_read_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            webhook_port: WEBHOOK_PORT,
            health_port: HEALTH_PORT,
            cert_path: WEBHOOK_CERT_PATH.to_string(),
            key_path: WEBHOOK_KEY_PATH.to_string(),
            failure_policy: FailurePolicy::default(),
            store_read_timeout: DEFAULT_READ_TIMEOUT,
        }
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let store_read_timeout = match parse_var::<u64, _>(&lookup, "STORE_READ_TIMEOUT_SECS")? {
            Some(0) => {
                return Err(ConfigError::Invalid {
                    var: "STORE_READ_TIMEOUT_SECS",
                    value: "0".to_string(),
                    reason: "must be at least 1 second".to_string(),
                });
            }
            Some(secs) => Duration::from_secs(secs),
            None => defaults.store_read_timeout,
        };

        Ok(Self {
            webhook_port: parse_var(&lookup, "WEBHOOK_PORT")?.unwrap_or(defaults.webhook_port),
            health_port: parse_var(&lookup, "HEALTH_PORT")?.unwrap_or(defaults.health_port),
            cert_path: lookup("WEBHOOK_CERT_PATH").unwrap_or(defaults.cert_path),
            key_path: lookup("WEBHOOK_KEY_PATH").unwrap_or(defaults.key_path),
            failure_policy: parse_var(&lookup, "FAILURE_POLICY")?
                .unwrap_or(defaults.failure_policy),
            store_read_timeout,
        })
    }
}

fn parse_var<T, F>(lookup: &F, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var) else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<T>()
        .map(Some)
        .map_err(|e| ConfigError::Invalid {
            var,
            value: value.clone(),
            reason: e.to_string(),
        })
}
