use fairshare_domain::{Money, PayerPolicy};
use std::env;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

const PAYER_POLICY_VAR: &str = "FAIRSHARE_PAYER_POLICY";
const TOLERANCE_VAR: &str = "FAIRSHARE_SETTLEMENT_TOLERANCE";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("FAIRSHARE_PAYER_POLICY must be 'first_participant' or 'require_explicit' (got '{0}')")]
    InvalidPayerPolicy(String),
    #[error("FAIRSHARE_SETTLEMENT_TOLERANCE must be a non-negative number of minor units (got '{0}')")]
    InvalidTolerance(String),
}

/// Runtime settings taken from the environment (and `.env`, if present).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AppConfig {
    pub payer_policy: PayerPolicy,
    pub tolerance: Money,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let payer_policy = match lookup(PAYER_POLICY_VAR) {
            Some(value) => parse_payer_policy(&value)?,
            None => PayerPolicy::default(),
        };
        let tolerance = match lookup(TOLERANCE_VAR) {
            Some(value) => value
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|units| *units >= 0)
                .map(Money::from_minor)
                .ok_or(ConfigError::InvalidTolerance(value))?,
            None => Money::ZERO,
        };

        Ok(Self {
            payer_policy,
            tolerance,
        })
    }
}

fn parse_payer_policy(value: &str) -> Result<PayerPolicy, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "first_participant" => Ok(PayerPolicy::FirstParticipant),
        "require_explicit" => Ok(PayerPolicy::RequireExplicit),
        _ => Err(ConfigError::InvalidPayerPolicy(value.to_string())),
    }
}

/// Initialize logging. Logs go to stderr so stdout stays parseable.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
