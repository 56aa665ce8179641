//! Server configuration from environment variables.
//!
//! - `WISHLIST_HOST`: listen address (default: "0.0.0.0")
//! - `WISHLIST_PORT`: listen port (default: "3000")
//! - `WISHLIST_MUTATION_DELAY_MS`: simulated latency of add/edit/remove (default: "1000")
//! - `WISHLIST_FETCH_DELAY_MS`: simulated latency of the initial fetch (default: "2000")

use std::time::Duration;

use wishlist_store::{NetworkDelay, FETCH_LATENCY, MUTATION_LATENCY};

pub const HOST_VAR: &str = "WISHLIST_HOST";
pub const PORT_VAR: &str = "WISHLIST_PORT";
pub const MUTATION_DELAY_VAR: &str = "WISHLIST_MUTATION_DELAY_MS";
pub const FETCH_DELAY_VAR: &str = "WISHLIST_FETCH_DELAY_MS";

/// A configuration value could not be parsed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub mutation_delay: NetworkDelay,
    pub fetch_delay: NetworkDelay,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            mutation_delay: NetworkDelay::new(MUTATION_LATENCY),
            fetch_delay: NetworkDelay::new(FETCH_LATENCY),
        }
    }
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `lookup`; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ServerConfig::default();
        if let Some(host) = lookup(HOST_VAR) {
            config.host = host;
        }
        if let Some(port) = lookup(PORT_VAR) {
            config.port = parse(PORT_VAR, &port)?;
        }
        if let Some(ms) = lookup(MUTATION_DELAY_VAR) {
            config.mutation_delay = NetworkDelay::from_millis(parse(MUTATION_DELAY_VAR, &ms)?);
        }
        if let Some(ms) = lookup(FETCH_DELAY_VAR) {
            config.fetch_delay = NetworkDelay::from_millis(parse(FETCH_DELAY_VAR, &ms)?);
        }
        Ok(config)
    }

    /// Default config with every simulated delay disabled.
    pub fn instant() -> Self {
        ServerConfig {
            mutation_delay: NetworkDelay::none(),
            fetch_delay: NetworkDelay::none(),
            ..Self::default()
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn mutation_latency(&self) -> Duration {
        self.mutation_delay.duration()
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|err: T::Err| ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: err.to_string(),
    })
}
