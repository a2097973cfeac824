//! Service configuration
//!
//! Read from the environment (after `.env` is loaded by the binary). Values
//! that are present but unparseable are errors; absent values fall back to
//! defaults.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;

use crate::ai::cache::DEFAULT_CACHE_CAPACITY;
use crate::error::{ConfigError, ConfigResult};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_ADVISOR_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_ADVISOR_MODEL: &str = "claude-sonnet-4-20250514";
pub const DEFAULT_ADVISOR_TIMEOUT_MS: u64 = 8000;

/// Remote move advisor settings; present only when a credential is configured
#[derive(Clone)]
pub struct AdvisorConfig {
    pub api_key: String,
    pub endpoint: String,
    pub model: String,
    pub deadline: Duration,
}

impl fmt::Debug for AdvisorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdvisorConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("deadline", &self.deadline)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind_addr: SocketAddr,
    pub advisor: Option<AdvisorConfig>,
    pub cache_capacity: usize,
    pub ledger_url: Option<String>,
}

impl ServiceConfig {
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_var(
            "CHESS_BIND_ADDR",
            get("CHESS_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
        )?;

        let cache_capacity = match get("MOVE_CACHE_CAPACITY") {
            Some(value) => match parse_var::<usize>("MOVE_CACHE_CAPACITY", value.clone())? {
                0 => {
                    return Err(ConfigError::InvalidValue {
                        var: "MOVE_CACHE_CAPACITY",
                        value,
                    })
                }
                capacity => capacity,
            },
            None => DEFAULT_CACHE_CAPACITY,
        };

        let api_key = get("AI_PROVIDER_API_KEY").or_else(|| get("ANTHROPIC_API_KEY"));
        let advisor = match api_key {
            Some(api_key) => {
                let timeout_ms = match get("AI_PROVIDER_TIMEOUT_MS") {
                    Some(value) => parse_var("AI_PROVIDER_TIMEOUT_MS", value)?,
                    None => DEFAULT_ADVISOR_TIMEOUT_MS,
                };
                Some(AdvisorConfig {
                    api_key,
                    endpoint: get("AI_PROVIDER_URL")
                        .unwrap_or_else(|| DEFAULT_ADVISOR_URL.to_string()),
                    model: get("AI_PROVIDER_MODEL")
                        .unwrap_or_else(|| DEFAULT_ADVISOR_MODEL.to_string()),
                    deadline: Duration::from_millis(timeout_ms),
                })
            }
            None => None,
        };

        Ok(Self {
            bind_addr,
            advisor,
            cache_capacity,
            ledger_url: get("LEDGER_RELAY_URL"),
        })
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { var, value })
}
