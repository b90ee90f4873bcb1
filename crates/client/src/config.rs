//! Client configuration, read from the environment.

use std::time::Duration;

use thiserror::Error;

use crate::permissions::{
    PageLimits, DEFAULT_PERMISSION_CONCURRENCY, DEFAULT_PERMISSION_MAX_PAGES,
    DEFAULT_PERMISSION_PAGE_SIZE,
};

pub const ENV_BASE_URL: &str = "USERDESK_BASE_URL";
pub const ENV_INSTANCE: &str = "USERDESK_INSTANCE";
pub const ENV_PERMISSION_PAGE_SIZE: &str = "USERDESK_PERMISSION_PAGE_SIZE";
pub const ENV_PERMISSION_MAX_PAGES: &str = "USERDESK_PERMISSION_MAX_PAGES";
pub const ENV_PERMISSION_CONCURRENCY: &str = "USERDESK_PERMISSION_CONCURRENCY";
pub const ENV_TIMEOUT_SECS: &str = "USERDESK_TIMEOUT_SECS";
pub const ENV_CACHE_TTL_SECS: &str = "USERDESK_CACHE_TTL_SECS";

const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Takes precedence over whatever instance the session stores.
    pub base_url_override: Option<String>,
    /// Instance the session starts with (name or full URL).
    pub instance: Option<String>,
    pub permission_page_size: u32,
    /// Cap on follow-up permission pages, whatever `count` the server reports.
    pub permission_max_pages: u32,
    /// Follow-up permission requests allowed in flight at once.
    pub permission_concurrency: usize,
    /// Per-request timeout; `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
    pub cache_ttl: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url_override: None,
            instance: None,
            permission_page_size: DEFAULT_PERMISSION_PAGE_SIZE,
            permission_max_pages: DEFAULT_PERMISSION_MAX_PAGES,
            permission_concurrency: DEFAULT_PERMISSION_CONCURRENCY,
            timeout: None,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl ClientConfig {
    /// Paging bounds for permission aggregation.
    pub fn page_limits(&self) -> PageLimits {
        PageLimits {
            page_size: self.permission_page_size,
            max_pages: self.permission_max_pages,
            concurrency: self.permission_concurrency,
        }
    }

    /// Configuration pointed at an explicit base URL, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url_override: Some(base_url.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        let permission_page_size = get(ENV_PERMISSION_PAGE_SIZE)
            .map(|raw| parse_positive::<u32>(ENV_PERMISSION_PAGE_SIZE, &raw))
            .transpose()?
            .unwrap_or(defaults.permission_page_size);

        let permission_max_pages = get(ENV_PERMISSION_MAX_PAGES)
            .map(|raw| parse_positive::<u32>(ENV_PERMISSION_MAX_PAGES, &raw))
            .transpose()?
            .unwrap_or(defaults.permission_max_pages);

        let permission_concurrency = get(ENV_PERMISSION_CONCURRENCY)
            .map(|raw| parse_positive::<usize>(ENV_PERMISSION_CONCURRENCY, &raw))
            .transpose()?
            .unwrap_or(defaults.permission_concurrency);

        let timeout = get(ENV_TIMEOUT_SECS)
            .map(|raw| parse_number::<u64>(ENV_TIMEOUT_SECS, &raw))
            .transpose()?
            .map(Duration::from_secs);

        let cache_ttl = get(ENV_CACHE_TTL_SECS)
            .map(|raw| parse_number::<u64>(ENV_CACHE_TTL_SECS, &raw))
            .transpose()?
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        Ok(Self {
            base_url_override: get(ENV_BASE_URL),
            instance: get(ENV_INSTANCE),
            permission_page_size,
            permission_max_pages,
            permission_concurrency,
            timeout,
            cache_ttl,
        })
    }
}

fn parse_number<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::Invalid {
        var,
        message: format!("{raw:?}: {e}"),
    })
}

fn parse_positive<T>(var: &'static str, raw: &str) -> Result<T, ConfigError>
where
    T: core::str::FromStr + Default + PartialEq,
    T::Err: core::fmt::Display,
{
    let value = parse_number::<T>(var, raw)?;
    if value == T::default() {
        return Err(ConfigError::Invalid {
            var,
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(value)
}
