use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";
pub const DEFAULT_REALTIME_URL: &str = "ws://localhost:5000/socket.io/";
pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 500;
pub const DEFAULT_FILL_BLANK_ADVANCE_MS: u64 = 2_000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid {field} url {url:?}: {reason}")]
    InvalidUrl {
        field: &'static str,
        url: String,
        reason: String,
    },

    #[error("unsupported {field} scheme: {scheme}")]
    UnsupportedScheme { field: &'static str, scheme: String },

    #[error("page size must be between 1 and {max}, got {value}")]
    PageSize { value: u32, max: u32 },

    #[error("{field} must be greater than zero")]
    ZeroDelay { field: &'static str },
}

/// Settings handed over by the shell in `Event::Start`.
///
/// Every field has a default so a shell can send a partial document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub api_base: String,
    pub realtime_url: String,
    pub page_size: u32,
    pub search_debounce_ms: u64,
    pub fill_blank_advance_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            realtime_url: DEFAULT_REALTIME_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            fill_blank_advance_ms: DEFAULT_FILL_BLANK_ADVANCE_MS,
        }
    }
}

impl ClientConfig {
    /// Normalizes the base url (no trailing slash) and rejects values the
    /// core cannot work with.
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        Self::check_url("api_base", &self.api_base, &["http", "https"])?;
        Self::check_url("realtime_url", &self.realtime_url, &["ws", "wss", "http", "https"])?;

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSize {
                value: self.page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        if self.search_debounce_ms == 0 {
            return Err(ConfigError::ZeroDelay {
                field: "search_debounce_ms",
            });
        }
        if self.fill_blank_advance_ms == 0 {
            return Err(ConfigError::ZeroDelay {
                field: "fill_blank_advance_ms",
            });
        }

        self.api_base = self.api_base.trim_end_matches('/').to_string();
        Ok(self)
    }

    #[must_use]
    pub const fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }

    #[must_use]
    pub const fn fill_blank_advance(&self) -> Duration {
        Duration::from_millis(self.fill_blank_advance_ms)
    }

    fn check_url(field: &'static str, raw: &str, schemes: &[&str]) -> Result<(), ConfigError> {
        let parsed = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
            field,
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        if !schemes.contains(&parsed.scheme()) {
            return Err(ConfigError::UnsupportedScheme {
                field,
                scheme: parsed.scheme().to_string(),
            });
        }

        if parsed.host_str().is_none() {
            return Err(ConfigError::InvalidUrl {
                field,
                url: raw.to_string(),
                reason: "missing host".to_string(),
            });
        }

        Ok(())
    }
}
