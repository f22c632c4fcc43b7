//! # Application Configuration
//!
//! This module manages application configuration loaded from environment variables.
//! All configuration is validated on startup to fail fast if misconfigured.
//!
//! The configuration is loaded once by the server entry point and handed to
//! handlers through the router state, so nothing reads the environment per request:
//!
//! ```rust,no_run
//! use lib_core::Config;
//!
//! # fn main() -> lib_core::Result<()> {
//! let config = Config::from_env()?;
//! config.validate()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `MORALIS_API_KEY` | yes | |
//! | `SESSION_SECRET` | yes | |
//! | `SESSION_EXPIRATION_HOURS` | no | `24` |
//! | `MORALIS_BASE_URL` | no | `https://deep-index.moralis.io/api/v2.2` |
//! | `MORALIS_TIMEOUT_SECS` | no | `10` |
//! | `MORALIS_VERIFY_ON_START` | no | `false` |

use crate::error::{AppError, Result};
use lib_utils::{get_env, get_env_or, get_env_parse_or, validate_min_length, validate_not_empty};

/// Default Moralis Web3 Data API endpoint.
pub const DEFAULT_MORALIS_BASE_URL: &str = "https://deep-index.moralis.io/api/v2.2";

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// API key passed to the market-data SDK on start
    pub moralis_api_key: String,

    /// Base URL of the Moralis Web3 Data API
    pub moralis_base_url: String,

    /// Per-request timeout for calls to the Moralis API
    pub moralis_timeout_secs: u64,

    /// Call the Moralis version endpoint when the client starts
    pub moralis_verify_on_start: bool,

    /// Secret key for session token signing and verification
    ///
    /// **Must be at least 32 characters long** for security.
    pub session_secret: String,

    /// Session token validity period in hours
    ///
    /// Valid range: 1-720 hours (1 hour to 30 days)
    pub session_expiration_hours: i64,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let moralis_api_key = get_env("MORALIS_API_KEY")?;
        let session_secret = get_env("SESSION_SECRET")?;

        let moralis_base_url = get_env_or("MORALIS_BASE_URL", DEFAULT_MORALIS_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            moralis_api_key,
            moralis_base_url,
            moralis_timeout_secs: get_env_parse_or("MORALIS_TIMEOUT_SECS", 10)?,
            moralis_verify_on_start: get_env_parse_or("MORALIS_VERIFY_ON_START", false)?,
            session_secret,
            session_expiration_hours: get_env_parse_or("SESSION_EXPIRATION_HOURS", 24)?,
        })
    }

    /// Validate configuration values against security and business rules.
    pub fn validate(&self) -> Result<()> {
        validate_not_empty(&self.moralis_api_key, "MORALIS_API_KEY").map_err(AppError::Config)?;
        validate_min_length(&self.session_secret, 32, "SESSION_SECRET").map_err(AppError::Config)?;

        if self.session_expiration_hours < 1 || self.session_expiration_hours > 720 {
            return Err(AppError::Config(
                "SESSION_EXPIRATION_HOURS must be between 1 and 720 (30 days)".to_string(),
            ));
        }

        if self.moralis_timeout_secs == 0 {
            return Err(AppError::Config(
                "MORALIS_TIMEOUT_SECS must be greater than zero".to_string(),
            ));
        }

        if !self.moralis_base_url.starts_with("http://") && !self.moralis_base_url.starts_with("https://") {
            return Err(AppError::Config(format!(
                "MORALIS_BASE_URL must be an http(s) URL, got {}",
                self.moralis_base_url
            )));
        }

        Ok(())
    }
}

/// Secrets are redacted so the config can be logged at startup.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("moralis_api_key", &"***REDACTED***")
            .field("moralis_base_url", &self.moralis_base_url)
            .field("moralis_timeout_secs", &self.moralis_timeout_secs)
            .field("moralis_verify_on_start", &self.moralis_verify_on_start)
            .field("session_secret", &"***REDACTED***")
            .field("session_expiration_hours", &self.session_expiration_hours)
            .finish()
    }
}
