//! # Market Page Data Transfer Objects
//!
//! Props produced by the market page's server-side step.
//!
//! ## Wire Format
//!
//! The props object has exactly two shapes:
//!
//! ```json
//! {}
//! ```
//!
//! ```json
//! { "error": "Connect your wallet first" }
//! ```
//!
//! `error` is omitted (not `null`) when the visitor has a wallet session.

use serde::{Deserialize, Serialize};

/// Error shown to visitors without a wallet session.
pub const CONNECT_WALLET_ERROR: &str = "Connect your wallet first";

/// Props handed to the `Market` view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketPageProps {
    /// User-visible error; the view decides how to present it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MarketPageProps {
    /// Props for a visitor with a connected wallet.
    pub fn ready() -> Self {
        Self { error: None }
    }

    /// Props for a visitor without a wallet session.
    pub fn connect_wallet() -> Self {
        Self {
            error: Some(CONNECT_WALLET_ERROR.to_string()),
        }
    }
}
