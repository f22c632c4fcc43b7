//! # Moralis Market-Data Library
//!
//! Client for the Moralis Web3 Data API and the process-wide, start-once SDK
//! handle the web layer depends on.
//!
//! ## Lifecycle
//!
//! ```text
//! MoralisSdk::new(config)      (nothing contacted yet)
//!        ↓
//! ensure_started()             first call builds the client (and verifies the key
//!        ↓                     when configured); concurrent callers wait on it
//! ensure_started()             later calls return immediately
//! ```

pub mod client;
pub mod error;
pub mod sdk;

pub use client::{ApiVersion, MoralisClient, MoralisConfig};
pub use error::SdkError;
pub use sdk::{MarketDataSdk, MoralisSdk};
