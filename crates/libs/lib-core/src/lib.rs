//! # Core Library
//!
//! Configuration, error handling, and page DTOs shared across the workspace.

pub mod config;
pub mod error;
pub mod dto;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
