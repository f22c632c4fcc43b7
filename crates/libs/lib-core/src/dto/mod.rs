//! # Data Transfer Objects (DTOs)
//!
//! Data structures passed from the server-side props step to the render step,
//! and served as JSON page data.

pub mod market;

pub use market::*;
