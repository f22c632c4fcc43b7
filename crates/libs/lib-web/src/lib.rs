//! # Web Library
//!
//! HTTP handlers, page views, middleware, and server setup for the market page.

pub mod handlers;
pub mod middleware;
pub mod server;
pub mod views;

pub use server::{create_router, init_tracing, start_server, AppState, ServerConfig};
