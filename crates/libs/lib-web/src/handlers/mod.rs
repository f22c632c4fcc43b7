//! # HTTP Request Handlers
//!
//! Axum handlers organized by page.
//!
//! - **[`market`]**: the wallet-gated market page
//!   - `GET /market` - Server-rendered page (layout + market view)
//!   - `GET /api/pages/market` - The page's props as JSON
//!
//! ## Handler Architecture
//!
//! A page is split into a server-side props step and a render step. The props
//! step talks to collaborators (session provider, market-data SDK) taken from
//! [`AppState`](crate::server::AppState); the render step only forwards props
//! into templates.
//!
//! ```rust,ignore
//! async fn page(
//!     State(state): State<AppState>,
//!     headers: HeaderMap,
//! ) -> Result<Html<String>, AppError> {
//!     let props = get_server_side_props(&state, &headers).await?;
//!     Ok(Html(render(&View::new(&props))?))
//! }
//! ```
//!
//! ## Error Handling
//!
//! Handlers return `Result<T, AppError>`; `AppError` renders as
//! `{ "error": ..., "code": ... }` with the matching status.

pub mod market;
