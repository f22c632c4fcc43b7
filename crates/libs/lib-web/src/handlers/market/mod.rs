//! # Market Page Handlers
//!
//! The market page is only usable with a connected wallet. Every request:
//!
//! ```text
//! 1. resolve the session           (failure → 500)
//! 2. ensure the Moralis SDK runs   (failure → 500)
//! 3. no wallet → { "error": "Connect your wallet first" }
//!    wallet    → {}
//! ```
//!
//! A missing wallet is not an error response: the page still renders (200)
//! and the `Market` view shows the message.
//!
//! ## Endpoints
//!
//! - `GET /market` - HTML page; accepts `?width=&height=` viewport hints
//! - `GET /api/pages/market` - Props as JSON
//!
//! ## Request Examples
//!
//! ```bash
//! curl --cookie "session-token=$TOKEN" "http://localhost:3001/market?width=1440&height=900"
//! curl -H "Authorization: Bearer $TOKEN" http://localhost:3001/api/pages/market
//! ```


use crate::server::AppState;
use crate::views::{render, MarketView, ViewportQuery};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
    Json,
};
use lib_auth::Session;
use lib_core::dto::MarketPageProps;
use lib_core::AppError;
use std::collections::HashMap;
use tracing::{error, field, info, instrument, Span};

/// Server-side props step of the market page.
///
/// The SDK start is awaited on every call, whatever the session outcome, and
/// before that outcome decides the props.
pub async fn get_server_side_props(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<MarketPageProps, AppError> {
    let session = state.sessions.get_session(headers).await.map_err(|e| {
        error!("[MARKET PAGE] Session lookup failed: {}", e);
        AppError::Session(e.to_string())
    })?;

    state.sdk.ensure_started().await?;

    let props = match session.wallet_address() {
        Some(address) => {
            info!(wallet = %address, "[MARKET PAGE] Wallet session");
            MarketPageProps::ready()
        }
        None => {
            match &session {
                Session::Present { user } => {
                    info!(user_id = %user.id, "[MARKET PAGE] Session without wallet")
                }
                Session::Absent => info!("[MARKET PAGE] No session"),
            }
            MarketPageProps::connect_wallet()
        }
    };

    Ok(props)
}

/// Render the market page.
///
/// **Route**: `GET /market`
///
/// The `Default` layout always receives `width`, `height` and
/// `pageName = "Market"`; the props go to the `Market` view as they are.
/// Viewport hints that do not parse are dropped rather than rejected.
#[instrument(skip_all, fields(width = field::Empty, height = field::Empty))]
pub async fn market_page(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Html<String>, AppError> {
    let viewport = ViewportQuery::from_params(&params);
    let span = Span::current();
    span.record("width", viewport.width);
    span.record("height", viewport.height);

    let props = get_server_side_props(&state, &headers).await?;
    let html = render(&MarketView::new(viewport, &props)?)?;
    Ok(Html(html))
}

/// Props of the market page as JSON, for client-side navigation.
///
/// **Route**: `GET /api/pages/market`
///
/// Response is `{}` for a wallet session, otherwise
/// `{ "error": "Connect your wallet first" }`.
#[instrument(skip(state, headers))]
pub async fn market_page_props(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MarketPageProps>, AppError> {
    let props = get_server_side_props(&state, &headers).await?;
    Ok(Json(props))
}
