//! # Wallet Sessions
//!
//! The session collaborator consulted by server-rendered pages.
//!
//! A request either has no session at all, or has one whose user may or may not
//! have connected a wallet. Both "no session" and "no wallet" are ordinary
//! outcomes, not errors; [`SessionError`] is reserved for the provider itself
//! failing.
//!
//! ```rust
//! use lib_auth::{Session, SessionUser};
//!
//! let session = Session::Present {
//!     user: SessionUser { id: "1".into(), address: None },
//! };
//! assert_eq!(session.wallet_address(), None);
//! ```

pub mod jwt;

use async_trait::async_trait;
use axum::http::HeaderMap;
use thiserror::Error;

pub use jwt::JwtSessionProvider;

/// The user attached to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub id: String,
    /// Wallet address, `None` until the user links a wallet
    pub address: Option<String>,
}

/// Session state of a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Absent,
    Present { user: SessionUser },
}

impl Session {
    /// Wallet address of the signed-in user.
    ///
    /// Returns `None` when there is no session, when the user has no address,
    /// and when the address is the empty string. Any other string is kept as is.
    pub fn wallet_address(&self) -> Option<&str> {
        match self {
            Session::Present {
                user: SessionUser { address: Some(address), .. },
            } if !address.is_empty() => Some(address.as_str()),
            _ => None,
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Session::Present { .. })
    }
}

/// Failure of the session provider itself.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A session-carrying header could not be read.
    #[error("Malformed session header: {0}")]
    MalformedHeader(String),

    /// The backing session store could not be reached.
    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Resolves the session associated with an incoming request.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    async fn get_session(&self, headers: &HeaderMap) -> Result<Session, SessionError>;
}
