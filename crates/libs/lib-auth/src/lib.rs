//! # Authentication Library
//!
//! Wallet sessions: the [`Session`] model, the [`SessionProvider`] seam, and
//! signed session tokens.

pub mod session;
pub mod token;

// Re-export commonly used types
pub use session::{JwtSessionProvider, Session, SessionError, SessionProvider, SessionUser};
pub use session::jwt::SESSION_COOKIE;
pub use token::{decode_session_token, encode_session_token, SessionClaims};
