//! # API Module
//!
//! HTTP endpoints of the short-lived local server that completes the
//! Spotify OAuth 2.0 PKCE flow.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives the authorization code from Spotify's redirect,
//!   exchanges it together with the stored code verifier for a token and
//!   hands the token back to the waiting auth flow.
//! - [`health`] - Reports status, name and version; handy to check that the
//!   redirect URI points at a running server.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use playlistify::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
