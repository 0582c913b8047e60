//! # CLI Module
//!
//! Command-line layer of Playlistify. Each command loads what it needs
//! (cached token, profile, options), delegates to the library and renders
//! the outcome with the logging macros, progress bars and tables.
//!
//! ## Commands
//!
//! - [`auth`] - Runs the OAuth 2.0 PKCE flow and caches the token
//! - [`profile`] - Shows the authenticated user and the size of the library
//! - [`create`] - Builds a playlist from saved songs
//!
//! ## Architecture
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Builder (Process state, cancellation)
//!     ↓
//! LibraryApi (Spotify Web API)
//! ```
//!
//! The CLI is the only place that terminates the program on errors; the
//! builder reports failures through its process state instead.
//!
//! ## Usage
//!
//! ```bash
//! playlistify auth
//! playlistify profile
//! playlistify create --songs 150
//! playlistify create --period last-month --name "Last Month" --cover cover.jpg
//! ```

mod auth;
mod create;
mod profile;

pub use auth::auth;
pub use create::create;
pub use profile::profile;

use crate::management::TokenManager;

/// Access token from the cache, refreshed when needed.
async fn access_token() -> Result<String, String> {
    let mut token_mgr = TokenManager::load()
        .await
        .map_err(|e| format!("No cached token, run `playlistify auth` first ({})", e))?;
    token_mgr.get_valid_token().await
}
