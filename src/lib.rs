//! Playlistify Library
//!
//! This library turns the saved songs of a Spotify user into a brand new
//! playlist. It contains the Web API client, the OAuth 2.0 PKCE flow, the
//! observable process state and the playlist builder that drives a
//! cancelable, progress-reporting batch run.
//!
//! # Modules
//!
//! - `api` - HTTP API endpoints for the local callback server
//! - `builder` - The playlist builder and its two operating modes
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `error` - Error taxonomy shared by the client and the builder
//! - `management` - Token caching
//! - `process` - Observable lifecycle of one playlist build
//! - `server` - Local HTTP server for OAuth callbacks
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use playlistify::{builder::{Playlistify, RunParams}, spotify::SpotifyClient};
//!
//! #[tokio::main]
//! async fn main() {
//!     let builder = Arc::new(Playlistify::new(SpotifyClient::new()));
//!     let params = RunParams::new("token", "user", 150, "Saved Songs");
//!     builder.start(params).await.ok();
//!     println!("{:?}", builder.snapshot());
//! }
//! ```

pub mod api;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod management;
pub mod process;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern for the command-line surface
/// using a boxed dynamic error trait object. The library core uses
/// [`error::PlaylistifyError`] instead.
///
/// # Example
///
/// ```
/// use playlistify::Res;
///
/// async fn fetch_data() -> Res<String> {
///     Ok("data".to_string())
/// }
/// ```
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Starting authentication process...");
/// info!("Found {} saved songs", count);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used to provide positive feedback when operations complete successfully.
///
/// # Example
///
/// ```
/// success!("Authentication completed successfully");
/// success!("Added {} songs", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Creates a formatted error output with a red "!" indicator and immediately
/// terminates the program with exit code 1. Only used by the command-line
/// surface for unrecoverable errors; the builder never calls it.
///
/// # Example
///
/// ```
/// error!("Failed to load configuration");
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for recoverable issues such as a cover image that could not be set.
///
/// # Example
///
/// ```
/// warning!("Cover image rejected, keeping the generated one");
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
