//! Error taxonomy for remote calls and playlist builds.

use reqwest::StatusCode;
use thiserror::Error;

use crate::types::PlaylistDescriptor;

/// Errors raised by the library client and the playlist builder.
///
/// The type is `Clone` so that it can live inside the observable
/// [`crate::process::Process`] cell.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaylistifyError {
    /// Access token is invalid or expired; the user has to authenticate again.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The Web API answered with a non-success status.
    #[error("HTTP Status Error: {status}")]
    Http { status: u16 },

    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Input or data that cannot produce a playlist.
    #[error("{0}")]
    Validation(String),

    /// The run was canceled by the caller. Never surfaced as a failure.
    #[error("Aborted")]
    Aborted,
}

impl PlaylistifyError {
    /// Maps a non-success status to the matching variant.
    pub fn from_status(status: StatusCode) -> Self {
        if status == StatusCode::UNAUTHORIZED {
            PlaylistifyError::Auth("access token rejected, run playlistify auth".to_string())
        } else {
            PlaylistifyError::Http {
                status: status.as_u16(),
            }
        }
    }

    pub fn is_aborted(&self) -> bool {
        matches!(self, PlaylistifyError::Aborted)
    }
}

impl From<reqwest::Error> for PlaylistifyError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            PlaylistifyError::from_status(status)
        } else if err.is_decode() {
            PlaylistifyError::Parse(err.to_string())
        } else {
            PlaylistifyError::Network(err.to_string())
        }
    }
}

/// Terminal failure of a playlist build.
///
/// Playlist creation and track submission are separate remote calls, so a
/// failure after creation leaves a real playlist behind. `playlist` holds it
/// in that case; nothing is rolled back.
#[derive(Debug, Clone, PartialEq)]
pub struct RunFailure {
    pub error: PlaylistifyError,
    pub playlist: Option<PlaylistDescriptor>,
}

impl RunFailure {
    pub fn new(error: PlaylistifyError) -> Self {
        Self {
            error,
            playlist: None,
        }
    }

    pub fn with_playlist(error: PlaylistifyError, playlist: &PlaylistDescriptor) -> Self {
        Self {
            error,
            playlist: Some(playlist.clone()),
        }
    }

    /// Whether a partially populated playlist was left on the service.
    pub fn left_playlist(&self) -> bool {
        self.playlist.is_some()
    }
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.playlist {
            Some(playlist) => write!(
                f,
                "{} (playlist \"{}\" was created and may be incomplete)",
                self.error, playlist.name
            ),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for RunFailure {}
