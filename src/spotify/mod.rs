//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by
//! Playlistify: authentication, library reads and playlist writes.
//!
//! ## Architecture
//!
//! ```text
//! CLI / Builder
//!      ↓
//! LibraryApi (trait seam)
//!      ├── SpotifyClient (reqwest, JSON)
//!      └── test fakes
//!      ↓
//! Spotify Web API
//! ```
//!
//! The builder only talks to [`LibraryApi`]. [`SpotifyClient`] is the
//! production implementation; the trait also carries the two provider
//! limits the builder depends on.
//!
//! ## API Coverage
//!
//! - `GET /me` - Profile of the authenticated user
//! - `GET /me/tracks` - Saved tracks, newest first, offset pagination
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - Insert tracks at a position
//! - `GET /playlists/{playlist_id}` - Cover image references
//! - `PUT /playlists/{playlist_id}/images` - Upload a custom JPEG cover
//!
//! ## Authentication
//!
//! [`auth`] implements OAuth 2.0 PKCE with a local callback server. Access
//! tokens are passed per call; the client never stores them.
//!
//! ## Error Types
//!
//! All calls return [`crate::error::PlaylistifyError`]: `Auth` for 401,
//! `Http { status }` for other failures, `Network` and `Parse` for transport
//! and decoding problems.

use async_trait::async_trait;

use crate::{
    error::PlaylistifyError,
    types::{
        AddTracksRequest, CreatePlaylistRequest, Image, PlaylistDescriptor, SavedTracksPage,
        SnapshotResponse, UserProfile,
    },
};

pub mod auth;
mod client;

pub use client::SpotifyClient;

/// Maximum page size of `GET /me/tracks`.
pub const SAVED_TRACKS_PAGE_LIMIT: usize = 50;

/// Maximum number of URIs accepted by one `POST /playlists/{id}/tracks`.
pub const MAX_ITEMS_ADD_TO_PLAYLIST: usize = 100;

/// Remote library operations consumed by the playlist builder.
#[async_trait]
pub trait LibraryApi: Send + Sync {
    /// Page size used when fetching saved tracks.
    fn saved_tracks_page_limit(&self) -> usize {
        SAVED_TRACKS_PAGE_LIMIT
    }

    /// Largest batch accepted by [`LibraryApi::add_tracks`].
    fn max_items_per_add(&self) -> usize {
        MAX_ITEMS_ADD_TO_PLAYLIST
    }

    async fn user_profile(&self, token: &str) -> Result<UserProfile, PlaylistifyError>;

    /// Saved tracks starting at `offset`, newest first.
    async fn saved_tracks(
        &self,
        token: &str,
        offset: usize,
        limit: usize,
    ) -> Result<SavedTracksPage, PlaylistifyError>;

    async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        body: &CreatePlaylistRequest,
    ) -> Result<PlaylistDescriptor, PlaylistifyError>;

    /// Inserts `body.uris` at `body.position`.
    async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        body: &AddTracksRequest,
    ) -> Result<SnapshotResponse, PlaylistifyError>;

    async fn playlist_cover_art(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Vec<Image>, PlaylistifyError>;

    /// Uploads a base64 encoded JPEG as the playlist cover.
    async fn set_cover_image(
        &self,
        token: &str,
        playlist_id: &str,
        jpeg_base64: &str,
    ) -> Result<(), PlaylistifyError>;
}
