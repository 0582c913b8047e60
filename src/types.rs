use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// Raw body of the token endpoint. `refresh_token` and `scope` are not
/// always sent back on refresh.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
    pub expires_in: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRef {
    pub uri: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTrack {
    pub added_at: DateTime<Utc>,
    pub track: TrackRef,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedTracksPage {
    pub items: Vec<SavedTrack>,
    pub total: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,
}

/// The playlist created by a build. Immutable once the service returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
    #[serde(default)]
    pub images: Vec<Image>,
}

impl PlaylistDescriptor {
    pub fn link(&self) -> &str {
        &self.external_urls.spotify
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddTracksRequest {
    pub uris: Vec<String>,
    pub position: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotResponse {
    pub snapshot_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistImagesResponse {
    #[serde(default)]
    pub images: Vec<Image>,
}

/// Time window bounding which saved songs end up in the playlist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Period {
    LastDay,
    LastMonth,
    LastYear,
    AllTime,
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Period::LastDay => "LastDay",
            Period::LastMonth => "LastMonth",
            Period::LastYear => "LastYear",
            Period::AllTime => "AllTime",
        };
        write!(f, "{}", name)
    }
}

#[derive(Tabled)]
pub struct PlaylistTableRow {
    pub name: String,
    pub link: String,
    pub cover: String,
}

#[derive(Tabled)]
pub struct ProfileTableRow {
    pub name: String,
    pub id: String,
    pub saved_songs: usize,
}
