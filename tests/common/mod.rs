#![allow(dead_code)]

use std::sync::{
    Mutex,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Notify;

use playlistify::{
    error::PlaylistifyError,
    spotify::LibraryApi,
    types::{
        AddTracksRequest, CreatePlaylistRequest, ExternalUrls, Image, PlaylistDescriptor,
        SavedTrack, SavedTracksPage, SnapshotResponse, TrackRef, UserProfile,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Profile,
    Fetch { offset: usize, limit: usize },
    Create { name: String },
    Add { position: usize, uris: Vec<String> },
    CoverArt,
    SetCover,
}

/// In-memory library with call recording and failure injection.
pub struct FakeLibrary {
    pub saved: Vec<SavedTrack>,
    pub page_limit: usize,
    pub max_add: usize,
    pub fail_create: Option<PlaylistifyError>,
    /// Fails the fetch starting at this offset.
    pub fail_fetch_at: Option<usize>,
    pub fail_add: Option<PlaylistifyError>,
    pub fail_cover: bool,
    /// The next fetch never completes; `fetch_blocked` is notified when it starts.
    pub block_next_fetch: AtomicBool,
    pub fetch_blocked: Notify,
    calls: Mutex<Vec<Call>>,
}

pub fn track_uri(index: usize) -> String {
    format!("spotify:track:{index:04}")
}

pub fn saved_track(index: usize, added_at: DateTime<Utc>) -> SavedTrack {
    SavedTrack {
        added_at,
        track: TrackRef {
            uri: track_uri(index),
            name: format!("Song {index}"),
        },
    }
}

/// `count` songs saved one minute apart, newest first.
pub fn recent_songs(count: usize) -> Vec<SavedTrack> {
    let now = Utc::now();
    (0..count)
        .map(|i| saved_track(i, now - Duration::minutes(i as i64 + 1)))
        .collect()
}

pub fn playlist_descriptor(name: &str) -> PlaylistDescriptor {
    PlaylistDescriptor {
        id: "pl_1".to_string(),
        name: name.to_string(),
        external_urls: ExternalUrls {
            spotify: "https://open.spotify.com/playlist/pl_1".to_string(),
        },
        images: Vec::new(),
    }
}

impl FakeLibrary {
    pub fn new(saved: Vec<SavedTrack>) -> Self {
        Self {
            saved,
            page_limit: 50,
            max_add: 100,
            fail_create: None,
            fail_fetch_at: None,
            fail_add: None,
            fail_cover: false,
            block_next_fetch: AtomicBool::new(false),
            fetch_blocked: Notify::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_songs(count: usize) -> Self {
        Self::new(recent_songs(count))
    }

    pub fn limits(mut self, page_limit: usize, max_add: usize) -> Self {
        self.page_limit = page_limit;
        self.max_add = max_add;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fetches(&self) -> Vec<(usize, usize)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Fetch { offset, limit } => Some((offset, limit)),
                _ => None,
            })
            .collect()
    }

    /// `(position, size)` of every add, in order.
    pub fn adds(&self) -> Vec<(usize, usize)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Add { position, uris } => Some((position, uris.len())),
                _ => None,
            })
            .collect()
    }

    pub fn added_uris(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Add { uris, .. } => Some(uris),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn creates(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| matches!(call, Call::Create { .. }))
            .count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl LibraryApi for FakeLibrary {
    fn saved_tracks_page_limit(&self) -> usize {
        self.page_limit
    }

    fn max_items_per_add(&self) -> usize {
        self.max_add
    }

    async fn user_profile(&self, _token: &str) -> Result<UserProfile, PlaylistifyError> {
        self.record(Call::Profile);
        Ok(UserProfile {
            id: "user_1".to_string(),
            display_name: Some("User".to_string()),
            images: Vec::new(),
        })
    }

    async fn saved_tracks(
        &self,
        _token: &str,
        offset: usize,
        limit: usize,
    ) -> Result<SavedTracksPage, PlaylistifyError> {
        self.record(Call::Fetch { offset, limit });
        tokio::task::yield_now().await;

        if self.block_next_fetch.swap(false, Ordering::SeqCst) {
            self.fetch_blocked.notify_one();
            std::future::pending::<()>().await;
        }

        if self.fail_fetch_at == Some(offset) {
            return Err(PlaylistifyError::Http { status: 500 });
        }

        let start = offset.min(self.saved.len());
        let end = (offset + limit).min(self.saved.len());
        Ok(SavedTracksPage {
            items: self.saved[start..end].to_vec(),
            total: self.saved.len(),
            offset,
            limit,
        })
    }

    async fn create_playlist(
        &self,
        _token: &str,
        _user_id: &str,
        body: &CreatePlaylistRequest,
    ) -> Result<PlaylistDescriptor, PlaylistifyError> {
        self.record(Call::Create {
            name: body.name.clone(),
        });
        tokio::task::yield_now().await;

        match &self.fail_create {
            Some(error) => Err(error.clone()),
            None => Ok(playlist_descriptor(&body.name)),
        }
    }

    async fn add_tracks(
        &self,
        _token: &str,
        _playlist_id: &str,
        body: &AddTracksRequest,
    ) -> Result<SnapshotResponse, PlaylistifyError> {
        self.record(Call::Add {
            position: body.position,
            uris: body.uris.clone(),
        });
        tokio::task::yield_now().await;

        match &self.fail_add {
            Some(error) => Err(error.clone()),
            None => Ok(SnapshotResponse {
                snapshot_id: format!("snap_{}", body.position),
            }),
        }
    }

    async fn playlist_cover_art(
        &self,
        _token: &str,
        _playlist_id: &str,
    ) -> Result<Vec<Image>, PlaylistifyError> {
        self.record(Call::CoverArt);
        Ok(vec![Image {
            url: "https://mosaic.scdn.co/640/cover".to_string(),
            height: Some(640),
            width: Some(640),
        }])
    }

    async fn set_cover_image(
        &self,
        _token: &str,
        _playlist_id: &str,
        _jpeg_base64: &str,
    ) -> Result<(), PlaylistifyError> {
        self.record(Call::SetCover);
        if self.fail_cover {
            Err(PlaylistifyError::Http { status: 413 })
        } else {
            Ok(())
        }
    }
}
