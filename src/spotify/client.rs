use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    Client, RequestBuilder, Response, StatusCode,
    header::{CONTENT_TYPE, RETRY_AFTER},
};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    config,
    error::PlaylistifyError,
    spotify::LibraryApi,
    types::{
        AddTracksRequest, CreatePlaylistRequest, Image, PlaylistDescriptor,
        PlaylistImagesResponse, SavedTracksPage, SnapshotResponse, UserProfile,
    },
    warning,
};

const MAX_ATTEMPTS: u32 = 3;
const MAX_RETRY_AFTER_SECS: u64 = 120;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(10);

/// reqwest backed [`LibraryApi`].
///
/// Rate limits (`429` with `Retry-After`) and `502 Bad Gateway` are retried
/// here, at the transport level, up to three attempts. Every other
/// non-success status is returned to the caller untouched.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
}

impl Default for SpotifyClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SpotifyClient {
    /// Client for the configured Web API base URL.
    pub fn new() -> Self {
        Self::with_base_url(config::spotify_apiurl())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send<F>(&self, build: F) -> Result<Response, PlaylistifyError>
    where
        F: Fn(&Client) -> RequestBuilder + Send + Sync,
    {
        let mut attempt = 0;

        loop {
            attempt += 1;
            let response = build(&self.http).send().await?;
            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            if attempt < MAX_ATTEMPTS {
                if status == StatusCode::TOO_MANY_REQUESTS {
                    let retry_after = retry_after_secs(&response);
                    if retry_after <= MAX_RETRY_AFTER_SECS {
                        sleep(Duration::from_secs(retry_after)).await;
                        continue;
                    }
                    warning!(
                        "Retry after has reached an abnormal high of {} seconds. Try again later.",
                        retry_after
                    );
                } else if status == StatusCode::BAD_GATEWAY {
                    sleep(BAD_GATEWAY_DELAY).await;
                    continue;
                }
            }

            return Err(PlaylistifyError::from_status(status));
        }
    }

    async fn json<T: DeserializeOwned>(response: Response) -> Result<T, PlaylistifyError> {
        response
            .json::<T>()
            .await
            .map_err(|e| PlaylistifyError::Parse(e.to_string()))
    }
}

fn retry_after_secs(response: &Response) -> u64 {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(0)
}

#[async_trait]
impl LibraryApi for SpotifyClient {
    async fn user_profile(&self, token: &str) -> Result<UserProfile, PlaylistifyError> {
        let api_url = format!("{uri}/me", uri = self.base_url);
        let response = self
            .send(|http| http.get(&api_url).bearer_auth(token))
            .await?;
        Self::json(response).await
    }

    async fn saved_tracks(
        &self,
        token: &str,
        offset: usize,
        limit: usize,
    ) -> Result<SavedTracksPage, PlaylistifyError> {
        let api_url = format!(
            "{uri}/me/tracks?offset={offset}&limit={limit}",
            uri = self.base_url,
            offset = offset,
            limit = limit
        );
        let response = self
            .send(|http| http.get(&api_url).bearer_auth(token))
            .await?;
        Self::json(response).await
    }

    async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        body: &CreatePlaylistRequest,
    ) -> Result<PlaylistDescriptor, PlaylistifyError> {
        let api_url = format!(
            "{uri}/users/{user_id}/playlists",
            uri = self.base_url,
            user_id = urlencoding::encode(user_id)
        );
        let response = self
            .send(|http| http.post(&api_url).bearer_auth(token).json(body))
            .await?;
        Self::json(response).await
    }

    async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        body: &AddTracksRequest,
    ) -> Result<SnapshotResponse, PlaylistifyError> {
        let api_url = format!(
            "{uri}/playlists/{playlist_id}/tracks",
            uri = self.base_url,
            playlist_id = urlencoding::encode(playlist_id)
        );
        let response = self
            .send(|http| http.post(&api_url).bearer_auth(token).json(body))
            .await?;
        Self::json(response).await
    }

    async fn playlist_cover_art(
        &self,
        token: &str,
        playlist_id: &str,
    ) -> Result<Vec<Image>, PlaylistifyError> {
        let api_url = format!(
            "{uri}/playlists/{playlist_id}?fields=images(url)",
            uri = self.base_url,
            playlist_id = urlencoding::encode(playlist_id)
        );
        let response = self
            .send(|http| http.get(&api_url).bearer_auth(token))
            .await?;
        let json = Self::json::<PlaylistImagesResponse>(response).await?;
        Ok(json.images)
    }

    async fn set_cover_image(
        &self,
        token: &str,
        playlist_id: &str,
        jpeg_base64: &str,
    ) -> Result<(), PlaylistifyError> {
        let api_url = format!(
            "{uri}/playlists/{playlist_id}/images",
            uri = self.base_url,
            playlist_id = urlencoding::encode(playlist_id)
        );
        // 202 Accepted with an empty body
        self.send(|http| {
            http.put(&api_url)
                .bearer_auth(token)
                .header(CONTENT_TYPE, "image/jpeg")
                .body(jpeg_base64.to_string())
        })
        .await?;
        Ok(())
    }
}
