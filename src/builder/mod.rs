//! Playlist builder.
//!
//! Drives one cancelable, progress-reporting run that reads the saved songs
//! of a user and writes them into a new playlist. Every remote call is
//! awaited one at a time: the offset of page N+1 depends on page N, and the
//! time filter stops at the first song outside the window.
//!
//! Two operating modes exist:
//!
//! - count-bounded (no period): create the playlist first, then copy up to
//!   `total_songs` of the most recently saved songs.
//! - time-filtered (with a [`Period`]): collect every song saved inside the
//!   window first, and only create the playlist when at least one qualifies.
//!
//! State is published through a `watch` cell; see [`crate::process`].

use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use tokio::{sync::watch, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::{
    error::{PlaylistifyError, RunFailure},
    process::{PlaylistifyProcess, Process},
    spotify::LibraryApi,
    types::{AddTracksRequest, CreatePlaylistRequest, Period, PlaylistDescriptor},
    warning,
};

mod period;
mod saved;

pub const STATUS_CREATING: &str = "Creating playlist";
pub const STATUS_FETCHING: &str = "Fetching saved songs batch";
pub const STATUS_ADDING: &str = "Adding saved songs to playlist";
pub const STATUS_COVER: &str = "Setting cover image";

/// Parameters of one run. Immutable while the run is in flight.
#[derive(Debug, Clone, PartialEq)]
pub struct RunParams {
    pub access_token: String,
    pub user_id: String,
    /// Upper bound on how many saved songs are considered.
    pub total_songs: usize,
    pub playlist_name: String,
    pub period: Option<Period>,
    /// Base64 encoded JPEG uploaded once all songs are in.
    pub cover_image: Option<String>,
    pub public: Option<bool>,
    pub description: Option<String>,
}

impl RunParams {
    pub fn new(
        access_token: impl Into<String>,
        user_id: impl Into<String>,
        total_songs: usize,
        playlist_name: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            user_id: user_id.into(),
            total_songs,
            playlist_name: playlist_name.into(),
            period: None,
            cover_image: None,
            public: None,
            description: None,
        }
    }

    pub fn with_period(mut self, period: Period) -> Self {
        self.period = Some(period);
        self
    }

    pub fn with_cover_image(mut self, jpeg_base64: impl Into<String>) -> Self {
        self.cover_image = Some(jpeg_base64.into());
        self
    }

    pub fn with_public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn validate(&self) -> Result<(), PlaylistifyError> {
        if self.access_token.is_empty() {
            return Err(PlaylistifyError::Validation(
                "Access token cannot be empty".to_string(),
            ));
        }
        if self.user_id.is_empty() {
            return Err(PlaylistifyError::Validation(
                "User id cannot be empty".to_string(),
            ));
        }
        if self.playlist_name.trim().is_empty() {
            return Err(PlaylistifyError::Validation(
                "Playlist Name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    fn create_request(&self) -> CreatePlaylistRequest {
        CreatePlaylistRequest {
            name: self.playlist_name.clone(),
            description: self.description.clone(),
            public: self.public,
        }
    }
}

struct RunSlot {
    generation: u64,
    cancel: CancellationToken,
}

/// Identity of one run. Writes from a run that is no longer current, or
/// that was canceled, are dropped.
#[derive(Clone)]
struct Run {
    generation: u64,
    cancel: CancellationToken,
}

/// Builds playlists from saved songs, one run at a time.
///
/// # Example
///
/// ```ignore
/// let builder = Arc::new(Playlistify::new(SpotifyClient::new()));
/// let mut state = builder.subscribe();
/// let handle = builder.start(RunParams::new(token, user_id, 150, "Saved Songs"));
///
/// while state.changed().await.is_ok() {
///     println!("{:?}", *state.borrow_and_update());
/// }
/// ```
pub struct Playlistify<A> {
    api: A,
    state: watch::Sender<PlaylistifyProcess>,
    slot: Mutex<RunSlot>,
}

impl<A: LibraryApi> Playlistify<A> {
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(Process::Unresolved);
        Self {
            api,
            state,
            slot: Mutex::new(RunSlot {
                generation: 0,
                cancel: CancellationToken::new(),
            }),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Receiver that observes every state transition.
    pub fn subscribe(&self) -> watch::Receiver<PlaylistifyProcess> {
        self.state.subscribe()
    }

    /// Current state. May change right after it is read.
    pub fn snapshot(&self) -> PlaylistifyProcess {
        self.state.borrow().clone()
    }

    /// Cancels the current run.
    ///
    /// Calls in flight settle as aborted and no further calls are issued.
    /// The state is left as it is; it never turns into `Errored` because of
    /// an abort.
    pub fn abort(&self) {
        self.lock_slot().cancel.cancel();
    }

    /// Forces the state back to `Unresolved`. Does not cancel anything.
    pub fn reset(&self) {
        self.state.send_replace(Process::Unresolved);
    }

    /// Runs a full build and returns once it reached a terminal state or was
    /// aborted.
    pub async fn playlistify(&self, params: RunParams) {
        let run = self.begin();
        self.drive(&run, params).await;
    }

    /// Starts a new run: cancels the previous one, issues a fresh token and
    /// publishes `Pending { "Creating playlist", 0 }`.
    fn begin(&self) -> Run {
        let mut slot = self.lock_slot();
        slot.cancel.cancel();
        slot.generation += 1;
        slot.cancel = CancellationToken::new();

        self.state
            .send_replace(Process::pending(STATUS_CREATING, 0.0));

        Run {
            generation: slot.generation,
            cancel: slot.cancel.clone(),
        }
    }

    async fn drive(&self, run: &Run, params: RunParams) {
        if let Err(error) = params.validate() {
            self.publish(run, |_| Process::Errored {
                error: RunFailure::new(error),
            });
            return;
        }

        let result = match params.period {
            Some(period) => self.fill_from_period(run, &params, period).await,
            None => self.fill_from_saved(run, &params).await,
        };

        match result {
            Ok(playlist) => {
                self.apply_cover(run, &params, &playlist).await;
                self.publish(run, |_| Process::Ready { value: playlist });
            }
            Err(failure) if failure.error.is_aborted() => {}
            Err(failure) => self.publish(run, |_| Process::Errored { error: failure }),
        }
    }

    async fn apply_cover(&self, run: &Run, params: &RunParams, playlist: &PlaylistDescriptor) {
        let Some(image) = params.cover_image.as_deref() else {
            return;
        };

        self.progress(run, Some(STATUS_COVER), None);
        let request = self
            .api
            .set_cover_image(&params.access_token, &playlist.id, image);

        match self.call(run, request).await {
            Ok(()) | Err(PlaylistifyError::Aborted) => {}
            // the generated mosaic stays in place
            Err(e) => warning!("Failed to set cover image for {}: {}", playlist.name, e),
        }
    }

    /// Submits `uris` in provider-sized chunks starting at `position`.
    ///
    /// Each chunk lands exactly after the previous one; `on_chunk` receives
    /// the number of songs confirmed so far. Returns the next position.
    async fn submit(
        &self,
        run: &Run,
        params: &RunParams,
        playlist: &PlaylistDescriptor,
        uris: &[String],
        mut position: usize,
        mut on_chunk: impl FnMut(usize) + Send,
    ) -> Result<usize, RunFailure> {
        let max_add = self.api.max_items_per_add().max(1);

        for chunk in uris.chunks(max_add) {
            let body = AddTracksRequest {
                uris: chunk.to_vec(),
                position,
            };
            let request = self
                .api
                .add_tracks(&params.access_token, &playlist.id, &body);
            self.call(run, request)
                .await
                .map_err(|e| RunFailure::with_playlist(e, playlist))?;

            position += chunk.len();
            on_chunk(position);
        }

        Ok(position)
    }

    /// Awaits a remote call unless the run gets canceled first.
    async fn call<T>(
        &self,
        run: &Run,
        request: impl Future<Output = Result<T, PlaylistifyError>>,
    ) -> Result<T, PlaylistifyError> {
        if run.cancel.is_cancelled() {
            return Err(PlaylistifyError::Aborted);
        }

        tokio::select! {
            biased;
            _ = run.cancel.cancelled() => Err(PlaylistifyError::Aborted),
            result = request => result,
        }
    }

    fn progress(&self, run: &Run, status: Option<&str>, progress: Option<f64>) {
        self.publish(run, |current| current.advance(status, progress));
    }

    fn publish(&self, run: &Run, next: impl FnOnce(&PlaylistifyProcess) -> PlaylistifyProcess) {
        let slot = self.lock_slot();
        if slot.generation != run.generation || run.cancel.is_cancelled() {
            return;
        }
        self.state.send_modify(|state| *state = next(state));
    }

    fn lock_slot(&self) -> MutexGuard<'_, RunSlot> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: LibraryApi + 'static> Playlistify<A> {
    /// Non-blocking entry point.
    ///
    /// The new run is current, and `Pending` is published, before this
    /// returns; the remaining work happens on the spawned task.
    pub fn start(self: &Arc<Self>, params: RunParams) -> JoinHandle<()> {
        let run = self.begin();
        let builder = Arc::clone(self);
        tokio::spawn(async move { builder.drive(&run, params).await })
    }
}
