use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;
use tokio::time::sleep;

use crate::{
    Res,
    builder::{Playlistify, RunParams},
    error, info,
    process::PlaylistifyProcess,
    spotify::{LibraryApi, SpotifyClient},
    success,
    types::{Period, PlaylistDescriptor, PlaylistTableRow},
    utils, warning,
};

/// Cover art is generated asynchronously by the service after the last add.
const COVER_ART_ATTEMPTS: usize = 3;

/// Builds a playlist from saved songs.
///
/// Loads the cached token and the user profile, validates the options
/// against the size of the library and starts a build. Progress is rendered
/// until the build settles; Ctrl-C aborts it.
///
/// # Arguments
///
/// * `name` - Playlist name, defaults to `Saved Songs D-M-YYYY`
/// * `songs` - Number of saved songs to consider, defaults to the whole library
/// * `period` - Only take songs saved within this window
/// * `cover` - Path of a JPEG uploaded as the playlist cover
/// * `public` - Create a public playlist
/// * `description` - Playlist description
pub async fn create(
    name: Option<String>,
    songs: Option<usize>,
    period: Option<Period>,
    cover: Option<PathBuf>,
    public: bool,
    description: Option<String>,
) {
    let token = match super::access_token().await {
        Ok(t) => t,
        Err(e) => error!("Cannot get access token. Err: {}", e),
    };

    let client = SpotifyClient::new();
    let user = match client.user_profile(&token).await {
        Ok(user) => user,
        Err(e) => error!("Cannot load user profile. Err: {}", e),
    };

    let library_total = match client.saved_tracks(&token, 0, 1).await {
        Ok(page) => page.total,
        Err(e) => error!("Cannot count saved songs. Err: {}", e),
    };

    let playlist_name =
        name.unwrap_or_else(|| utils::default_playlist_name(Local::now().date_naive()));
    let total_songs = songs.unwrap_or(library_total);

    if let Err(issues) = utils::validate_options(&playlist_name, total_songs, library_total) {
        for issue in issues {
            warning!("{}", issue);
        }
        error!("Invalid options, nothing was created.");
    }

    let mut params = RunParams::new(token.clone(), user.id, total_songs, playlist_name)
        .with_public(public);
    if let Some(period) = period {
        params = params.with_period(period);
    }
    if let Some(description) = description {
        params = params.with_description(description);
    }
    if let Some(path) = cover {
        match load_cover(&path).await {
            Ok(image) => params = params.with_cover_image(image),
            Err(e) => error!("Cannot use {} as cover. Err: {}", path.display(), e),
        }
    }

    match period {
        Some(period) => info!(
            "Creating playlist \"{}\" from songs saved in period {}",
            params.playlist_name, period
        ),
        None => info!(
            "Creating playlist \"{}\" from {} saved songs",
            params.playlist_name, total_songs
        ),
    }

    let builder = Arc::new(Playlistify::new(client));
    let aborted = watch_run(&builder, params).await;

    match builder.snapshot() {
        PlaylistifyProcess::Ready { value } => {
            let cover = cover_url(builder.api(), &token, &value).await;
            success!("Playlist created.");
            let row = PlaylistTableRow {
                name: value.name.clone(),
                link: value.link().to_string(),
                cover,
            };
            println!("{}", Table::new(vec![row]));
        }
        PlaylistifyProcess::Errored { error } => {
            if let Some(playlist) = &error.playlist {
                warning!(
                    "Playlist \"{}\" was left incomplete: {}",
                    playlist.name,
                    playlist.link()
                );
            }
            error!("Failed to create playlist. Err: {}", error.error);
        }
        _ if aborted => {
            builder.reset();
            warning!("Aborted. Songs added so far stay in the playlist.");
        }
        state => warning!("Build ended without result: {:?}", state),
    }
}

/// Renders progress until the run settles. Returns whether it was aborted.
async fn watch_run(builder: &Arc<Playlistify<SpotifyClient>>, params: RunParams) -> bool {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap()
            .progress_chars("=> ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));

    let mut state = builder.subscribe();
    let mut handle = builder.start(params);
    let mut aborted = false;

    render(&pb, &state.borrow_and_update());

    loop {
        tokio::select! {
            changed = state.changed() => {
                if changed.is_err() {
                    break;
                }
                render(&pb, &state.borrow_and_update());
            }
            _ = tokio::signal::ctrl_c(), if !aborted => {
                pb.set_message("Aborting...");
                builder.abort();
                aborted = true;
            }
            joined = &mut handle => {
                if let Err(e) = joined {
                    warning!("Build task failed: {}", e);
                }
                break;
            }
        }
    }

    pb.finish_and_clear();
    aborted
}

fn render(pb: &ProgressBar, state: &PlaylistifyProcess) {
    pb.set_position(state.progress().round() as u64);
    if let Some(status) = state.status() {
        pb.set_message(status.to_string());
    }
}

async fn load_cover(path: &Path) -> Res<String> {
    let bytes = async_fs::read(path).await?;
    Ok(utils::encode_cover_image(&bytes)?)
}

async fn cover_url(api: &SpotifyClient, token: &str, playlist: &PlaylistDescriptor) -> String {
    for attempt in 0..COVER_ART_ATTEMPTS {
        if attempt > 0 {
            sleep(Duration::from_secs(1)).await;
        }

        let image = api
            .playlist_cover_art(token, &playlist.id)
            .await
            .ok()
            .and_then(|images| images.into_iter().next());
        if let Some(image) = image {
            return image.url;
        }
    }

    "-".to_string()
}
