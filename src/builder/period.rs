use chrono::{DateTime, Utc};

use crate::{
    error::{PlaylistifyError, RunFailure},
    spotify::LibraryApi,
    types::{Period, PlaylistDescriptor},
    utils,
};

use super::{Playlistify, Run, RunParams, STATUS_ADDING, STATUS_CREATING, STATUS_FETCHING};

/// Share of the progress bar spent scanning; adding takes the rest.
const SCAN_SHARE: f64 = 50.0;

impl<A: LibraryApi> Playlistify<A> {
    /// Builds a playlist from the songs saved within `period`.
    ///
    /// Nothing is created when no saved song falls inside the window.
    pub(super) async fn fill_from_period(
        &self,
        run: &Run,
        params: &RunParams,
        period: Period,
    ) -> Result<PlaylistDescriptor, RunFailure> {
        let cutoff = utils::period_cutoff(period, Utc::now());
        let uris = self
            .collect_period(run, params, period, cutoff)
            .await
            .map_err(RunFailure::new)?;

        if uris.is_empty() {
            return Err(RunFailure::new(PlaylistifyError::Validation(format!(
                "No songs to add in period - {}",
                period
            ))));
        }

        self.progress(run, Some(STATUS_CREATING), Some(SCAN_SHARE));
        let request = params.create_request();
        let playlist = self
            .call(
                run,
                self.api
                    .create_playlist(&params.access_token, &params.user_id, &request),
            )
            .await
            .map_err(RunFailure::new)?;

        self.progress(run, Some(STATUS_ADDING), None);
        let total = uris.len();
        self.submit(run, params, &playlist, &uris, 0, |submitted| {
            if submitted < total {
                let progress = SCAN_SHARE + SCAN_SHARE * submitted as f64 / total as f64;
                self.progress(run, None, Some(progress));
            }
        })
        .await?;

        Ok(playlist)
    }

    /// Scans saved songs newest first until one was saved at or before
    /// `cutoff`, `total_songs` songs qualify, or the library ends.
    async fn collect_period(
        &self,
        run: &Run,
        params: &RunParams,
        period: Period,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<String>, PlaylistifyError> {
        let budget = params.total_songs;
        let page_limit = self.api.saved_tracks_page_limit().max(1);

        let mut uris = Vec::new();
        let mut offset = 0;
        let mut newest: Option<DateTime<Utc>> = None;

        self.progress(run, Some(STATUS_FETCHING), None);

        while uris.len() < budget {
            let limit = page_limit.min(budget - uris.len());
            let page = self
                .call(
                    run,
                    self.api
                        .saved_tracks(&params.access_token, offset, limit),
                )
                .await?;

            if page.items.is_empty() {
                break;
            }

            offset += page.items.len();
            let library_total = page.total;
            let expected = library_total.min(budget);

            let mut outside_window = false;
            let mut progress = None;

            for saved in page.items {
                if saved.added_at <= cutoff {
                    outside_window = true;
                    break;
                }

                let first = *newest.get_or_insert(saved.added_at);
                uris.push(saved.track.uri);
                progress = Some(scan_progress(
                    period,
                    first,
                    saved.added_at,
                    cutoff,
                    uris.len(),
                    expected,
                ));

                if uris.len() >= budget {
                    break;
                }
            }

            if progress.is_some() {
                self.progress(run, None, progress);
            }

            if outside_window || offset >= library_total {
                break;
            }
        }

        Ok(uris)
    }
}

/// Scan progress in `[0, SCAN_SHARE]`.
///
/// Bounded windows use the share of the window covered so far, `AllTime`
/// uses the share of expected songs scanned.
fn scan_progress(
    period: Period,
    newest: DateTime<Utc>,
    current: DateTime<Utc>,
    cutoff: DateTime<Utc>,
    scanned: usize,
    expected: usize,
) -> f64 {
    let fraction = match period {
        Period::AllTime => {
            if expected == 0 {
                0.0
            } else {
                scanned as f64 / expected as f64
            }
        }
        _ => {
            let window = (newest - cutoff).num_milliseconds();
            if window <= 0 {
                0.0
            } else {
                (newest - current).num_milliseconds() as f64 / window as f64
            }
        }
    };

    fraction.clamp(0.0, 1.0) * SCAN_SHARE
}
