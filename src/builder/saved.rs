use crate::{
    error::RunFailure,
    spotify::LibraryApi,
    types::PlaylistDescriptor,
};

use super::{Playlistify, Run, RunParams, STATUS_ADDING, STATUS_FETCHING};

impl<A: LibraryApi> Playlistify<A> {
    /// Copies the `total_songs` most recently saved songs into a new playlist.
    ///
    /// Pages of saved songs are buffered until a full add chunk is available,
    /// the budget is exhausted, or the library runs out. Buffered songs are
    /// then appended at the position right after the last confirmed add.
    pub(super) async fn fill_from_saved(
        &self,
        run: &Run,
        params: &RunParams,
    ) -> Result<PlaylistDescriptor, RunFailure> {
        let request = params.create_request();
        let playlist = self
            .call(
                run,
                self.api
                    .create_playlist(&params.access_token, &params.user_id, &request),
            )
            .await
            .map_err(RunFailure::new)?;

        let total = params.total_songs;
        let page_limit = self.api.saved_tracks_page_limit().max(1);
        let max_add = self.api.max_items_per_add().max(1);

        let mut offset = 0;
        let mut confirmed = 0;
        let mut buffer: Vec<String> = Vec::with_capacity(max_add);

        while offset < total {
            self.progress(run, Some(STATUS_FETCHING), None);

            let limit = page_limit.min(total - offset);
            let page = self
                .call(
                    run,
                    self.api
                        .saved_tracks(&params.access_token, offset, limit),
                )
                .await
                .map_err(|e| RunFailure::with_playlist(e, &playlist))?;

            let returned = page.items.len();
            buffer.extend(page.items.into_iter().map(|saved| saved.track.uri));

            offset = (offset + page_limit).min(total);
            // library holds fewer songs than requested
            let exhausted = returned < limit;

            if offset < total && !exhausted {
                self.progress(run, None, Some(100.0 * offset as f64 / total as f64));
            }

            let flush = buffer.len() >= max_add || exhausted || offset >= total;
            if flush && !buffer.is_empty() {
                self.progress(run, Some(STATUS_ADDING), None);
                confirmed = self
                    .submit(run, params, &playlist, &buffer, confirmed, |_| {})
                    .await?;
                buffer.clear();
            }

            if exhausted {
                break;
            }
        }

        Ok(playlist)
    }
}
