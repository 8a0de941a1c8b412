//! Library pane: browsing the playlist catalog and favorites

use crate::model::{LibrarySource, Track};

use super::PlayerController;

impl PlayerController {
    /// Install the playlist catalog. An empty queue is seeded with it.
    pub async fn set_library(&self, tracks: Vec<Track>) {
        let seed = {
            let mut session = self.session.lock().await;
            session.library = tracks.clone();
            session.library_selected = 0;
            session.queue.is_empty()
        };
        tracing::info!(count = tracks.len(), seed, "Library set");

        if seed {
            for track in tracks {
                self.add_to_queue(track, false).await;
            }
        }
    }

    pub async fn toggle_library_visible(&self) {
        let mut session = self.session.lock().await;
        session.library_visible = !session.library_visible;
        if session.library_visible {
            session.queue_visible = false;
        }
    }

    pub async fn toggle_library_source(&self) {
        let mut session = self.session.lock().await;
        session.library_source = session.library_source.toggle();
        session.library_selected = 0;
        tracing::debug!(source = ?session.library_source, "Library source switched");
    }

    pub async fn move_library_selection(&self, delta: isize) {
        let len = self.library_tracks().await.len();
        let mut session = self.session.lock().await;
        session.library_selected = session
            .library_selected
            .saturating_add_signed(delta)
            .min(len.saturating_sub(1));
    }

    /// Tracks listed for the active source
    pub(crate) async fn library_tracks(&self) -> Vec<Track> {
        let (source, playlist) = {
            let session = self.session.lock().await;
            (session.library_source, session.library.clone())
        };
        match source {
            LibrarySource::Playlist => playlist,
            LibrarySource::Favorites => self.favorites.list().await,
        }
    }

    async fn selected_library_track(&self) -> Option<Track> {
        let selected = self.session.lock().await.library_selected;
        let track = self.library_tracks().await.into_iter().nth(selected);
        if track.is_none() {
            tracing::debug!(selected, "No library track selected");
        }
        track
    }

    /// Play the highlighted library track, queueing it if needed.
    pub async fn play_library_selected(&self) {
        if let Some(track) = self.selected_library_track().await {
            self.play_song(Some(track)).await;
            self.session.lock().await.player_visible = true;
        }
    }

    pub async fn open_library_selected(&self) {
        if let Some(track) = self.selected_library_track().await {
            self.open(track).await;
        }
    }

    pub async fn enqueue_library_selected(&self) {
        if let Some(track) = self.selected_library_track().await {
            self.ensure_in_queue(track, false).await;
        }
    }

    pub async fn play_library_selected_next(&self) {
        if let Some(track) = self.selected_library_track().await {
            self.play_next(track).await;
        }
    }
}
