//! Queue edits and playback mode flags

use crate::model::{PlayerSession, RepeatMode, Track};

use super::PlayerController;

/// Queue `track` if needed; with `as_current`, point the cursor and current
/// track at it.
pub(crate) fn ensure_in_queue_locked(session: &mut PlayerSession, track: Track, as_current: bool) -> usize {
    let idx = session.queue.ensure(track);
    if as_current {
        session.queue.set_cursor(idx);
        session.current_track = session.queue.get(idx).cloned();
    }
    idx
}

impl PlayerController {
    /// Show the full player for `track` and make it current without starting audio.
    pub async fn open(&self, track: Track) {
        {
            let mut session = self.session.lock().await;
            tracing::debug!(track_id = %track.id, "Opening player");
            session.player_visible = true;
            ensure_in_queue_locked(&mut session, track, true);
        }
        self.persist().await;
    }

    pub async fn close(&self) {
        self.session.lock().await.player_visible = false;
    }

    pub async fn ensure_in_queue(&self, track: Track, as_current: bool) {
        {
            let mut session = self.session.lock().await;
            ensure_in_queue_locked(&mut session, track, as_current);
        }
        self.persist().await;
    }

    /// Queue `track` after the cursor (`at_next`) or at the end; already queued ids are ignored.
    pub async fn add_to_queue(&self, track: Track, at_next: bool) {
        {
            let mut session = self.session.lock().await;
            let track_id = track.id.clone();
            match session.queue.insert(track, at_next) {
                Some(idx) => tracing::info!(track_id = %track_id, idx, at_next, "Track added to queue"),
                None => {
                    tracing::debug!(track_id = %track_id, "Track already queued");
                    return;
                }
            }
        }
        self.persist().await;
    }

    pub async fn play_next(&self, track: Track) {
        self.add_to_queue(track, true).await;
    }

    /// Drop the entry at `idx`. Audio already loaded keeps playing, even when
    /// it was the removed entry.
    pub async fn remove_from_queue(&self, idx: usize) {
        {
            let mut session = self.session.lock().await;
            match session.queue.remove(idx) {
                Some(removed) => {
                    session.clamp_selection();
                    tracing::info!(
                        track_id = %removed.id,
                        idx,
                        cursor = ?session.queue.cursor(),
                        "Track removed from queue"
                    );
                }
                None => {
                    tracing::debug!(idx, len = session.queue.len(), "Remove index out of range");
                    return;
                }
            }
        }
        self.persist().await;
    }

    pub async fn toggle_shuffle(&self) {
        let mut session = self.session.lock().await;
        session.shuffle = !session.shuffle;
        tracing::info!(shuffle = session.shuffle, "Shuffle toggled");
    }

    pub async fn set_repeat_mode(&self, mode: RepeatMode) {
        let mut session = self.session.lock().await;
        session.repeat = mode;
        tracing::info!(repeat = ?mode, "Repeat mode set");
    }

    pub async fn cycle_repeat(&self) {
        let next = self.session.lock().await.repeat.next();
        self.set_repeat_mode(next).await;
    }

    pub async fn toggle_queue_visible(&self) {
        let mut session = self.session.lock().await;
        session.queue_visible = !session.queue_visible;
        if session.queue_visible {
            session.library_visible = false;
            session.queue_selected = session.queue.cursor().unwrap_or(0);
        }
    }

    pub async fn move_selection(&self, delta: isize) {
        let mut session = self.session.lock().await;
        let last = session.queue.len().saturating_sub(1);
        session.queue_selected = session.queue_selected.saturating_add_signed(delta).min(last);
    }

    /// Play the highlighted up-next entry and bring up the full player.
    pub async fn play_selected(&self) {
        let selected = self.session.lock().await.queue_selected;
        self.play_index(selected).await;
        self.session.lock().await.player_visible = true;
    }

    pub async fn remove_selected(&self) {
        let selected = self.session.lock().await.queue_selected;
        self.remove_from_queue(selected).await;
    }
}
