//! Playback control methods

use crate::model::{PlayerSession, RepeatMode, Track};

use super::queue::ensure_in_queue_locked;
use super::PlayerController;

/// Past this position, "previous" restarts the current track instead of moving back
pub const RESTART_THRESHOLD_MS: u64 = 5000;

/// A load the session has committed to; `generation` identifies it to the engine
struct PendingLoad {
    track: Track,
    generation: u64,
}

/// What `play_song` decided to do once the session lock is released
enum PlayPlan {
    Load(PendingLoad),
    Resume,
    Nothing,
}

/// Outcome of the track-end decision
enum TrackEnd {
    RepeatOne,
    Advance(usize),
    Stop,
    Idle,
}

fn begin_load(session: &mut PlayerSession, track: Track) -> PendingLoad {
    let generation = session.next_generation();
    session.loaded = false;
    session.is_playing = true;
    PendingLoad { track, generation }
}

impl PlayerController {
    /// Start playback.
    ///
    /// With a track: make it current (queueing it if needed) and play it.
    /// Without: play the cursor entry, or resume the current track if the
    /// cursor is unset.
    pub async fn play_song(&self, track: Option<Track>) {
        let plan = {
            let mut session = self.session.lock().await;
            match track {
                Some(track) => {
                    let idx = ensure_in_queue_locked(&mut session, track, true);
                    match session.queue.get(idx).cloned() {
                        Some(track) => PlayPlan::Load(begin_load(&mut session, track)),
                        None => PlayPlan::Nothing,
                    }
                }
                None => match session.queue.current().cloned() {
                    Some(track) => {
                        session.current_track = Some(track.clone());
                        PlayPlan::Load(begin_load(&mut session, track))
                    }
                    None if session.current_track.is_some() => PlayPlan::Resume,
                    None => PlayPlan::Nothing,
                },
            }
        };

        match plan {
            PlayPlan::Load(pending) => {
                futures::join!(self.start_playback(pending), self.persist());
            }
            PlayPlan::Resume => self.resume().await,
            PlayPlan::Nothing => tracing::debug!("Nothing to play"),
        }
    }

    /// Resume the loaded source without touching the cursor.
    pub async fn resume(&self) {
        let generation = self.session.lock().await.generation;
        match self.engine.play().await {
            Ok(()) => {
                let mut session = self.session.lock().await;
                if session.generation == generation {
                    session.is_playing = true;
                }
                tracing::info!("Playback resumed");
            }
            Err(e) => tracing::error!(error = %e, "Resume failed"),
        }
    }

    pub async fn pause_song(&self) {
        {
            let mut session = self.session.lock().await;
            if !session.loaded {
                tracing::debug!("Nothing loaded, ignoring pause");
                return;
            }
            session.is_playing = false;
        }
        match self.engine.pause().await {
            Ok(()) => tracing::info!("Playback paused"),
            Err(e) => tracing::error!(error = %e, "Pause failed"),
        }
    }

    pub async fn toggle_playback(&self) {
        let (is_playing, loaded) = {
            let session = self.session.lock().await;
            (session.is_playing, session.loaded)
        };
        tracing::debug!(is_playing, loaded, "Toggling playback");

        if is_playing {
            self.pause_song().await;
        } else if loaded {
            self.resume().await;
        } else {
            self.play_song(None).await;
        }
    }

    /// Play the queue entry at `idx`; out-of-range indices are ignored.
    pub async fn play_index(&self, idx: usize) {
        let pending = {
            let mut session = self.session.lock().await;
            if !session.queue.set_cursor(idx) {
                tracing::debug!(idx, len = session.queue.len(), "Play index out of range");
                return;
            }
            let Some(track) = session.queue.get(idx).cloned() else {
                return;
            };
            session.current_track = Some(track.clone());
            begin_load(&mut session, track)
        };

        futures::join!(self.start_playback(pending), self.persist());
    }

    /// Skip forward. Past the last entry this does nothing, unlike a natural
    /// track end.
    pub async fn next_song(&self) {
        let (len, shuffle, cursor) = {
            let session = self.session.lock().await;
            (session.queue.len(), session.shuffle, session.queue.cursor())
        };

        let next = if shuffle {
            self.random_index(len).await
        } else {
            Some(cursor.map_or(0, |c| c + 1))
        };

        if let Some(idx) = next {
            tracing::debug!(idx, shuffle, "Next track");
            self.play_index(idx).await;
        }
    }

    pub async fn previous_song(&self) {
        let (position_ms, cursor) = {
            let session = self.session.lock().await;
            (session.timing.position_ms, session.queue.cursor())
        };

        if position_ms > RESTART_THRESHOLD_MS {
            tracing::debug!(position_ms, "Restarting current track");
            match self.engine.set_position(0).await {
                Ok(()) => self.session.lock().await.timing.position_ms = 0,
                Err(e) => tracing::error!(error = %e, "Restart seek failed"),
            }
            return;
        }

        let idx = cursor.map_or(0, |c| c.saturating_sub(1));
        tracing::debug!(idx, "Previous track");
        self.play_index(idx).await;
    }

    /// React to the engine finishing the current source.
    pub async fn handle_track_end(&self) {
        let decision = {
            let session = self.session.lock().await;
            let len = session.queue.len();

            if session.repeat == RepeatMode::One {
                if session.current_track.is_some() {
                    TrackEnd::RepeatOne
                } else {
                    TrackEnd::Idle
                }
            } else {
                let next = if session.shuffle {
                    self.random_index(len).await
                } else {
                    Some(session.queue.cursor().map_or(0, |c| c + 1))
                };
                match next {
                    Some(idx) if idx < len => TrackEnd::Advance(idx),
                    _ if session.repeat == RepeatMode::All && len > 0 => TrackEnd::Advance(0),
                    _ => TrackEnd::Stop,
                }
            }
        };

        match decision {
            TrackEnd::RepeatOne => {
                tracing::info!("Repeating current track");
                if let Err(e) = self.engine.set_position(0).await {
                    tracing::error!(error = %e, "Repeat seek failed");
                }
                self.resume().await;
            }
            TrackEnd::Advance(idx) => {
                tracing::info!(idx, "Advancing to next track");
                self.play_index(idx).await;
            }
            TrackEnd::Stop => self.stop().await,
            TrackEnd::Idle => tracing::debug!("Track ended with nothing current"),
        }
    }

    /// Queue exhausted: stop and release the engine, keeping queue and cursor.
    async fn stop(&self) {
        tracing::info!("Queue finished, stopping playback");
        self.release_engine().await;
    }

    /// Release the engine and write the session one last time before exit.
    pub async fn shutdown(&self) {
        tracing::info!("Shutting down player");
        self.release_engine().await;
        self.persist().await;
    }

    async fn release_engine(&self) {
        {
            let mut session = self.session.lock().await;
            session.is_playing = false;
            session.loaded = false;
            // reports from the released source are stale from here on
            session.next_generation();
        }
        let _engine = self.engine_lock.lock().await;
        if let Err(e) = self.engine.unload().await {
            tracing::error!(error = %e, "Unload failed");
        }
    }

    /// Unload, load and play `pending` on the engine.
    ///
    /// Results are applied only while `pending.generation` is still current.
    /// A load that went stale while it ran leaves its source behind; the
    /// newer operation that bumped the generation unloads it once it gets
    /// the engine lock.
    async fn start_playback(&self, pending: PendingLoad) {
        let PendingLoad { track, generation } = pending;

        let Some(uri) = track.playable_uri() else {
            tracing::warn!(track_id = %track.id, "Track has no playable uri");
            self.mark_stopped(generation).await;
            return;
        };

        let _engine = self.engine_lock.lock().await;
        if self.session.lock().await.generation != generation {
            tracing::trace!(generation, "Load superseded before it started");
            return;
        }

        if let Err(e) = self.engine.unload().await {
            tracing::warn!(error = %e, "Unload before load failed");
        }

        match self.engine.load(uri, generation).await {
            Ok(status) => {
                let mut session = self.session.lock().await;
                if session.generation != generation {
                    tracing::trace!(generation, current = session.generation, "Ignoring stale load");
                    return;
                }
                session.loaded = true;
                session.timing.apply(&status);
            }
            Err(e) => {
                tracing::error!(track_id = %track.id, error = %e, "Load failed");
                self.mark_stopped(generation).await;
                return;
            }
        }

        match self.engine.play().await {
            Ok(()) => tracing::info!(track_id = %track.id, title = %track.title, generation, "Playing"),
            Err(e) => {
                tracing::error!(track_id = %track.id, error = %e, "Play failed");
                self.mark_stopped(generation).await;
            }
        }
    }

    async fn mark_stopped(&self, generation: u64) {
        let mut session = self.session.lock().await;
        if session.generation == generation {
            session.is_playing = false;
        }
    }
}
