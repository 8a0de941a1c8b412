//! Controller module - the playback queue state machine
//!
//! `PlayerController` owns the session (queue, cursor, current track, mode
//! flags) and drives the audio engine. It is split into submodules by
//! responsibility:
//!
//! - `queue`: Queue edits and mode flags
//! - `playback`: Loading, playing, skipping and track-end handling
//! - `persistence`: Session save/restore against the key-value store
//! - `player_events`: Engine status listener
//! - `library`: Browsing the playlist catalog and favorites
//! - `input`: Key event handling for the terminal front end
//!
//! Every operation mutates the session under its lock, releases the lock,
//! and only then awaits the engine or the store. Engine and store failures
//! are logged and never returned.

mod queue;
mod playback;
mod persistence;
mod player_events;
mod library;
mod input;


use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;

use crate::engine::AudioEngine;
use crate::model::{Favorites, LibrarySource, PlaybackInfo, PlayerSession};
use crate::store::KeyValueStore;

#[cfg(test)]
use playback::RESTART_THRESHOLD_MS;

#[derive(Clone)]
pub struct PlayerController {
    pub(crate) session: Arc<Mutex<PlayerSession>>,
    pub(crate) engine: Arc<dyn AudioEngine>,
    pub(crate) store: Arc<dyn KeyValueStore>,
    pub(crate) favorites: Favorites,
    persist_lock: Arc<Mutex<()>>,
    /// Held across each unload/load/play sequence so engine commands never interleave
    engine_lock: Arc<Mutex<()>>,
    rng: Arc<Mutex<StdRng>>,
    should_quit: Arc<Mutex<bool>>,
}

impl PlayerController {
    pub fn new(engine: Arc<dyn AudioEngine>, store: Arc<dyn KeyValueStore>, favorites: Favorites) -> Self {
        Self::with_rng(engine, store, favorites, StdRng::from_entropy())
    }

    fn with_rng(
        engine: Arc<dyn AudioEngine>,
        store: Arc<dyn KeyValueStore>,
        favorites: Favorites,
        rng: StdRng,
    ) -> Self {
        Self {
            session: Arc::new(Mutex::new(PlayerSession::new())),
            engine,
            store,
            favorites,
            persist_lock: Arc::new(Mutex::new(())),
            engine_lock: Arc::new(Mutex::new(())),
            rng: Arc::new(Mutex::new(rng)),
            should_quit: Arc::new(Mutex::new(false)),
        }
    }

    /// Controller with a deterministic shuffle sequence
    #[cfg(test)]
    pub fn with_seed(engine: Arc<dyn AudioEngine>, store: Arc<dyn KeyValueStore>, seed: u64) -> Self {
        let favorites = Favorites::new(store.clone());
        Self::with_rng(engine, store, favorites, StdRng::seed_from_u64(seed))
    }

    /// Uniform pick in `[0, len)`; the current track is a valid outcome.
    pub(crate) async fn random_index(&self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        Some(self.rng.lock().await.gen_range(0..len))
    }

    /// Render-ready copy of the session
    pub async fn snapshot(&self) -> PlaybackInfo {
        let mut info = {
            let session = self.session.lock().await;
            PlaybackInfo::from_session(&session)
        };
        if let Some(track) = &info.track {
            info.favorite = self.favorites.is_favorite(&track.id).await;
        }
        if info.library_source == LibrarySource::Favorites {
            info.library = self.favorites.list().await;
        }
        info.library_selected = info.library_selected.min(info.library.len().saturating_sub(1));
        info
    }

    pub async fn toggle_favorite(&self) {
        let current = self.session.lock().await.current_track.clone();
        match current {
            Some(track) => {
                let favorite = self.favorites.toggle(&track).await;
                tracing::debug!(track_id = %track.id, favorite, "Toggled favorite");
            }
            None => tracing::debug!("No current track to favorite"),
        }
    }

    pub async fn should_quit(&self) -> bool {
        *self.should_quit.lock().await
    }

    pub async fn set_should_quit(&self, quit: bool) {
        *self.should_quit.lock().await = quit;
    }
}
