//! Favorited tracks, persisted through the key-value store

use std::sync::Arc;
use tokio::sync::RwLock;

use crate::store::KeyValueStore;
use super::types::Track;

pub const FAVORITES_KEY: &str = "favorites.v1";

/// Favorites in the order they were added
#[derive(Clone)]
pub struct Favorites {
    tracks: Arc<RwLock<Vec<Track>>>,
    store: Arc<dyn KeyValueStore>,
}

impl Favorites {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            tracks: Arc::new(RwLock::new(Vec::new())),
            store,
        }
    }

    /// Load the stored list; anything unreadable leaves the list empty.
    pub async fn load(&self) {
        let loaded = match self.store.get(FAVORITES_KEY).await {
            Ok(Some(value)) => match serde_json::from_value::<Vec<Track>>(value) {
                Ok(tracks) => tracks,
                Err(e) => {
                    tracing::warn!(error = %e, "Stored favorites are malformed, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Could not read favorites");
                Vec::new()
            }
        };

        let mut tracks = self.tracks.write().await;
        tracks.clear();
        for track in loaded {
            if !tracks.iter().any(|t| t.id == track.id) {
                tracks.push(track);
            }
        }
        tracing::debug!(count = tracks.len(), "Favorites loaded");
    }

    async fn save(&self) {
        let value = {
            let tracks = self.tracks.read().await;
            serde_json::to_value(&*tracks)
        };
        let result = match value {
            Ok(value) => self.store.set(FAVORITES_KEY, value).await,
            Err(e) => Err(e.into()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Failed to save favorites");
        }
    }

    pub async fn add(&self, track: Track) {
        {
            let mut tracks = self.tracks.write().await;
            if tracks.iter().any(|t| t.id == track.id) {
                return;
            }
            tracing::info!(track_id = %track.id, "Added to favorites");
            tracks.push(track);
        }
        self.save().await;
    }

    pub async fn remove(&self, track_id: &str) {
        {
            let mut tracks = self.tracks.write().await;
            let before = tracks.len();
            tracks.retain(|t| t.id != track_id);
            if tracks.len() == before {
                return;
            }
            tracing::info!(track_id, "Removed from favorites");
        }
        self.save().await;
    }

    /// Flip the favorite state of `track`; returns the new state.
    pub async fn toggle(&self, track: &Track) -> bool {
        if self.is_favorite(&track.id).await {
            self.remove(&track.id).await;
            false
        } else {
            self.add(track.clone()).await;
            true
        }
    }

    pub async fn is_favorite(&self, track_id: &str) -> bool {
        self.tracks.read().await.iter().any(|t| t.id == track_id)
    }

    pub async fn list(&self) -> Vec<Track> {
        self.tracks.read().await.clone()
    }
}
