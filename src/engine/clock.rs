//! Simulated engine that plays silence on the tokio clock
//!
//! Sources never get decoded: a loaded URI just has a fixed length, and
//! position advances with wall time while playing. Reports go out on every
//! tick while playing and right after each command.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::time::{Instant, MissedTickBehavior};

use super::{AudioEngine, StatusChannel};
use crate::error::EngineError;
use crate::model::{PlaybackStatus, StatusUpdate};

struct Source {
    uri: String,
    generation: u64,
    duration_ms: u64,
    /// Position at the moment playback last started or was paused
    position_ms: u64,
    playing_since: Option<Instant>,
}

impl Source {
    fn position_ms(&self) -> u64 {
        let elapsed = self
            .playing_since
            .map(|since| since.elapsed().as_millis() as u64)
            .unwrap_or(0);
        self.position_ms.saturating_add(elapsed).min(self.duration_ms)
    }

    fn status(&self, did_just_finish: bool) -> PlaybackStatus {
        PlaybackStatus {
            is_playing: self.playing_since.is_some(),
            position_ms: self.position_ms(),
            duration_ms: Some(self.duration_ms),
            did_just_finish,
        }
    }

    fn update(&self, did_just_finish: bool) -> StatusUpdate {
        StatusUpdate {
            generation: self.generation,
            status: self.status(did_just_finish),
        }
    }

    /// Report for the periodic tick; `None` while idle
    fn tick(&mut self) -> Option<StatusUpdate> {
        self.playing_since?;

        if self.position_ms() >= self.duration_ms {
            self.position_ms = self.duration_ms;
            self.playing_since = None;
            return Some(self.update(true));
        }
        Some(self.update(false))
    }
}

pub struct ClockEngine {
    source: Arc<Mutex<Option<Source>>>,
    status_tx: mpsc::UnboundedSender<StatusUpdate>,
    track_duration: Duration,
}

impl ClockEngine {
    /// Create the engine and start its status ticker.
    ///
    /// The ticker stops once the returned channel is dropped.
    pub fn spawn(track_duration: Duration, status_interval: Duration) -> (Self, StatusChannel) {
        let (status_tx, status_rx) = mpsc::unbounded_channel();
        let source: Arc<Mutex<Option<Source>>> = Arc::new(Mutex::new(None));

        let ticker_source = source.clone();
        let ticker_tx = status_tx.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(status_interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if ticker_tx.is_closed() {
                    tracing::debug!("Status channel closed, stopping engine ticker");
                    break;
                }
                let update = ticker_source.lock().await.as_mut().and_then(Source::tick);
                if let Some(update) = update {
                    if update.status.did_just_finish {
                        tracing::debug!(generation = update.generation, "Source finished");
                    }
                    let _ = ticker_tx.send(update);
                }
            }
        });

        tracing::info!(
            track_secs = track_duration.as_secs(),
            interval_ms = status_interval.as_millis() as u64,
            "Clock engine started"
        );

        (
            Self {
                source,
                status_tx,
                track_duration,
            },
            status_rx,
        )
    }

    fn notify(&self, source: &Source) {
        let _ = self.status_tx.send(source.update(false));
    }

    #[cfg(test)]
    pub async fn loaded_uri(&self) -> Option<String> {
        self.source.lock().await.as_ref().map(|s| s.uri.clone())
    }
}

#[async_trait]
impl AudioEngine for ClockEngine {
    async fn load(&self, uri: &str, generation: u64) -> Result<PlaybackStatus, EngineError> {
        if uri.is_empty() {
            return Err(EngineError::Load {
                uri: uri.to_string(),
                reason: "empty uri".to_string(),
            });
        }

        let source = Source {
            uri: uri.to_string(),
            generation,
            duration_ms: self.track_duration.as_millis() as u64,
            position_ms: 0,
            playing_since: None,
        };
        let status = source.status(false);
        tracing::debug!(uri, generation, "Loaded source");
        *self.source.lock().await = Some(source);
        Ok(status)
    }

    async fn play(&self) -> Result<(), EngineError> {
        let mut guard = self.source.lock().await;
        let source = guard.as_mut().ok_or(EngineError::NotLoaded)?;
        if source.playing_since.is_none() {
            source.playing_since = Some(Instant::now());
        }
        self.notify(source);
        Ok(())
    }

    async fn pause(&self) -> Result<(), EngineError> {
        let mut guard = self.source.lock().await;
        let source = guard.as_mut().ok_or(EngineError::NotLoaded)?;
        source.position_ms = source.position_ms();
        source.playing_since = None;
        self.notify(source);
        Ok(())
    }

    async fn set_position(&self, position_ms: u64) -> Result<(), EngineError> {
        let mut guard = self.source.lock().await;
        let source = guard.as_mut().ok_or(EngineError::NotLoaded)?;
        source.position_ms = position_ms.min(source.duration_ms);
        if source.playing_since.is_some() {
            source.playing_since = Some(Instant::now());
        }
        self.notify(source);
        Ok(())
    }

    async fn unload(&self) -> Result<(), EngineError> {
        if let Some(source) = self.source.lock().await.take() {
            tracing::debug!(uri = %source.uri, generation = source.generation, "Unloaded source");
        }
        Ok(())
    }
}
