//! Engine double that records every call and can be told to fail

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use super::AudioEngine;
use crate::error::EngineError;
use crate::model::PlaybackStatus;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EngineCall {
    Load { uri: String, generation: u64 },
    Play,
    Pause,
    SetPosition(u64),
    Unload,
}

#[derive(Default)]
pub struct RecordingEngine {
    calls: Mutex<Vec<EngineCall>>,
    fail_load: Mutex<bool>,
    fail_play: Mutex<bool>,
    loaded: Mutex<Option<(String, u64)>>,
    load_delays: Mutex<HashMap<String, Duration>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn loaded_uri(&self) -> Option<String> {
        self.loaded.lock().unwrap().as_ref().map(|(uri, _)| uri.clone())
    }

    /// Generation the loaded source was tagged with
    pub fn loaded_generation(&self) -> Option<u64> {
        self.loaded.lock().unwrap().as_ref().map(|(_, generation)| *generation)
    }

    /// Make `load(uri)` take `delay` before it completes.
    pub fn set_load_delay(&self, uri: &str, delay: Duration) {
        self.load_delays.lock().unwrap().insert(uri.to_string(), delay);
    }

    pub fn set_fail_load(&self, fail: bool) {
        *self.fail_load.lock().unwrap() = fail;
    }

    pub fn set_fail_play(&self, fail: bool) {
        *self.fail_play.lock().unwrap() = fail;
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl AudioEngine for RecordingEngine {
    async fn load(&self, uri: &str, generation: u64) -> Result<PlaybackStatus, EngineError> {
        self.record(EngineCall::Load {
            uri: uri.to_string(),
            generation,
        });
        let delay = self.load_delays.lock().unwrap().get(uri).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if *self.fail_load.lock().unwrap() {
            return Err(EngineError::Load {
                uri: uri.to_string(),
                reason: "injected failure".to_string(),
            });
        }
        *self.loaded.lock().unwrap() = Some((uri.to_string(), generation));
        Ok(PlaybackStatus {
            duration_ms: Some(180_000),
            ..Default::default()
        })
    }

    async fn play(&self) -> Result<(), EngineError> {
        self.record(EngineCall::Play);
        if *self.fail_play.lock().unwrap() {
            return Err(EngineError::Command {
                operation: "play",
                reason: "injected failure".to_string(),
            });
        }
        Ok(())
    }

    async fn pause(&self) -> Result<(), EngineError> {
        self.record(EngineCall::Pause);
        Ok(())
    }

    async fn set_position(&self, position_ms: u64) -> Result<(), EngineError> {
        self.record(EngineCall::SetPosition(position_ms));
        Ok(())
    }

    async fn unload(&self) -> Result<(), EngineError> {
        self.record(EngineCall::Unload);
        *self.loaded.lock().unwrap() = None;
        Ok(())
    }
}
