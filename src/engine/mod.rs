//! Audio engine seam
//!
//! The controller drives playback only through [`AudioEngine`]. An engine
//! reports progress on a status channel; every report carries the
//! generation it was loaded with so the controller can drop reports from a
//! source it has already moved away from.

mod clock;
#[cfg(test)]
pub mod recording;

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::error::EngineError;
use crate::model::{PlaybackStatus, StatusUpdate};

pub use clock::ClockEngine;

/// Receiving end of an engine's status reports
pub type StatusChannel = mpsc::UnboundedReceiver<StatusUpdate>;

#[async_trait]
pub trait AudioEngine: Send + Sync {
    /// Load `uri` paused at position 0, tagging its reports with `generation`.
    async fn load(&self, uri: &str, generation: u64) -> Result<PlaybackStatus, EngineError>;

    async fn play(&self) -> Result<(), EngineError>;

    async fn pause(&self) -> Result<(), EngineError>;

    async fn set_position(&self, position_ms: u64) -> Result<(), EngineError>;

    /// Release the loaded source; succeeds when nothing is loaded.
    async fn unload(&self) -> Result<(), EngineError>;
}
