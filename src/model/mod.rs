//! Model module - Player state and data types
//!
//! - `types`: Core type definitions (tracks, repeat mode, engine status)
//! - `queue`: The id-unique play queue and its cursor
//! - `session`: Session state, persisted form and render snapshot
//! - `favorites`: Favorited tracks backed by the key-value store

mod types;
mod queue;
mod session;
mod favorites;

pub use types::{PlaybackStatus, RepeatMode, StatusUpdate, Track};

pub use queue::Queue;

pub use session::{LibrarySource, PersistedSession, PlaybackInfo, PlayerSession, SESSION_KEY};

pub use favorites::Favorites;
