//! Player session state, its persisted form and the render snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use super::queue::Queue;
use super::types::{PlaybackStatus, RepeatMode, Track};

/// Key the session is persisted under
pub const SESSION_KEY: &str = "player:state.v1";

/// Internal timing state for smooth progress bar updates
#[derive(Clone, Debug)]
pub struct PlaybackTiming {
    /// Last position reported by the engine
    pub position_ms: u64,
    pub duration_ms: Option<u64>,
    pub last_update: Instant,
    pub is_playing: bool,
}

impl Default for PlaybackTiming {
    fn default() -> Self {
        Self {
            position_ms: 0,
            duration_ms: None,
            last_update: Instant::now(),
            is_playing: false,
        }
    }
}

impl PlaybackTiming {
    /// Position extrapolated from the last report, for display only
    pub fn current_position_ms(&self) -> u64 {
        let position = if self.is_playing {
            self.position_ms
                .saturating_add(self.last_update.elapsed().as_millis() as u64)
        } else {
            self.position_ms
        };
        match self.duration_ms {
            Some(duration) => position.min(duration),
            None => position,
        }
    }

    pub fn apply(&mut self, status: &PlaybackStatus) {
        self.position_ms = status.position_ms;
        if status.duration_ms.is_some() {
            self.duration_ms = status.duration_ms;
        }
        self.is_playing = status.is_playing;
        self.last_update = Instant::now();
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Which list the library pane browses
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LibrarySource {
    #[default]
    Playlist,
    Favorites,
}

impl LibrarySource {
    pub fn toggle(self) -> Self {
        match self {
            LibrarySource::Playlist => LibrarySource::Favorites,
            LibrarySource::Favorites => LibrarySource::Playlist,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LibrarySource::Playlist => "Playlist",
            LibrarySource::Favorites => "Favorites",
        }
    }
}

/// Everything the controller tracks about the running session
#[derive(Clone, Debug, Default)]
pub struct PlayerSession {
    /// Track considered loaded; may lag the cursor while a load is in flight
    pub current_track: Option<Track>,
    pub is_playing: bool,
    pub queue: Queue,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub queue_visible: bool,
    pub player_visible: bool,
    pub queue_selected: usize,
    /// Tracks loaded from the playlist file; never persisted
    pub library: Vec<Track>,
    pub library_visible: bool,
    pub library_selected: usize,
    pub library_source: LibrarySource,
    /// Identity of the most recent engine load; stale engine reports carry an older value
    pub generation: u64,
    /// Whether the engine currently holds a source
    pub loaded: bool,
    pub timing: PlaybackTiming,
}

impl PlayerSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new engine load and return its generation.
    pub fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.wrapping_add(1);
        self.timing.reset();
        self.generation
    }

    pub fn to_persisted(&self) -> PersistedSession {
        PersistedSession {
            queue: self.queue.tracks().to_vec(),
            cursor: self.queue.cursor(),
            current_track: self.current_track.clone(),
            saved_at: Some(Utc::now()),
        }
    }

    /// Replace queue, cursor and current track with a restored session.
    pub fn restore(&mut self, persisted: PersistedSession) {
        self.queue = Queue::from_parts(persisted.queue, persisted.cursor);
        self.current_track = persisted
            .current_track
            .or_else(|| self.queue.current().cloned());
        self.queue_selected = self.queue.cursor().unwrap_or(0);
    }

    pub fn clamp_selection(&mut self) {
        self.queue_selected = self.queue_selected.min(self.queue.len().saturating_sub(1));
    }
}

/// Session as written to the key-value store
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedSession {
    pub queue: Vec<Track>,
    #[serde(default, with = "cursor_repr")]
    pub cursor: Option<usize>,
    #[serde(default)]
    pub current_track: Option<Track>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

/// Cursor is stored as an integer with `-1` for "unset"
mod cursor_repr {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(cursor: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match cursor {
            Some(idx) => serializer.serialize_i64(*idx as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(usize::try_from(raw).ok())
    }
}

/// Complete playback information for rendering the UI
#[derive(Clone, Debug, Default)]
pub struct PlaybackInfo {
    pub track: Option<Track>,
    pub is_playing: bool,
    pub progress_ms: u64,
    pub duration_ms: u64,
    pub shuffle: bool,
    pub repeat: RepeatMode,
    pub queue: Vec<Track>,
    pub cursor: Option<usize>,
    pub queue_visible: bool,
    pub player_visible: bool,
    pub queue_selected: usize,
    pub library: Vec<Track>,
    pub library_visible: bool,
    pub library_selected: usize,
    pub library_source: LibrarySource,
    pub favorite: bool,
}

impl PlaybackInfo {
    pub fn from_session(session: &PlayerSession) -> Self {
        let duration_ms = session
            .timing
            .duration_ms
            .or_else(|| session.current_track.as_ref().and_then(|t| t.duration_ms))
            .unwrap_or(0);

        Self {
            track: session.current_track.clone(),
            is_playing: session.is_playing,
            progress_ms: session.timing.current_position_ms(),
            duration_ms,
            shuffle: session.shuffle,
            repeat: session.repeat,
            queue: session.queue.tracks().to_vec(),
            cursor: session.queue.cursor(),
            queue_visible: session.queue_visible,
            player_visible: session.player_visible,
            queue_selected: session.queue_selected,
            library: session.library.clone(),
            library_visible: session.library_visible,
            library_selected: session.library_selected,
            library_source: session.library_source,
            favorite: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(id: &str) -> Track {
        Track::new(id, id, "Artist").with_uri(format!("file:///{id}.mp3"))
    }

    #[test]
    fn test_unset_cursor_is_stored_as_minus_one() {
        let persisted = PersistedSession {
            queue: vec![track("a")],
            cursor: None,
            current_track: None,
            saved_at: None,
        };
        let value = serde_json::to_value(&persisted).unwrap();
        assert_eq!(value["cursor"], -1);
        assert!(value.get("savedAt").is_none());

        let back: PersistedSession = serde_json::from_value(value).unwrap();
        assert_eq!(back.cursor, None);
    }

    #[test]
    fn test_persisted_round_trip_keeps_cursor() {
        let mut session = PlayerSession::new();
        session.queue = Queue::from_parts(vec![track("a"), track("b")], Some(1));
        session.current_track = Some(track("b"));

        let value = serde_json::to_value(session.to_persisted()).unwrap();
        assert_eq!(value["cursor"], 1);
        assert_eq!(value["currentTrack"]["id"], "b");

        let mut restored = PlayerSession::new();
        restored.restore(serde_json::from_value(value).unwrap());
        assert_eq!(restored.queue.cursor(), Some(1));
        assert_eq!(restored.current_track.as_ref().unwrap().id, "b");
        assert_eq!(restored.queue_selected, 1);
    }

    #[test]
    fn test_restore_falls_back_to_cursor_track() {
        let persisted: PersistedSession = serde_json::from_str(
            r#"{"queue":[{"id":"a","title":"A"},{"id":"b","title":"B"}],"cursor":0}"#,
        )
        .unwrap();
        let mut session = PlayerSession::new();
        session.restore(persisted);
        assert_eq!(session.current_track.unwrap().id, "a");
    }

    #[test]
    fn test_next_generation_resets_timing() {
        let mut session = PlayerSession::new();
        session.timing.position_ms = 4000;
        let first = session.next_generation();
        let second = session.next_generation();
        assert_eq!(second, first + 1);
        assert_eq!(session.timing.position_ms, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timing_extrapolates_while_playing() {
        let mut timing = PlaybackTiming::default();
        timing.apply(&PlaybackStatus {
            is_playing: true,
            position_ms: 1000,
            duration_ms: Some(1500),
            did_just_finish: false,
        });

        tokio::time::advance(std::time::Duration::from_millis(200)).await;
        assert_eq!(timing.current_position_ms(), 1200);

        tokio::time::advance(std::time::Duration::from_millis(1000)).await;
        assert_eq!(timing.current_position_ms(), 1500);
    }
}
