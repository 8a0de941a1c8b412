//! Ordered, id-unique play queue with a cursor

use std::collections::HashSet;

use super::types::Track;

/// The play queue
///
/// Invariants held by every method:
/// - no two entries share an `id`
/// - `cursor` is `None` or a valid index
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Queue {
    tracks: Vec<Track>,
    cursor: Option<usize>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from untrusted parts (e.g. a restored session).
    ///
    /// Later duplicates are dropped and a cursor that does not point into
    /// the deduplicated list is cleared.
    pub fn from_parts(tracks: Vec<Track>, cursor: Option<usize>) -> Self {
        let cursor_id = cursor.and_then(|idx| tracks.get(idx)).map(|t| t.id.clone());

        let mut seen = HashSet::new();
        let tracks: Vec<Track> = tracks
            .into_iter()
            .filter(|t| seen.insert(t.id.clone()))
            .collect();

        let mut queue = Self { tracks, cursor: None };
        queue.cursor = cursor_id.and_then(|id| queue.position(&id));
        queue
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn get(&self, idx: usize) -> Option<&Track> {
        self.tracks.get(idx)
    }

    /// Track under the cursor
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|idx| self.tracks.get(idx))
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Move the cursor; returns `false` (and leaves it alone) when `idx` is out of range.
    pub fn set_cursor(&mut self, idx: usize) -> bool {
        if idx < self.tracks.len() {
            self.cursor = Some(idx);
            true
        } else {
            false
        }
    }

    /// Make sure `track` is queued and return its index.
    ///
    /// An existing entry is replaced when the incoming copy carries a
    /// playable URI different from the queued one. A resolved entry is never
    /// downgraded to an unresolved one.
    pub fn ensure(&mut self, track: Track) -> usize {
        match self.position(&track.id) {
            Some(idx) => {
                let incoming = track.playable_uri();
                if incoming.is_some() && incoming != self.tracks[idx].playable_uri() {
                    self.tracks[idx] = track;
                }
                idx
            }
            None => {
                self.tracks.push(track);
                self.tracks.len() - 1
            }
        }
    }

    /// Queue `track` right after the cursor (`at_next`) or at the end.
    ///
    /// Returns the insertion index, or `None` when the id is already queued.
    pub fn insert(&mut self, track: Track, at_next: bool) -> Option<usize> {
        if self.contains(&track.id) {
            return None;
        }

        let idx = match self.cursor {
            Some(cursor) if at_next => cursor + 1,
            _ => self.tracks.len(),
        };
        self.tracks.insert(idx, track);
        Some(idx)
    }

    /// Remove the entry at `idx`, keeping the cursor on the same track when
    /// possible.
    ///
    /// Removing the cursor entry leaves the cursor on the entry that slid into
    /// its place, or on the new last entry, or unset when the queue empties.
    pub fn remove(&mut self, idx: usize) -> Option<Track> {
        if idx >= self.tracks.len() {
            return None;
        }

        let removed = self.tracks.remove(idx);
        self.cursor = match self.cursor {
            None => None,
            Some(cursor) if idx < cursor => Some(cursor - 1),
            Some(cursor) if idx == cursor => {
                if self.tracks.is_empty() {
                    None
                } else {
                    Some(cursor.min(self.tracks.len() - 1))
                }
            }
            Some(cursor) => Some(cursor),
        };
        Some(removed)
    }
}
