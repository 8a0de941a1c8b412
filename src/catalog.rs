//! Playlist files: the catalog as far as the player is concerned
//!
//! A playlist is either a bare array of tracks or an object with a
//! `tracks` array.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::Track;

#[derive(Deserialize)]
#[serde(untagged)]
enum PlaylistFile {
    Tracks(Vec<Track>),
    Named {
        #[serde(default)]
        name: Option<String>,
        tracks: Vec<Track>,
    },
}

pub async fn load_playlist(path: &Path) -> Result<Vec<Track>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read playlist {}", path.display()))?;
    let tracks = parse_playlist(&content)
        .with_context(|| format!("Invalid playlist {}", path.display()))?;

    let unresolved = tracks.iter().filter(|t| t.playable_uri().is_none()).count();
    tracing::info!(path = %path.display(), count = tracks.len(), unresolved, "Playlist loaded");
    Ok(tracks)
}

fn parse_playlist(content: &str) -> Result<Vec<Track>> {
    let tracks = match serde_json::from_str::<PlaylistFile>(content)? {
        PlaylistFile::Tracks(tracks) => tracks,
        PlaylistFile::Named { name, tracks } => {
            if let Some(name) = name {
                tracing::debug!(name = %name, "Named playlist");
            }
            tracks
        }
    };
    Ok(tracks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_bare_array() {
        let tracks = parse_playlist(r#"[{"id":"1","title":"One","uri":"file:///1.mp3"}]"#).unwrap();
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].artist, "");
    }

    #[test]
    fn test_parses_named_playlist() {
        let tracks = parse_playlist(
            r#"{"name":"Mix","tracks":[{"id":"1","title":"One"},{"id":"2","title":"Two","artist":"B"}]}"#,
        )
        .unwrap();
        assert_eq!(tracks.len(), 2);
        assert!(tracks[0].uri.is_none());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_playlist(r#"{"tracks": 3}"#).is_err());
        assert!(parse_playlist("").is_err());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mix.json");
        std::fs::write(&path, r#"[{"id":"1","title":"One"}]"#).unwrap();

        let tracks = load_playlist(&path).await.unwrap();
        assert_eq!(tracks[0].id, "1");

        assert!(load_playlist(&dir.path().join("missing.json")).await.is_err());
    }
}
