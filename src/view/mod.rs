//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared utility functions (formatting, scrollable lists)
//! - `player`: Now-playing panel
//! - `queue`: Up-next list
//! - `library`: Playlist catalog and favorites browser
//! - `progress`: Progress bar rendering

mod utils;
mod player;
mod queue;
mod library;
mod progress;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::PlaybackInfo;

const QUEUE_HINTS: &[(&str, &str)] = &[
    ("↑/↓", "select"),
    ("Enter", "play"),
    ("D", "remove"),
    ("Esc", "hide queue"),
];

const LIBRARY_HINTS: &[(&str, &str)] = &[
    ("↑/↓", "select"),
    ("Enter", "play"),
    ("O", "open"),
    ("A", "add to queue"),
    ("N", "play next"),
    ("Tab", "playlist/favorites"),
    ("Esc", "hide library"),
];

const PLAYER_HINTS: &[(&str, &str)] = &[
    ("Space", "play/pause"),
    ("N/P", "next/prev"),
    ("S", "shuffle"),
    ("R", "repeat"),
    ("U", "queue"),
    ("L", "library"),
    ("F", "favorite"),
    ("Q", "quit"),
];

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, playback: &PlaybackInfo) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Player and/or side pane
                Constraint::Length(3), // Progress bar with playback info
                Constraint::Length(1), // Key hints
            ])
            .split(frame.area());

        Self::render_main(frame, chunks[0], playback);
        progress::render_progress_bar(frame, chunks[1], playback);
        Self::render_hints(frame, chunks[2], playback);
    }

    fn render_main(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
        let side_pane = playback.library_visible || playback.queue_visible;
        match (playback.player_visible, side_pane) {
            (true, true) => {
                let main_chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .split(area);
                player::render_player(frame, main_chunks[0], playback);
                Self::render_side_pane(frame, main_chunks[1], playback);
            }
            (false, true) => Self::render_side_pane(frame, area, playback),
            (true, false) => player::render_player(frame, area, playback),
            (false, false) => player::render_idle(frame, area),
        }
    }

    fn render_side_pane(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
        if playback.library_visible {
            library::render_library(frame, area, playback);
        } else {
            queue::render_up_next(frame, area, playback);
        }
    }

    fn render_hints(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
        let hints = if playback.library_visible {
            LIBRARY_HINTS
        } else if playback.queue_visible {
            QUEUE_HINTS
        } else {
            PLAYER_HINTS
        };
        let spans: Vec<Span> = hints
            .iter()
            .flat_map(|(key, desc)| {
                [
                    Span::styled(format!(" {} ", key), Style::default().fg(Color::Green)),
                    Span::styled(format!("{}  ", desc), Style::default().fg(Color::DarkGray)),
                ]
            })
            .collect();
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}
