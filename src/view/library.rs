//! Library pane rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::{LibrarySource, PlaybackInfo};
use super::utils::{format_duration, render_scrollable_list, truncate_string};

pub fn render_library(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ({}) ", playback.library_source.label(), playback.library.len()))
        .title_bottom(Line::from(" Tab: switch list ").right_aligned())
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Cyan));

    if playback.library.is_empty() {
        let hint = match playback.library_source {
            LibrarySource::Playlist => "No playlist loaded (start with --playlist <file>)",
            LibrarySource::Favorites => "No favorites yet (press F while a track is current)",
        };
        let empty = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let content_width = area.width.saturating_sub(4) as usize;
    let duration_width = 6;
    let text_width = content_width.saturating_sub(2 + duration_width + 1);
    let current_id = playback.track.as_ref().map(|t| t.id.as_str());

    let items: Vec<ListItem> = playback
        .library
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let queued = playback.queue.iter().any(|q| q.id == track.id);
            let marker = if current_id == Some(track.id.as_str()) {
                "▶ "
            } else if queued {
                "• "
            } else {
                "  "
            };
            let label = if track.artist.is_empty() {
                track.title.clone()
            } else {
                format!("{} - {}", track.title, track.artist)
            };
            let duration = track.duration_ms.map(format_duration).unwrap_or_default();

            let style = if i == playback.library_selected {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else if track.playable_uri().is_none() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };

            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::raw(truncate_string(&label, text_width)),
                Span::raw(format!(" {:>width$}", duration, width = duration_width)),
            ]))
            .style(style)
        })
        .collect();

    render_scrollable_list(frame, area, items, playback.library_selected, block);
}
