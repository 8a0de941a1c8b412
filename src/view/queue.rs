//! Up-next list rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, ListItem, Padding, Paragraph},
    Frame,
};

use crate::model::PlaybackInfo;
use super::utils::{calculate_num_width, format_duration, render_scrollable_list, truncate_string};

pub fn render_up_next(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Up Next ({}) ", playback.queue.len()))
        .padding(Padding::horizontal(1))
        .border_style(Style::default().fg(Color::Green));

    if playback.queue.is_empty() {
        let empty = Paragraph::new("Queue is empty")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    // borders + padding on each side
    let content_width = area.width.saturating_sub(4) as usize;
    let num_width = calculate_num_width(playback.queue.len());
    let duration_width = 6;
    let text_width = content_width.saturating_sub(2 + num_width + duration_width + 2);

    let items: Vec<ListItem> = playback
        .queue
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_current = playback.cursor == Some(i);
            let is_selected = playback.queue_selected == i;

            let marker = if is_current { "▶ " } else { "  " };
            let label = if track.artist.is_empty() {
                track.title.clone()
            } else {
                format!("{} - {}", track.title, track.artist)
            };
            let duration = track.duration_ms.map(format_duration).unwrap_or_default();

            let mut style = if is_current {
                Style::default().fg(Color::Green)
            } else if track.playable_uri().is_none() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            if is_selected {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }

            ListItem::new(Line::from(vec![
                Span::raw(marker),
                Span::raw(format!("{:>width$} ", i + 1, width = num_width)),
                Span::raw(truncate_string(&label, text_width)),
                Span::raw(format!(" {:>width$}", duration, width = duration_width)),
            ]))
            .style(style)
        })
        .collect();

    render_scrollable_list(frame, area, items, playback.queue_selected, block);
}
