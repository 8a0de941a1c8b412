//! Progress bar rendering

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge},
    Frame,
};

use crate::model::PlaybackInfo;
use super::utils::format_duration;

fn status_glyph(is_playing: bool) -> &'static str {
    if is_playing { " ▶" } else { " ⏸" }
}

pub fn render_progress_bar(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let status_text = match &playback.track {
        None => " Nothing playing".to_string(),
        Some(track) => {
            let glyph = status_glyph(playback.is_playing);
            let heart = if playback.favorite { " ♥" } else { "" };
            if track.artist.is_empty() {
                format!("{} {}{}", glyph, track.title, heart)
            } else {
                format!("{} {} | {}{}", glyph, track.title, track.artist, heart)
            }
        }
    };

    let shuffle_text = if playback.shuffle { "Shuffle: On" } else { "Shuffle: Off" };
    let repeat_text = playback.repeat.label();
    let position_text = match playback.cursor {
        Some(cursor) => format!("{}/{}", cursor + 1, playback.queue.len()),
        None => format!("-/{}", playback.queue.len()),
    };

    let time_str = format!(
        "{} / {}",
        format_duration(playback.progress_ms),
        format_duration(playback.duration_ms)
    );

    let progress_ratio = if playback.duration_ms > 0 {
        (playback.progress_ms as f64 / playback.duration_ms as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let title = format!("{} ", status_text);
    let controls_info = format!(" {} | {} | {} ", shuffle_text, repeat_text, position_text);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .title_bottom(Line::from(controls_info).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Green))
        .ratio(progress_ratio)
        .label(time_str);

    frame.render_widget(gauge, area);
}
