//! Now-playing panel and idle placeholder

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::PlaybackInfo;

pub fn render_player(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Now Playing ")
        .padding(Padding::new(2, 2, 1, 1));

    let Some(track) = &playback.track else {
        render_idle(frame, area);
        return;
    };

    let label_style = Style::default().fg(Color::DarkGray);
    let field = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(format!("{:<8}", label), label_style),
            Span::raw(value),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            track.title.clone(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(track.artist.clone()),
        Line::from(""),
    ];
    if let Some(album) = &track.album {
        lines.push(field("Album", album.clone()));
    }
    lines.push(field(
        "Source",
        track.playable_uri().unwrap_or("(unresolved)").to_string(),
    ));
    if let Some(artwork) = &track.artwork {
        lines.push(field("Artwork", artwork.clone()));
    }
    if playback.favorite {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("♥ Favorite", Style::default().fg(Color::Magenta))));
    }

    let panel = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    frame.render_widget(panel, area);
}

pub fn render_idle(frame: &mut Frame, area: Rect) {
    let content = Paragraph::new(
        "Nothing open\n\nPress L to browse the library or U to show the queue\nSelect a track and press Enter to play it",
    )
    .style(Style::default().fg(Color::DarkGray))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(content, area);
}
