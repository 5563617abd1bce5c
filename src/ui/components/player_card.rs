use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::utils::{format_time, truncate};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(
            " sonara ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let width = inner.width.saturating_sub(2) as usize;

    // Track title / artist
    let (title, artist) = match app.transport.current_track() {
        Some(track) => (track.title.clone(), track.artist.clone()),
        None => ("No track loaded".to_string(), String::new()),
    };
    f.render_widget(
        Paragraph::new(Span::styled(
            truncate(&title, width),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            truncate(&artist, width),
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center),
        rows[1],
    );

    // Transport status: play/pause, shuffle, repeat, volume
    let active = Style::default().fg(Color::Cyan);
    let idle = Style::default().fg(Color::DarkGray);
    let shuffle_style = if app.transport.shuffle() { active } else { idle };
    let repeat_style = if app.transport.repeat() == crate::player::RepeatMode::Off {
        idle
    } else {
        active
    };
    let status = Line::from(vec![
        Span::styled(app.play_icon(), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("   "),
        Span::styled("shuffle", shuffle_style),
        Span::raw("   "),
        Span::styled(format!("repeat:{}", app.transport.repeat().label()), repeat_style),
        Span::raw("   "),
        Span::raw(format!(
            "{} {}%",
            app.volume_icon(),
            (app.transport.volume() * 100.0).round() as u32
        )),
    ]);
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), rows[2]);

    // Progress
    let duration = app
        .transport
        .current_track()
        .map(|t| t.duration_secs)
        .unwrap_or(0.0);
    let mut position = app.transport.position_secs();
    if duration > 0.0 {
        position = position.min(duration);
    }
    let ratio = (app.transport.progress_percent() / 100.0).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::Black))
        .ratio(ratio)
        .label(format!(
            "{} / {}",
            format_time(position),
            format_time(duration)
        ));
    f.render_widget(gauge, rows[3]);
}
