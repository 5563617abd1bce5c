use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::ui::utils::{format_time, truncate};

const KEY_HINTS: &str =
    " space:play  n/p:skip  r:random  z:shuffle  x:repeat  m:mute  o:add  q:quit ";

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let count = app.transport.playlist().len();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" Playlist ({count}) "))
        .title_bottom(
            Line::from(Span::styled(
                KEY_HINTS,
                Style::default().fg(Color::DarkGray),
            ))
            .alignment(Alignment::Center),
        )
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if count == 0 {
        let hint = if app.pending_loads > 0 {
            "⏳ probing files…"
        } else {
            "Drop in music: pass paths on the command line or press 'o'"
        };
        f.render_widget(
            Paragraph::new(hint)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let title_width = (inner.width as usize).saturating_sub(14).max(8);
    let items: Vec<ListItem> = app
        .transport
        .playlist()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let is_current = Some(i) == app.transport.current_index();
            let marker = if is_current { "▶ " } else { "  " };
            let name_style = if is_current {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let label = truncate(&format!("{} — {}", track.title, track.artist), title_width);
            ListItem::new(Line::from(vec![
                Span::raw(marker.to_string()),
                Span::styled(label, name_style),
                Span::styled(
                    format!("  {}", format_time(track.duration_secs)),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(app.playlist_selected));
    f.render_stateful_widget(list, inner, &mut state);
}
