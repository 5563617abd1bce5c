use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::app::App;

pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();

    // Toast, bottom-right corner
    if let Some(msg) = app.active_toast() {
        let msg = format!(" {msg} ");
        let w = (msg.chars().count() as u16).min(area.width);
        let rect = Rect::new(
            area.width.saturating_sub(w + 1),
            area.height.saturating_sub(2),
            w,
            1,
        )
        .intersection(area);
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(msg).style(
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            rect,
        );
    }

    // Add-path input popup
    if let Some(input) = &app.input_state {
        let w = area.width.saturating_sub(8).min(64).max(20);
        let rect = Rect::new(
            area.x + (area.width.saturating_sub(w)) / 2,
            area.y + area.height / 2,
            w,
            3,
        )
        .intersection(area);
        f.render_widget(Clear, rect);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", input.prompt))
            .border_style(Style::default().fg(Color::Cyan));
        let text = Line::from(vec![
            Span::raw(input.value.clone()),
            Span::styled("▏", Style::default().fg(Color::Cyan)),
        ]);
        f.render_widget(Paragraph::new(text).block(block), rect);
    }
}
