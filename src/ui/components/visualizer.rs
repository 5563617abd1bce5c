use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::audio::bars::MAX_HEIGHT;

const GRADIENT: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(" Visualizer ")
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let width = inner.width as usize;
    let height = inner.height as usize;
    if height < 2 || width < 6 {
        let msg = Paragraph::new("♪ resize for visualizer")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(msg, inner);
        return;
    }

    // 2 columns per bar plus a gap; resample the data bars onto whatever
    // fits so the full spectrum is always on screen.
    let cells = (width / 3).clamp(4, app.config.bar_count.max(4));
    let source = &app.bars;
    let source_len = source.len().max(1);

    let mut lines = Vec::with_capacity(height);
    for row in 0..height {
        let threshold = 1.0 - row as f32 / height as f32;
        let mut spans = Vec::with_capacity(cells * 2);

        let padding = width.saturating_sub(cells * 3 - 1) / 2;
        if padding > 0 {
            spans.push(Span::raw(" ".repeat(padding)));
        }

        for cell in 0..cells {
            let start = cell * source_len / cells;
            let end = (((cell + 1) * source_len).div_ceil(cells)).min(source_len);
            let end = end.max(start + 1);

            // Max over the covered bars keeps peaks visible at any width
            let peak = source[start.min(source_len - 1)..end]
                .iter()
                .fold(0.0f32, |acc, &h| acc.max(h));
            let level = (peak / MAX_HEIGHT).clamp(0.0, 1.0);

            let glyph = if level > threshold {
                "██"
            } else if level > threshold - 0.07 {
                "▓▓"
            } else if level > threshold - 0.14 {
                "▒▒"
            } else {
                "  "
            };
            let color = GRADIENT[cell * GRADIENT.len() / cells.max(1) % GRADIENT.len()];
            spans.push(Span::styled(glyph, Style::default().fg(color)));
            if cell < cells - 1 {
                spans.push(Span::raw(" "));
            }
        }
        lines.push(Line::from(spans));
    }

    f.render_widget(Paragraph::new(lines), inner);
}
