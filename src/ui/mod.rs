pub mod components;
pub mod utils;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::App;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(8),
            Constraint::Percentage(35),
        ])
        .split(f.area());

    components::player_card::render(f, chunks[0], app);
    components::visualizer::render(f, chunks[1], app);
    components::playlist::render(f, chunks[2], app);
    components::popups::render(f, app);
}
