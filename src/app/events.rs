use crossterm::event::Event;

use crate::library::LoadOutcome;

pub enum AppEvent {
    Input(Event),
    Tick,
    TracksLoaded(LoadOutcome),
    VisFrame(Vec<f32>),
}
