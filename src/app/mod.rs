pub mod events;
pub mod input;

pub use events::AppEvent;
pub use input::{handle_key, Action};

use std::time::{Duration, Instant};

use crate::audio::bars::REST_HEIGHT;
use crate::config::AppConfig;
use crate::player::{PlayerState, Transport};

const TOAST_TTL: Duration = Duration::from_secs(2);

/// Text entry popup state (add file / folder).
pub struct InputState {
    pub prompt: &'static str,
    pub value: String,
}

impl InputState {
    pub fn new(prompt: &'static str) -> Self {
        Self {
            prompt,
            value: String::new(),
        }
    }
}

/// Top-level application state. One explicit instance, owned by the event
/// loop; there is no global player.
pub struct App {
    pub transport: Transport,
    pub config: AppConfig,
    /// Current visualizer bar heights in display units.
    pub bars: Vec<f32>,
    pub playlist_selected: usize,
    pub input_state: Option<InputState>,
    /// Ingest passes still in flight (drives the "loading" hint).
    pub pending_loads: usize,
    pub is_running: bool,
    toast: Option<(String, Instant)>,
}

impl App {
    pub fn new(transport: Transport, config: AppConfig) -> Self {
        let bar_count = config.bar_count;
        Self {
            transport,
            config,
            bars: vec![REST_HEIGHT; bar_count],
            playlist_selected: 0,
            input_state: None,
            pending_loads: 0,
            is_running: true,
            toast: None,
        }
    }

    pub fn show_toast(&mut self, msg: &str) {
        self.toast = Some((msg.to_string(), Instant::now()));
    }

    pub fn active_toast(&self) -> Option<&str> {
        self.toast
            .as_ref()
            .filter(|(_, at)| at.elapsed() < TOAST_TTL)
            .map(|(msg, _)| msg.as_str())
    }

    pub fn is_playing(&self) -> bool {
        self.transport.state() == PlayerState::Playing
    }

    /// Park all bars at the resting height.
    pub fn reset_bars(&mut self) {
        for bar in &mut self.bars {
            *bar = REST_HEIGHT;
        }
    }

    /// Keep the playlist cursor on the playing track after the transport
    /// moves it.
    pub fn sync_selection(&mut self) {
        if let Some(index) = self.transport.current_index() {
            self.playlist_selected = index;
        }
    }

    // Icon-state selectors; the UI renders these verbatim.

    pub fn play_icon(&self) -> &'static str {
        if self.is_playing() {
            "⏸"
        } else {
            "▶"
        }
    }

    /// Muted, low (under 50%) or high.
    pub fn volume_icon(&self) -> &'static str {
        let volume = self.transport.volume();
        if volume == 0.0 {
            "🔇"
        } else if volume < 0.5 {
            "🔉"
        } else {
            "🔊"
        }
    }
}
