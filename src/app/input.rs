use crossterm::event::{KeyCode, KeyEvent};
use std::path::PathBuf;

use super::{App, InputState};

const VOLUME_STEP: f32 = 0.05;

/// Work the event loop has to spawn on the caller's behalf.
pub enum Action {
    None,
    LoadPaths(Vec<PathBuf>),
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> Action {
    // Popup captures everything while open
    if app.input_state.is_some() {
        match key.code {
            KeyCode::Esc => {
                app.input_state = None;
            }
            KeyCode::Enter => {
                if let Some(input) = app.input_state.take() {
                    let value = input.value.trim().to_string();
                    if !value.is_empty() {
                        return Action::LoadPaths(vec![PathBuf::from(value)]);
                    }
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = app.input_state.as_mut() {
                    input.value.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(input) = app.input_state.as_mut() {
                    input.value.push(c);
                }
            }
            _ => {}
        }
        return Action::None;
    }

    match key.code {
        KeyCode::Char('q') => {
            app.is_running = false;
        }
        KeyCode::Char(' ') => match app.transport.toggle_play() {
            Ok(()) => {
                let msg = if app.is_playing() { "▶ Playing" } else { "⏸ Paused" };
                app.show_toast(msg);
                app.sync_selection();
            }
            Err(err) => app.show_toast(&err.to_string()),
        },
        KeyCode::Char('n') => match app.transport.next_track() {
            Ok(()) => {
                app.sync_selection();
                app.show_toast("⏭ Next track");
            }
            Err(err) => app.show_toast(&err.to_string()),
        },
        KeyCode::Char('p') => match app.transport.previous_track() {
            Ok(()) => {
                app.sync_selection();
                app.show_toast("⏮ Previous track");
            }
            Err(err) => app.show_toast(&err.to_string()),
        },
        KeyCode::Char('r') => match app.transport.play_random() {
            Ok(()) => {
                app.sync_selection();
                app.show_toast("🎲 Random track");
            }
            Err(err) => app.show_toast(&err.to_string()),
        },
        KeyCode::Char('z') => {
            let on = app.transport.toggle_shuffle();
            app.config.shuffle = on;
            app.show_toast(&format!("🔀 Shuffle: {}", if on { "ON" } else { "OFF" }));
        }
        KeyCode::Char('x') => {
            let mode = app.transport.cycle_repeat();
            app.config.repeat = mode;
            app.show_toast(&format!("🔁 Repeat: {}", mode.label()));
        }
        KeyCode::Char('m') => {
            app.transport.toggle_mute();
            app.config.volume = app.transport.volume();
            if app.transport.volume() == 0.0 {
                app.show_toast("🔇 Muted");
            } else {
                app.show_toast(&format!(
                    "🔊 Volume: {}%",
                    (app.transport.volume() * 100.0).round() as u32
                ));
            }
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let volume = app.transport.volume() + VOLUME_STEP;
            app.transport.set_volume(volume);
            app.config.volume = app.transport.volume();
            app.show_toast(&format!(
                "🔊 Volume: {}%",
                (app.transport.volume() * 100.0).round() as u32
            ));
        }
        KeyCode::Char('-') => {
            let volume = app.transport.volume() - VOLUME_STEP;
            app.transport.set_volume(volume);
            app.config.volume = app.transport.volume();
            app.show_toast(&format!(
                "🔉 Volume: {}%",
                (app.transport.volume() * 100.0).round() as u32
            ));
        }
        KeyCode::Char('j') | KeyCode::Down => {
            let len = app.transport.playlist().len();
            if len > 0 && app.playlist_selected < len - 1 {
                app.playlist_selected += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.playlist_selected = app.playlist_selected.saturating_sub(1);
        }
        KeyCode::Enter => {
            if app.transport.playlist().is_empty() {
                app.show_toast("playlist is empty");
            } else {
                match app.transport.play_track(app.playlist_selected) {
                    Ok(()) => app.sync_selection(),
                    Err(err) => app.show_toast(&err.to_string()),
                }
            }
        }
        KeyCode::Char('o') | KeyCode::Char('a') => {
            app.input_state = Some(InputState::new("Add file or folder"));
        }
        _ => {}
    }
    Action::None
}
