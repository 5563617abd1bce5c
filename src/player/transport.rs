use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::traits::{MediaBackend, PlayerState};
use crate::library::Track;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    #[default]
    Off,
    One,
    All,
}

impl RepeatMode {
    /// Off → One → All → Off
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::One,
            Self::One => Self::All,
            Self::All => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::One => "one",
            Self::All => "all",
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("playlist is empty")]
    EmptyPlaylist,
    #[error("track index {index} out of range ({len} tracks)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Playback transport: owns the playlist, the current index and the
/// play/pause/shuffle/repeat state, and decides what plays next.
///
/// Invariant: `current` is a valid index whenever the playlist is non-empty,
/// `None` only while it is empty.
pub struct Transport {
    backend: Box<dyn MediaBackend>,
    playlist: Vec<Track>,
    current: Option<usize>,
    state: PlayerState,
    shuffle: bool,
    repeat: RepeatMode,
    volume: f32,
    /// Pre-mute volume, restored on unmute. 1.0 until the first mute.
    last_volume: f32,
}

impl Transport {
    pub fn new(
        mut backend: Box<dyn MediaBackend>,
        volume: f32,
        shuffle: bool,
        repeat: RepeatMode,
    ) -> Self {
        let volume = volume.clamp(0.0, 1.0);
        backend.set_volume(volume);
        Self {
            backend,
            playlist: Vec::new(),
            current: None,
            state: PlayerState::Stopped,
            shuffle,
            repeat,
            volume,
            last_volume: 1.0,
        }
    }

    /// Append tracks in the order given. Returns true when this call filled a
    /// previously empty playlist, which is the caller's cue to auto-start.
    pub fn append_tracks(&mut self, tracks: Vec<Track>) -> bool {
        let was_empty = self.playlist.is_empty();
        self.playlist.extend(tracks);
        if self.current.is_none() && !self.playlist.is_empty() {
            self.current = Some(0);
        }
        was_empty && !self.playlist.is_empty()
    }

    /// Space bar semantics: start at the top if nothing is loaded yet,
    /// otherwise flip between playing and paused.
    pub fn toggle_play(&mut self) -> Result<(), TransportError> {
        match self.state {
            PlayerState::Playing => {
                self.backend.pause();
                self.state = PlayerState::Paused;
                Ok(())
            }
            PlayerState::Paused => {
                self.backend.resume()?;
                self.state = PlayerState::Playing;
                Ok(())
            }
            PlayerState::Stopped => {
                if self.playlist.is_empty() {
                    return Err(TransportError::EmptyPlaylist);
                }
                self.play_track(0)
            }
        }
    }

    pub fn play_track(&mut self, index: usize) -> Result<(), TransportError> {
        let len = self.playlist.len();
        if index >= len {
            return Err(TransportError::IndexOutOfRange { index, len });
        }
        self.current = Some(index);
        let path = self.playlist[index].path.clone();
        self.backend.load(&path)?;
        self.state = PlayerState::Playing;
        Ok(())
    }

    pub fn next_track(&mut self) -> Result<(), TransportError> {
        let n = self.playlist.len();
        if n == 0 {
            return Err(TransportError::EmptyPlaylist);
        }
        let i = self.current.unwrap_or(0);
        self.play_track((i + 1) % n)
    }

    pub fn previous_track(&mut self) -> Result<(), TransportError> {
        let n = self.playlist.len();
        if n == 0 {
            return Err(TransportError::EmptyPlaylist);
        }
        let i = self.current.unwrap_or(0);
        self.play_track((i + n - 1) % n)
    }

    /// Flips the flag only. Manual next/previous stay sequential; the flag is
    /// consulted by the track-end policy.
    pub fn toggle_shuffle(&mut self) -> bool {
        self.shuffle = !self.shuffle;
        self.shuffle
    }

    pub fn cycle_repeat(&mut self) -> RepeatMode {
        self.repeat = self.repeat.cycle();
        self.repeat
    }

    /// Uniform pick over [0, n), rejecting the current index while n > 1.
    pub fn play_random(&mut self) -> Result<(), TransportError> {
        let n = self.playlist.len();
        if n == 0 {
            return Err(TransportError::EmptyPlaylist);
        }
        let mut index = fastrand::usize(..n);
        while n > 1 && Some(index) == self.current {
            index = fastrand::usize(..n);
        }
        self.play_track(index)
    }

    /// Track-end policy, in priority order: repeat-one replays, repeat-all or
    /// shuffle wrap-advances, otherwise advance until the last track and stop
    /// there (index stays parked on the last track).
    pub fn handle_track_end(&mut self) -> Result<(), TransportError> {
        let Some(current) = self.current else {
            return Ok(());
        };
        if self.repeat == RepeatMode::One {
            return self.play_track(current);
        }
        if self.repeat == RepeatMode::All || self.shuffle {
            return self.next_track();
        }
        if current + 1 < self.playlist.len() {
            return self.next_track();
        }
        self.backend.stop();
        self.state = PlayerState::Stopped;
        Ok(())
    }

    /// Poll the backend for a natural end of track. Returns true when the
    /// transport reacted (caller should refresh whatever mirrors the index).
    pub fn poll_end(&mut self) -> Result<bool, TransportError> {
        if self.state == PlayerState::Playing && self.backend.finished() {
            self.handle_track_end()?;
            return Ok(true);
        }
        Ok(false)
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.backend.set_volume(self.volume);
    }

    /// Mute remembers the exact pre-mute volume; unmute restores it
    /// (1.0 when nothing was ever remembered).
    pub fn toggle_mute(&mut self) {
        if self.volume > 0.0 {
            self.last_volume = self.volume;
            self.set_volume(0.0);
        } else {
            self.set_volume(self.last_volume);
        }
    }

    /// Progress through the current track as a percentage. 0 whenever the
    /// duration is unknown, so no NaN ever reaches the display.
    pub fn progress_percent(&self) -> f64 {
        let duration = self.current_track().map(|t| t.duration_secs).unwrap_or(0.0);
        if duration <= 0.0 {
            return 0.0;
        }
        self.position_secs() / duration * 100.0
    }

    pub fn position_secs(&self) -> f64 {
        self.backend.position().as_secs_f64()
    }

    pub fn playlist(&self) -> &[Track] {
        &self.playlist
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current.and_then(|i| self.playlist.get(i))
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat(&self) -> RepeatMode {
        self.repeat
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }
}
