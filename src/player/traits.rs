use anyhow::Result;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerState {
    Playing,
    Paused,
    #[default]
    Stopped,
}

/// The unified interface over the host audio output 🔊
///
/// The transport state machine only talks to this trait, so the whole
/// play/pause/advance policy can be driven by a mock in tests.
pub trait MediaBackend: Send {
    /// Load a new source and start playing it from the top.
    fn load(&mut self, source: &Path) -> Result<()>;
    /// Resume a paused source.
    fn resume(&mut self) -> Result<()>;
    fn pause(&mut self);
    /// Drop the current source entirely.
    fn stop(&mut self);
    /// Volume in [0.0, 1.0]. Callers clamp.
    fn set_volume(&mut self, volume: f32);
    /// Elapsed time in the current source.
    fn position(&self) -> Duration;
    /// True once the current source has played to its natural end.
    fn finished(&self) -> bool;
}
