use anyhow::{Context, Result};
use rodio::{Decoder, OutputStreamHandle, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

use super::traits::MediaBackend;
use crate::audio::{SharedSamples, TapSource};

/// Output backend on top of a rodio sink.
///
/// Every loaded source is wrapped in a [`TapSource`] so the analyser sees the
/// same samples the speakers do. The sink exposes no playhead, so elapsed
/// time comes from a pause-aware wall clock.
///
/// The `OutputStream` this handle belongs to must stay alive at the
/// composition root; the stream itself is not `Send`.
pub struct RodioBackend {
    handle: OutputStreamHandle,
    sink: Option<Sink>,
    samples: SharedSamples,
    sample_rate: Arc<AtomicU32>,
    volume: f32,
    started: Option<Instant>,
    accumulated: Duration,
}

impl RodioBackend {
    pub fn new(
        handle: OutputStreamHandle,
        samples: SharedSamples,
        sample_rate: Arc<AtomicU32>,
    ) -> Self {
        Self {
            handle,
            sink: None,
            samples,
            sample_rate,
            volume: 1.0,
            started: None,
            accumulated: Duration::ZERO,
        }
    }
}

impl MediaBackend for RodioBackend {
    fn load(&mut self, source: &Path) -> Result<()> {
        if let Some(old) = self.sink.take() {
            old.stop();
        }

        let file =
            File::open(source).with_context(|| format!("cannot open {}", source.display()))?;
        let decoder = Decoder::new(BufReader::new(file))
            .with_context(|| format!("cannot decode {}", source.display()))?
            .convert_samples::<f32>();
        self.sample_rate.store(decoder.sample_rate(), Ordering::Relaxed);

        let sink = Sink::try_new(&self.handle).context("cannot create playback sink")?;
        sink.set_volume(self.volume);
        sink.append(TapSource::new(decoder, self.samples.clone()));
        sink.play();
        self.sink = Some(sink);

        self.accumulated = Duration::ZERO;
        self.started = Some(Instant::now());
        info!(path = %source.display(), "loaded source");
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        if let Some(sink) = &self.sink {
            sink.play();
            if self.started.is_none() {
                self.started = Some(Instant::now());
            }
        }
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.started = None;
        self.accumulated = Duration::ZERO;
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }

    fn position(&self) -> Duration {
        match self.started {
            Some(started) => self.accumulated + started.elapsed(),
            None => self.accumulated,
        }
    }

    fn finished(&self) -> bool {
        self.sink.as_ref().map(|s| s.empty()).unwrap_or(false)
    }
}
