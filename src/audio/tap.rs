use rodio::Source;
use std::time::Duration;

use super::{SharedSamples, SAMPLE_CAPACITY};

/// Source adapter that forwards samples unchanged while pushing a mono
/// downmix into the shared analysis buffer.
///
/// Runs on the audio thread, so the buffer is only ever `try_lock`ed; a
/// missed frame is fine, a blocked output callback is not.
pub struct TapSource<S> {
    inner: S,
    samples: SharedSamples,
    pending: f32,
    pending_count: u16,
}

impl<S> TapSource<S>
where
    S: Source<Item = f32>,
{
    pub fn new(inner: S, samples: SharedSamples) -> Self {
        Self {
            inner,
            samples,
            pending: 0.0,
            pending_count: 0,
        }
    }
}

impl<S> Iterator for TapSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.inner.next()?;
        let channels = self.inner.channels().max(1);

        self.pending += sample;
        self.pending_count += 1;
        if self.pending_count >= channels {
            let mono = self.pending / channels as f32;
            self.pending = 0.0;
            self.pending_count = 0;
            if let Ok(mut buf) = self.samples.try_lock() {
                if buf.len() >= SAMPLE_CAPACITY {
                    buf.pop_front();
                }
                buf.push_back(mono);
            }
        }

        Some(sample)
    }
}

impl<S> Source for TapSource<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }
}
