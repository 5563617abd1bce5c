use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use super::SharedSamples;

/// Frequency analyser over the tapped playback samples.
///
/// Mirrors the classic web analyser node contract the UI math expects:
/// a 2048-point Hann-windowed FFT, magnitudes normalized by window size,
/// temporal smoothing on the linear magnitudes, then a decibel scale mapped
/// onto 0-255 bytes between the -90 dB floor and the -10 dB ceiling.
///
/// Created lazily on first playback and reused for the session.
pub struct Analyser {
    samples: SharedSamples,
    sample_rate: Arc<AtomicU32>,
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
    buf: Vec<Complex<f32>>,
    /// Smoothed linear magnitudes carried between frames.
    smoothed: Vec<f32>,
    bytes: Vec<u8>,
}

impl Analyser {
    pub const FFT_SIZE: usize = 2048;
    pub const BIN_COUNT: usize = Self::FFT_SIZE / 2;
    pub const MIN_DB: f32 = -90.0;
    pub const MAX_DB: f32 = -10.0;
    pub const SMOOTHING: f32 = 0.85;

    pub fn new(samples: SharedSamples, sample_rate: Arc<AtomicU32>) -> Self {
        let fft = FftPlanner::new().plan_fft_forward(Self::FFT_SIZE);
        let window = (0..Self::FFT_SIZE)
            .map(|i| {
                let x = i as f32 / (Self::FFT_SIZE - 1) as f32;
                0.5 * (1.0 - (std::f32::consts::TAU * x).cos())
            })
            .collect();
        Self {
            samples,
            sample_rate,
            fft,
            window,
            buf: vec![Complex::default(); Self::FFT_SIZE],
            smoothed: vec![0.0; Self::BIN_COUNT],
            bytes: vec![0; Self::BIN_COUNT],
        }
    }

    /// Sample rate of the source currently feeding the tap. 0 before the
    /// first load.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate.load(Ordering::Relaxed)
    }

    /// One frequency-domain snapshot: amplitude bytes (0-255) per bin,
    /// spanning [0, sample_rate / 2].
    pub fn byte_frequency_data(&mut self) -> &[u8] {
        {
            let Ok(buf) = self.samples.lock() else {
                return &self.bytes;
            };
            // Latest window, zero-padded at the old end while the tap warms up.
            let latest: Vec<f32> = buf.iter().rev().take(Self::FFT_SIZE).copied().collect();
            let pad = Self::FFT_SIZE - latest.len();
            for c in self.buf.iter_mut().take(pad) {
                *c = Complex::default();
            }
            for (i, sample) in latest.into_iter().rev().enumerate() {
                let idx = pad + i;
                self.buf[idx] = Complex {
                    re: sample * self.window[idx],
                    im: 0.0,
                };
            }
        }

        self.fft.process(&mut self.buf);

        let range = Self::MAX_DB - Self::MIN_DB;
        for i in 0..Self::BIN_COUNT {
            let magnitude = self.buf[i].norm() / Self::FFT_SIZE as f32;
            let smoothed =
                Self::SMOOTHING * self.smoothed[i] + (1.0 - Self::SMOOTHING) * magnitude;
            self.smoothed[i] = smoothed;

            let db = if smoothed > 0.0 {
                20.0 * smoothed.log10()
            } else {
                Self::MIN_DB
            };
            let scaled = (db - Self::MIN_DB) / range * 255.0;
            self.bytes[i] = scaled.clamp(0.0, 255.0) as u8;
        }

        &self.bytes
    }
}
