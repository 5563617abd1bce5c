pub mod analyser;
pub mod bars;
pub mod tap;
pub mod vis;

pub use analyser::Analyser;
pub use bars::BarMapper;
pub use tap::TapSource;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Rolling mono sample window shared between the playback tap and the
/// analyser. The audio thread pushes, the visualizer task reads.
pub type SharedSamples = Arc<Mutex<VecDeque<f32>>>;

/// Enough for one FFT window plus slack.
pub const SAMPLE_CAPACITY: usize = 8192;

pub fn shared_samples() -> SharedSamples {
    Arc::new(Mutex::new(VecDeque::with_capacity(SAMPLE_CAPACITY)))
}
