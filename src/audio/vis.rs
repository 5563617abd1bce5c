use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use super::analyser::Analyser;
use super::bars::BarMapper;
use crate::app::AppEvent;

/// ~60 fps, the tick rate the rest of the UI animates at.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Owned handle to the running visualizer task. Dropping the loop is always
/// an explicit `stop`, so a stale frame task can never outlive playback.
pub struct VisualizerHandle {
    stop: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl VisualizerHandle {
    pub fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        self.task.abort();
    }
}

/// Spawn the per-frame bar producer. Emits one `VisFrame` every tick until
/// stopped. The bin mapping is rebuilt whenever the source sample rate
/// changes between tracks.
pub fn spawn(
    analyser: Arc<Mutex<Analyser>>,
    bar_count: usize,
    tx: mpsc::Sender<AppEvent>,
) -> VisualizerHandle {
    let stop = Arc::new(AtomicBool::new(false));
    let stop_flag = stop.clone();

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(FRAME_INTERVAL);
        let mut mapper: Option<BarMapper> = None;

        while !stop_flag.load(Ordering::Relaxed) {
            interval.tick().await;

            let frame = {
                let Ok(mut analyser) = analyser.lock() else {
                    break;
                };
                let rate = analyser.sample_rate();
                if rate == 0 {
                    // Nothing loaded yet; the first `load` sets the rate.
                    continue;
                }
                if mapper.as_ref().map(|m| m.sample_rate()) != Some(rate) {
                    mapper = Some(BarMapper::new(bar_count, Analyser::BIN_COUNT, rate));
                }
                let Some(mapper) = mapper.as_ref() else {
                    continue;
                };
                let data = analyser.byte_frequency_data();
                mapper.heights(data)
            };

            if tx.send(AppEvent::VisFrame(frame)).await.is_err() {
                break;
            }
        }
    });

    VisualizerHandle { stop, task }
}
