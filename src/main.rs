use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::AtomicU32;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{info, warn};

use sonara::app::{self, App, AppEvent};
use sonara::audio::{self, vis, Analyser};
use sonara::config::AppConfig;
use sonara::library;
use sonara::player::{RodioBackend, Transport};
use sonara::ui;

/// sonara - a minimalist terminal music player with a spectrum visualizer 🎵
#[derive(Parser, Debug)]
#[command(name = "sonara", version, about)]
struct Args {
    /// Audio files or directories to queue at startup
    paths: Vec<PathBuf>,

    /// Number of visualizer bars (8-256)
    #[arg(long)]
    bars: Option<usize>,

    /// Initial volume (0.0 - 1.0)
    #[arg(long)]
    volume: Option<f32>,
}

/// The terminal owns stdout, so logs go to a file under the data dir.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let dir = dirs::data_dir()?.join("sonara");
    std::fs::create_dir_all(&dir).ok()?;
    let appender = tracing_appender::rolling::never(dir, "sonara.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_writer(writer)
        .with_ansi(false)
        .with_max_level(tracing::Level::INFO)
        .init();
    Some(guard)
}

fn spawn_ingest(app: &mut App, tx: mpsc::Sender<AppEvent>, paths: Vec<PathBuf>) {
    app.pending_loads += 1;
    tokio::spawn(async move {
        let outcome = library::load_tracks(paths).await;
        let _ = tx.send(AppEvent::TracksLoaded(outcome)).await;
    });
}

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();
    let args = Args::parse();
    let _log_guard = init_logging();

    let mut config = AppConfig::load();
    if let Some(volume) = args.volume {
        config.volume = volume.clamp(0.0, 1.0);
    }
    if let Some(bars) = args.bars {
        config.bar_count = bars;
    }
    config.bar_count = config.bar_count.clamp(8, 256);

    // Shared audio plumbing: the playback tap feeds this buffer, the
    // analyser drains it.
    let samples = audio::shared_samples();
    let sample_rate = Arc::new(AtomicU32::new(0));

    // The stream must outlive every sink; it is not Send, so it lives here.
    let (_audio_stream, audio_handle) =
        rodio::OutputStream::try_default().context("failed to open an audio output device")?;
    let backend = RodioBackend::new(audio_handle, samples.clone(), sample_rate.clone());
    let transport = Transport::new(
        Box::new(backend),
        config.volume,
        config.shuffle,
        config.repeat,
    );
    let mut app = App::new(transport, config);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal_backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(terminal_backend)?;

    let (tx, mut rx) = mpsc::channel(100);

    // 1. Input Event Task
    let tx_input = tx.clone();
    tokio::spawn(async move {
        let mut reader = EventStream::new();
        while let Some(Ok(event)) = reader.next().await {
            if tx_input.send(AppEvent::Input(event)).await.is_err() {
                break;
            }
        }
    });

    // 2. Tick Task: progress refresh + end-of-track polling
    let tx_tick = tx.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(100));
        loop {
            interval.tick().await;
            if tx_tick.send(AppEvent::Tick).await.is_err() {
                break;
            }
        }
    });

    // Startup ingestion from CLI paths
    if !args.paths.is_empty() {
        spawn_ingest(&mut app, tx.clone(), args.paths.clone());
    }

    // Analysis state is created lazily on first playback, then reused.
    let mut analyser: Option<Arc<Mutex<Analyser>>> = None;
    let mut vis_handle: Option<vis::VisualizerHandle> = None;

    while app.is_running {
        terminal.draw(|f| ui::ui(f, &mut app))?;

        let Some(event) = rx.recv().await else { break };
        match event {
            AppEvent::Input(Event::Key(key)) => {
                if key.kind == KeyEventKind::Press {
                    match app::handle_key(&mut app, key) {
                        app::Action::LoadPaths(paths) => {
                            spawn_ingest(&mut app, tx.clone(), paths);
                        }
                        app::Action::None => {}
                    }
                }
            }
            AppEvent::Input(_) => {}
            AppEvent::Tick => match app.transport.poll_end() {
                Ok(true) => app.sync_selection(),
                Ok(false) => {}
                Err(err) => warn!(error = %err, "track-end handling failed"),
            },
            AppEvent::TracksLoaded(outcome) => {
                app.pending_loads = app.pending_loads.saturating_sub(1);
                let added = outcome.tracks.len();
                let skipped = outcome.skipped.len();
                let first_fill = app.transport.append_tracks(outcome.tracks);
                if skipped > 0 {
                    app.show_toast(&format!(
                        "Queued {added} track(s), skipped {skipped} unsupported"
                    ));
                } else if added > 0 {
                    app.show_toast(&format!("Queued {added} track(s)"));
                }
                if first_fill {
                    if let Err(err) = app.transport.play_track(0) {
                        app.show_toast(&err.to_string());
                    }
                    app.sync_selection();
                }
            }
            AppEvent::VisFrame(frame) => {
                if app.is_playing() {
                    app.bars = frame;
                }
            }
        }

        // Visualizer lifecycle: one repeating task, alive only while Playing.
        if app.is_playing() {
            if vis_handle.is_none() {
                let shared = analyser.get_or_insert_with(|| {
                    Arc::new(Mutex::new(Analyser::new(
                        samples.clone(),
                        sample_rate.clone(),
                    )))
                });
                vis_handle = Some(vis::spawn(shared.clone(), app.config.bar_count, tx.clone()));
            }
        } else if let Some(handle) = vis_handle.take() {
            handle.stop();
            app.reset_bars();
        }
    }

    app.config.save();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    info!("clean shutdown");
    Ok(())
}
