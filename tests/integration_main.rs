use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use sonara::library::{load_tracks_with, Track};
use sonara::player::{MediaBackend, PlayerState, RepeatMode, Transport, TransportError};

/// Records every backend call so transport transitions can be asserted
/// without a real audio device.
#[derive(Debug, Default)]
struct BackendLog {
    loads: Vec<PathBuf>,
    volume: f32,
    position: Duration,
    finished: bool,
    paused: u32,
    resumed: u32,
    stopped: u32,
}

#[derive(Clone, Default)]
struct MockBackend(Arc<Mutex<BackendLog>>);

impl MockBackend {
    fn log(&self) -> Arc<Mutex<BackendLog>> {
        self.0.clone()
    }
}

impl MediaBackend for MockBackend {
    fn load(&mut self, source: &Path) -> Result<()> {
        let mut log = self.0.lock().unwrap();
        log.loads.push(source.to_path_buf());
        log.finished = false;
        Ok(())
    }

    fn resume(&mut self) -> Result<()> {
        self.0.lock().unwrap().resumed += 1;
        Ok(())
    }

    fn pause(&mut self) {
        self.0.lock().unwrap().paused += 1;
    }

    fn stop(&mut self) {
        self.0.lock().unwrap().stopped += 1;
    }

    fn set_volume(&mut self, volume: f32) {
        self.0.lock().unwrap().volume = volume;
    }

    fn position(&self) -> Duration {
        self.0.lock().unwrap().position
    }

    fn finished(&self) -> bool {
        self.0.lock().unwrap().finished
    }
}

fn track(name: &str) -> Track {
    Track {
        title: name.to_string(),
        artist: "Test Artist".to_string(),
        path: PathBuf::from(format!("{name}.mp3")),
        duration_secs: 120.0,
    }
}

fn transport_with(n: usize) -> (Transport, Arc<Mutex<BackendLog>>) {
    let backend = MockBackend::default();
    let log = backend.log();
    let mut transport = Transport::new(Box::new(backend), 1.0, false, RepeatMode::Off);
    transport.append_tracks((0..n).map(|i| track(&format!("t{i}"))).collect());
    (transport, log)
}

#[test]
fn next_track_is_cyclic() {
    let (mut t, _) = transport_with(4);
    t.play_track(0).unwrap();
    for _ in 0..4 {
        t.next_track().unwrap();
    }
    assert_eq!(t.current_index(), Some(0));
}

#[test]
fn navigation_wraps_at_both_ends() {
    let (mut t, _) = transport_with(5);
    t.play_track(0).unwrap();
    t.previous_track().unwrap();
    assert_eq!(t.current_index(), Some(4));
    t.next_track().unwrap();
    assert_eq!(t.current_index(), Some(0));
}

#[test]
fn repeat_mode_cycles_in_order() {
    let (mut t, _) = transport_with(1);
    assert_eq!(t.repeat(), RepeatMode::Off);
    assert_eq!(t.cycle_repeat(), RepeatMode::One);
    assert_eq!(t.cycle_repeat(), RepeatMode::All);
    assert_eq!(t.cycle_repeat(), RepeatMode::Off);
}

#[test]
fn random_never_picks_the_current_track() {
    let (mut t, _) = transport_with(5);
    t.play_track(2).unwrap();
    for _ in 0..50 {
        let before = t.current_index();
        t.play_random().unwrap();
        assert_ne!(t.current_index(), before);
    }
}

#[test]
fn random_on_a_single_track_replays_it() {
    let (mut t, _) = transport_with(1);
    t.play_track(0).unwrap();
    t.play_random().unwrap();
    assert_eq!(t.current_index(), Some(0));
    assert_eq!(t.state(), PlayerState::Playing);
}

#[test]
fn track_end_with_repeat_one_replays_the_same_index() {
    let (mut t, log) = transport_with(3);
    t.play_track(1).unwrap();
    t.cycle_repeat(); // One
    t.handle_track_end().unwrap();
    assert_eq!(t.current_index(), Some(1));
    assert_eq!(t.state(), PlayerState::Playing);
    // Loaded twice: the initial play plus the replay
    assert_eq!(log.lock().unwrap().loads.len(), 2);
}

#[test]
fn track_end_with_repeat_all_wraps_to_the_start() {
    let (mut t, _) = transport_with(3);
    t.play_track(2).unwrap();
    t.cycle_repeat();
    t.cycle_repeat(); // All
    t.handle_track_end().unwrap();
    assert_eq!(t.current_index(), Some(0));
    assert_eq!(t.state(), PlayerState::Playing);
}

#[test]
fn track_end_with_shuffle_wraps_even_without_repeat() {
    let (mut t, _) = transport_with(3);
    t.play_track(2).unwrap();
    t.toggle_shuffle();
    t.handle_track_end().unwrap();
    assert_eq!(t.current_index(), Some(0));
}

#[test]
fn track_end_mid_playlist_advances() {
    let (mut t, _) = transport_with(3);
    t.play_track(0).unwrap();
    t.handle_track_end().unwrap();
    assert_eq!(t.current_index(), Some(1));
    assert_eq!(t.state(), PlayerState::Playing);
}

#[test]
fn track_end_on_the_last_track_stops_and_stays_parked() {
    let (mut t, log) = transport_with(3);
    t.play_track(2).unwrap();
    t.handle_track_end().unwrap();
    assert_eq!(t.current_index(), Some(2));
    assert_eq!(t.state(), PlayerState::Stopped);
    assert!(log.lock().unwrap().stopped >= 1);
}

#[test]
fn poll_end_reacts_only_to_a_finished_playing_backend() {
    let (mut t, log) = transport_with(2);
    t.play_track(0).unwrap();
    assert!(!t.poll_end().unwrap());

    log.lock().unwrap().finished = true;
    assert!(t.poll_end().unwrap());
    assert_eq!(t.current_index(), Some(1));

    // Paused transport ignores a drained sink
    t.toggle_play().unwrap();
    log.lock().unwrap().finished = true;
    assert!(!t.poll_end().unwrap());
}

#[test]
fn toggle_play_walks_stopped_playing_paused() {
    let (mut t, log) = transport_with(2);
    assert_eq!(t.state(), PlayerState::Stopped);

    t.toggle_play().unwrap();
    assert_eq!(t.state(), PlayerState::Playing);
    assert_eq!(t.current_index(), Some(0));
    assert_eq!(log.lock().unwrap().loads.len(), 1);

    t.toggle_play().unwrap();
    assert_eq!(t.state(), PlayerState::Paused);
    assert_eq!(log.lock().unwrap().paused, 1);

    t.toggle_play().unwrap();
    assert_eq!(t.state(), PlayerState::Playing);
    assert_eq!(log.lock().unwrap().resumed, 1);
    // Resume must not reload the source
    assert_eq!(log.lock().unwrap().loads.len(), 1);
}

#[test]
fn empty_playlist_operations_are_reported_not_fatal() {
    let (mut t, _) = transport_with(0);
    assert!(matches!(
        t.toggle_play(),
        Err(TransportError::EmptyPlaylist)
    ));
    assert!(matches!(
        t.next_track(),
        Err(TransportError::EmptyPlaylist)
    ));
    assert!(matches!(
        t.previous_track(),
        Err(TransportError::EmptyPlaylist)
    ));
    assert!(matches!(
        t.play_random(),
        Err(TransportError::EmptyPlaylist)
    ));
    assert_eq!(t.current_index(), None);
    assert_eq!(t.state(), PlayerState::Stopped);
}

#[test]
fn out_of_range_index_is_rejected() {
    let (mut t, _) = transport_with(3);
    assert!(matches!(
        t.play_track(7),
        Err(TransportError::IndexOutOfRange { index: 7, len: 3 })
    ));
}

#[test]
fn first_fill_signals_auto_start_exactly_once() {
    let (mut t, _) = transport_with(0);
    assert!(!t.append_tracks(Vec::new()));
    assert!(t.append_tracks(vec![track("a"), track("b")]));
    assert_eq!(t.current_index(), Some(0));
    assert!(!t.append_tracks(vec![track("c")]));
    assert_eq!(t.playlist().len(), 3);
}

#[test]
fn mute_round_trip_restores_the_exact_volume() {
    let (mut t, log) = transport_with(1);
    t.set_volume(0.7);
    t.toggle_mute();
    assert_eq!(t.volume(), 0.0);
    assert_eq!(log.lock().unwrap().volume, 0.0);
    t.toggle_mute();
    assert_eq!(t.volume(), 0.7);
    assert_eq!(log.lock().unwrap().volume, 0.7);
}

#[test]
fn unmute_without_history_restores_full_volume() {
    let backend = MockBackend::default();
    let mut t = Transport::new(Box::new(backend), 0.0, false, RepeatMode::Off);
    t.toggle_mute();
    assert_eq!(t.volume(), 1.0);
}

#[test]
fn set_volume_clamps_to_unit_range() {
    let (mut t, _) = transport_with(1);
    t.set_volume(1.5);
    assert_eq!(t.volume(), 1.0);
    t.set_volume(-0.2);
    assert_eq!(t.volume(), 0.0);
}

#[test]
fn progress_is_zero_without_a_known_duration() {
    let (mut t, log) = transport_with(1);
    assert_eq!(t.progress_percent(), 0.0);

    t.play_track(0).unwrap();
    log.lock().unwrap().position = Duration::from_secs(30);
    assert!((t.progress_percent() - 25.0).abs() < 1e-9);

    // Unknown duration never divides by zero
    let backend = MockBackend::default();
    let mut t = Transport::new(Box::new(backend), 1.0, false, RepeatMode::Off);
    t.append_tracks(vec![Track {
        duration_secs: 0.0,
        ..track("unknown")
    }]);
    t.play_track(0).unwrap();
    assert_eq!(t.progress_percent(), 0.0);
}

#[tokio::test]
async fn ingestion_keeps_submission_order_despite_completion_order() {
    let paths = vec![
        PathBuf::from("a.mp3"),
        PathBuf::from("b.mp3"),
        PathBuf::from("c.mp3"),
    ];
    // a resolves last, b first; playlist order must still be a, b, c
    let outcome = load_tracks_with(paths, |path: &Path| {
        let stem = path.file_stem().unwrap().to_string_lossy().to_string();
        let delay = match stem.as_str() {
            "a" => 80,
            "b" => 0,
            _ => 40,
        };
        std::thread::sleep(Duration::from_millis(delay));
        Ok(Track {
            title: stem,
            artist: "Test Artist".to_string(),
            path: path.to_path_buf(),
            duration_secs: 1.0,
        })
    })
    .await;

    let titles: Vec<&str> = outcome.tracks.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a", "b", "c"]);
    assert!(outcome.skipped.is_empty());
}

#[tokio::test]
async fn non_audio_files_are_skipped_and_reported() {
    let outcome = load_tracks_with(
        vec![PathBuf::from("song.mp3"), PathBuf::from("notes.txt")],
        |path: &Path| {
            Ok(Track {
                title: "song".to_string(),
                artist: "Test Artist".to_string(),
                path: path.to_path_buf(),
                duration_secs: 1.0,
            })
        },
    )
    .await;

    assert_eq!(outcome.tracks.len(), 1);
    assert_eq!(outcome.skipped, vec![PathBuf::from("notes.txt")]);
}

#[tokio::test]
async fn failing_probes_end_up_in_skipped() {
    let outcome = load_tracks_with(vec![PathBuf::from("broken.mp3")], |_: &Path| {
        Err(anyhow::anyhow!("corrupt stream"))
    })
    .await;
    assert!(outcome.tracks.is_empty());
    assert_eq!(outcome.skipped, vec![PathBuf::from("broken.mp3")]);
}
