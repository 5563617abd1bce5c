use anyhow::{Context, Result};
use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::Accessor;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

pub const AUDIO_EXTENSIONS: &[&str] =
    &["mp3", "flac", "wav", "ogg", "oga", "m4a", "aac", "opus"];

/// One playlist entry. Immutable once added.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub title: String,
    pub artist: String,
    pub path: PathBuf,
    pub duration_secs: f64,
}

pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| AUDIO_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Expand directories recursively; plain files pass through. Directory
/// contents come back sorted so queue order is stable across runs.
pub fn expand_paths(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut out = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut entries: Vec<PathBuf> = WalkDir::new(path)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .collect();
            entries.sort();
            out.extend(entries);
        } else {
            out.push(path.clone());
        }
    }
    out
}

/// Result of one ingest pass. Skipped files are a reportable condition, not
/// a silent drop.
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub tracks: Vec<Track>,
    pub skipped: Vec<PathBuf>,
}

/// Probe the given paths and build tracks, preserving submission order.
pub async fn load_tracks(paths: Vec<PathBuf>) -> LoadOutcome {
    load_tracks_with(paths, probe_track).await
}

/// Same, with the per-file probe injected. Probes fan out on blocking tasks
/// and are joined with an all-complete barrier; `join_all` hands results
/// back in submission order no matter which probe finishes first.
pub async fn load_tracks_with<F>(paths: Vec<PathBuf>, probe: F) -> LoadOutcome
where
    F: Fn(&Path) -> Result<Track> + Send + Sync + Clone + 'static,
{
    let mut outcome = LoadOutcome::default();
    let mut audio = Vec::new();
    for path in expand_paths(&paths) {
        if is_audio_file(&path) {
            audio.push(path);
        } else {
            debug!(path = %path.display(), "ignoring non-audio file");
            outcome.skipped.push(path);
        }
    }

    let probes: Vec<_> = audio
        .iter()
        .cloned()
        .map(|path| {
            let probe = probe.clone();
            tokio::task::spawn_blocking(move || probe(&path))
        })
        .collect();

    for (path, joined) in audio
        .into_iter()
        .zip(futures::future::join_all(probes).await)
    {
        match joined {
            Ok(Ok(track)) => outcome.tracks.push(track),
            Ok(Err(err)) => {
                warn!(path = %path.display(), error = %err, "failed to probe file");
                outcome.skipped.push(path);
            }
            Err(err) => {
                warn!(path = %path.display(), error = %err, "probe task panicked");
                outcome.skipped.push(path);
            }
        }
    }
    outcome
}

/// Duration and tags via lofty. Tagless files fall back to the file stem and
/// a "Local File" artist.
pub fn probe_track(path: &Path) -> Result<Track> {
    let tagged = lofty::read_from_path(path)
        .with_context(|| format!("unreadable audio file: {}", path.display()))?;
    let duration = tagged.properties().duration();

    let tag = tagged.primary_tag().or_else(|| tagged.first_tag());
    let title = tag
        .and_then(|t| t.title().map(|s| s.to_string()))
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| file_stem(path));
    let artist = tag
        .and_then(|t| t.artist().map(|s| s.to_string()))
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| "Local File".to_string());

    Ok(Track {
        title,
        artist,
        path: path.to_path_buf(),
        duration_secs: duration.as_secs_f64(),
    })
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("Unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(is_audio_file(Path::new("a.mp3")));
        assert!(is_audio_file(Path::new("b.FLAC")));
        assert!(!is_audio_file(Path::new("cover.jpg")));
        assert!(!is_audio_file(Path::new("noext")));
    }
}
