use std::fs;
use std::path::Path;

use tracing::{debug, info};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::error::LoadError;
use super::model::Track;
use super::title::title_from_file_name;

fn normalized_extensions(settings: &LibrarySettings) -> Vec<String> {
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect()
}

fn is_audio_file(path: &Path, exts: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn describe_extensions(exts: &[String]) -> String {
    exts.iter()
        .map(|e| format!(".{e}"))
        .collect::<Vec<String>>()
        .join(", ")
}

/// List the supported audio files directly inside `dir`.
///
/// Subdirectories are not entered. Tracks are ordered by file name,
/// case-insensitive, with the exact name as tie-break so the order is
/// deterministic.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Result<Vec<Track>, LoadError> {
    let unavailable = |reason: String| LoadError::DirectoryUnavailable {
        path: dir.to_path_buf(),
        reason,
    };

    let meta = fs::metadata(dir).map_err(|e| unavailable(e.to_string()))?;
    if !meta.is_dir() {
        return Err(unavailable("not a directory".to_string()));
    }

    let exts = normalized_extensions(settings);
    let mut tracks: Vec<Track> = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(settings.follow_links)
    {
        let entry = match entry {
            Ok(entry) => entry,
            // The root itself could not be listed.
            Err(e) if e.depth() == 0 => return Err(unavailable(e.to_string())),
            Err(e) => {
                debug!(error = %e, "skipping unreadable directory entry");
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() || !is_audio_file(path, &exts) {
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        tracks.push(Track {
            path: path.to_path_buf(),
            title: title_from_file_name(&file_name, &exts),
            artist: settings.artist.clone(),
            file_name,
        });
    }

    if tracks.is_empty() {
        return Err(LoadError::EmptyDirectory {
            path: dir.to_path_buf(),
            extensions: describe_extensions(&exts),
        });
    }

    tracks.sort_by(|a, b| {
        a.file_name
            .to_lowercase()
            .cmp(&b.file_name.to_lowercase())
            .then_with(|| a.file_name.cmp(&b.file_name))
    });
    info!(dir = %dir.display(), count = tracks.len(), "scanned music directory");
    Ok(tracks)
}
