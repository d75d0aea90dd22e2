use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::LibrarySettings;
use crate::engine::AudioEngine;
use crate::library::{LoadError, Track, scan};

/// What to hand to the engine after a playlist move.
#[derive(Debug)]
pub enum TrackRef<M> {
    /// The next track was prepared ahead of time.
    Preloaded { index: usize, media: M },
    /// Must be prepared on demand.
    Fresh { index: usize, path: PathBuf },
    /// The playlist is empty.
    NoTrack,
}

impl<M> TrackRef<M> {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Preloaded { index, .. } | Self::Fresh { index, .. } => Some(*index),
            Self::NoTrack => None,
        }
    }
}

#[derive(Debug)]
struct Preload<M> {
    index: usize,
    media: M,
}

/// Ordered tracks, the current index and a one-slot lookahead.
///
/// Outside of a move, `preloaded` is either empty or holds the track at
/// `(current + 1) % len`.
#[derive(Debug)]
pub struct Playlist<M> {
    tracks: Vec<Track>,
    current: usize,
    preloaded: Option<Preload<M>>,
}

impl<M> Default for Playlist<M> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<M> Playlist<M> {
    pub fn empty() -> Self {
        Self {
            tracks: Vec::new(),
            current: 0,
            preloaded: None,
        }
    }

    /// Build a playlist positioned on the first track, without preloading.
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            current: 0,
            preloaded: None,
        }
    }

    /// Scan `dir` and preload the second track (best-effort).
    pub fn load<E>(dir: &Path, settings: &LibrarySettings, engine: &E) -> Result<Self, LoadError>
    where
        E: AudioEngine<Media = M>,
    {
        let mut playlist = Self::from_tracks(scan(dir, settings)?);
        playlist.preload_next(engine);
        Ok(playlist)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.tracks.get(self.current)
    }

    pub fn track_title(&self) -> Option<&str> {
        self.current_track().map(|t| t.title.as_str())
    }

    pub fn track_artist(&self) -> Option<&str> {
        self.current_track().map(|t| t.artist.as_str())
    }

    pub fn next_index(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some((self.current + 1) % self.len())
    }

    pub fn previous_index(&self) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        Some((self.current + self.len() - 1) % self.len())
    }

    /// Index the lookahead slot currently holds, if any.
    pub fn preloaded_index(&self) -> Option<usize> {
        self.preloaded.as_ref().map(|p| p.index)
    }

    /// A fresh reference to the current track, for restarts and first play.
    pub fn current_ref(&self) -> TrackRef<M> {
        match self.current_track() {
            Some(track) => TrackRef::Fresh {
                index: self.current,
                path: track.path.clone(),
            },
            None => TrackRef::NoTrack,
        }
    }

    /// Move forward one track, consuming the preloaded media when it matches,
    /// then preload the new next track.
    pub fn advance<E>(&mut self, engine: &E) -> TrackRef<M>
    where
        E: AudioEngine<Media = M>,
    {
        let Some(next) = self.next_index() else {
            return TrackRef::NoTrack;
        };
        self.current = next;

        let track = match self.preloaded.take() {
            Some(preload) if preload.index == next => TrackRef::Preloaded {
                index: next,
                media: preload.media,
            },
            _ => self.current_ref(),
        };

        self.preload_next(engine);
        track
    }

    /// Move back one track. The previous track is always loaded fresh; the
    /// lookahead is recomputed for the new position.
    pub fn rewind<E>(&mut self, engine: &E) -> TrackRef<M>
    where
        E: AudioEngine<Media = M>,
    {
        let Some(previous) = self.previous_index() else {
            return TrackRef::NoTrack;
        };
        self.current = previous;
        self.preloaded = None;

        let track = self.current_ref();
        self.preload_next(engine);
        track
    }

    fn preload_next<E>(&mut self, engine: &E)
    where
        E: AudioEngine<Media = M>,
    {
        self.preloaded = None;
        let Some(next) = self.next_index() else {
            return;
        };

        let path = &self.tracks[next].path;
        match engine.prepare(path) {
            Ok(media) => {
                debug!(index = next, "preloaded next track");
                self.preloaded = Some(Preload { index: next, media });
            }
            Err(e) => {
                // Falls back to loading on demand when the track is reached.
                warn!(index = next, error = %e, "preload failed");
            }
        }
    }
}
