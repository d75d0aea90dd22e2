//! Opening tracks for `rodio`.
//!
//! A [`Media`] is a decoder positioned at the start of a file. Building one
//! is what preloading means for this engine: the file is opened and its
//! header probed before the track is needed.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use lofty::file::AudioFile;
use rodio::{Decoder, OutputStream, Sink, Source};

use super::types::{EngineError, display_name};

pub struct Media {
    pub(super) name: String,
    pub(super) duration: Option<Duration>,
    source: Decoder<BufReader<File>>,
}

/// Open and decode the header of `path`.
pub(super) fn open_media(path: &Path) -> Result<Media, EngineError> {
    let name = display_name(path);
    let file = File::open(path).map_err(|source| EngineError::Open {
        name: name.clone(),
        source,
    })?;

    let source = Decoder::new(BufReader::new(file)).map_err(|e| EngineError::Decode {
        name: name.clone(),
        reason: e.to_string(),
    })?;

    // Some containers (VBR mp3 without a Xing header) do not report a length
    // through the decoder; the tag reader usually can.
    let duration = source.total_duration().or_else(|| probe_duration(path));

    Ok(Media {
        name,
        duration,
        source,
    })
}

fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
        .filter(|d| !d.is_zero())
}

/// Create a paused `Sink` on `stream` holding `media`.
pub(super) fn connect_sink(stream: &OutputStream, media: Media) -> Sink {
    let sink = Sink::connect_new(stream.mixer());
    sink.append(media.source);
    sink.pause();
    sink
}
