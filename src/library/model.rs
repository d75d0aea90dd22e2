use std::path::PathBuf;

/// One playable file. Built once per scan and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Track {
    pub path: PathBuf,
    pub file_name: String,
    pub title: String,
    pub artist: String,
}
