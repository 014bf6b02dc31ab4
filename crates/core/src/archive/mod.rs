use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub mod extract;
pub mod index;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("failed to open archive {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read archive {path}: {message}")]
    Archive { path: PathBuf, message: String },

    #[error("no entry matching {pattern} in {path}")]
    EntryNotFound { path: PathBuf, pattern: String },

    #[error("ambiguous entries for {pattern} in {path}: {matches:?}")]
    AmbiguousEntry {
        path: PathBuf,
        pattern: String,
        matches: Vec<String>,
    },

    #[error("failed to extract {entry} to {destination}: {source}")]
    ExtractionFailed {
        entry: String,
        destination: PathBuf,
        #[source]
        source: io::Error,
    },
}
