use std::io;
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An entry whose path would land outside the destination.
    #[error("entry {entry} escapes the destination (resolves to {resolved})")]
    ZipSlip { entry: PathBuf, resolved: PathBuf },

    #[error("unusable entry path {0:?}")]
    InvalidPath(String),

    #[error("could not write {path}: {source}")]
    ExtractionFailed { path: PathBuf, source: io::Error },

    #[error("could not create {path}: {source}")]
    DirectoryCreationFailed { path: PathBuf, source: io::Error },

    #[error("not a readable zip archive: {0}")]
    Corrupted(#[from] zip::result::ZipError),

    #[error(transparent)]
    Io(#[from] io::Error),
}
