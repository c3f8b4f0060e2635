use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Conditions that end an operation abnormally.
///
/// Everything else an operation can run into is folded into an
/// [`crate::Outcome`] where it is detected.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "adb was not found. Install Android platform-tools manually and put adb on PATH or at {expected}"
    )]
    BridgeMissing { expected: PathBuf },

    #[error("cancelled by user")]
    Interrupted,

    #[error("terminal I/O failed: {0}")]
    Io(#[source] io::Error),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        match e.kind() {
            io::ErrorKind::Interrupted | io::ErrorKind::UnexpectedEof => Error::Interrupted,
            _ => Error::Io(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interrupt_kinds_map_to_interrupted() {
        let e: Error = io::Error::from(io::ErrorKind::Interrupted).into();
        assert!(matches!(e, Error::Interrupted));
        let e: Error = io::Error::from(io::ErrorKind::UnexpectedEof).into();
        assert!(matches!(e, Error::Interrupted));
        let e: Error = io::Error::from(io::ErrorKind::BrokenPipe).into();
        assert!(matches!(e, Error::Io(_)));
    }
}
