use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("no home directory; set ADB_CLI_ROOT or pass --root")]
    NoHome,

    /// The OS reported the program as missing when launching it.
    #[error("`{cmd}` was not found")]
    CommandNotFound { cmd: String },

    #[error("`{cmd}` could not be started: {source}")]
    CommandFailed { cmd: String, source: io::Error },

    #[error("could not watch for Ctrl-C: {0}")]
    Signal(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}
