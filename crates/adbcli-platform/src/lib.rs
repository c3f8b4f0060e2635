//! Platform helpers for adb-cli.
//!
//! - `os` - closed platform enumeration and executable naming
//! - `dir` - home and app root directories
//! - `command` - subprocess builder with captured and attached modes
//! - `interrupt` - user interrupt flag

pub use error::{Error, Result};

pub mod command;
pub mod dir;
mod error;
pub mod interrupt;
pub mod os;
