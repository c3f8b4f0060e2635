//! HTTP downloading with a bounded timeout and atomic placement.
//!
//! The body is streamed into `<dest>.part` and renamed over `dest` only
//! once the transfer completed, so an abandoned download never leaves a
//! truncated file at the final path.

mod error;
mod fetcher;
mod progress;

pub use error::{Error, Result};
pub use fetcher::Fetcher;
pub use progress::ProgressTracker;
