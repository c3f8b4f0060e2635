//! Zip extraction with path sanitization.
//!
//! - `sanitize.rs` - path normalization and zip-slip prevention
//! - `extract.rs` - entry walking and writing

pub use error::{Error, Result};
pub use extract::{ArchiveReport, ExtractedEntry, extract_zip, extract_zip_file};
pub use sanitize::sanitize_path;

mod error;
mod extract;
mod sanitize;
