//! Executable resolution.
//!
//! # Architecture
//!
//! Resolution is a chain of [`TargetResolver`]s: the process search path
//! first, then the app's cache directory. [`ExecutableLocator`] wires the
//! chain for the two tools the front-end drives.
//!
//! # Example
//!
//! ```
//! use std::path::PathBuf;
//! use adbcli_locate::{PairResolver, TargetResolver};
//!
//! struct Fixed;
//! struct Nothing;
//!
//! impl TargetResolver for Fixed {
//!     fn resolve(&self, command: &str) -> Option<PathBuf> {
//!         Some(PathBuf::from(format!("/opt/tools/{}", command)))
//!     }
//! }
//!
//! impl TargetResolver for Nothing {
//!     fn resolve(&self, _command: &str) -> Option<PathBuf> {
//!         None
//!     }
//! }
//!
//! let resolver = PairResolver::new(Nothing, Fixed);
//! assert_eq!(resolver.resolve("adb"), Some(PathBuf::from("/opt/tools/adb")));
//! ```

pub use locator::{ExecutableLocator, Tool, cache_layout};
pub use resolver::{CacheResolver, PairResolver, SearchPathResolver, TargetResolver, is_executable};

mod locator;
mod resolver;
