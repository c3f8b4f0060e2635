//! Device-session orchestration.
//!
//! Layers, leaf first:
//! - [`bridge`] runs `adb` in captured or attached mode
//! - [`device`] parses listings and picks a target serial
//! - [`acquire`] and [`mirror`] obtain and launch `scrcpy`
//! - [`ops`] is the fixed operation catalog
//! - [`session`] is the interactive menu loop
//!
//! Terminal I/O goes through the [`Terminal`] trait so every layer can be
//! driven by scripted input in tests.

pub use bridge::{AdbBridge, Bridge, CommandResult, Completion};
pub use error::{Error, Result};
pub use mirror::{Mirror, MirrorTool};
pub use outcome::Outcome;
pub use session::{Session, SessionEnd, run_loop};
pub use settings::Settings;
pub use terminal::Terminal;

pub mod acquire;
pub mod bridge;
pub mod device;
mod error;
pub mod mirror;
pub mod ops;
mod outcome;
pub mod session;
mod settings;
pub mod terminal;
pub mod ui;
