//! User interrupt (Ctrl-C) tracking.
//!
//! Installing the handler replaces the default "terminate" disposition with
//! a flag, so an interrupt aimed at a child process that owns the terminal
//! does not kill the front-end as well.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use signal_hook::consts::SIGINT;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    /// Register the process-wide SIGINT handler.
    pub fn install() -> Result<Self> {
        let interrupt = Self::default();
        signal_hook::flag::register(SIGINT, Arc::clone(&interrupt.flag)).map_err(Error::Signal)?;
        Ok(interrupt)
    }

    /// A flag that is never raised by a signal.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn raise(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_raised(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Read and clear the flag.
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_clears_flag() {
        let interrupt = Interrupt::detached();
        assert!(!interrupt.take());
        interrupt.raise();
        assert!(interrupt.is_raised());
        assert!(interrupt.take());
        assert!(!interrupt.is_raised());
    }

    #[test]
    fn test_clones_share_flag() {
        let interrupt = Interrupt::detached();
        let other = interrupt.clone();
        other.raise();
        assert!(interrupt.take());
    }
}
