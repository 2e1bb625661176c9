//! Ctrl-C handling
//!
//! SIGINT reaches the sandboxed restore through the shared process group,
//! so the handler only records it. The pipeline notices once the child has
//! exited and returns `Error::Interrupted`, letting the scratch directory
//! guard drop normally.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use tracing::info;

use crate::{Error, Result};

#[derive(Clone, Default)]
pub struct Interrupt {
    flag: Arc<AtomicBool>,
}

impl Interrupt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route SIGINT/SIGTERM to this token. Can only be done once per process.
    pub fn install(&self) -> Result<()> {
        let flag = self.flag.clone();
        ctrlc::set_handler(move || {
            info!("Received interrupt, stopping after the current restore...");
            flag.store(true, Ordering::SeqCst);
        })?;
        Ok(())
    }

    pub fn trigger(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    pub fn check(&self) -> Result<()> {
        if self.is_set() {
            return Err(Error::Interrupted);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_is_shared_between_clones() {
        let interrupt = Interrupt::new();
        let clone = interrupt.clone();
        assert!(clone.check().is_ok());

        interrupt.trigger();
        assert!(clone.is_set());
        assert!(matches!(clone.check(), Err(Error::Interrupted)));
    }
}
