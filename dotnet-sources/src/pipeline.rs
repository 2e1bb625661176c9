//! Restore, collect and emit
//!
//! Every project is restored into one shared scratch directory, the
//! directory is scanned once, and the manifest is written only after the
//! scan has fully succeeded.

use tracing::info;

use crate::{
    collect::Collector, config::Config, interrupt::Interrupt, manifest::write_manifest,
    restore::Restorer, scratch::ScratchDir, Result,
};

pub struct Pipeline<'a> {
    config: &'a Config,
    interrupt: Interrupt,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            interrupt: Interrupt::new(),
        }
    }

    /// Stop between stages once `interrupt` fires.
    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = interrupt;
        self
    }

    /// Run the whole pipeline and return the number of manifest entries.
    pub fn run(&self) -> Result<usize> {
        let config = self.config;
        let restorer = Restorer::new(config, self.interrupt.clone())?;

        let entries = {
            let scratch = ScratchDir::create_in(&config.scratch_parent, config.keep_scratch)?;
            for project in &config.projects {
                self.interrupt.check()?;
                restorer.restore(scratch.path(), project)?;
            }
            Collector::new(scratch.path(), &config.destdir).collect()?
        };
        self.interrupt.check()?;

        let count = entries.len();
        write_manifest(&config.output, entries)?;
        info!("Wrote {} sources to {}", count, config.output.display());

        Ok(count)
    }
}
