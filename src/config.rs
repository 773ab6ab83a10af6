//! Run configuration for probeannot.

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Input paths and options for one run.
#[derive(Debug, Clone)]
pub struct Config {
    /// BED file of repeat regions.
    pub repeats: PathBuf,
    /// BED file of gene regions.
    pub genes: PathBuf,
    /// BAM or SAM file of probe alignments.
    pub probes: PathBuf,
    /// Verbose per-record logging.
    pub debug: bool,
}

impl Config {
    pub fn new(repeats: PathBuf, genes: PathBuf, probes: PathBuf, debug: bool) -> Self {
        Config {
            repeats,
            genes,
            probes,
            debug,
        }
    }

    /// Check that every input file exists before any loading starts.
    pub fn validate(&self) -> Result<()> {
        for (path, what) in [
            (&self.repeats, "repeats"),
            (&self.genes, "genes"),
            (&self.probes, "probes"),
        ] {
            if !path.exists() {
                bail!("{} file not found: {}", what, path.display());
            }
        }
        Ok(())
    }
}
