// src/config.rs

use std::path::PathBuf;

use crate::error::{PolyGsError, Result};
use crate::types::Base;

pub const DEFAULT_CHUNKS: usize = 8;
pub const DEFAULT_MOTIF_LEN: usize = 5;
pub const DEFAULT_BASE: Base = Base::G;

/// Parameters of one counting run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyGsConfig {
    /// Folders searched recursively for `.fastq` / `.fastq.gz` files
    pub input_roots: Vec<PathBuf>,
    /// Destination of the merged count table
    pub output: PathBuf,
    /// Upper bound on the number of file chunks counted concurrently
    pub chunks: usize,
    /// Bases whose trailing runs are tallied
    pub bases: Vec<Base>,
    /// Number of bases recorded before the start of a run
    pub motif_len: usize,
}

impl Default for PolyGsConfig {
    fn default() -> Self {
        Self {
            input_roots: Vec::new(),
            output: PathBuf::new(),
            chunks: DEFAULT_CHUNKS,
            bases: vec![DEFAULT_BASE],
            motif_len: DEFAULT_MOTIF_LEN,
        }
    }
}

impl PolyGsConfig {
    pub fn new<I, P>(input_roots: I, output: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            input_roots: input_roots.into_iter().map(Into::into).collect(),
            output: output.into(),
            ..Self::default()
        }
    }

    pub fn with_chunks(mut self, chunks: usize) -> Self {
        self.chunks = chunks;
        self
    }

    /// Repeated bases are dropped, keeping the first occurrence.
    pub fn with_bases<I: IntoIterator<Item = Base>>(mut self, bases: I) -> Self {
        self.bases.clear();
        for base in bases {
            if !self.bases.contains(&base) {
                self.bases.push(base);
            }
        }
        self
    }

    pub fn with_motif_len(mut self, motif_len: usize) -> Self {
        self.motif_len = motif_len;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.input_roots.is_empty() {
            return Err(PolyGsError::InvalidConfig("no input folder given".into()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(PolyGsError::InvalidConfig("no output table given".into()));
        }
        if self.chunks == 0 {
            return Err(PolyGsError::InvalidConfig("chunk count must be at least 1".into()));
        }
        if self.bases.is_empty() {
            return Err(PolyGsError::InvalidConfig("no base to count".into()));
        }
        Ok(())
    }
}
