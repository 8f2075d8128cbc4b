// src/lib.rs
pub mod types;
pub mod error;
pub mod config;
pub mod input_files;
pub mod chunks;
pub mod fastq;
pub mod poly_counts;
pub mod table;
pub mod worker;
pub mod pipeline;

use std::path::PathBuf;

pub use crate::config::PolyGsConfig;
pub use crate::error::{PolyGsError, Result};
pub use crate::pipeline::{run, RunSummary};
pub use crate::types::{Base, CountRecord, FileFormat, InputFile};

/// Count trailing homopolymer runs in every `.fastq` / `.fastq.gz` file under
/// `i_folders` and write one merged table to `o_table`.
///
/// Files are split into at most `p_chunks` chunks counted concurrently. For
/// each base in `p_bases` the table holds `{base}_k{len}` run-length counts and
/// `{base}_{motif}` counts of the `p_motif_len` bases preceding each run.
pub fn polygs_stats(
    i_folders: Vec<PathBuf>,
    o_table: PathBuf,
    p_chunks: usize,
    p_bases: Vec<Base>,
    p_motif_len: usize,
) -> Result<RunSummary> {
    let config = PolyGsConfig::new(i_folders, o_table)
        .with_chunks(p_chunks)
        .with_bases(p_bases)
        .with_motif_len(p_motif_len);
    run(&config)
}
