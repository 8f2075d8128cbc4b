// src/worker.rs

use std::path::{Path, PathBuf};

use crate::error::{PolyGsError, Result};
use crate::poly_counts::count_file;
use crate::table::{file_records, write_table};
use crate::types::{Base, InputFile};

/// Partial table location for chunk `chunk` of a run writing to `output`.
///
/// Derived from both the output path and the chunk index, so concurrently
/// running workers never share a file.
pub fn partial_table_path<P: AsRef<Path>>(output: P, chunk: usize) -> PathBuf {
    let mut name = output.as_ref().as_os_str().to_os_string();
    name.push(format!(".chunk{chunk}.tsv"));
    PathBuf::from(name)
}

/// What a worker persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkOutput {
    pub chunk: usize,
    pub path: PathBuf,
    pub files: usize,
    pub reads: u64,
}

/// Count every file of `files` in order and persist the rows as one partial
/// table at `partial_path`.
///
/// The first file that cannot be read aborts the whole chunk; nothing is
/// written in that case.
pub fn process_chunk(
    chunk: usize,
    files: &[InputFile],
    bases: &[Base],
    motif_len: usize,
    partial_path: &Path,
) -> Result<ChunkOutput> {
    log::debug!("chunk {chunk}: counting {} file(s)", files.len());

    let mut records = Vec::new();
    let mut reads = 0u64;
    for input in files {
        let counts = count_file(input, bases, motif_len)?;
        reads += counts.reads;
        records.extend(file_records(&input.source_path(), &counts));
    }

    write_table(partial_path, &records).map_err(|source| PolyGsError::PartialWrite {
        chunk,
        path: partial_path.to_path_buf(),
        source,
    })?;

    log::info!(
        "chunk {chunk}: {} file(s), {reads} reads -> {}",
        files.len(),
        partial_path.display()
    );
    Ok(ChunkOutput {
        chunk,
        path: partial_path.to_path_buf(),
        files: files.len(),
        reads,
    })
}
