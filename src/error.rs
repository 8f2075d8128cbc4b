//! Error types for polygs-stats

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for polygs-stats operations
pub type Result<T> = std::result::Result<T, PolyGsError>;

#[derive(Debug, Error)]
pub enum PolyGsError {
    /// An input root could not be traversed
    #[error("cannot read input folder {}: {source}", .path.display())]
    InputRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A classified read file could not be opened or streamed
    #[error("cannot read {}: {source}", .path.display())]
    UnreadableFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A file reached the counter without a `.fastq` / `.fastq.gz` suffix
    #[error("{} does not end with .fastq or .fastq.gz", .path.display())]
    UnrecognizedFormat { path: PathBuf },

    /// A chunk worker could not persist its partial table
    #[error("chunk {chunk}: cannot write partial table {}: {source}", .path.display())]
    PartialWrite {
        chunk: usize,
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A chunk worker terminated abnormally; its contribution is missing
    #[error("chunk {chunk} failed: {source}")]
    ChunkFailed {
        chunk: usize,
        #[source]
        source: Box<PolyGsError>,
    },

    /// A partial table was missing or malformed during the merge
    #[error("chunk {chunk}: cannot merge partial table {}: {reason}", .path.display())]
    MergeFailure {
        chunk: usize,
        path: PathBuf,
        reason: String,
    },

    /// The final count table could not be written
    #[error("cannot write count table {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("cannot start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
