//src/types.rs

use std::fmt;
use std::path::{Path, PathBuf};

/// Metric key holding the number of records read from a file.
pub const READS_KEY: &str = "reads";

/// A nucleotide whose trailing homopolymer runs are tallied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, clap::ValueEnum)]
pub enum Base {
    #[value(name = "A")]
    A,
    #[value(name = "C")]
    C,
    #[value(name = "G")]
    G,
    #[value(name = "T")]
    T,
}

impl Base {
    /// The raw byte compared against sequence characters (case-sensitive).
    pub fn as_byte(self) -> u8 {
        match self {
            Base::A => b'A',
            Base::C => b'C',
            Base::G => b'G',
            Base::T => b'T',
        }
    }

    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

impl fmt::Display for Base {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// How a read file is stored on disk. Decided once from the file suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.fastq`
    Plain,
    /// `.fastq.gz`
    Compressed,
}

/// A discovered read file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFile {
    pub path: PathBuf,
    pub format: FileFormat,
}

impl InputFile {
    pub fn new(path: impl Into<PathBuf>, format: FileFormat) -> Self {
        Self { path: path.into(), format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path as written to the `path` column of count tables.
    pub fn source_path(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// One row of a count table: `path`, `count_variable`, `count_value`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountRecord {
    pub source_path: String,
    pub metric_key: String,
    pub value: u64,
}

impl CountRecord {
    pub fn new(source_path: impl Into<String>, metric_key: impl Into<String>, value: u64) -> Self {
        Self {
            source_path: source_path.into(),
            metric_key: metric_key.into(),
            value,
        }
    }
}
