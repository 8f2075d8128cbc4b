//src/input_files.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{PolyGsError, Result};
use crate::types::{FileFormat, InputFile};

pub const PLAIN_SUFFIX: &str = ".fastq";
pub const COMPRESSED_SUFFIX: &str = ".fastq.gz";

/// Classify a path by its suffix. `None` means the file is not a read file.
///
/// Matching is case-sensitive: `reads.FASTQ` is skipped.
pub fn classify_path<P: AsRef<Path>>(path: P) -> Option<FileFormat> {
    let name = path.as_ref().to_string_lossy();
    if name.ends_with(PLAIN_SUFFIX) {
        Some(FileFormat::Plain)
    } else if name.ends_with(COMPRESSED_SUFFIX) {
        Some(FileFormat::Compressed)
    } else {
        None
    }
}

impl InputFile {
    /// Build an `InputFile` if the path carries a recognized suffix.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        classify_path(&path).map(|format| InputFile { path, format })
    }
}

/// Recursively collect every `.fastq` / `.fastq.gz` file under the given roots.
///
/// Roots are walked in the order given. Within a directory, entries are
/// visited in name order, files before subdirectories. Symlinked
/// directories are not followed. Repeated roots are not deduplicated.
pub fn collect_input_files<P: AsRef<Path>>(roots: &[P]) -> Result<Vec<InputFile>> {
    let mut input_files = Vec::new();
    for root in roots {
        walk_dir(root.as_ref(), &mut input_files)?;
    }
    Ok(input_files)
}

fn walk_dir(dir: &Path, input_files: &mut Vec<InputFile>) -> Result<()> {
    let io_err = |source| PolyGsError::InputRoot {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = fs::read_dir(dir)
        .map_err(io_err)?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_err)?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut sub_dirs = Vec::new();
    for entry in entries {
        let file_type = entry.file_type().map_err(io_err)?;
        let path = entry.path();
        if file_type.is_dir() {
            sub_dirs.push(path);
        } else if let Some(input_file) = InputFile::from_path(path) {
            input_files.push(input_file);
        }
    }

    for sub_dir in sub_dirs {
        walk_dir(&sub_dir, input_files)?;
    }
    Ok(())
}
