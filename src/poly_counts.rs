// src/poly_counts.rs

use ahash::AHashMap;
use std::path::Path;

use crate::error::{PolyGsError, Result};
use crate::fastq::{for_each_sequence, open_reads};
use crate::types::{Base, InputFile};

/// Metric key -> count, e.g. `G_k7 -> 12`, `G_AAAAA -> 3`.
pub type Histogram = AHashMap<String, u64>;

/// Counts gathered from one read file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolyCounts {
    /// Number of 4-line records read
    pub reads: u64,
    /// Run-length and motif histogram over all tracked bases
    pub histogram: Histogram,
}

/// Length of the maximal trailing run of `base` in `seq`.
#[inline]
pub fn trailing_run_len(seq: &[u8], base: u8) -> usize {
    seq.iter().rev().take_while(|&&b| b == base).count()
}

/// Add one sequence to `histogram` and hand the updated histogram back.
///
/// For every base: bump `{base}_k{run_len}`, and when the run is non-empty and
/// at least `motif_len` characters precede it, bump `{base}_{motif}` where
/// `motif` is the last `motif_len` characters before the run.
pub fn tally_sequence(seq: &[u8], bases: &[Base], motif_len: usize, mut histogram: Histogram) -> Histogram {
    for &base in bases {
        let run_len = trailing_run_len(seq, base.as_byte());
        *histogram.entry(format!("{base}_k{run_len}")).or_insert(0) += 1;

        let prefix = &seq[..seq.len() - run_len];
        if run_len > 0 && prefix.len() >= motif_len {
            let motif = String::from_utf8_lossy(&prefix[prefix.len() - motif_len..]);
            *histogram.entry(format!("{base}_{motif}")).or_insert(0) += 1;
        }
    }
    histogram
}

/// Stream every record of `input` and tally its sequence line.
pub fn count_file(input: &InputFile, bases: &[Base], motif_len: usize) -> Result<PolyCounts> {
    let unreadable = |source| PolyGsError::UnreadableFile {
        path: input.path.clone(),
        source,
    };

    let reader = open_reads(input).map_err(unreadable)?;
    let mut histogram = Histogram::default();
    let reads = for_each_sequence(reader, |seq| {
        histogram = tally_sequence(seq, bases, motif_len, std::mem::take(&mut histogram));
    })
    .map_err(unreadable)?;

    log::debug!("{}: {} reads", input.path.display(), reads);
    Ok(PolyCounts { reads, histogram })
}

/// Classify `path` by suffix, then count it.
pub fn count_path<P: AsRef<Path>>(path: P, bases: &[Base], motif_len: usize) -> Result<PolyCounts> {
    let path = path.as_ref();
    let input = InputFile::from_path(path).ok_or_else(|| PolyGsError::UnrecognizedFormat {
        path: path.to_path_buf(),
    })?;
    count_file(&input, bases, motif_len)
}
