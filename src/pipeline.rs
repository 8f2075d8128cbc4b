// src/pipeline.rs

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::chunks::partition;
use crate::config::PolyGsConfig;
use crate::error::{PolyGsError, Result};
use crate::input_files::collect_input_files;
use crate::table::{read_table, write_table};
use crate::types::CountRecord;
use crate::worker::{partial_table_path, process_chunk, ChunkOutput};

/// What a finished run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub files: usize,
    pub chunks: usize,
    pub reads: u64,
    pub records: usize,
}

/// Removes every partial table when dropped, whether the merge succeeded or not.
struct PartialTables {
    paths: Vec<PathBuf>,
}

impl Drop for PartialTables {
    fn drop(&mut self) {
        for path in &self.paths {
            match fs::remove_file(path) {
                Ok(()) => log::debug!("removed {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => log::warn!("could not remove {}: {e}", path.display()),
            }
        }
    }
}

/// Discover, partition, count every chunk concurrently, then merge the
/// partial tables into `config.output`.
///
/// All chunk workers are awaited before any result is inspected. If any of
/// them failed, or any partial table cannot be read back, the run fails and
/// no final table is written.
pub fn run(config: &PolyGsConfig) -> Result<RunSummary> {
    config.validate()?;

    let input_files = collect_input_files(&config.input_roots)?;
    let n_files = input_files.len();
    let file_chunks = partition(input_files, config.chunks);
    log::info!(
        "found {} read file(s), split into {} chunk(s)",
        n_files,
        file_chunks.len()
    );
    if n_files == 0 {
        log::warn!("no .fastq or .fastq.gz files found; writing an empty table");
    }

    let guard = PartialTables {
        paths: (0..file_chunks.len())
            .map(|chunk| partial_table_path(&config.output, chunk))
            .collect(),
    };

    let outcomes: Vec<Result<ChunkOutput>> = if file_chunks.is_empty() {
        Vec::new()
    } else {
        let pool = ThreadPoolBuilder::new()
            .num_threads(file_chunks.len())
            .thread_name(|i| format!("polygs-chunk-{i}"))
            .build()?;
        pool.install(|| {
            file_chunks
                .par_iter()
                .zip(guard.paths.par_iter())
                .enumerate()
                .with_max_len(1)
                .map(|(chunk, (files, partial_path))| {
                    process_chunk(chunk, files, &config.bases, config.motif_len, partial_path)
                })
                .collect()
        })
    };

    let reads = check_outcomes(outcomes)?;
    let merged = merge_partial_tables(&guard.paths)?;
    write_final_table(&config.output, &merged)?;
    drop(guard);

    log::info!(
        "wrote {} row(s) for {} file(s) to {}",
        merged.len(),
        n_files,
        config.output.display()
    );
    Ok(RunSummary {
        files: n_files,
        chunks: file_chunks.len(),
        reads,
        records: merged.len(),
    })
}

/// Fail on the first failed chunk after logging every failure.
/// Returns the total read count of all chunks.
fn check_outcomes(outcomes: Vec<Result<ChunkOutput>>) -> Result<u64> {
    let mut reads = 0u64;
    let mut first_failure = None;
    for (chunk, outcome) in outcomes.into_iter().enumerate() {
        match outcome {
            Ok(out) => reads += out.reads,
            Err(e) => {
                log::error!("chunk {chunk} failed: {e}");
                first_failure.get_or_insert(PolyGsError::ChunkFailed {
                    chunk,
                    source: Box::new(e),
                });
            }
        }
    }
    match first_failure {
        Some(err) => Err(err),
        None => Ok(reads),
    }
}

/// Concatenate partial tables in chunk order. A missing or malformed table
/// is a `MergeFailure` naming its chunk.
pub fn merge_partial_tables(partial_paths: &[PathBuf]) -> Result<Vec<CountRecord>> {
    let mut merged = Vec::new();
    for (chunk, path) in partial_paths.iter().enumerate() {
        let records = read_table(path).map_err(|e| PolyGsError::MergeFailure {
            chunk,
            path: path.clone(),
            reason: e.to_string(),
        })?;
        merged.extend(records);
    }
    Ok(merged)
}

fn write_final_table(output: &Path, records: &[CountRecord]) -> Result<()> {
    write_table(output, records).map_err(|source| {
        // never leave a truncated table behind
        let _ = fs::remove_file(output);
        PolyGsError::OutputWrite {
            path: output.to_path_buf(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Base;
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::collections::BTreeMap;
    use std::io::Write;
    use tempfile::TempDir;

    fn record(i: usize, seq: &str) -> String {
        format!("@read{i}\n{seq}\n+\n{}\n", "I".repeat(seq.len()))
    }

    fn write_fastq(path: &Path, seqs: &[&str]) {
        let text: String = seqs.iter().enumerate().map(|(i, s)| record(i, s)).collect();
        if path.to_string_lossy().ends_with(".gz") {
            let mut enc = GzEncoder::new(fs::File::create(path).unwrap(), Compression::default());
            enc.write_all(text.as_bytes()).unwrap();
            enc.finish().unwrap();
        } else {
            fs::write(path, text).unwrap();
        }
    }

    fn as_map(records: Vec<CountRecord>) -> BTreeMap<(String, String), u64> {
        let mut map = BTreeMap::new();
        for r in records {
            let prev = map.insert((r.source_path, r.metric_key), r.value);
            assert!(prev.is_none(), "duplicate (path, count_variable)");
        }
        map
    }

    fn dir_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_run_single_file_single_chunk() {
        let input = TempDir::new().unwrap();
        let out_dir = TempDir::new().unwrap();
        let fastq = input.path().join("test.R1.fastq");
        write_fastq(&fastq, &["TTTTACCCCGGGGGG", "CCAAAAGGGG", "ACGTACGTAC"]);
        let output = out_dir.path().join("counts.tsv");

        let config = PolyGsConfig::new([input.path()], &output)
            .with_chunks(1)
            .with_motif_len(4);
        let summary = run(&config).unwrap();
        assert_eq!(summary, RunSummary { files: 1, chunks: 1, reads: 3, records: 6 });

        let rows = as_map(read_table(&output).unwrap());
        let path = fastq.to_string_lossy().into_owned();
        assert_eq!(rows[&(path.clone(), "reads".to_string())], 3);
        assert_eq!(rows[&(path.clone(), "G_k6".to_string())], 1);
        assert_eq!(rows[&(path.clone(), "G_CCCC".to_string())], 1);
        assert_eq!(rows[&(path, "G_AAAA".to_string())], 1);

        assert_eq!(dir_names(out_dir.path()), vec!["counts.tsv"]);
    }

    #[test]
    fn test_chunked_run_matches_single_chunk() {
        let input = TempDir::new().unwrap();
        fs::create_dir(input.path().join("lane2")).unwrap();
        write_fastq(&input.path().join("a.fastq"), &["ACGGG", "TTTT", "GAGAGGG"]);
        write_fastq(&input.path().join("b.fastq.gz"), &["CCCCGG", "A"]);
        write_fastq(&input.path().join("c.fastq"), &["GGGGGGGG"]);
        write_fastq(&input.path().join("lane2/d.fastq.gz"), &["ATATATGG", "ATATATGG"]);
        write_fastq(&input.path().join("lane2/e.fastq"), &[]);
        fs::write(input.path().join("lane2/notes.txt"), "skip me").unwrap();

        let out_dir = TempDir::new().unwrap();
        let bases = [Base::G, Base::A];
        let single = out_dir.path().join("single.tsv");
        let chunked = out_dir.path().join("chunked.tsv");

        let s1 = run(&PolyGsConfig::new([input.path()], &single)
            .with_chunks(1)
            .with_bases(bases)
            .with_motif_len(2))
        .unwrap();
        let s3 = run(&PolyGsConfig::new([input.path()], &chunked)
            .with_chunks(3)
            .with_bases(bases)
            .with_motif_len(2))
        .unwrap();

        assert_eq!(s1.files, 5);
        assert_eq!(s1.chunks, 1);
        // 5 files / 3 chunks: n = 1, so [a, b, c] then [d] then [e]
        assert_eq!(s3.chunks, 3);
        assert_eq!(s1.reads, 8);
        assert_eq!(s3.reads, 8);

        let single_rows = as_map(read_table(&single).unwrap());
        assert_eq!(single_rows, as_map(read_table(&chunked).unwrap()));

        // the empty file still reports zero reads
        let empty = input.path().join("lane2/e.fastq").to_string_lossy().into_owned();
        assert_eq!(single_rows[&(empty, "reads".to_string())], 0);

        assert_eq!(dir_names(out_dir.path()), vec!["chunked.tsv", "single.tsv"]);
    }

    #[test]
    fn test_run_without_read_files_writes_header_only() {
        let input = TempDir::new().unwrap();
        fs::write(input.path().join("readme.md"), "nothing here").unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("counts.tsv");

        let summary = run(&PolyGsConfig::new([input.path()], &output)).unwrap();
        assert_eq!(summary, RunSummary { files: 0, chunks: 0, reads: 0, records: 0 });
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "path\tcount_variable\tcount_value\n"
        );
    }

    #[test]
    fn test_failed_chunk_fails_run_and_cleans_up() {
        let input = TempDir::new().unwrap();
        write_fastq(&input.path().join("a.fastq"), &["ACGGG"]);
        write_fastq(&input.path().join("b.fastq"), &["ACGGG"]);
        fs::write(input.path().join("c.fastq.gz"), "not gzip").unwrap();
        let out_dir = TempDir::new().unwrap();
        let output = out_dir.path().join("counts.tsv");

        let err = run(&PolyGsConfig::new([input.path()], &output).with_chunks(3)).unwrap_err();
        match err {
            PolyGsError::ChunkFailed { chunk, source } => {
                assert_eq!(chunk, 2);
                assert!(matches!(*source, PolyGsError::UnreadableFile { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(dir_names(out_dir.path()).is_empty());
    }

    #[test]
    fn test_merge_reports_missing_partial() {
        let dir = TempDir::new().unwrap();
        let present = partial_table_path(dir.path().join("out.tsv"), 0);
        write_table(&present, &[CountRecord::new("x.fastq", "reads", 1)]).unwrap();
        let missing = partial_table_path(dir.path().join("out.tsv"), 1);

        let err = merge_partial_tables(&[present.clone(), missing.clone()]).unwrap_err();
        assert!(matches!(err, PolyGsError::MergeFailure { chunk: 1, ref path, .. } if *path == missing));

        let merged = merge_partial_tables(&[present]).unwrap();
        assert_eq!(merged, vec![CountRecord::new("x.fastq", "reads", 1)]);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let out_dir = TempDir::new().unwrap();
        let config = PolyGsConfig::new([out_dir.path()], out_dir.path().join("o.tsv")).with_chunks(0);
        assert!(matches!(run(&config), Err(PolyGsError::InvalidConfig(_))));
    }
}
