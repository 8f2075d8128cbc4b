use std::fs::File;
use std::io::{self, BufRead, BufReader};

use flate2::read::MultiGzDecoder;

use crate::types::{FileFormat, InputFile};

/// Open a read file, wrapping `.fastq.gz` input in a `MultiGzDecoder`.
pub fn open_reads(input: &InputFile) -> io::Result<Box<dyn BufRead>> {
    let f = File::open(&input.path)?;

    let reader: Box<dyn BufRead> = match input.format {
        FileFormat::Compressed => Box::new(BufReader::new(MultiGzDecoder::new(f))),
        FileFormat::Plain => Box::new(BufReader::new(f)),
    };
    Ok(reader)
}

/// Stream the sequence line (line 2) of every 4-line record to `on_sequence`,
/// trimmed of surrounding ASCII whitespace. Returns the number of records seen.
///
/// Records are grouped by position only: header, separator and quality lines
/// are not validated. A truncated last record still counts once its sequence
/// line has been read.
pub fn for_each_sequence<R, F>(mut reader: R, mut on_sequence: F) -> io::Result<u64>
where
    R: BufRead,
    F: FnMut(&[u8]),
{
    let mut line = Vec::with_capacity(256);
    let mut line_idx: u64 = 0;
    let mut records: u64 = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break; // EOF
        }
        if line_idx % 4 == 1 {
            records += 1;
            on_sequence(line.trim_ascii());
        }
        line_idx += 1;
    }

    Ok(records)
}
