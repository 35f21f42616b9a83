//! Streaming access to single-record FASTA reference files
//!
//! [`FastaRangeReader`] extracts a genomic sub-range from a plain or gzipped
//! FASTA file holding exactly one record. It scans the file line by line and
//! keeps only the requested slice in memory, so each call costs a full pass
//! over the file but never loads the whole sequence.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::error::{MafError, MafResult};
use crate::types::Position;

/// A source able to return the reference bases of a 0-based half-open interval
pub trait IntervalReader {
    fn read_interval(&mut self, z_start: Position, z_end: Position) -> MafResult<String>;
}

/// Extracts sub-ranges from a single-record FASTA stream
pub struct FastaRangeReader<R: Read + Seek = File> {
    inner: R,
    compressed: bool,
}

impl FastaRangeReader<File> {
    /// Open a FASTA file; a `.gz` extension selects gzip decompression
    pub fn open<P: AsRef<Path>>(path: P) -> MafResult<Self> {
        let file = File::open(&path)?;
        let compressed = path.as_ref().to_string_lossy().ends_with(".gz");
        Ok(Self::new(file, compressed))
    }
}

impl<R: Read + Seek> FastaRangeReader<R> {
    /// Wrap an already opened stream
    pub fn new(inner: R, compressed: bool) -> Self {
        Self { inner, compressed }
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Returns the bases of `[z_start, z_end)`, then rewinds the stream.
    pub fn read_interval(&mut self, z_start: Position, z_end: Position) -> MafResult<String> {
        if z_end < z_start {
            return Err(MafError::range(format!(
                "interval end {} precedes start {}",
                z_end, z_start
            )));
        }
        if z_start == z_end {
            return Ok(String::new());
        }

        let data = if self.compressed {
            let mut reader = BufReader::new(MultiGzDecoder::new(&mut self.inner));
            extract_interval(&mut reader, z_start, z_end)
        } else {
            let mut reader = BufReader::new(&mut self.inner);
            extract_interval(&mut reader, z_start, z_end)
        };
        self.inner.seek(SeekFrom::Start(0))?;
        data
    }
}

impl<R: Read + Seek> IntervalReader for FastaRangeReader<R> {
    fn read_interval(&mut self, z_start: Position, z_end: Position) -> MafResult<String> {
        FastaRangeReader::read_interval(self, z_start, z_end)
    }
}

fn extract_interval<B: BufRead>(
    reader: &mut B,
    z_start: Position,
    z_end: Position,
) -> MafResult<String> {
    let mut line = String::new();
    reader.read_line(&mut line)?;
    if !line.starts_with('>') {
        return Err(MafError::format(format!(
            "expected FASTA description line, found {:?}",
            line.trim_end()
        )));
    }

    let region_size = (z_end - z_start) as usize;
    let mut data = String::with_capacity(region_size);
    let mut in_region = false;
    let mut pos: Position = 0;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        if line.starts_with('>') {
            return Err(MafError::format(format!(
                "unexpected description line {:?}; only single-record files are supported",
                line.trim_end()
            )));
        }
        let bases = line.trim();
        if !bases.is_ascii() {
            return Err(MafError::format("sequence line holds non-ASCII characters"));
        }
        let end_pos = pos + bases.len() as Position;

        let available = if in_region {
            bases
        } else if pos <= z_start && z_start < end_pos {
            in_region = true;
            &bases[(z_start - pos) as usize..]
        } else {
            ""
        };
        let need = region_size - data.len();
        data.push_str(&available[..need.min(available.len())]);
        if data.len() == region_size {
            return Ok(data);
        }
        pos = end_pos;
    }

    Err(MafError::range(format!(
        "interval {}-{} extends past the end of the sequence ({} bases)",
        z_start, z_end, pos
    )))
}

/// Write one FASTA record with the sequence on a single line
pub fn write_record<W: Write>(writer: &mut W, name: &str, sequence: &str) -> std::io::Result<()> {
    writeln!(writer, ">{}", name)?;
    writeln!(writer, "{}", sequence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const FASTA: &str = ">chr1 test sequence\nACGTACGTAC\nGGGGCCCCAA\nTTTTT\n";

    fn reader() -> FastaRangeReader<Cursor<Vec<u8>>> {
        FastaRangeReader::new(Cursor::new(FASTA.as_bytes().to_vec()), false)
    }

    #[test]
    fn test_within_one_line() {
        assert_eq!(reader().read_interval(2, 6).unwrap(), "GTAC");
    }

    #[test]
    fn test_across_lines() {
        let mut r = reader();
        assert_eq!(r.read_interval(8, 22).unwrap(), "ACGGGGCCCCAATT");
        assert_eq!(r.read_interval(0, 25).unwrap().len(), 25);
    }

    #[test]
    fn test_line_boundaries() {
        let mut r = reader();
        assert_eq!(r.read_interval(10, 20).unwrap(), "GGGGCCCCAA");
        assert_eq!(r.read_interval(20, 25).unwrap(), "TTTTT");
    }

    #[test]
    fn test_repeatable() {
        let mut r = reader();
        let first = r.read_interval(5, 17).unwrap();
        let second = r.read_interval(5, 17).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 12);
    }

    #[test]
    fn test_empty_interval() {
        assert_eq!(reader().read_interval(7, 7).unwrap(), "");
    }

    #[test]
    fn test_past_end() {
        let err = reader().read_interval(20, 30).unwrap_err();
        assert!(matches!(err, MafError::Range { .. }));
    }

    #[test]
    fn test_missing_description_line() {
        let mut r = FastaRangeReader::new(Cursor::new(b"ACGT\nACGT\n".to_vec()), false);
        let err = r.read_interval(0, 2).unwrap_err();
        assert!(matches!(err, MafError::Format { .. }));
    }

    #[test]
    fn test_second_record_rejected() {
        let data = b">chr1\nACGT\n>chr2\nACGT\n".to_vec();
        let mut r = FastaRangeReader::new(Cursor::new(data), false);
        let err = r.read_interval(2, 6).unwrap_err();
        assert!(matches!(err, MafError::Format { .. }));
        // the failed call still rewinds
        assert_eq!(r.read_interval(0, 2).unwrap(), "AC");
    }

    #[test]
    fn test_crlf_lines() {
        let data = b">chr1\r\nACGT\r\nTTGG\r\n".to_vec();
        let mut r = FastaRangeReader::new(Cursor::new(data), false);
        assert_eq!(r.read_interval(2, 6).unwrap(), "GTTT");
    }

    #[test]
    fn test_write_record() {
        let mut out = Vec::new();
        write_record(&mut out, "hg19", "AC-GT").unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), ">hg19\nAC-GT\n");
    }
}
