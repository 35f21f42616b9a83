//! File format I/O for reference sequence data

pub mod fasta;

pub use fasta::{write_record, FastaRangeReader, IntervalReader};
