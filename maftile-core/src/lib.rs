//! maftile core library
//!
//! Alignment block model for MAF data, a tiler that projects overlapping
//! scored blocks onto one genomic interval, and a streaming range reader for
//! single-record FASTA reference files.

pub mod config;
pub mod coords;
pub mod error;
pub mod io;
pub mod maf;
pub mod tiler;
pub mod types;

// Re-export commonly used types
pub use config::{ReferenceConfig, TilerConfig};
pub use coords::GenomicInterval;
pub use error::{MafError, MafResult};
pub use io::{FastaRangeReader, IntervalReader};
pub use maf::{Block, EmptySequence, GapSpan, Header, Row, Sequence};
pub use tiler::{BlockIndex, Parser, ReferenceSource, SequenceFilter, Tiler};
pub use types::{Position, Strand};

/// Version information for the maftile core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
