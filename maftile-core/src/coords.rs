//! Coordinate systems and genomic intervals

use crate::types::Position;
use std::fmt;
use std::ops::Range;

/// Half-open, 0-based interval on one reference chromosome
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomicInterval {
    /// Chromosome or source name
    pub chrom: String,
    /// Start position (0-based, inclusive)
    pub zero_start: Position,
    /// End position (0-based, exclusive)
    pub zero_end: Position,
}

impl GenomicInterval {
    /// Create an interval from 0-based half-open coordinates
    pub fn new<S: Into<String>>(chrom: S, zero_start: Position, zero_end: Position) -> Self {
        Self {
            chrom: chrom.into(),
            zero_start,
            zero_end: zero_end.max(zero_start),
        }
    }

    /// Create an interval from 1-based closed coordinates (`chr1:101-200`)
    pub fn from_one_based<S: Into<String>>(chrom: S, start: Position, end: Position) -> Self {
        Self::new(chrom, start.saturating_sub(1), end)
    }

    /// Number of bases covered
    pub fn length(&self) -> usize {
        (self.zero_end - self.zero_start) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.zero_start >= self.zero_end
    }

    pub fn range(&self) -> Range<Position> {
        self.zero_start..self.zero_end
    }

    /// Check if this interval overlaps a 0-based half-open span on the same chromosome
    pub fn overlaps(&self, start: Position, end: Position) -> bool {
        self.zero_start < end && start < self.zero_end
    }

    /// Clip a span to this interval, `None` when they do not intersect
    pub fn clip(&self, start: Position, end: Position) -> Option<Range<Position>> {
        let start = self.zero_start.max(start);
        let end = self.zero_end.min(end);
        if start < end {
            Some(start..end)
        } else {
            None
        }
    }
}

impl fmt::Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.zero_start, self.zero_end)
    }
}
