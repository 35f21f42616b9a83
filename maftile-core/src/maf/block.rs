//! MAF alignment blocks and all-gap column removal

use std::collections::BTreeMap;

use crate::error::{MafError, MafResult};
use crate::maf::sequence::Row;
use crate::types::{gap_run_at, text_runs};

/// A span of alignment columns that is gap in every non-empty row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GapSpan {
    pub offset: usize,
    pub len: usize,
}

/// A MAF alignment block: one `a` line and the rows that follow it
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Variable-value pairs from the `a` line
    pub vars: BTreeMap<String, String>,
    /// Rows in file order; the first one is the reference row
    pub sequences: Vec<Row>,
    /// Byte offset of the block within its MAF file
    pub offset: u64,
    /// Byte length of the block within its MAF file
    pub size: usize,
    filtered: bool,
}

impl Block {
    pub fn new(
        vars: BTreeMap<String, String>,
        sequences: Vec<Row>,
        offset: u64,
        size: usize,
        filtered: bool,
    ) -> Self {
        Self {
            vars,
            sequences,
            offset,
            size,
            filtered,
        }
    }

    /// Convenience constructor for a block with only a score
    pub fn scored(score: f64, sequences: Vec<Row>) -> Self {
        let mut vars = BTreeMap::new();
        vars.insert("score".to_string(), score.to_string());
        Self::new(vars, sequences, 0, 0, false)
    }

    pub fn with_filtered(mut self, filtered: bool) -> Self {
        self.filtered = filtered;
        self
    }

    /// Numeric `score` variable, if present and parseable
    pub fn score(&self) -> Option<f64> {
        self.vars.get("score").and_then(|v| v.parse::<f64>().ok())
    }

    pub fn ref_seq(&self) -> MafResult<&Row> {
        self.raw_seq(0)
    }

    pub fn raw_seq(&self, i: usize) -> MafResult<&Row> {
        self.sequences.get(i).ok_or_else(|| {
            MafError::missing_row(format!(
                "row {} requested from a block of {} rows at offset {}",
                i,
                self.sequences.len(),
                self.offset
            ))
        })
    }

    pub fn raw_seqs(&self) -> impl Iterator<Item = &Row> {
        self.sequences.iter()
    }

    /// Number of text columns, gaps included
    pub fn text_size(&self) -> usize {
        self.sequences.first().map(|s| s.text().len()).unwrap_or(0)
    }

    /// Whether a parser filter removed rows from this block
    pub fn is_filtered(&self) -> bool {
        self.filtered
    }

    /// Finds column spans that are gap in every non-empty row.
    ///
    /// Spans are anchored on gap runs of the reference row and returned left
    /// to right.
    pub fn find_gaps(&self) -> Vec<GapSpan> {
        let Some(reference) = self.sequences.first() else {
            return Vec::new();
        };
        let others: Vec<&str> = self.sequences[1..]
            .iter()
            .filter(|s| !s.is_empty())
            .map(Row::text)
            .collect();

        text_runs(reference.text())
            .filter(|run| run.is_gap)
            .filter_map(|run| {
                others.iter().try_fold(run.len, |len, text| {
                    match gap_run_at(text, run.offset) {
                        0 => None,
                        other => Some(len.min(other)),
                    }
                })
                .map(|len| GapSpan {
                    offset: run.offset,
                    len,
                })
            })
            .collect()
    }

    /// Deletes columns that are gap in every non-empty row.
    ///
    /// Returns the number of spans removed; a second call returns 0.
    pub fn remove_gaps(&mut self) -> usize {
        let gaps = self.find_gaps();
        for gap in gaps.iter().rev() {
            for seq in self.sequences.iter_mut() {
                seq.delete_text(gap.offset, gap.len);
            }
        }
        if !gaps.is_empty() {
            log::debug!(
                "Removed {} all-gap spans from block at offset {}",
                gaps.len(),
                self.offset
            );
        }
        gaps.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maf::sequence::{EmptySequence, Sequence};
    use crate::types::Strand;

    fn seq(source: &str, start: u64, text: &str) -> Row {
        let size = text.bytes().filter(|&b| b != b'-').count() as u64;
        Sequence::new(source, start, size, Strand::Forward, 1_000_000, text).into()
    }

    #[test]
    fn test_accessors() {
        let block = Block::scored(
            42.5,
            vec![seq("hg19.chr1", 10, "ACGT"), seq("mm9.chr2", 20, "AC-T")],
        );
        assert_eq!(block.score(), Some(42.5));
        assert_eq!(block.ref_seq().unwrap().source(), "hg19.chr1");
        assert_eq!(block.raw_seq(1).unwrap().source(), "mm9.chr2");
        assert!(matches!(
            block.raw_seq(2).unwrap_err(),
            MafError::MissingRow { .. }
        ));
        assert_eq!(block.raw_seqs().count(), 2);
        assert_eq!(block.text_size(), 4);
        assert!(!block.is_filtered());
    }

    #[test]
    fn test_missing_score() {
        let block = Block::new(BTreeMap::new(), Vec::new(), 0, 0, false);
        assert_eq!(block.score(), None);
        assert_eq!(block.text_size(), 0);
        assert!(block.ref_seq().is_err());
        assert!(block.find_gaps().is_empty());
    }

    #[test]
    fn test_find_gaps_shared() {
        let block = Block::scored(
            0.0,
            vec![
                seq("hg19.chr1", 0, "AC---GT-A"),
                seq("mm9.chr1", 0, "AC--TGT-A"),
                seq("rn4.chr1", 0, "AC---GTTA"),
            ],
        );
        assert_eq!(block.find_gaps(), vec![GapSpan { offset: 2, len: 2 }]);
    }

    #[test]
    fn test_find_gaps_requires_same_offset() {
        let block = Block::scored(
            0.0,
            vec![seq("hg19.chr1", 0, "AC--GT"), seq("mm9.chr1", 0, "A--CGT")],
        );
        assert!(block.find_gaps().is_empty());
    }

    #[test]
    fn test_remove_gaps() {
        let mut block = Block::scored(
            0.0,
            vec![
                seq("hg19.chr1", 0, "A--CG-T--"),
                seq("mm9.chr1", 0, "A---G-T--"),
                EmptySequence::new("rn4.chr1", 0, 100, Strand::Forward, 1000, 'I').into(),
            ],
        )
        .with_filtered(true);

        assert_eq!(block.remove_gaps(), 3);
        assert_eq!(block.sequences[0].text(), "ACGT");
        assert_eq!(block.sequences[1].text(), "A-GT");
        assert_eq!(block.sequences[2].text(), "");
        assert_eq!(block.remove_gaps(), 0);
    }

    #[test]
    fn test_remove_gaps_with_quality() {
        let reference = Sequence::new("hg19.chr1", 0, 3, Strand::Forward, 100, "A--GT");
        let other = Sequence::new("mm9.chr1", 0, 3, Strand::Forward, 100, "A--GT")
            .with_quality("9--99");
        let mut block = Block::scored(1.0, vec![reference.into(), other.into()]);

        assert_eq!(block.remove_gaps(), 1);
        let other = block.sequences[1].as_sequence().unwrap();
        assert_eq!(other.text, "AGT");
        assert_eq!(other.quality.as_deref(), Some("999"));
    }
}
