//! In-memory collaborators for integration tests

#![allow(dead_code)]

use maftile_core::{
    Block, BlockIndex, GenomicInterval, MafResult, Parser, Row, Sequence, SequenceFilter, Strand,
};

/// Route library `debug!`/`trace!` output to the test harness; set
/// `RUST_LOG=maftile_core=trace` to see it.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Parser stand-in that only records its filter
#[derive(Debug, Default)]
pub struct FilterParser {
    pub filter: SequenceFilter,
}

impl Parser for FilterParser {
    fn sequence_filter(&self) -> &SequenceFilter {
        &self.filter
    }

    fn sequence_filter_mut(&mut self) -> &mut SequenceFilter {
        &mut self.filter
    }
}

/// Linear-scan index over blocks kept in memory, in insertion order
#[derive(Debug, Default)]
pub struct VecIndex {
    pub blocks: Vec<Block>,
}

impl VecIndex {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}

impl BlockIndex for VecIndex {
    fn find(
        &self,
        intervals: &[GenomicInterval],
        parser: &mut dyn Parser,
    ) -> MafResult<Vec<Block>> {
        let filter = parser.sequence_filter().clone();
        let mut found = Vec::new();
        for block in &self.blocks {
            let ref_row = block.ref_seq()?;
            let chrom = ref_row
                .source()
                .split_once('.')
                .map(|(_, chrom)| chrom)
                .unwrap_or(ref_row.source());
            let hit = intervals
                .iter()
                .any(|i| i.chrom == chrom && i.overlaps(ref_row.start(), ref_row.end()));
            if !hit {
                continue;
            }
            let rows: Vec<Row> = match &filter.only_species {
                Some(keep) => block
                    .raw_seqs()
                    .filter(|row| keep.iter().any(|s| row.matches(s)))
                    .cloned()
                    .collect(),
                None => block.sequences.clone(),
            };
            let filtered = rows.len() != block.sequences.len();
            found.push(Block::new(
                block.vars.clone(),
                rows,
                block.offset,
                block.size,
                filtered,
            ));
        }
        Ok(found)
    }
}

/// Row whose size is derived from the non-gap characters of `text`
pub fn row(source: &str, start: u64, text: &str) -> Row {
    let size = text.bytes().filter(|&b| b != b'-').count() as u64;
    Sequence::new(source, start, size, Strand::Forward, 10_000_000, text).into()
}

pub fn species(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
