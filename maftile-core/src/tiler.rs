//! Tiling of alignment blocks over a genomic interval
//!
//! The tiler asks a [`BlockIndex`] for every block overlapping the target
//! interval, paints each reference column with the block that owns it (higher
//! scores painted last, so they win overlaps), then rebuilds one aligned text
//! per requested species run by run. Columns covered by no block fall back to
//! the reference sequence (or `N`) for the first species and `*` for the rest.

use std::collections::{BTreeMap, BTreeSet};
use std::io::Write;
use std::ops::Range;

use crate::coords::GenomicInterval;
use crate::error::{MafError, MafResult};
use crate::io::fasta::{write_record, IntervalReader};
use crate::maf::Block;
use crate::types::{Position, GAP};

/// Placeholder for reference columns when no reference data is available
pub const UNKNOWN_BASE: char = 'N';
/// Placeholder for species without alignment at a column
pub const MISSING_BASE: char = '*';

/// Row filters a parser applies while building blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceFilter {
    /// Keep only rows whose species is in this set
    pub only_species: Option<BTreeSet<String>>,
}

/// The MAF parser collaborator, seen through its filter settings
pub trait Parser {
    fn sequence_filter(&self) -> &SequenceFilter;
    fn sequence_filter_mut(&mut self) -> &mut SequenceFilter;
}

/// The interval index collaborator
pub trait BlockIndex {
    /// Every block whose reference row overlaps one of `intervals`, built
    /// under the parser's current filter.
    fn find(
        &self,
        intervals: &[GenomicInterval],
        parser: &mut dyn Parser,
    ) -> MafResult<Vec<Block>>;
}

/// Fallback reference data for columns no block covers
pub enum ReferenceSource {
    /// Random-access reader, e.g. a [`crate::io::FastaRangeReader`]
    Reader(Box<dyn IntervalReader>),
    /// Whole reference sequence held in memory, indexed by genomic position
    Text(String),
}

impl ReferenceSource {
    pub fn read(&mut self, range: Range<Position>) -> MafResult<String> {
        match self {
            ReferenceSource::Reader(reader) => reader.read_interval(range.start, range.end),
            ReferenceSource::Text(text) => text
                .get(range.start as usize..range.end as usize)
                .map(str::to_string)
                .ok_or_else(|| {
                    MafError::range(format!(
                        "reference text of {} bases does not cover {}-{}",
                        text.len(),
                        range.start,
                        range.end
                    ))
                }),
        }
    }
}

impl std::fmt::Debug for ReferenceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReferenceSource::Reader(_) => write!(f, "ReferenceSource::Reader"),
            ReferenceSource::Text(text) => {
                write!(f, "ReferenceSource::Text({} bases)", text.len())
            }
        }
    }
}

/// Owner of one reference column in the tiling mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Uncovered,
    /// Index into the score-sorted block list
    Block(usize),
}

/// Projects alignment blocks onto one interval, one text per species
#[derive(Debug)]
pub struct Tiler {
    pub interval: GenomicInterval,
    /// Requested species in output order; the first is the reference species
    pub species: Vec<String>,
    /// Display names used by [`Tiler::write_fasta`]
    pub species_map: BTreeMap<String, String>,
    pub reference: Option<ReferenceSource>,
    /// Clean filtered blocks of all-gap columns before tiling
    pub remove_gaps: bool,
    /// Drop columns where the owning block's reference row has a gap, so each
    /// text is exactly as long as the interval. Off keeps the insertion columns.
    pub strip_ref_gaps: bool,
}

impl Tiler {
    pub fn new(interval: GenomicInterval, species: Vec<String>) -> Self {
        Self {
            interval,
            species,
            species_map: BTreeMap::new(),
            reference: None,
            remove_gaps: true,
            strip_ref_gaps: true,
        }
    }

    pub fn with_species_map(mut self, species_map: BTreeMap<String, String>) -> Self {
        self.species_map = species_map;
        self
    }

    pub fn with_reference(mut self, reference: ReferenceSource) -> Self {
        self.reference = Some(reference);
        self
    }

    pub fn with_remove_gaps(mut self, remove_gaps: bool) -> Self {
        self.remove_gaps = remove_gaps;
        self
    }

    pub fn with_strip_ref_gaps(mut self, strip_ref_gaps: bool) -> Self {
        self.strip_ref_gaps = strip_ref_gaps;
        self
    }

    /// Name written in the FASTA header for `species`
    pub fn display_name<'a>(&'a self, species: &'a str) -> &'a str {
        self.species_map
            .get(species)
            .map(String::as_str)
            .unwrap_or(species)
    }

    /// Restricts the parser to the requested species, fetches the
    /// overlapping blocks and tiles them.
    pub fn tile(
        &mut self,
        index: &dyn BlockIndex,
        parser: &mut dyn Parser,
    ) -> MafResult<Vec<String>> {
        parser.sequence_filter_mut().only_species = Some(self.species.iter().cloned().collect());
        let blocks = index.find(std::slice::from_ref(&self.interval), parser)?;
        log::debug!("Index returned {} blocks for {}", blocks.len(), self.interval);
        self.tile_blocks(blocks)
    }

    /// Tiles an already fetched set of blocks over the interval.
    pub fn tile_blocks(&mut self, mut blocks: Vec<Block>) -> MafResult<Vec<String>> {
        let length = self.interval.length();
        if self.species.is_empty() {
            return Ok(Vec::new());
        }
        if length == 0 {
            return Ok(vec![String::new(); self.species.len()]);
        }

        if self.remove_gaps {
            for block in blocks.iter_mut().filter(|b| b.is_filtered()) {
                block.remove_gaps();
            }
        }
        // stable, so equal scores keep index order and the later one wins
        blocks.sort_by(|a, b| {
            a.score()
                .unwrap_or(0.0)
                .total_cmp(&b.score().unwrap_or(0.0))
        });

        let i_start = self.interval.zero_start;
        let ref_region = match self.reference.as_mut() {
            Some(reference) => Some(reference.read(self.interval.range())?),
            None => None,
        };

        let mut mask = vec![Owner::Uncovered; length];
        for (i, block) in blocks.iter().enumerate() {
            let ref_row = block.ref_seq()?;
            if let Some(clip) = self.interval.clip(ref_row.start(), ref_row.end()) {
                if ref_row.is_empty() {
                    return Err(MafError::consistency(format!(
                        "reference row {} of a block overlapping {} has no alignment text",
                        ref_row.source(),
                        self.interval
                    )));
                }
                let cols = (clip.start - i_start) as usize..(clip.end - i_start) as usize;
                mask[cols].fill(Owner::Block(i));
            }
        }
        let runs = mask_runs(&mask);
        log::debug!(
            "Tiling {} for {} species: {} blocks, {} runs",
            self.interval,
            self.species.len(),
            blocks.len(),
            runs.len()
        );

        let mut text = vec![String::with_capacity(length); self.species.len()];
        for (range, owner) in runs {
            log::trace!("Run {}..{} owned by {:?}", range.start, range.end, owner);
            match owner {
                Owner::Uncovered => self.fill_uncovered(&mut text, range, ref_region.as_deref())?,
                Owner::Block(i) => {
                    let g_range =
                        i_start + range.start as Position..i_start + range.end as Position;
                    self.fill_covered(&mut text, &blocks[i], g_range)?;
                }
            }
        }
        Ok(text)
    }

    fn fill_uncovered(
        &self,
        text: &mut [String],
        range: Range<usize>,
        ref_region: Option<&str>,
    ) -> MafResult<()> {
        let width = range.len();
        let Some((first, rest)) = text.split_first_mut() else {
            return Ok(());
        };
        match ref_region {
            Some(region) => {
                let bases = region.get(range.clone()).ok_or_else(|| {
                    MafError::range(format!(
                        "reference data of {} bases does not cover columns {}..{}",
                        region.len(),
                        range.start,
                        range.end
                    ))
                })?;
                first.push_str(bases);
            }
            None => first.extend(std::iter::repeat(UNKNOWN_BASE).take(width)),
        }
        for t in rest {
            t.extend(std::iter::repeat(MISSING_BASE).take(width));
        }
        Ok(())
    }

    fn fill_covered(
        &self,
        text: &mut [String],
        block: &Block,
        g_range: Range<Position>,
    ) -> MafResult<()> {
        let ref_row = block.ref_seq()?;
        let t_range = ref_row.text_range(g_range)?;
        let keep: Option<Vec<bool>> = if self.strip_ref_gaps {
            Some(
                ref_row.text().as_bytes()[t_range.clone()]
                    .iter()
                    .map(|&b| b != GAP)
                    .collect(),
            )
        } else {
            None
        };

        for (species, out) in self.species.iter().zip(text.iter_mut()) {
            let row = block
                .raw_seqs()
                .find(|row| row.matches(species))
                .filter(|row| !row.is_empty());
            let slice = match row {
                Some(row) => row.text().get(t_range.clone()).ok_or_else(|| {
                    MafError::consistency(format!(
                        "row {} holds {} columns, block reference row {}",
                        row.source(),
                        row.text().len(),
                        ref_row.text().len()
                    ))
                })?,
                None => "",
            };
            match (&keep, slice.is_empty()) {
                (None, false) => out.push_str(slice),
                (None, true) => out.extend(std::iter::repeat(MISSING_BASE).take(t_range.len())),
                (Some(keep), false) => out.extend(
                    slice
                        .chars()
                        .zip(keep.iter())
                        .filter(|(_, k)| **k)
                        .map(|(c, _)| c),
                ),
                (Some(keep), true) => {
                    let width = keep.iter().filter(|&&k| k).count();
                    out.extend(std::iter::repeat(MISSING_BASE).take(width));
                }
            }
        }
        Ok(())
    }

    /// Tiles and writes one FASTA record per species.
    pub fn write_fasta<W: Write>(
        &mut self,
        writer: &mut W,
        index: &dyn BlockIndex,
        parser: &mut dyn Parser,
    ) -> MafResult<()> {
        let text = self.tile(index, parser)?;
        for (species, seq) in self.species.iter().zip(text.iter()) {
            write_record(writer, self.display_name(species), seq)?;
        }
        Ok(())
    }
}

/// Maximal runs of identical ownership, left to right
fn mask_runs(mask: &[Owner]) -> Vec<(Range<usize>, Owner)> {
    let mut runs = Vec::new();
    let mut start = 0;
    for i in 1..=mask.len() {
        if i == mask.len() || mask[i] != mask[start] {
            runs.push((start..i, mask[start]));
            start = i;
        }
    }
    runs
}
