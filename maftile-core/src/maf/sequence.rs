//! Sequence rows of a MAF alignment block
//!
//! A block row is either an `s` line ([`Sequence`]) carrying gapped alignment
//! text, or an `e` line ([`EmptySequence`]) stating that a species has no
//! aligning DNA in this block although its chain continues through it.

use std::io::Write;
use std::ops::Range;

use crate::error::{MafError, MafResult};
use crate::io::fasta::write_record;
use crate::types::{text_runs, Position, Strand};

/// One aligned row from an `s` line
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    /// Source sequence name, conventionally `species.chromosome`
    pub source: String,
    /// Zero-based start of the aligning region
    pub start: Position,
    /// Size of the aligning region, gaps excluded
    pub size: Position,
    pub strand: Strand,
    /// Size of the entire source sequence
    pub src_size: Position,
    /// Alignment text, gaps included
    pub text: String,
    /// Raw synteny fields from the `i` line
    pub i_data: Option<Vec<String>>,
    /// Quality string from the `q` line, aligned with `text`
    pub quality: Option<String>,
}

impl Sequence {
    pub fn new<S: Into<String>, T: Into<String>>(
        source: S,
        start: Position,
        size: Position,
        strand: Strand,
        src_size: Position,
        text: T,
    ) -> Self {
        Self {
            source: source.into(),
            start,
            size,
            strand,
            src_size,
            text: text.into(),
            i_data: None,
            quality: None,
        }
    }

    pub fn with_quality<S: Into<String>>(mut self, quality: S) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn with_i_data(mut self, i_data: Vec<String>) -> Self {
        self.i_data = Some(i_data);
        self
    }

    pub fn end(&self) -> Position {
        self.start + self.size
    }

    pub fn species(&self) -> Option<&str> {
        species_of(&self.source)
    }

    /// Always false; only [`EmptySequence`] rows are empty
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_gapped(&self) -> bool {
        self.size != self.text.len() as Position
    }

    /// Maps a zero-based genomic range onto the offsets of `text` holding it.
    ///
    /// The returned range includes any gap columns lying strictly inside the
    /// genomic range.
    pub fn text_range(&self, range: Range<Position>) -> MafResult<Range<usize>> {
        map_text_range(&self.source, self.start, self.size, &self.text, range)
    }

    /// Deletes `len` columns at `offset` from the text and quality strings.
    pub fn delete_text(&mut self, offset: usize, len: usize) {
        delete_columns(&mut self.text, offset, len);
        if let Some(quality) = self.quality.as_mut() {
            delete_columns(quality, offset, len);
        }
    }

    pub fn write_fasta<W: Write>(&self, writer: &mut W) -> MafResult<()> {
        let name = format!("{}:{}-{}", self.source, self.start, self.end());
        write_record(writer, &name, &self.text)?;
        Ok(())
    }
}

/// A row from an `e` line: no aligning DNA, but the alignment chain is bridged
#[derive(Debug, Clone, PartialEq)]
pub struct EmptySequence {
    pub source: String,
    pub start: Position,
    pub size: Position,
    pub strand: Strand,
    pub src_size: Position,
    /// Status character describing the bridged region (`C`, `I`, `M`, `n`, ...)
    pub status: char,
}

impl EmptySequence {
    pub fn new<S: Into<String>>(
        source: S,
        start: Position,
        size: Position,
        strand: Strand,
        src_size: Position,
        status: char,
    ) -> Self {
        Self {
            source: source.into(),
            start,
            size,
            strand,
            src_size,
            status,
        }
    }

    pub fn end(&self) -> Position {
        self.start + self.size
    }

    pub fn species(&self) -> Option<&str> {
        species_of(&self.source)
    }

    pub fn is_empty(&self) -> bool {
        true
    }

    pub fn text(&self) -> &str {
        ""
    }

    pub fn write_fasta<W: Write>(&self, _writer: &mut W) -> MafResult<()> {
        Err(MafError::unsupported(format!(
            "empty sequence {}:{}-{} has no text to output",
            self.source,
            self.start,
            self.end()
        )))
    }
}

/// A block row: aligned text or an empty placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Seq(Sequence),
    Empty(EmptySequence),
}

impl Row {
    pub fn source(&self) -> &str {
        match self {
            Row::Seq(s) => &s.source,
            Row::Empty(e) => &e.source,
        }
    }

    pub fn start(&self) -> Position {
        match self {
            Row::Seq(s) => s.start,
            Row::Empty(e) => e.start,
        }
    }

    pub fn size(&self) -> Position {
        match self {
            Row::Seq(s) => s.size,
            Row::Empty(e) => e.size,
        }
    }

    pub fn end(&self) -> Position {
        self.start() + self.size()
    }

    pub fn strand(&self) -> Strand {
        match self {
            Row::Seq(s) => s.strand,
            Row::Empty(e) => e.strand,
        }
    }

    pub fn src_size(&self) -> Position {
        match self {
            Row::Seq(s) => s.src_size,
            Row::Empty(e) => e.src_size,
        }
    }

    pub fn species(&self) -> Option<&str> {
        species_of(self.source())
    }

    /// Alignment text; always empty for an empty row
    pub fn text(&self) -> &str {
        match self {
            Row::Seq(s) => &s.text,
            Row::Empty(e) => e.text(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Row::Seq(s) => s.is_empty(),
            Row::Empty(e) => e.is_empty(),
        }
    }

    pub fn is_gapped(&self) -> bool {
        self.size() != self.text().len() as Position
    }

    pub fn as_sequence(&self) -> Option<&Sequence> {
        match self {
            Row::Seq(s) => Some(s),
            Row::Empty(_) => None,
        }
    }

    /// Whether this row belongs to `name`, given either as a full source or a species
    pub fn matches(&self, name: &str) -> bool {
        self.source() == name || self.species() == Some(name)
    }

    pub fn text_range(&self, range: Range<Position>) -> MafResult<Range<usize>> {
        map_text_range(self.source(), self.start(), self.size(), self.text(), range)
    }

    pub fn delete_text(&mut self, offset: usize, len: usize) {
        if let Row::Seq(s) = self {
            s.delete_text(offset, len);
        }
    }

    pub fn write_fasta<W: Write>(&self, writer: &mut W) -> MafResult<()> {
        match self {
            Row::Seq(s) => s.write_fasta(writer),
            Row::Empty(e) => e.write_fasta(writer),
        }
    }
}

impl From<Sequence> for Row {
    fn from(seq: Sequence) -> Self {
        Row::Seq(seq)
    }
}

impl From<EmptySequence> for Row {
    fn from(seq: EmptySequence) -> Self {
        Row::Empty(seq)
    }
}

fn species_of(source: &str) -> Option<&str> {
    source.split_once('.').map(|(species, _)| species)
}

/// Removes columns `offset..offset + len`, counted in characters
fn delete_columns(text: &mut String, offset: usize, len: usize) {
    let end = offset.saturating_add(len);
    let (start, end) = if text.is_ascii() {
        (offset.min(text.len()), end.min(text.len()))
    } else {
        let byte_at = |col: usize| text.char_indices().nth(col).map_or(text.len(), |(i, _)| i);
        (byte_at(offset), byte_at(end))
    };
    text.replace_range(start..end, "");
}

fn map_text_range(
    source: &str,
    start: Position,
    size: Position,
    text: &str,
    range: Range<Position>,
) -> MafResult<Range<usize>> {
    let end = start + size;
    if range.start == start && range.end == end {
        return Ok(0..text.len());
    }
    if range.start < start || range.end > end || range.start > range.end {
        return Err(MafError::range(format!(
            "range {}-{} outside {} bounds; start {}, size {}",
            range.start, range.end, source, start, size
        )));
    }
    if text.len() as Position == size {
        return Ok((range.start - start) as usize..(range.end - start) as usize);
    }

    let mut g_start = start;
    let mut m_begin = None;
    for run in text_runs(text).filter(|run| !run.is_gap) {
        let g_end = g_start + run.len as Position;
        if g_start <= range.start && range.start < g_end {
            m_begin = Some(run.offset + (range.start - g_start) as usize);
        }
        if g_start <= range.end && range.end <= g_end {
            let m_end = run.offset + (range.end - g_start) as usize;
            return match m_begin {
                Some(m_begin) => Ok(m_begin..m_end),
                None if range.is_empty() => Ok(m_end..m_end),
                None => Err(MafError::consistency(format!(
                    "reached end of {}-{} before its start in {}",
                    range.start, range.end, source
                ))),
            };
        }
        g_start = g_end;
    }

    Err(MafError::consistency(format!(
        "no text run of {} covers {}-{}",
        source, range.start, range.end
    )))
}
