use serde::{Deserialize, Serialize};
use std::fmt;

pub type Position = u64;

/// Gap character in aligned text
pub const GAP: u8 = b'-';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Strand::Forward),
            '-' => Some(Strand::Reverse),
            _ => None,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strand::Forward => write!(f, "+"),
            Strand::Reverse => write!(f, "-"),
        }
    }
}

/// A maximal stretch of gap or non-gap characters within aligned text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRun {
    /// Offset of the first character of the run
    pub offset: usize,
    /// Number of characters in the run
    pub len: usize,
    pub is_gap: bool,
}

/// Splits aligned text into maximal gap / non-gap runs, left to right.
pub fn text_runs(text: &str) -> impl Iterator<Item = TextRun> + '_ {
    let bytes = text.as_bytes();
    let mut offset = 0;
    std::iter::from_fn(move || {
        if offset >= bytes.len() {
            return None;
        }
        let is_gap = bytes[offset] == GAP;
        let len = bytes[offset..]
            .iter()
            .take_while(|&&b| (b == GAP) == is_gap)
            .count();
        let run = TextRun { offset, len, is_gap };
        offset += len;
        Some(run)
    })
}

/// Length of the gap run starting exactly at `offset`, zero if none.
pub fn gap_run_at(text: &str, offset: usize) -> usize {
    text.as_bytes()
        .get(offset..)
        .map(|rest| rest.iter().take_while(|&&b| b == GAP).count())
        .unwrap_or(0)
}
