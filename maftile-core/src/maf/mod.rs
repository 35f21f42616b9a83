//! MAF (Multiple Alignment Format) data model
//!
//! MAF stores multiple alignments at the DNA level. Each alignment block
//! begins with an "a" line and holds one row per species: "s" lines with
//! aligned text and "e" lines for bridged regions without aligning DNA.

pub mod block;
pub mod header;
pub mod sequence;

pub use block::{Block, GapSpan};
pub use header::Header;
pub use sequence::{EmptySequence, Row, Sequence};
