//! Core data structures for probeannot.
//!
//! Coordinates are 0-based, half-open `[start, end)` throughout, matching the
//! BED convention. Two intervals overlap when they share a chromosome and at
//! least one coordinate position.

use std::fmt;
use std::str::FromStr;

/// Strand orientation for genomic features.
///
/// BED records may leave the strand unspecified (`.`), so that is a
/// first-class variant rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
    Unstranded,
}

/// Error type for parsing strand from string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStrandError;

impl fmt::Display for ParseStrandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid strand: expected '+', '-', or '.'")
    }
}

impl std::error::Error for ParseStrandError {}

impl FromStr for Strand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Forward),
            "-" => Ok(Strand::Reverse),
            "." => Ok(Strand::Unstranded),
            _ => Err(ParseStrandError),
        }
    }
}

impl Strand {
    /// Convert strand to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
            Strand::Unstranded => ".",
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A genomic interval: chromosome, half-open coordinate range, strand.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Interval {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
}

impl Interval {
    /// Create a new interval.
    pub fn new(chrom: impl Into<String>, start: u64, end: u64, strand: Strand) -> Self {
        Interval {
            chrom: chrom.into(),
            start,
            end,
            strand,
        }
    }

    /// Get the interval length.
    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    /// Whether the interval covers no positions.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Whether this interval shares at least one position with another.
    ///
    /// Strand plays no role; only chromosome and coordinates are compared.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.chrom == other.chrom && self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

/// One exon block within an annotation, in absolute chromosome coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub start: u64,
    pub end: u64,
}

impl Block {
    pub fn new(start: u64, end: u64) -> Self {
        Block { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

/// A named genomic interval composed of one or more exon blocks.
///
/// A blockless record (BED3-BED9) is represented as a single block covering
/// the whole span, so the exon body and the span coincide. Blocks are kept
/// sorted by start position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    interval: Interval,
    name: String,
    blocks: Vec<Block>,
}

impl Annotation {
    /// Create an annotation. An empty block list is replaced by a single
    /// block covering the whole span; blocks are sorted by start.
    pub fn new(interval: Interval, name: impl Into<String>, mut blocks: Vec<Block>) -> Self {
        if blocks.is_empty() {
            blocks.push(Block::new(interval.start, interval.end));
        }
        blocks.sort_by_key(|b| b.start);
        Annotation {
            interval,
            name: name.into(),
            blocks,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn chrom(&self) -> &str {
        &self.interval.chrom
    }

    /// The full span of the annotation, introns included.
    pub fn span(&self) -> &Interval {
        &self.interval
    }

    pub fn strand(&self) -> Strand {
        self.interval.strand
    }

    /// Exon blocks, sorted by start.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Whether the interval overlaps this annotation's exon body.
    pub fn body_overlaps(&self, other: &Interval) -> bool {
        self.interval.chrom == other.chrom
            && self
                .blocks
                .iter()
                .any(|b| b.start < other.end && other.start < b.end)
    }

    /// Derive the introns: gaps between consecutive exon blocks.
    ///
    /// Each intron is returned as its own single-block annotation named
    /// `<name>_intron_<n>`, carrying the parent strand. A single-block
    /// annotation has no introns.
    pub fn introns(&self) -> Vec<Annotation> {
        let mut introns = Vec::new();
        for (i, pair) in self.blocks.windows(2).enumerate() {
            let (left, right) = (pair[0], pair[1]);
            if right.start > left.end {
                let interval = Interval::new(
                    self.interval.chrom.clone(),
                    left.end,
                    right.start,
                    self.interval.strand,
                );
                introns.push(Annotation::new(
                    interval,
                    format!("{}_intron_{}", self.name, i + 1),
                    Vec::new(),
                ));
            }
        }
        introns
    }
}

/// One aligned location of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub name: String,
    pub interval: Interval,
}

impl AlignmentRecord {
    pub fn new(name: impl Into<String>, interval: Interval) -> Self {
        AlignmentRecord {
            name: name.into(),
            interval,
        }
    }
}
