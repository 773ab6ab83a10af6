//! BED file parser with gzip support.
//!
//! Accepts BED3 through BED12. Column 4 names the record (a record without a
//! name is named `chrom:start-end`); columns 10-12 define exon blocks, with
//! block starts relative to the record start per the BED convention. Blank
//! lines and `#`/`track`/`browser` header lines are skipped; any other
//! malformed line aborts the parse with an error naming the 1-based line
//! number. No partially loaded annotation set survives an error.

use anyhow::{bail, Context, Result};
use std::io::BufRead;
use std::path::Path;

use crate::parser::util::open_buffered;
use crate::types::{Annotation, Block, Interval, Strand};

/// Streaming BED annotation reader.
pub struct BedReader {
    reader: Box<dyn BufRead + Send>,
    source: String,
    line_number: u64,
}

impl BedReader {
    /// Open a BED file (plain or `.gz`).
    pub fn new(path: &Path) -> Result<Self> {
        Ok(BedReader::from_reader(
            open_buffered(path)?,
            path.display().to_string(),
        ))
    }

    /// Wrap an already-open reader; `source` is used in error messages.
    pub fn from_reader(reader: Box<dyn BufRead + Send>, source: impl Into<String>) -> Self {
        BedReader {
            reader,
            source: source.into(),
            line_number: 0,
        }
    }

    /// Read the next annotation, or `None` at end of input.
    pub fn read_annotation(&mut self) -> Result<Option<Annotation>> {
        let mut line = String::new();
        loop {
            line.clear();
            let bytes_read = self
                .reader
                .read_line(&mut line)
                .with_context(|| format!("failed to read {}", self.source))?;
            if bytes_read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = line.trim_end();
            if trimmed.is_empty()
                || trimmed.starts_with('#')
                || trimmed.starts_with("track")
                || trimmed.starts_with("browser")
            {
                continue;
            }

            let annotation = parse_line(trimmed)
                .with_context(|| format!("{} line {}", self.source, self.line_number))?;
            return Ok(Some(annotation));
        }
    }
}

impl Iterator for BedReader {
    type Item = Result<Annotation>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_annotation().transpose()
    }
}

/// Read every annotation from a BED file.
pub fn read_annotations(path: &Path) -> Result<Vec<Annotation>> {
    BedReader::new(path)?.collect()
}

/// Parse one BED data line into an annotation.
fn parse_line(line: &str) -> Result<Annotation> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() < 3 {
        bail!("expected at least 3 tab-separated columns, found {}", fields.len());
    }

    let chrom = fields[0];
    let start: u64 = fields[1]
        .parse()
        .with_context(|| format!("invalid start coordinate {:?}", fields[1]))?;
    let end: u64 = fields[2]
        .parse()
        .with_context(|| format!("invalid end coordinate {:?}", fields[2]))?;
    if end < start {
        bail!("end coordinate {} precedes start {}", end, start);
    }

    let name = match fields.get(3) {
        Some(f) if !f.is_empty() => f.to_string(),
        _ => format!("{}:{}-{}", chrom, start, end),
    };

    let strand = match fields.get(5) {
        Some(f) => f
            .parse::<Strand>()
            .with_context(|| format!("invalid strand {:?}", f))?,
        None => Strand::Unstranded,
    };

    let blocks = if fields.len() >= 12 {
        parse_blocks(start, end, fields[9], fields[10], fields[11])?
    } else {
        Vec::new()
    };

    Ok(Annotation::new(
        Interval::new(chrom, start, end, strand),
        name,
        blocks,
    ))
}

/// Parse blockCount/blockSizes/blockStarts into absolute-coordinate blocks.
fn parse_blocks(
    start: u64,
    end: u64,
    count_field: &str,
    sizes_field: &str,
    starts_field: &str,
) -> Result<Vec<Block>> {
    let count: usize = count_field
        .parse()
        .with_context(|| format!("invalid block count {:?}", count_field))?;

    let sizes = parse_comma_list(sizes_field).context("invalid block sizes")?;
    let starts = parse_comma_list(starts_field).context("invalid block starts")?;

    if sizes.len() != count || starts.len() != count {
        bail!(
            "block count {} does not match {} sizes / {} starts",
            count,
            sizes.len(),
            starts.len()
        );
    }

    let mut blocks = Vec::with_capacity(count);
    for (size, rel_start) in sizes.into_iter().zip(starts) {
        let block_start = start + rel_start;
        let block_end = block_start + size;
        if block_end > end {
            bail!("block {}-{} extends past record end {}", block_start, block_end, end);
        }
        blocks.push(Block::new(block_start, block_end));
    }
    Ok(blocks)
}

/// Parse a comma-separated integer list, tolerating the trailing comma BED
/// writers commonly emit.
fn parse_comma_list(field: &str) -> Result<Vec<u64>> {
    field
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u64>()
                .with_context(|| format!("invalid integer {:?}", s))
        })
        .collect()
}
