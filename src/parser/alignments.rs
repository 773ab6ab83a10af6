//! Probe alignment reader for BAM and SAM files.
//!
//! The container format is chosen by file extension, and records from either
//! format are converted through the `sam::alignment::record::Record` trait so
//! both share one conversion path. Unmapped records are skipped; secondary
//! and supplementary alignments are kept, since the extra alignment locations
//! of a multi-mapping probe are exactly what gets reported.

use anyhow::{bail, Context, Result};
use noodles::bam;
use noodles::bgzf;
use noodles::sam;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::Record as RecordExt;
use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use crate::parser::util::open_buffered;
use crate::types::{AlignmentRecord, Interval, Strand};

enum Format {
    Bam(bam::io::Reader<bgzf::Reader<File>>),
    Sam(sam::io::Reader<Box<dyn BufRead + Send>>),
}

/// Streaming reader over the mapped records of a BAM or SAM file.
pub struct AlignmentReader {
    format: Format,
    header: sam::Header,
    reference_names: Vec<String>,
    source: String,
    record_number: u64,
}

impl AlignmentReader {
    /// Open an alignment file, dispatching on extension: `.bam`, `.sam`, or
    /// no extension (treated as SAM). Anything else is an error.
    pub fn open(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        let (format, header) = match extension.as_deref() {
            Some("bam") => {
                let mut reader = File::open(path)
                    .map(bam::io::Reader::new)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                let header = reader
                    .read_header()
                    .with_context(|| format!("failed to read BAM header of {}", path.display()))?;
                (Format::Bam(reader), header)
            }
            Some("sam") | None => {
                let mut reader = sam::io::Reader::new(open_buffered(path)?);
                let header = reader
                    .read_header()
                    .with_context(|| format!("failed to read SAM header of {}", path.display()))?;
                (Format::Sam(reader), header)
            }
            Some(ext) => bail!(
                "unsupported alignment format .{} for {}: expected .bam or .sam",
                ext,
                path.display()
            ),
        };

        let reference_names = header
            .reference_sequences()
            .keys()
            .map(|name| name.to_string())
            .collect();

        Ok(AlignmentReader {
            format,
            header,
            reference_names,
            source: path.display().to_string(),
            record_number: 0,
        })
    }

    /// Read the next mapped alignment, or `None` when the stream is
    /// exhausted.
    pub fn read_record(&mut self) -> Result<Option<AlignmentRecord>> {
        loop {
            self.record_number += 1;
            let converted = match &mut self.format {
                Format::Bam(reader) => {
                    let mut record = bam::Record::default();
                    let bytes_read = reader.read_record(&mut record).with_context(|| {
                        format!("failed to read record {} of {}", self.record_number, self.source)
                    })?;
                    if bytes_read == 0 {
                        return Ok(None);
                    }
                    convert_record(&record, &self.header, &self.reference_names)
                }
                Format::Sam(reader) => {
                    let mut record = sam::Record::default();
                    let bytes_read = reader.read_record(&mut record).with_context(|| {
                        format!("failed to read record {} of {}", self.record_number, self.source)
                    })?;
                    if bytes_read == 0 {
                        return Ok(None);
                    }
                    convert_record(&record, &self.header, &self.reference_names)
                }
            };

            match converted
                .with_context(|| format!("record {} of {}", self.record_number, self.source))?
            {
                Some(record) => return Ok(Some(record)),
                // Unmapped; keep draining
                None => continue,
            }
        }
    }
}

impl Iterator for AlignmentReader {
    type Item = Result<AlignmentRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Convert one mapped record to an [`AlignmentRecord`]; `None` for unmapped.
fn convert_record(
    record: &dyn RecordExt,
    header: &sam::Header,
    reference_names: &[String],
) -> Result<Option<AlignmentRecord>> {
    let flags = record.flags().context("invalid flags")?;
    if flags.is_unmapped() {
        return Ok(None);
    }

    let name = match record.name() {
        Some(name) => name.to_string(),
        None => bail!("mapped record has no read name"),
    };

    let reference_id = match record.reference_sequence_id(header) {
        Some(Ok(id)) => id,
        Some(Err(e)) => return Err(e).context("invalid reference sequence id"),
        None => bail!("mapped record has no reference sequence"),
    };
    let chrom = reference_names
        .get(reference_id)
        .with_context(|| format!("reference id {} not present in header", reference_id))?
        .clone();

    let start = match record.alignment_start() {
        Some(Ok(position)) => position.get() as u64 - 1,
        Some(Err(e)) => return Err(e).context("invalid alignment start"),
        None => bail!("mapped record has no alignment start"),
    };

    let span = reference_span(record)?;
    let strand = if flags.is_reverse_complemented() {
        Strand::Reverse
    } else {
        Strand::Forward
    };

    Ok(Some(AlignmentRecord::new(
        name,
        Interval::new(chrom, start, start + span, strand),
    )))
}

/// Number of reference positions the alignment covers.
///
/// M/=/X/D/N consume the reference; insertions, clips, and padding do not.
fn reference_span(record: &dyn RecordExt) -> Result<u64> {
    let mut span: u64 = 0;
    for result in record.cigar().iter() {
        let op = result.context("invalid CIGAR operation")?;
        match op.kind() {
            Kind::Match
            | Kind::SequenceMatch
            | Kind::SequenceMismatch
            | Kind::Deletion
            | Kind::Skip => span += op.len() as u64,
            _ => {}
        }
    }
    Ok(span)
}
