//! probeannot - annotation of multi-mapping RAP probe alignments.
//!
//! Probes designed against transposable elements align to many genomic
//! locations on purpose. This library classifies every location a probe
//! aligns to against repeat and gene coordinate sets: does the location
//! overlap a repeat, a gene with no repeat anywhere, or a repeat-bearing
//! gene's exon body or intron. Results aggregate per probe into a
//! tab-separated summary.
//!
//! # Example
//!
//! ```ignore
//! use probeannot::classify::classify_alignment;
//! use probeannot::index::GenomeIndex;
//! use probeannot::parser::{read_annotations, AlignmentReader};
//! use probeannot::probes::ProbeTable;
//! use std::path::Path;
//!
//! let repeats: GenomeIndex = read_annotations(Path::new("repeats.bed"))?.into_iter().collect();
//! let genes: GenomeIndex = read_annotations(Path::new("genes.bed"))?.into_iter().collect();
//!
//! let mut table = ProbeTable::new();
//! for record in AlignmentReader::open(Path::new("probes.bam"))? {
//!     let record = record?;
//!     table.add_position(&record.name, classify_alignment(&record.interval, &repeats, &genes));
//! }
//! ```

pub mod classify;
pub mod config;
pub mod index;
pub mod output;
pub mod parser;
pub mod probes;
pub mod types;

pub use classify::{classify_alignment, Position};
pub use config::Config;
pub use index::GenomeIndex;
pub use parser::{AlignmentReader, BedReader};
pub use probes::{Probe, ProbeTable};
pub use types::{AlignmentRecord, Annotation, Block, Interval, Strand};
