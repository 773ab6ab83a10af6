//! Parsers for genomic file formats.

pub mod alignments;
pub mod bed;
pub mod util;

pub use alignments::AlignmentReader;
pub use bed::{read_annotations, BedReader};
