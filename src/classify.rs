//! Overlap classification of a single alignment location.
//!
//! For each place a probe aligns, the repeat and gene indexes are queried and
//! every gene whose span covers the location is placed in exactly one of
//! three categories: the gene carries no repeat at all, the alignment sits in
//! the gene's exon body, or the alignment sits in the gene's remaining
//! (intronic) span. Exons and introns are assumed to partition the gene span,
//! so a location outside every exon block is taken to be intronic without
//! re-checking the gaps themselves.

use crate::index::GenomeIndex;
use crate::types::Interval;

/// One classified alignment location for one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub interval: Interval,
    /// Repeats whose span overlaps the alignment interval.
    pub repeats: Vec<String>,
    /// Overlapping genes with no repeat overlap anywhere in the gene.
    pub genes_no_repeats: Vec<String>,
    /// Repeat-bearing genes where the alignment falls in the exon body.
    pub genes_exons_with_repeats: Vec<String>,
    /// Repeat-bearing genes where the alignment falls in an intron.
    pub genes_introns_with_repeats: Vec<String>,
}

/// Classify one alignment interval against the repeat and gene indexes.
pub fn classify_alignment(
    interval: &Interval,
    repeats: &GenomeIndex,
    genes: &GenomeIndex,
) -> Position {
    let repeat_names = repeats
        .span_overlappers(interval)
        .iter()
        .map(|r| r.name().to_string())
        .collect();

    let mut genes_no_repeats = Vec::new();
    let mut genes_exons_with_repeats = Vec::new();
    let mut genes_introns_with_repeats = Vec::new();

    for gene in genes.span_overlappers(interval) {
        let name = gene.name().to_string();
        if !repeats.overlaps_span(gene.span()) {
            genes_no_repeats.push(name);
        } else if gene.body_overlaps(interval) {
            genes_exons_with_repeats.push(name);
        } else {
            genes_introns_with_repeats.push(name);
        }
    }

    Position {
        interval: interval.clone(),
        repeats: repeat_names,
        genes_no_repeats,
        genes_exons_with_repeats,
        genes_introns_with_repeats,
    }
}
