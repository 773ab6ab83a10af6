//! Per-chromosome interval index over loaded annotations.
//!
//! The index is built once after a coordinate file is fully loaded and is
//! read-only afterwards. Two query shapes are supported: overlap against an
//! annotation's full span (introns included) and overlap against its exon
//! body (the union of its blocks). Each shape gets its own `Lapper` per
//! chromosome.

use ahash::{AHashMap, AHashSet};
use rust_lapper::{Interval as Iv, Lapper};

use crate::types::{Annotation, Interval};

struct ChromIndex {
    /// One interval per annotation, covering its full span.
    spans: Lapper<u64, usize>,
    /// One interval per exon block, tagged with the owning annotation.
    blocks: Lapper<u64, usize>,
}

/// A static overlap index over a set of annotations.
pub struct GenomeIndex {
    annotations: Vec<Annotation>,
    by_chrom: AHashMap<String, ChromIndex>,
}

impl GenomeIndex {
    /// Build the index from a fully loaded annotation set.
    pub fn from_annotations(annotations: Vec<Annotation>) -> Self {
        let mut span_ivs: AHashMap<String, Vec<Iv<u64, usize>>> = AHashMap::new();
        let mut block_ivs: AHashMap<String, Vec<Iv<u64, usize>>> = AHashMap::new();

        for (id, ann) in annotations.iter().enumerate() {
            let span = ann.span();
            span_ivs.entry(ann.chrom().to_string()).or_default().push(Iv {
                start: span.start,
                stop: span.end,
                val: id,
            });
            let chrom_blocks = block_ivs.entry(ann.chrom().to_string()).or_default();
            for block in ann.blocks() {
                chrom_blocks.push(Iv {
                    start: block.start,
                    stop: block.end,
                    val: id,
                });
            }
        }

        let mut by_chrom = AHashMap::new();
        for (chrom, spans) in span_ivs {
            let blocks = block_ivs.remove(&chrom).unwrap_or_default();
            by_chrom.insert(
                chrom,
                ChromIndex {
                    spans: Lapper::new(spans),
                    blocks: Lapper::new(blocks),
                },
            );
        }

        GenomeIndex {
            annotations,
            by_chrom,
        }
    }

    /// Number of annotations in the index.
    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    /// Annotations whose full span overlaps the query interval.
    ///
    /// Results are in span start order within the chromosome.
    pub fn span_overlappers(&self, query: &Interval) -> Vec<&Annotation> {
        let Some(chrom) = self.by_chrom.get(&query.chrom) else {
            return Vec::new();
        };
        chrom
            .spans
            .find(query.start, query.end)
            .map(|iv| &self.annotations[iv.val])
            .collect()
    }

    /// Annotations whose exon body overlaps the query interval.
    ///
    /// A multi-block annotation is reported once even when several of its
    /// blocks overlap; results keep the order of first encounter (block start
    /// order within the chromosome).
    pub fn body_overlappers(&self, query: &Interval) -> Vec<&Annotation> {
        let Some(chrom) = self.by_chrom.get(&query.chrom) else {
            return Vec::new();
        };

        let mut seen = AHashSet::new();
        let mut hits = Vec::new();
        for iv in chrom.blocks.find(query.start, query.end) {
            if seen.insert(iv.val) {
                hits.push(&self.annotations[iv.val]);
            }
        }
        hits
    }

    /// Whether any annotation's full span overlaps the query interval.
    pub fn overlaps_span(&self, query: &Interval) -> bool {
        self.by_chrom
            .get(&query.chrom)
            .is_some_and(|chrom| chrom.spans.find(query.start, query.end).next().is_some())
    }

    /// Whether any annotation's exon body overlaps the query annotation's
    /// exon body.
    pub fn overlaps_body(&self, query: &Annotation) -> bool {
        let Some(chrom) = self.by_chrom.get(query.chrom()) else {
            return false;
        };
        query
            .blocks()
            .iter()
            .any(|block| chrom.blocks.find(block.start, block.end).next().is_some())
    }
}

impl FromIterator<Annotation> for GenomeIndex {
    fn from_iter<T: IntoIterator<Item = Annotation>>(iter: T) -> Self {
        GenomeIndex::from_annotations(iter.into_iter().collect())
    }
}
