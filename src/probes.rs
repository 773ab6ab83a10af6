//! Per-probe aggregation of classified alignment locations.

use indexmap::IndexMap;

use crate::classify::Position;

/// A RAP probe and every genomic location it aligns to.
#[derive(Debug, Clone)]
pub struct Probe {
    name: String,
    positions: Vec<Position>,
}

impl Probe {
    fn new(name: impl Into<String>) -> Self {
        Probe {
            name: name.into(),
            positions: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Classified positions in the order the alignment stream produced them.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }
}

/// Mapping from probe name to accumulating probe.
///
/// Probes iterate in insertion order (first alignment record seen for the
/// name), which keeps the report deterministic for a given input.
#[derive(Debug, Default)]
pub struct ProbeTable {
    probes: IndexMap<String, Probe>,
}

impl ProbeTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a classified position to the probe, creating the probe on
    /// first sight of the name.
    pub fn add_position(&mut self, name: &str, position: Position) {
        self.probes
            .entry(name.to_string())
            .or_insert_with(|| Probe::new(name))
            .positions
            .push(position);
    }

    pub fn len(&self) -> usize {
        self.probes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Probe> {
        self.probes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Interval, Strand};

    fn position(start: u64, end: u64) -> Position {
        Position {
            interval: Interval::new("chr1", start, end, Strand::Unstranded),
            repeats: Vec::new(),
            genes_no_repeats: Vec::new(),
            genes_exons_with_repeats: Vec::new(),
            genes_introns_with_repeats: Vec::new(),
        }
    }

    #[test]
    fn test_probe_created_on_first_sight() {
        let mut table = ProbeTable::new();
        assert!(table.is_empty());

        table.add_position("P1", position(100, 110));
        table.add_position("P1", position(200, 210));
        table.add_position("P2", position(300, 310));

        assert_eq!(table.len(), 2);
        let p1 = table.iter().next().unwrap();
        assert_eq!(p1.name(), "P1");
        assert_eq!(p1.positions().len(), 2);
    }

    #[test]
    fn test_insertion_order_iteration() {
        let mut table = ProbeTable::new();
        table.add_position("P_Z", position(1, 2));
        table.add_position("P_A", position(3, 4));
        table.add_position("P_Z", position(5, 6));

        let names: Vec<_> = table.iter().map(|p| p.name()).collect();
        assert_eq!(names, vec!["P_Z", "P_A"]);
    }

    #[test]
    fn test_positions_keep_stream_order() {
        let mut table = ProbeTable::new();
        table.add_position("P1", position(300, 310));
        table.add_position("P1", position(100, 110));

        let probe = table.iter().next().unwrap();
        assert_eq!(probe.positions()[0].interval.start, 300);
        assert_eq!(probe.positions()[1].interval.start, 100);
    }
}
