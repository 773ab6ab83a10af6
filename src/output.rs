//! Report formatting for the per-probe summary.
//!
//! One tab-separated row per probe. Each category field counts how many of
//! the probe's positions contained each name, rendered as `count:name`
//! entries joined by `;`, or a bare `.` when the category is empty.

use anyhow::Result;
use indexmap::IndexMap;

use std::io::Write;

use crate::probes::{Probe, ProbeTable};

const HEADER: &str =
    "NAME\tREPEATS\tGENES_NO_REPEATS\tGENES_EXONS_WITH_REPEATS\tGENES_INTRONS_WITH_REPEATS";

/// Write the report header.
pub fn write_header<W: Write>(writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", HEADER)?;
    Ok(())
}

/// Render one category field from per-name counts.
fn render_counts(counts: &IndexMap<String, u64>) -> String {
    if counts.is_empty() {
        return ".".to_string();
    }
    counts
        .iter()
        .map(|(name, count)| format!("{}:{}", count, name))
        .collect::<Vec<_>>()
        .join(";")
}

/// Count occurrences of each name across a probe's positions, keyed in
/// first-encounter order.
fn tally<'a>(names_per_position: impl Iterator<Item = &'a [String]>) -> IndexMap<String, u64> {
    let mut counts = IndexMap::new();
    for names in names_per_position {
        for name in names {
            *counts.entry(name.clone()).or_insert(0) += 1;
        }
    }
    counts
}

/// Format one probe's summary row.
pub fn format_probe_line(probe: &Probe) -> String {
    let positions = probe.positions();
    let repeats = tally(positions.iter().map(|p| p.repeats.as_slice()));
    let no_repeats = tally(positions.iter().map(|p| p.genes_no_repeats.as_slice()));
    let exons = tally(
        positions
            .iter()
            .map(|p| p.genes_exons_with_repeats.as_slice()),
    );
    let introns = tally(
        positions
            .iter()
            .map(|p| p.genes_introns_with_repeats.as_slice()),
    );

    format!(
        "{}\t{}\t{}\t{}\t{}",
        probe.name(),
        render_counts(&repeats),
        render_counts(&no_repeats),
        render_counts(&exons),
        render_counts(&introns)
    )
}

/// Write the full report: header plus one row per probe, in probe
/// insertion order.
pub fn write_report<W: Write>(writer: &mut W, probes: &ProbeTable) -> Result<()> {
    write_header(writer)?;
    for probe in probes.iter() {
        writeln!(writer, "{}", format_probe_line(probe))?;
    }
    Ok(())
}
