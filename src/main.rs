//! CLI entry point for probeannot.
//!
//! The pipeline is strictly sequential: load repeats, load genes and derive
//! their introns, stream probe alignments classifying each location, then
//! print the per-probe report to stdout. Diagnostics go to stderr through
//! the logging layer so stdout carries nothing but the report.

use anyhow::Result;
use clap::error::ErrorKind;
use clap::{ArgAction, Parser};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;
use tracing::{debug, info, trace};
use tracing_subscriber::EnvFilter;

use probeannot::classify::classify_alignment;
use probeannot::config::Config;
use probeannot::index::GenomeIndex;
use probeannot::output::write_report;
use probeannot::parser::{read_annotations, AlignmentReader};
use probeannot::probes::ProbeTable;

/// Annotate every genomic location a RAP probe aligns to.
///
/// Transposon-targeting probes align to many locations by design; each
/// location is classified against repeat and gene coordinate sets and the
/// results are summarized per probe as a tab-separated table on stdout.
#[derive(Parser, Debug)]
#[command(name = "probeannot")]
#[command(author, version, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// BED file of gene regions
    #[arg(long = "genes")]
    genes: PathBuf,

    /// BAM or SAM file of probe alignments
    #[arg(long = "probes")]
    probes: PathBuf,

    /// BED file of repeat regions
    #[arg(long = "repeats")]
    repeats: PathBuf,

    /// Enable verbose per-record logging
    #[arg(long = "debug")]
    debug: bool,

    /// Print version information
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

fn main() -> Result<()> {
    let start_time = Instant::now();

    // Help and version exit 0; any other argument problem exits 1 after
    // printing usage.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => 1,
            };
            let _ = e.print();
            process::exit(code);
        }
    };

    let config = Config::new(args.repeats, args.genes, args.probes, args.debug);
    init_logging(config.debug);
    config.validate()?;

    let repeats = load_repeats(&config.repeats)?;
    let (genes, _introns) = load_genes(&config.genes)?;
    let probes = load_probes(&config.probes, &repeats, &genes)?;

    let stdout = io::stdout().lock();
    let mut writer = BufWriter::new(stdout);
    write_report(&mut writer, &probes)?;
    writer.flush()?;

    info!("program complete");
    info!("{} milliseconds elapsed", start_time.elapsed().as_millis());
    Ok(())
}

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("probeannot=trace")
    } else {
        EnvFilter::new("probeannot=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(io::stderr)
        .init();

    if debug {
        debug!("running in debug mode");
    }
}

fn load_repeats(path: &Path) -> Result<GenomeIndex> {
    info!("loading repeats");
    let repeats = GenomeIndex::from_annotations(read_annotations(path)?);
    info!("loaded {} repeat annotations", repeats.len());
    Ok(repeats)
}

/// Load the gene index and the index of introns derived from the genes'
/// exon blocks. The intron index is populated for accounting only; no
/// downstream query consults it.
fn load_genes(path: &Path) -> Result<(GenomeIndex, GenomeIndex)> {
    info!("loading genes");
    let annotations = read_annotations(path)?;
    let introns: Vec<_> = annotations.iter().flat_map(|gene| gene.introns()).collect();

    let genes = GenomeIndex::from_annotations(annotations);
    info!("loaded {} gene annotations", genes.len());

    info!("loading introns");
    let introns = GenomeIndex::from_annotations(introns);
    info!("loaded {} intron annotations", introns.len());

    Ok((genes, introns))
}

fn load_probes(path: &Path, repeats: &GenomeIndex, genes: &GenomeIndex) -> Result<ProbeTable> {
    info!("loading probes");
    let mut probes = ProbeTable::new();
    for record in AlignmentReader::open(path)? {
        let record = record?;
        trace!("reading probe {} at {}", record.name, record.interval);
        let position = classify_alignment(&record.interval, repeats, genes);
        probes.add_position(&record.name, position);
    }
    info!("loaded {} probes", probes.len());
    Ok(probes)
}
