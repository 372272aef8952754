//! Facility enrichment pipeline.
//!
//! Loads the three reference tables, resolves every facility against both
//! boundary vintages, and writes the enriched collection back out.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use banyan::models::Facility;
use banyan::pipeline::{build_district_index, enrich_facilities};
use banyan::reference::ReferenceTables;
use banyan::resolve::{Resolver, DEFAULT_FALLBACK_RADIUS_KM};

#[derive(Parser, Debug)]
#[command(name = "enrich")]
#[command(about = "Enrich facility records with dual-vintage administrative identity")]
struct Args {
    /// Facility collection to enrich (JSON array)
    #[arg(short, long)]
    facilities: PathBuf,

    /// Legacy district reference table (CSV)
    #[arg(long, default_value = "data/districts.csv")]
    districts: PathBuf,

    /// Province conversion table (CSV)
    #[arg(long, default_value = "data/conversions.csv")]
    conversions: PathBuf,

    /// Reorganized ward reference table (CSV)
    #[arg(long, default_value = "data/wards.csv")]
    wards: PathBuf,

    /// Output path for the enriched collection
    #[arg(short, long)]
    output: PathBuf,

    /// Optional output path for the per-district linkage index
    #[arg(long)]
    district_index: Option<PathBuf>,

    /// Radius for the nearest-centroid fallback, in kilometres
    #[arg(long, default_value_t = DEFAULT_FALLBACK_RADIUS_KM)]
    fallback_radius_km: f64,
}

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    info!("Banyan Enrichment Pipeline");
    info!("Facilities: {}", args.facilities.display());

    let tables = ReferenceTables::load(&args.districts, &args.conversions, &args.wards)?;

    let file = File::open(&args.facilities).context("Failed to open facility file")?;
    let mut facilities: Vec<Facility> =
        serde_json::from_reader(BufReader::new(file)).context("Failed to parse facility file")?;
    info!("Loaded {} facilities", facilities.len());

    let resolver = Resolver::new(&tables).with_fallback_radius(args.fallback_radius_km);
    let stats = enrich_facilities(&mut facilities, &resolver);

    let out = File::create(&args.output).context("Failed to create output file")?;
    serde_json::to_writer_pretty(BufWriter::new(out), &facilities)
        .context("Failed to write enriched facilities")?;
    info!(
        "Wrote {} facilities to {}",
        facilities.len(),
        args.output.display()
    );

    if let Some(path) = &args.district_index {
        let index = build_district_index(&tables);
        let out = File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(out), &index)
            .context("Failed to write district index")?;
        info!(
            "Wrote district index with {} entries to {}",
            index.len(),
            path.display()
        );
    }

    info!(
        "Matched {} facilities to legacy districts, {} to reorganized wards; {} had no coordinate",
        stats.matched_old, stats.matched_new, stats.unmatched
    );

    Ok(())
}
