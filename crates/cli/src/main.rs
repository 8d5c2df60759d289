use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use emap_core::{build, load, write_concept_map, MapConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Convert an EMIS local-code to SNOMED CT mapping CSV into a FHIR ConceptMap.
///
/// Reads the mapping table, collapses duplicate source codes (the later row in
/// file order wins) and writes `<map-id>.json` into the output directory.
#[derive(Parser)]
#[command(name = "emap")]
#[command(about = "EMIS local code to SNOMED CT concept map generator")]
struct Cli {
    /// Path to the EMIS mapping CSV export
    #[arg(long)]
    input: PathBuf,

    /// Canonical URL prefix for the concept map
    #[arg(long, default_value = emap_core::constants::DEFAULT_BASE_URL)]
    base_url: String,

    /// Version recorded on the concept map and its group
    #[arg(long, default_value = emap_core::constants::DEFAULT_VERSION)]
    map_version: String,

    /// Directory the concept map document is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("emap_core=info".parse()?)
                .add_directive("emap=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let started = Instant::now();

    let config = MapConfig::new(cli.base_url, cli.map_version)?;

    let rows = load(&cli.input)?;
    let map = build(&rows, &config);
    let path = write_concept_map(&map, &cli.out_dir)?;

    tracing::info!(
        "wrote {} ({} mapped codes) in {:.2?}",
        path.display(),
        rows.len(),
        started.elapsed()
    );

    Ok(())
}
