//! `site-search-assets` — Generates the static pages and scripts the search widget runs on.
//!
//! **Outputs:**
//! - `<out>/search/index.html` — Results page with the search form and list
//! - `<out>/partials/header-search.html` — Header quick-search form
//! - `<out>/js/ga4-tracking.js` — GA4 loader (only with `--measurement-id`)
//!
//! **Usage:**
//! ```text
//! site-search-assets [--out <dir>] [--config <file>] [--measurement-id <G-...>]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use site_search::{generate_assets, AssetStatus, MeasurementId};
use site_search_clients::{init_tracing, load_config};

/// Generate site search page assets.
#[derive(Parser)]
#[command(
    name = "site-search-assets",
    about = "Generate site search page assets"
)]
struct Args {
    /// Output directory (the site's static root).
    #[arg(long, default_value = "public")]
    out: PathBuf,

    /// Search configuration (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// GA4 measurement ID; enables the analytics script.
    #[arg(long)]
    measurement_id: Option<MeasurementId>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    let written = generate_assets(&args.out, &config, args.measurement_id.as_ref())
        .with_context(|| format!("Failed to generate assets in {}", args.out.display()))?;

    println!("Search assets generated in {}", args.out.display());
    for asset in &written {
        let status = match asset.status {
            AssetStatus::Created => "created",
            AssetStatus::Updated => "updated",
            AssetStatus::Unchanged => "unchanged",
        };
        println!("  {:<9} {:>6} bytes  {}", status, asset.bytes, asset.path.display());
    }
    if args.measurement_id.is_none() {
        println!("  (analytics skipped: no --measurement-id)");
    }
    Ok(())
}
