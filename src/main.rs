use anyhow::{Context, Result};
use olympics_scraper::{
    config::Config,
    fetch::HttpPageLoader,
    logging,
    orchestrator::{self, Unit, UnitOutcome},
    sources::{espn, olympedia, olympian_database},
};
use tokio::time::Instant;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    logging::init();
    info!("startup");

    // ─── 2) configure ────────────────────────────────────────────────
    let cfg = Config::load()?;
    info!(
        output = %cfg.output_dir.display(),
        flags = %cfg.flag_dir.display(),
        "configured"
    );
    let loader = HttpPageLoader::new(&cfg).context("building page loader")?;

    // ─── 3) run the three sources side by side ───────────────────────
    let start = Instant::now();
    let units = vec![
        Unit::new("espn", espn::run(loader.clone(), cfg.clone())),
        Unit::new("olympedia", olympedia::run(loader.clone(), cfg.clone())),
        Unit::new(
            "olympian_database",
            olympian_database::run(loader, cfg.clone()),
        ),
    ];
    let reports = orchestrator::run(units).await;

    // ─── 4) summary ──────────────────────────────────────────────────
    let failed = reports
        .iter()
        .filter(|r| r.outcome != UnitOutcome::Completed)
        .count();
    info!(failed, elapsed = ?start.elapsed(), "all done");
    Ok(())
}
