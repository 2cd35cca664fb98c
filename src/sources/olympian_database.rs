// src/sources/olympian_database.rs

use anyhow::Result;
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::datasets::DatasetKind;
use crate::error::Result as ScrapeResult;
use crate::extract::{self, TableLocator};
use crate::fetch::PageLoader;
use crate::process::{
    aggregate,
    normalize::{positional, project, split_host_city, zip_row},
    Dataset,
};
use crate::sources::finish;

pub const OLYMPIAD_URL: &str = "https://www.olympiandatabase.com/index.php?id=418&L=1";

/// Continental medal tables, newest first.
static CONTINENT_MEDALS_URLS: &[(&str, &str)] = &[
    ("2020", "https://www.olympiandatabase.com/index.php?id=44917&L=1"),
    ("2016", "https://www.olympiandatabase.com/index.php?id=22912&L=1"),
    ("2012", "https://www.olympiandatabase.com/index.php?id=17553&L=1"),
    ("2008", "https://www.olympiandatabase.com/index.php?id=15537&L=1"),
    ("2004", "https://www.olympiandatabase.com/index.php?id=15547&L=1"),
];

const FRAME: &str = ".frame_space";

const OLYMPIAD_CELLS: [&str; 4] = ["Olympiad", "Host City", "Nations", "Athletes"];
const OLYMPIAD_COLUMNS: [&str; 5] = ["Olympiad", "Year", "Host City", "Nations", "Athletes"];

const CONTINENT_CELLS: [&str; 7] = ["Rank", "Continent", "Flag", "Gold", "Silver", "Bronze", "Total"];
const CONTINENT_COLUMNS: [&str; 7] = ["Year", "Rank", "Continent", "Gold", "Silver", "Bronze", "Total"];

/// Games list: second frame table, host city split into city and year.
#[instrument(level = "info", skip_all)]
pub async fn scrape_olympiads<L: PageLoader>(loader: &L, cfg: &Config) -> Result<()> {
    info!("Scraping data from {}", OLYMPIAD_URL);
    let html = loader.load(OLYMPIAD_URL, FRAME).await?;
    let table = extract::extract(&html, OLYMPIAD_URL, &TableLocator::nth(FRAME, 1))?.table;

    let mut dataset = Dataset::new();
    for cells in &table.rows {
        match split_host_city(zip_row(&OLYMPIAD_CELLS, cells)) {
            Ok(record) => dataset.push(project(&record, &OLYMPIAD_COLUMNS)),
            Err(e) => warn!(row = ?cells, error = %e, "skipping olympiad row"),
        }
    }
    finish(dataset, DatasetKind::Olympiad, cfg)?;
    Ok(())
}

async fn continent_medals_year<L: PageLoader>(loader: &L, year: String, url: String) -> ScrapeResult<Dataset> {
    info!("Scraping medals data from {} for year {}", url, year);
    let html = loader.load(&url, FRAME).await?;
    let table = extract::extract(&html, &url, &TableLocator::nth(FRAME, 2))?.table;

    Ok(table
        .rows
        .iter()
        .map(|cells| project(&positional(cells, &CONTINENT_CELLS, &year), &CONTINENT_COLUMNS))
        .collect())
}

/// Medals by continent for every listed year, concatenated.
#[instrument(level = "info", skip_all)]
pub async fn scrape_continent_medals<L: PageLoader>(loader: &L, cfg: &Config) -> Result<()> {
    let agg = aggregate(CONTINENT_MEDALS_URLS, |year, url| {
        continent_medals_year(loader, year, url)
    })
    .await;
    finish(agg.dataset, DatasetKind::ContinentalMedals, cfg)?;
    Ok(())
}

/// Olympiads then continental medals. Either may fail without blocking the other.
pub async fn run<L: PageLoader>(loader: L, cfg: Config) -> Result<()> {
    let olympiads = scrape_olympiads(&loader, &cfg).await;
    if let Err(e) = &olympiads {
        error!("Error occurred: {:#}", e);
    }
    let medals = scrape_continent_medals(&loader, &cfg).await;
    if let Err(e) = &medals {
        error!("Error occurred: {:#}", e);
    }
    olympiads.and(medals)
}
