// src/sources/espn.rs

use anyhow::{Context, Result};
use tracing::{error, info, instrument};

use crate::config::Config;
use crate::datasets::DatasetKind;
use crate::error::Result as ScrapeResult;
use crate::extract::{self, Extraction, TableLocator};
use crate::fetch::{download_all, PageLoader};
use crate::process::{
    aggregate,
    normalize::{with_year, zip_row, FLAG_URL, YEAR},
    Dataset,
};
use crate::sources::finish;

static COUNTRY_MEDALS_URLS: &[(&str, &str)] = &[
    ("2004", "https://www.espn.com/olympics/summer/2004/medals/_/view/overall"),
    ("2008", "https://www.espn.com/olympics/summer/2008/medals/_/view/overall"),
    ("2012", "https://www.espn.com/olympics/summer/2012/medals/_/view/overall"),
    ("2016", "https://www.espn.com/olympics/summer/2016/medals/_/view/overall"),
    ("2020", "https://www.espn.com/olympics/summer/2020/medals/_/view/overall"),
];

static ATHLETES_URLS: &[(&str, &str)] = &[
    ("2004", "https://www.espn.com/olympics/summer/2004/medals/_/view/athletes/sort/total/page/1"),
    ("2008", "https://www.espn.com/olympics/summer/2008/medals/_/view/athletes/sort/total/page/1"),
    ("2012", "https://www.espn.com/olympics/summer/2012/medals/_/view/athletes/sort/total/page/1"),
    ("2016", "https://www.espn.com/olympics/summer/2016/medals/_/view/athletes/sort/total/page/1"),
    ("2020", "https://www.espn.com/olympics/summer/2020/medals/_/view/athletes/sort/total/page/1"),
];

const MEDALS_TABLE: &str = "table.medals.olympics.has-team-logos";
const FLAG_IMAGE: &str = "td.team img";

/// One year of the overall medal table, with the flag column and images.
async fn country_medals_year<L: PageLoader>(
    loader: &L,
    cfg: &Config,
    year: String,
    url: String,
) -> ScrapeResult<Dataset> {
    info!("Scraping country medals data for {} from {}", year, url);
    let html = loader.load(&url, MEDALS_TABLE).await?;
    let Extraction { mut table, images } = extract::extract(
        &html,
        &url,
        &TableLocator::new(MEDALS_TABLE).with_image(FLAG_IMAGE),
    )?;

    download_all(loader, &images, &cfg.flag_dir).await;

    let years = vec![year.clone(); table.rows.len()];
    table.push_column(YEAR, years)?;
    // A row without a flag gets an empty cell, which cleaning turns into null.
    table.push_column(FLAG_URL, images.into_iter().map(Option::unwrap_or_default).collect())?;

    Ok(table
        .rows
        .iter()
        .map(|cells| zip_row(&table.headers, cells))
        .collect())
}

async fn athletes_year<L: PageLoader>(loader: &L, year: String, url: String) -> ScrapeResult<Dataset> {
    info!("Scraping athlete data for {} from {}", year, url);
    let html = loader.load(&url, MEDALS_TABLE).await?;
    let table = extract::extract(&html, &url, &TableLocator::new(MEDALS_TABLE))?.table;

    Ok(table
        .rows
        .iter()
        .map(|cells| with_year(zip_row(&table.headers, cells), &year))
        .collect())
}

#[instrument(level = "info", skip_all)]
pub async fn scrape_country_medals<L: PageLoader>(loader: &L, cfg: &Config) -> Result<()> {
    let agg = aggregate(COUNTRY_MEDALS_URLS, |year, url| {
        country_medals_year(loader, cfg, year, url)
    })
    .await;
    finish(agg.dataset, DatasetKind::CountryMedals, cfg).context("country medals")?;
    Ok(())
}

#[instrument(level = "info", skip_all)]
pub async fn scrape_athletes<L: PageLoader>(loader: &L, cfg: &Config) -> Result<()> {
    let agg = aggregate(ATHLETES_URLS, |year, url| athletes_year(loader, year, url)).await;
    finish(agg.dataset, DatasetKind::AthletesMedals, cfg).context("athletes medals")?;
    Ok(())
}

/// Both ESPN datasets. The second is still attempted when the first fails.
pub async fn run<L: PageLoader>(loader: L, cfg: Config) -> Result<()> {
    let country = scrape_country_medals(&loader, &cfg).await;
    if let Err(e) = &country {
        error!("Error occurred: {:#}", e);
    }
    let athletes = scrape_athletes(&loader, &cfg).await;
    if let Err(e) = &athletes {
        error!("Error occurred: {:#}", e);
    }
    country.and(athletes)
}
