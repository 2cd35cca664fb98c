use std::future::Future;
use tracing::{error, info};

use crate::error::{Result, ScrapeError};
use crate::process::record::Dataset;

/// A (year, url) pair whose fetch failed and contributed nothing.
#[derive(Debug)]
pub struct YearFailure {
    pub year: String,
    pub url: String,
    pub error: ScrapeError,
}

#[derive(Debug, Default)]
pub struct Aggregated {
    pub dataset: Dataset,
    pub failures: Vec<YearFailure>,
}

/// Fetch each pair in order and concatenate. A failed pair is logged,
/// recorded in `failures`, and skipped; it is never retried.
pub async fn aggregate<Y, U, F, Fut>(pairs: &[(Y, U)], mut fetch: F) -> Aggregated
where
    Y: AsRef<str>,
    U: AsRef<str>,
    F: FnMut(String, String) -> Fut,
    Fut: Future<Output = Result<Dataset>>,
{
    let mut out = Aggregated::default();
    for (year, url) in pairs {
        let (year, url) = (year.as_ref().to_string(), url.as_ref().to_string());
        match fetch(year.clone(), url.clone()).await {
            Ok(ds) => {
                info!(year = %year, records = ds.len(), "fetched year");
                out.dataset.extend(ds);
            }
            Err(e) => {
                error!(year = %year, url = %url, error = %e, "year failed, skipping");
                out.failures.push(YearFailure { year, url, error: e });
            }
        }
    }
    out
}
