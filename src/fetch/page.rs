// src/fetch/page.rs

use reqwest::Client;
use scraper::Html;
use std::{future::Future, time::Duration};
use tokio::time::{sleep, Instant};
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::{Result, ScrapeError};
use crate::extract::table::parse_selector;

/// Loads pages and raw resources for the scraping units.
pub trait PageLoader: Send + Sync {
    /// Markup of `url` once `ready` matches, or `ElementNotFound` after the wait.
    fn load(&self, url: &str, ready: &str) -> impl Future<Output = Result<String>> + Send;

    /// Raw body of `url`.
    fn fetch_bytes(&self, url: &str) -> impl Future<Output = Result<Vec<u8>>> + Send;
}

/// Plain HTTP loader. Polls until the ready selector appears or the wait runs out.
#[derive(Clone)]
pub struct HttpPageLoader {
    client: Client,
    timeout: Duration,
    poll_interval: Duration,
}

impl HttpPageLoader {
    pub fn new(cfg: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(cfg.user_agent.clone())
            .timeout(cfg.request_timeout())
            .cookie_store(true)
            .build()
            .map_err(|e| ScrapeError::network("client setup", e))?;
        Ok(Self {
            client,
            timeout: cfg.element_timeout(),
            poll_interval: cfg.poll_interval(),
        })
    }

    pub fn with_timing(mut self, timeout: Duration, poll_interval: Duration) -> Self {
        self.timeout = timeout;
        self.poll_interval = poll_interval;
        self
    }

    async fn get_text(&self, url: &str) -> Result<String> {
        debug!("Fetching text from {}", url);
        self.client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScrapeError::network(url, e))?
            .text()
            .await
            .map_err(|e| ScrapeError::network(url, e))
    }
}

impl PageLoader for HttpPageLoader {
    #[instrument(level = "debug", skip(self))]
    async fn load(&self, url: &str, ready: &str) -> Result<String> {
        let selector = parse_selector(ready)?;
        let deadline = Instant::now() + self.timeout;
        loop {
            let body = self.get_text(url).await?;
            // `Html` is not Send; keep it out of the await points below.
            let found = Html::parse_document(&body)
                .select(&selector)
                .next()
                .is_some();
            if found {
                return Ok(body);
            }
            if Instant::now() + self.poll_interval > deadline {
                return Err(ScrapeError::ElementNotFound {
                    selector: ready.to_string(),
                    url: url.to_string(),
                });
            }
            debug!(url, ready, "element not present yet");
            sleep(self.poll_interval).await;
        }
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ScrapeError::network(url, e))?;
        let bytes = resp.bytes().await.map_err(|e| ScrapeError::network(url, e))?;
        Ok(bytes.to_vec())
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> HttpPageLoader {
        HttpPageLoader::new(&Config::default())
            .unwrap()
            .with_timing(Duration::from_millis(300), Duration::from_millis(50))
    }

    #[tokio::test]
    async fn returns_page_once_table_present() -> anyhow::Result<()> {
        let mut server = mockito::Server::new_async().await;
        let m = server
            .mock("GET", "/sports")
            .with_status(200)
            .with_body(r#"<table class="table-striped"><tr><td>x</td></tr></table>"#)
            .create_async()
            .await;

        let body = loader()
            .load(&format!("{}/sports", server.url()), ".table-striped")
            .await?;
        assert!(body.contains("table-striped"));
        m.assert_async().await;
        Ok(())
    }

    #[tokio::test]
    async fn times_out_with_element_not_found() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/empty")
            .with_status(200)
            .with_body("<p>loading</p>")
            .expect_at_least(2)
            .create_async()
            .await;

        let err = loader()
            .load(&format!("{}/empty", server.url()), ".table-striped")
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::ElementNotFound { .. }));
    }

    #[tokio::test]
    async fn http_error_is_network_error() {
        let mut server = mockito::Server::new_async().await;
        let _m = server
            .mock("GET", "/gone")
            .with_status(404)
            .create_async()
            .await;

        let err = loader()
            .fetch_bytes(&format!("{}/gone", server.url()))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeError::Network { .. }));
    }
}
