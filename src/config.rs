// src/config.rs

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{env, fs, path::PathBuf, time::Duration};

/// Environment variable naming an optional TOML file that overrides defaults.
pub const CONFIG_ENV: &str = "OLYMPICS_CONFIG";

/// Settings for one run of the scrape or load stages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory the CSV sink writes into.
    pub output_dir: PathBuf,
    /// Directory flag images are downloaded into.
    pub flag_dir: PathBuf,
    /// How long to wait for a table to appear on a page.
    pub element_timeout_secs: u64,
    /// Delay between page polls while waiting for a table.
    pub poll_interval_ms: u64,
    /// Per-request timeout for page and image fetches.
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub hdfs: HdfsConfig,
    /// DuckDB file the load stage appends into.
    pub database_path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HdfsConfig {
    /// WebHDFS namenode endpoint, e.g. `http://namenode:9870`.
    pub url: String,
    pub user: String,
    pub target_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("csvFiles"),
            flag_dir: PathBuf::from("flag_images"),
            element_timeout_secs: 10,
            poll_interval_ms: 500,
            request_timeout_secs: 30,
            user_agent: concat!("olympics_scraper/", env!("CARGO_PKG_VERSION")).to_string(),
            hdfs: HdfsConfig::default(),
            database_path: PathBuf::from("olympics.duckdb"),
        }
    }
}

impl Default for HdfsConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:9870".to_string(),
            user: "hadoop".to_string(),
            target_dir: "/home/hadoop/data/nameNode/data/".to_string(),
        }
    }
}

impl Config {
    /// Defaults, overridden by the TOML file named in `OLYMPICS_CONFIG` if set.
    pub fn load() -> Result<Self> {
        match env::var(CONFIG_ENV) {
            Ok(path) => {
                let text = fs::read_to_string(&path)
                    .with_context(|| format!("reading config file {}", path))?;
                Self::from_toml(&text).with_context(|| format!("parsing config file {}", path))
            }
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_secs(self.element_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Remote path of a CSV file inside the blob store target directory.
    pub fn blob_path(&self, file_name: &str) -> String {
        format!("{}/{}", self.hdfs.target_dir.trim_end_matches('/'), file_name)
    }
}
