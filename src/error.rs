use thiserror::Error;

/// Failures raised while scraping, shaping and storing medal tables.
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The locator did not match anything before the wait deadline.
    #[error("no element matching `{selector}` on {url}")]
    ElementNotFound { selector: String, url: String },

    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A field did not have the shape its split pattern expects.
    #[error("malformed `{field}` value {value:?}")]
    MalformedField { field: String, value: Option<String> },

    #[error("storage operation on {target} failed: {message}")]
    Storage { target: String, message: String },

    #[error("invalid CSS selector `{0}`")]
    Selector(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("database error: {0}")]
    Database(#[from] duckdb::Error),
}

impl ScrapeError {
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        ScrapeError::Network {
            url: url.into(),
            source,
        }
    }

    pub fn storage(target: impl Into<String>, message: impl ToString) -> Self {
        ScrapeError::Storage {
            target: target.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
