use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Why a page could not be retrieved.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FetchError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("timed out waiting for the page")]
    Timeout,

    #[error("too many redirects (limit {limit})")]
    TooManyRedirects { limit: usize },

    #[error("http status {status}")]
    HttpError { status: u16 },

    #[error("page exceeds {limit} bytes")]
    TooLarge { limit: usize },

    #[error("request failed: {0}")]
    Request(String),
}

impl FetchError {
    /// Map a reqwest failure onto the fetch taxonomy.
    pub(crate) fn from_reqwest(e: reqwest::Error, redirect_limit: usize) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_redirect() {
            FetchError::TooManyRedirects {
                limit: redirect_limit,
            }
        } else if let Some(status) = e.status() {
            FetchError::HttpError {
                status: status.as_u16(),
            }
        } else {
            FetchError::Request(e.to_string())
        }
    }
}

/// Flat error category, for callers that only need to pick a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrapeErrorKind {
    InvalidUrl,
    FetchFailed,
    AllTiersFailed,
}

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "cause", rename_all = "snake_case")]
pub enum ScrapeError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("could not fetch page: {0}")]
    FetchFailed(FetchError),

    #[error("no recipe could be found on this page")]
    AllTiersFailed,
}

impl ScrapeError {
    pub fn kind(&self) -> ScrapeErrorKind {
        match self {
            ScrapeError::InvalidUrl(_) => ScrapeErrorKind::InvalidUrl,
            ScrapeError::FetchFailed(_) => ScrapeErrorKind::FetchFailed,
            ScrapeError::AllTiersFailed => ScrapeErrorKind::AllTiersFailed,
        }
    }
}

/* Conversions so `?` works smoothly */
impl From<FetchError> for ScrapeError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::InvalidUrl(u) => ScrapeError::InvalidUrl(u),
            other => ScrapeError::FetchFailed(other),
        }
    }
}
