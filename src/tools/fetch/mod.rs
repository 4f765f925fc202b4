//! Page retrieval: one bounded GET per call, decoded to UTF-8.

mod charset;
mod client;
mod headers;

#[cfg(test)]
mod tests;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use url::Url;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::types::RawPage;

pub use charset::decode_body;

/// Source of raw pages for the scraper.
///
/// The HTTP implementation is [`HttpFetcher`]; tests and callers with their own
/// transport (a cache, a headless browser) plug in here.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<RawPage, FetchError>;
}

/// reqwest-backed fetcher with a hard timeout, a redirect bound and a body cap.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    pub fn new(config: FetchConfig) -> Result<Self, FetchError> {
        let client = client::build_client(&config)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<RawPage, FetchError> {
        fetch_with_client(&self.client, &self.config, url).await
    }
}

/// Fetch a single URL with a one-off client.
///
/// # Examples
/// ```no_run
/// use recipe_scrape::config::FetchConfig;
/// use recipe_scrape::tools::fetch::fetch_page;
///
/// # async fn example() -> Result<(), recipe_scrape::FetchError> {
/// let page = fetch_page("https://example.com/soup", &FetchConfig::default()).await?;
/// println!("{} bytes from {}", page.html.len(), page.final_url);
/// # Ok(())
/// # }
/// ```
pub async fn fetch_page(url: &str, config: &FetchConfig) -> Result<RawPage, FetchError> {
    let parsed = Url::parse(url.trim()).map_err(|_| FetchError::InvalidUrl(url.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl(url.to_string()));
    }
    HttpFetcher::new(config.clone())?.fetch(&parsed).await
}

async fn fetch_with_client(
    client: &Client,
    config: &FetchConfig,
    url: &Url,
) -> Result<RawPage, FetchError> {
    let to_fetch_error = |e: reqwest::Error| FetchError::from_reqwest(e, config.max_redirects);

    let mut response = client
        .get(url.clone())
        .send()
        .await
        .map_err(to_fetch_error)?;

    let status = response.status();
    if !status.is_success() {
        tracing::debug!(url = %url, status = status.as_u16(), "non-success response");
        return Err(FetchError::HttpError {
            status: status.as_u16(),
        });
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let limit = config.max_body_bytes;
    if response.content_length().is_some_and(|len| len > limit as u64) {
        return Err(FetchError::TooLarge { limit });
    }

    let mut body: Vec<u8> = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(to_fetch_error)? {
        if body.len() + chunk.len() > limit {
            return Err(FetchError::TooLarge { limit });
        }
        body.extend_from_slice(&chunk);
    }

    let html = decode_body(&body, Some(&content_type));
    tracing::debug!(url = %url, final_url = %final_url, bytes = body.len(), "fetched page");

    Ok(RawPage {
        url: url.to_string(),
        html,
        final_url,
        content_type,
    })
}
