use reqwest::{redirect, Client};
use std::time::Duration;

use super::headers::browser_headers;
use crate::config::FetchConfig;
use crate::error::FetchError;

const POOL_IDLE_TIMEOUT_SEC: u64 = 90;

/// Build a reqwest client enforcing the fetch bounds in `config`.
pub(crate) fn build_client(config: &FetchConfig) -> Result<Client, FetchError> {
    Client::builder()
        .cookie_store(true)
        .redirect(redirect::Policy::limited(config.max_redirects))
        .gzip(true)
        .brotli(true)
        .deflate(true)
        .timeout(config.timeout())
        .pool_idle_timeout(Duration::from_secs(POOL_IDLE_TIMEOUT_SEC))
        .default_headers(browser_headers(&config.user_agent))
        .build()
        .map_err(|e| FetchError::Request(format!("failed to build client: {e}")))
}
