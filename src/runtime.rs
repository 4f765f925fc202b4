//! Shared runtime for synchronous callers (the CLI, blocking integrations).

use once_cell::sync::OnceCell;
use tokio::runtime::{Builder, Runtime};

use crate::config::ScrapeConfig;
use crate::error::{FetchError, ScrapeError};
use crate::tools::scrape::RecipeScraper;
use crate::types::{ScrapeRequest, ScrapeResult};

static RUNTIME: OnceCell<Runtime> = OnceCell::new();

fn runtime() -> std::io::Result<&'static Runtime> {
    RUNTIME.get_or_try_init(|| {
        Builder::new_multi_thread()
            .thread_name("recipe-scrape")
            .enable_all()
            .build()
    })
}

/// Run a future to completion on the shared runtime.
pub fn block_on<F>(future: F) -> std::io::Result<F::Output>
where
    F: std::future::Future,
{
    Ok(runtime()?.block_on(future))
}

/// Blocking form of [`crate::scrape`] with an explicit config.
pub fn scrape_blocking(url: &str, config: ScrapeConfig) -> ScrapeResult {
    let outcome = ScrapeRequest::parse(url).and_then(|_| {
        let scraper = RecipeScraper::with_config(config)?;
        block_on(scraper.try_scrape(url))
            .unwrap_or_else(|e| Err(ScrapeError::FetchFailed(FetchError::Request(e.to_string()))))
    });
    ScrapeResult::from(outcome)
}
