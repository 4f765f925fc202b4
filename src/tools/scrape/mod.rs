//! Pipeline orchestrator: fetch once, then run the four tiers in priority order.


use scraper::Html;
use std::time::Instant;

use crate::config::{ExtractConfig, ScrapeConfig};
use crate::error::{FetchError, ScrapeError};
use crate::tools::fetch::{Fetcher, HttpFetcher};
use crate::tools::heuristics::heuristics_in;
use crate::tools::jsonld::json_ld_in;
use crate::tools::microdata::microdata_in;
use crate::tools::sites::known_site_in;
use crate::types::{ExtractedRecipe, RawPage, ScrapeRequest, ScrapeResult, ScrapedRecipe, Tier};

type TierFn = fn(&Html, &RawPage, &ExtractConfig) -> Option<ExtractedRecipe>;

/// Strict priority order; the first accepted result wins.
const TIERS: [(Tier, TierFn); 4] = [
    (Tier::KnownSite, known_site_in),
    (Tier::JsonLd, json_ld_in),
    (Tier::Microdata, microdata_in),
    (Tier::Heuristic, heuristics_in),
];

/// Run every tier against an already-fetched page.
///
/// The document is parsed once and shared by all tiers. No I/O happens here.
pub fn extract_page(
    page: &RawPage,
    config: &ExtractConfig,
) -> Result<(Tier, ExtractedRecipe), ScrapeError> {
    let doc = Html::parse_document(&page.html);

    for (tier, run) in TIERS {
        tracing::debug!(tier = tier.tag(), url = %page.final_url, "trying tier");
        if let Some(recipe) = run(&doc, page, config) {
            tracing::info!(
                tier = tier.tag(),
                url = %page.final_url,
                ingredients = recipe.ingredients.len(),
                steps = recipe.steps.len(),
                "recipe extracted"
            );
            return Ok((tier, recipe));
        }
    }

    tracing::warn!(url = %page.final_url, "no tier produced a recipe");
    Err(ScrapeError::AllTiersFailed)
}

/// Run the tiers on saved HTML, as if it had been fetched from `url`.
///
/// # Examples
/// ```
/// use recipe_scrape::tools::scrape::scrape_html;
/// use recipe_scrape::Tier;
///
/// let html = r#"<script type="application/ld+json">
///   {"@type": "Recipe", "name": "Toast", "recipeInstructions": ["Toast the bread."]}
/// </script>"#;
/// let result = scrape_html(html, "https://example.com/toast");
/// assert!(result.success);
/// assert_eq!(result.method, Some(Tier::JsonLd));
/// ```
pub fn scrape_html(html: &str, url: &str) -> ScrapeResult {
    let outcome = ScrapeRequest::parse(url).and_then(|(request, _)| {
        let page = RawPage::from_html(&request.url, html);
        extract_page(&page, &ExtractConfig::default())
            .map(|(method, recipe)| ScrapedRecipe { method, recipe })
    });
    ScrapeResult::from(outcome)
}

/// A fetcher plus the knobs for one scrape at a time.
///
/// Holds no per-request state, so a single instance can serve concurrent calls.
#[derive(Debug, Clone)]
pub struct RecipeScraper<F: Fetcher = HttpFetcher> {
    fetcher: F,
    config: ScrapeConfig,
}

impl RecipeScraper<HttpFetcher> {
    /// HTTP-backed scraper for `config`.
    pub fn with_config(config: ScrapeConfig) -> Result<Self, ScrapeError> {
        let fetcher = HttpFetcher::new(config.fetch.clone())?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: Fetcher> RecipeScraper<F> {
    pub fn new(fetcher: F, config: ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Validate, fetch once, extract.
    pub async fn try_scrape(&self, url: &str) -> Result<ScrapedRecipe, ScrapeError> {
        let started = Instant::now();
        let (_, parsed) = ScrapeRequest::parse(url)?;

        let fetched = tokio::time::timeout(self.config.overall_timeout(), self.fetcher.fetch(&parsed))
            .await
            .unwrap_or(Err(FetchError::Timeout));
        let page = match fetched {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(url = %parsed, error = %e, "fetch failed");
                return Err(e.into());
            }
        };

        let (method, recipe) = extract_page(&page, &self.config.extract)?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        if elapsed_ms > self.config.overall_timeout_ms {
            tracing::warn!(url = %parsed, elapsed_ms, "scrape overran its deadline");
        } else {
            tracing::debug!(url = %parsed, elapsed_ms, "scrape finished");
        }
        Ok(ScrapedRecipe { method, recipe })
    }

    /// Like [`try_scrape`](Self::try_scrape), folded into a never-failing result record.
    pub async fn scrape(&self, url: &str) -> ScrapeResult {
        ScrapeResult::from(self.try_scrape(url).await)
    }
}

/// Scrape `url` with the HTTP fetcher and environment-derived config.
///
/// # Examples
/// ```no_run
/// # async fn example() {
/// let result = recipe_scrape::scrape("https://www.allrecipes.com/recipe/21014/").await;
/// if let Some(recipe) = result.recipe {
///     println!("{} ({} ingredients)", recipe.title, recipe.ingredients.len());
/// }
/// # }
/// ```
pub async fn scrape(url: &str) -> ScrapeResult {
    ScrapeResult::from(try_scrape(url).await)
}

/// `?`-friendly form of [`scrape`].
pub async fn try_scrape(url: &str) -> Result<ScrapedRecipe, ScrapeError> {
    // Validate before building a client.
    ScrapeRequest::parse(url)?;
    RecipeScraper::with_config(ScrapeConfig::from_env())?
        .try_scrape(url)
        .await
}
