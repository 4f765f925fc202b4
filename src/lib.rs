#![doc = include_str!("../README.md")]

pub mod cli;
pub mod config;
pub mod dom;
pub mod error;
pub mod log;
pub mod runtime;
pub mod selectors;
pub mod tools;
pub mod types;

pub use config::{ExtractConfig, FetchConfig, ScrapeConfig, MIN_CONTENT_ITEMS};
pub use error::{FetchError, ScrapeError, ScrapeErrorKind};
pub use tools::fetch::{Fetcher, HttpFetcher};
pub use tools::heuristics::{score_list, score_steps};
pub use tools::parse::{parse_iso_duration, parse_servings, parse_text_duration};
pub use tools::scrape::{extract_page, scrape, scrape_html, try_scrape, RecipeScraper};
pub use types::*;
