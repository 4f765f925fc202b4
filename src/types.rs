use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

use crate::error::{ScrapeError, ScrapeErrorKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain(pub String);

impl Domain {
    /// Canonicalize host to a stable key: lowercase + IDNA/Punycode, no `www.`
    fn canonicalize(host: &str) -> String {
        let lower = host.trim_end_matches('.').to_ascii_lowercase();
        let ascii = idna::domain_to_ascii(&lower).unwrap_or(lower);
        match ascii.strip_prefix("www.") {
            Some(rest) => rest.to_string(),
            None => ascii,
        }
    }

    pub fn from_url(url: &Url) -> Option<Self> {
        url.host_str().map(|d| Domain(Self::canonicalize(d)))
    }

    /// Build a Domain from raw user text (CLI, API callers, etc.)
    pub fn from_raw(host: &str) -> Self {
        Domain(Self::canonicalize(host))
    }

    /// True when this domain is `suffix` or a subdomain of it.
    pub fn is_within(&self, suffix: &str) -> bool {
        self.0 == suffix
            || (self.0.len() > suffix.len()
                && self.0.ends_with(suffix)
                && self.0.as_bytes()[self.0.len() - suffix.len() - 1] == b'.')
    }
}

/// Validated input to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

impl ScrapeRequest {
    /// Accept only absolute http(s) URLs with a host.
    pub fn parse(raw: &str) -> Result<(Self, Url), ScrapeError> {
        let trimmed = raw.trim();
        let url = Url::parse(trimmed).map_err(|_| ScrapeError::InvalidUrl(trimmed.into()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ScrapeError::InvalidUrl(trimmed.into()));
        }
        match url.host_str() {
            Some(host) if !host.is_empty() => {}
            _ => return Err(ScrapeError::InvalidUrl(trimmed.into())),
        }
        Ok((
            Self {
                url: url.to_string(),
            },
            url,
        ))
    }
}

/// A fetched document, decoded to UTF-8. Read-only input to every tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPage {
    pub url: String,
    pub html: String,
    pub final_url: String,
    pub content_type: String,
}

impl RawPage {
    /// Page that was not fetched over the network (saved file, test fixture).
    pub fn from_html(url: &str, html: impl Into<String>) -> Self {
        Self {
            url: url.to_string(),
            html: html.into(),
            final_url: url.to_string(),
            content_type: "text/html".to_string(),
        }
    }

    pub fn final_domain(&self) -> Option<Domain> {
        Url::parse(&self.final_url)
            .ok()
            .and_then(|u| Domain::from_url(&u))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedIngredient {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedStep {
    pub text: String,
    pub order: usize,
}

/// Canonical recipe shape every tier converges to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecipe {
    pub title: String,
    pub description: String,
    pub servings: Option<u32>,
    pub prep_time_minutes: Option<u32>,
    pub cook_time_minutes: Option<u32>,
    pub total_time_minutes: Option<u32>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<ExtractedIngredient>,
    #[serde(default)]
    pub steps: Vec<ExtractedStep>,
    pub source_url: String,
}

impl ExtractedRecipe {
    pub fn content_items(&self) -> usize {
        self.ingredients.len() + self.steps.len()
    }
}

/// Extraction strategy, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "tier1")]
    KnownSite,
    #[serde(rename = "tier2")]
    JsonLd,
    #[serde(rename = "tier3")]
    Microdata,
    #[serde(rename = "tier4")]
    Heuristic,
}

impl Tier {
    pub const ALL: [Tier; 4] = [Tier::KnownSite, Tier::JsonLd, Tier::Microdata, Tier::Heuristic];

    /// Wire tag (`tier1`..`tier4`).
    pub fn tag(&self) -> &'static str {
        match self {
            Tier::KnownSite => "tier1",
            Tier::JsonLd => "tier2",
            Tier::Microdata => "tier3",
            Tier::Heuristic => "tier4",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Tier::KnownSite => "site-specific",
            Tier::JsonLd => "json-ld",
            Tier::Microdata => "microdata",
            Tier::Heuristic => "heuristic",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.tag(), self.name())
    }
}

/// Successful pipeline output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapedRecipe {
    pub method: Tier,
    pub recipe: ExtractedRecipe,
}

/// Per-request outcome handed back to the caller. Never persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeResult {
    pub success: bool,
    pub method: Option<Tier>,
    pub recipe: Option<ExtractedRecipe>,
    pub error: Option<String>,
    pub error_kind: Option<ScrapeErrorKind>,
}

impl ScrapeResult {
    pub fn ok(scraped: ScrapedRecipe) -> Self {
        Self {
            success: true,
            method: Some(scraped.method),
            recipe: Some(scraped.recipe),
            error: None,
            error_kind: None,
        }
    }

    pub fn err(error: &ScrapeError) -> Self {
        Self {
            success: false,
            method: None,
            recipe: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind()),
        }
    }
}

impl From<Result<ScrapedRecipe, ScrapeError>> for ScrapeResult {
    fn from(res: Result<ScrapedRecipe, ScrapeError>) -> Self {
        match res {
            Ok(scraped) => ScrapeResult::ok(scraped),
            Err(e) => ScrapeResult::err(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_strips_www_and_lowercases() {
        assert_eq!(Domain::from_raw("WWW.AllRecipes.com").0, "allrecipes.com");
    }

    #[test]
    fn domain_suffix_matching_respects_label_boundaries() {
        let d = Domain::from_raw("uk.allrecipes.com");
        assert!(d.is_within("allrecipes.com"));
        assert!(!Domain::from_raw("notallrecipes.com").is_within("allrecipes.com"));
    }

    #[test]
    fn request_rejects_non_http_schemes() {
        assert!(ScrapeRequest::parse("ftp://example.com/a").is_err());
        assert!(ScrapeRequest::parse("example.com/recipe").is_err());
        assert!(ScrapeRequest::parse("https://").is_err());
        assert!(ScrapeRequest::parse("  https://example.com/soup  ").is_ok());
    }

    #[test]
    fn tier_serializes_as_tag() {
        let json = serde_json::to_string(&Tier::JsonLd).unwrap();
        assert_eq!(json, "\"tier2\"");
    }

    #[test]
    fn failure_result_carries_kind() {
        let res = ScrapeResult::err(&ScrapeError::AllTiersFailed);
        assert!(!res.success);
        assert_eq!(res.error_kind, Some(ScrapeErrorKind::AllTiersFailed));
        assert!(res.recipe.is_none());
    }
}
