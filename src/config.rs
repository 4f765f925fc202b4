use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::types::ExtractedRecipe;

/// Minimum ingredients + steps a titled result needs before a tier counts as a success.
///
/// At 1, a title with only ingredients (or only steps) is accepted so the user can
/// finish a partial import by hand; a title alone is not.
pub const MIN_CONTENT_ITEMS: usize = 1;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;
const DEFAULT_MAX_REDIRECTS: usize = 5;
const DEFAULT_MAX_BODY_BYTES: usize = 5 * 1024 * 1024;
const DEFAULT_OVERALL_TIMEOUT_MS: u64 = 20_000;
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Connect + read, combined.
    pub timeout_ms: u64,
    pub max_redirects: usize,
    pub max_body_bytes: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
            max_redirects: DEFAULT_MAX_REDIRECTS,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Work caps that keep adversarial pages from blowing up parse time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanLimits {
    pub max_jsonld_bytes: usize,
    pub max_jsonld_depth: usize,
    pub max_lists_scanned: usize,
    pub max_list_items: usize,
    pub max_images_scanned: usize,
    pub max_text_scan_bytes: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_jsonld_bytes: 1024 * 1024,
            max_jsonld_depth: 16,
            max_lists_scanned: 300,
            max_list_items: 200,
            max_images_scanned: 40,
            max_text_scan_bytes: 256 * 1024,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcceptancePolicy {
    pub min_content_items: usize,
}

impl Default for AcceptancePolicy {
    fn default() -> Self {
        Self {
            min_content_items: MIN_CONTENT_ITEMS,
        }
    }
}

impl AcceptancePolicy {
    pub fn accepts(&self, recipe: &ExtractedRecipe) -> bool {
        !recipe.title.trim().is_empty() && recipe.content_items() >= self.min_content_items
    }
}

/// Everything the (pure) tiers need.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    pub acceptance: AcceptancePolicy,
    pub limits: ScanLimits,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrapeConfig {
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    /// Deadline for the fetch, the only suspension point. Tier work is bounded
    /// by [`ScanLimits`]; an overrun there is logged, not cancelled.
    pub overall_timeout_ms: u64,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            extract: ExtractConfig::default(),
            overall_timeout_ms: DEFAULT_OVERALL_TIMEOUT_MS,
        }
    }
}

impl ScrapeConfig {
    pub fn overall_timeout(&self) -> Duration {
        Duration::from_millis(self.overall_timeout_ms)
    }

    /// Defaults, overridden by `RECIPE_SCRAPE_*` environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg
    }

    /// Load a JSON config; missing fields keep their defaults.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub(crate) fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = env_number(&lookup, "RECIPE_SCRAPE_TIMEOUT_MS") {
            self.fetch.timeout_ms = v;
        }
        if let Some(v) = env_number(&lookup, "RECIPE_SCRAPE_MAX_REDIRECTS") {
            self.fetch.max_redirects = v;
        }
        if let Some(v) = env_number(&lookup, "RECIPE_SCRAPE_MAX_BODY_BYTES") {
            self.fetch.max_body_bytes = v;
        }
        if let Some(v) = env_number(&lookup, "RECIPE_SCRAPE_OVERALL_TIMEOUT_MS") {
            self.overall_timeout_ms = v;
        }
        if let Some(ua) = lookup("RECIPE_SCRAPE_USER_AGENT") {
            if !ua.trim().is_empty() {
                self.fetch.user_agent = ua.trim().to_string();
            }
        }
    }
}

fn env_number<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %raw, "ignoring unparsable config override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ExtractedIngredient;

    fn recipe(title: &str, ingredients: usize) -> ExtractedRecipe {
        ExtractedRecipe {
            title: title.to_string(),
            description: String::new(),
            servings: None,
            prep_time_minutes: None,
            cook_time_minutes: None,
            total_time_minutes: None,
            image_url: None,
            ingredients: (0..ingredients)
                .map(|i| ExtractedIngredient {
                    text: format!("{i} eggs"),
                })
                .collect(),
            steps: vec![],
            source_url: "https://example.com".to_string(),
        }
    }

    #[test]
    fn defaults_match_fetch_design() {
        let cfg = ScrapeConfig::default();
        assert_eq!(cfg.fetch.timeout_ms, 10_000);
        assert_eq!(cfg.fetch.max_redirects, 5);
        assert_eq!(cfg.fetch.max_body_bytes, 5 * 1024 * 1024);
    }

    #[test]
    fn acceptance_rejects_title_only() {
        let policy = AcceptancePolicy::default();
        assert!(!policy.accepts(&recipe("Soup", 0)));
        assert!(policy.accepts(&recipe("Soup", 1)));
        assert!(!policy.accepts(&recipe("   ", 3)));
    }

    #[test]
    fn env_overrides_apply_and_bad_values_are_ignored() {
        let mut cfg = ScrapeConfig::default();
        cfg.apply_env(|key| match key {
            "RECIPE_SCRAPE_MAX_REDIRECTS" => Some("2".into()),
            "RECIPE_SCRAPE_TIMEOUT_MS" => Some("soon".into()),
            "RECIPE_SCRAPE_USER_AGENT" => Some("TestAgent/1.0".into()),
            _ => None,
        });
        assert_eq!(cfg.fetch.max_redirects, 2);
        assert_eq!(cfg.fetch.timeout_ms, 10_000);
        assert_eq!(cfg.fetch.user_agent, "TestAgent/1.0");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: ScrapeConfig =
            serde_json::from_str(r#"{"fetch": {"max_redirects": 3}}"#).unwrap();
        assert_eq!(cfg.fetch.max_redirects, 3);
        assert_eq!(cfg.fetch.timeout_ms, 10_000);
        assert_eq!(cfg.extract.acceptance.min_content_items, MIN_CONTENT_ITEMS);
    }
}
