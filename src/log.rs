//! Append-only activity log of scrape outcomes.
//!
//! One line per scrape in `~/.recipe-scrape/activity.log`. Domains that keep
//! failing every tier show up here first, which makes them candidates for a
//! site-specific parser.

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::types::{Domain, ScrapeResult};

const LOG_DIR: &str = ".recipe-scrape";
const LOG_FILE: &str = "activity.log";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Success,
    Failure,
}

impl LogLevel {
    fn marker(self) -> &'static str {
        match self {
            LogLevel::Success => "🟢",
            LogLevel::Failure => "🔴",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub event: String,
    pub domain: Option<String>,
    pub details: Option<String>,
}

impl LogEntry {
    /// Summarize one scrape: the winning tier, or the error kind and message.
    pub fn for_scrape(url: &str, result: &ScrapeResult, elapsed: Duration) -> Self {
        let domain = url::Url::parse(url.trim())
            .ok()
            .and_then(|u| Domain::from_url(&u))
            .map(|d| d.0);
        let ms = elapsed.as_millis();
        let (level, details) = match (&result.method, &result.error_kind) {
            (Some(tier), _) if result.success => (LogLevel::Success, format!("{} {ms}ms", tier.tag())),
            (_, kind) => {
                let kind = (*kind)
                    .and_then(|k| serde_json::to_value(k).ok())
                    .and_then(|v| v.as_str().map(str::to_string))
                    .unwrap_or_else(|| "unknown".to_string());
                let message = result.error.as_deref().unwrap_or_default();
                (LogLevel::Failure, format!("{kind} {ms}ms {message}"))
            }
        };

        Self {
            timestamp: Utc::now(),
            level,
            event: "scrape".to_string(),
            domain,
            details: Some(details.trim_end().to_string()),
        }
    }

    fn to_line(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.level.marker(),
            self.event,
            self.domain.as_deref().unwrap_or("*"),
            self.details.as_deref().unwrap_or("")
        )
    }
}

pub struct ActivityLogger {
    log_path: PathBuf,
}

impl ActivityLogger {
    /// Logger writing under the user's home directory.
    pub fn new() -> anyhow::Result<Self> {
        let user_dirs = directories::UserDirs::new()
            .ok_or_else(|| anyhow!("could not determine home directory"))?;
        Self::in_dir(&user_dirs.home_dir().join(LOG_DIR))
    }

    pub fn in_dir(dir: &Path) -> anyhow::Result<Self> {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        Ok(Self {
            log_path: dir.join(LOG_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.log_path
    }

    pub fn log(&self, entry: &LogEntry) -> anyhow::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .with_context(|| format!("opening {}", self.log_path.display()))?;
        writeln!(file, "{}", entry.to_line())?;
        Ok(())
    }

    pub fn record(&self, url: &str, result: &ScrapeResult, elapsed: Duration) -> anyhow::Result<()> {
        self.log(&LogEntry::for_scrape(url, result, elapsed))
    }

    /// Matching lines, newest first.
    pub fn read_logs(
        &self,
        domain_filter: Option<&str>,
        failures_only: bool,
    ) -> anyhow::Result<Vec<String>> {
        if !self.log_path.exists() {
            return Ok(vec![]);
        }

        let wanted = domain_filter.map(Domain::from_raw);
        let reader = BufReader::new(fs::File::open(&self.log_path)?);
        let mut matching_lines = Vec::new();

        for line in reader.lines() {
            let line = line?;

            if failures_only && !line.contains(LogLevel::Failure.marker()) {
                continue;
            }

            if let Some(wanted) = &wanted {
                // date, time, "UTC", marker, event, domain, details
                let domain = line.split(' ').nth(5).map(Domain::from_raw);
                if !domain.is_some_and(|d| d.is_within(&wanted.0)) {
                    continue;
                }
            }

            matching_lines.push(line);
        }

        matching_lines.reverse();
        Ok(matching_lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::types::{ExtractedRecipe, ScrapedRecipe, Tier};

    fn scratch_dir(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        std::env::temp_dir().join(format!("recipe-scrape-{name}-{}-{nanos}", std::process::id()))
    }

    fn success() -> ScrapeResult {
        ScrapeResult::ok(ScrapedRecipe {
            method: Tier::Microdata,
            recipe: ExtractedRecipe {
                title: "Cake".into(),
                description: String::new(),
                servings: None,
                prep_time_minutes: None,
                cook_time_minutes: None,
                total_time_minutes: None,
                image_url: None,
                ingredients: vec![],
                steps: vec![],
                source_url: "https://example.com/cake".into(),
            },
        })
    }

    #[test]
    fn entries_describe_tier_or_error_kind() {
        let ok = LogEntry::for_scrape("https://www.example.com/cake", &success(), Duration::from_millis(12));
        assert_eq!(ok.level, LogLevel::Success);
        assert_eq!(ok.domain.as_deref(), Some("example.com"));
        assert_eq!(ok.details.as_deref(), Some("tier3 12ms"));

        let failed = ScrapeResult::err(&ScrapeError::AllTiersFailed);
        let bad = LogEntry::for_scrape("https://blog.test/post", &failed, Duration::from_millis(3));
        assert_eq!(bad.level, LogLevel::Failure);
        assert!(bad.details.unwrap().starts_with("all_tiers_failed 3ms"));

        let invalid = ScrapeResult::err(&ScrapeError::InvalidUrl("nope".into()));
        assert_eq!(LogEntry::for_scrape("nope", &invalid, Duration::ZERO).domain, None);
    }

    #[test]
    fn read_logs_filters_and_returns_newest_first() {
        let dir = scratch_dir("log");
        let logger = ActivityLogger::in_dir(&dir).unwrap();
        let failed = ScrapeResult::err(&ScrapeError::AllTiersFailed);

        logger.record("https://example.com/a", &success(), Duration::ZERO).unwrap();
        logger.record("https://blog.test/b", &failed, Duration::ZERO).unwrap();
        logger.record("https://www.example.com/c", &failed, Duration::ZERO).unwrap();

        let all = logger.read_logs(None, false).unwrap();
        assert_eq!(all.len(), 3);
        assert!(all[0].contains("example.com") && all[0].contains("🔴"));

        let example = logger.read_logs(Some("www.example.com"), false).unwrap();
        assert_eq!(example.len(), 2);

        let failures = logger.read_logs(Some("example.com"), true).unwrap();
        assert_eq!(failures.len(), 1);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_log_reads_as_empty() {
        let dir = scratch_dir("empty");
        let logger = ActivityLogger::in_dir(&dir).unwrap();
        assert!(logger.read_logs(None, false).unwrap().is_empty());
        fs::remove_dir_all(&dir).ok();
    }
}
