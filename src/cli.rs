use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use crate::config::ScrapeConfig;
use crate::log::ActivityLogger;
use crate::runtime;
use crate::tools::scrape::extract_page;
use crate::tools::sites::registered_sites;
use crate::types::{RawPage, ScrapeRequest, ScrapeResult, ScrapedRecipe};

#[derive(Parser)]
#[command(name = "recipe-scrape", version, about = "Recipe extraction from cooking-site URLs (JSON only)")]
pub struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch a URL and extract its recipe
    Scrape(ScrapeArgs),
    /// Extract a recipe from a saved page
    Parse(ParseArgs),
    /// List the site-specific parsers
    Sites,
    /// Show the activity log, newest first
    Log(LogArgs),
}

#[derive(Args)]
struct ScrapeArgs {
    url: String,
    /// JSON config file; unset fields keep their defaults
    #[arg(long)]
    config: Option<PathBuf>,
    /// Do not append to the activity log
    #[arg(long = "no-log")]
    no_log: bool,
}

#[derive(Args)]
struct ParseArgs {
    /// HTML file, or `-` for stdin
    file: String,
    /// URL the page was saved from (drives site matching and relative links)
    #[arg(long)]
    url: String,
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct LogArgs {
    #[arg(long)]
    domain: Option<String>,
    #[arg(long)]
    failures: bool,
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.cmd {
        Command::Scrape(args) => scrape_cmd(args),
        Command::Parse(args) => parse_cmd(args),
        Command::Sites => {
            print_json(&registered_sites());
            ExitCode::SUCCESS
        }
        Command::Log(LogArgs { domain, failures }) => {
            match ActivityLogger::new().and_then(|l| l.read_logs(domain.as_deref(), failures)) {
                Ok(lines) => {
                    for line in lines {
                        println!("{line}");
                    }
                    ExitCode::SUCCESS
                }
                Err(e) => fail(format!("{e:#}")),
            }
        }
    }
}

fn scrape_cmd(args: ScrapeArgs) -> ExitCode {
    let config = match load_config(args.config.as_ref()) {
        Ok(c) => c,
        Err(e) => return fail(format!("{e:#}")),
    };

    let started = Instant::now();
    let result = runtime::scrape_blocking(&args.url, config);

    if !args.no_log {
        let logged = ActivityLogger::new()
            .and_then(|logger| logger.record(&args.url, &result, started.elapsed()));
        if let Err(e) = logged {
            tracing::warn!(error = %e, "could not write activity log");
        }
    }

    finish(result)
}

fn parse_cmd(args: ParseArgs) -> ExitCode {
    let config = match load_config(args.config.as_ref()) {
        Ok(c) => c,
        Err(e) => return fail(format!("{e:#}")),
    };
    let html = match read_input(&args.file) {
        Ok(h) => h,
        Err(e) => return fail(format!("reading {}: {e}", args.file)),
    };

    let outcome = ScrapeRequest::parse(&args.url).and_then(|(request, _)| {
        let page = RawPage::from_html(&request.url, html);
        extract_page(&page, &config.extract).map(|(method, recipe)| ScrapedRecipe { method, recipe })
    });
    finish(ScrapeResult::from(outcome))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ScrapeConfig> {
    let mut config = match path {
        Some(p) => ScrapeConfig::from_file(p)?,
        None => ScrapeConfig::default(),
    };
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

fn read_input(file: &str) -> io::Result<String> {
    if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        let bytes = std::fs::read(file)?;
        Ok(crate::tools::fetch::decode_body(&bytes, None))
    }
}

fn finish(result: ScrapeResult) -> ExitCode {
    print_json(&result);
    if result.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn fail(message: String) -> ExitCode {
    print_json(&serde_json::json!({ "success": false, "error": message }));
    ExitCode::FAILURE
}

fn print_json<T: Serialize>(val: &T) {
    match serde_json::to_string_pretty(val) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("could not serialize output: {e}"),
    }
}
