//! `scrape` command: one storefront, rendered as JSON or CSV.

use std::path::Path;

use clap::ValueEnum;
use storescan_core::{flatten_report, render_csv, AppConfig, ScrapeReport};
use storescan_scraper::{
    ScrapeOptions, ScraperError, StoreScraper, StoreTarget, HOMEPAGE_UNAVAILABLE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

/// Scrapes `url` and writes the rendered report to `output` or stdout.
///
/// # Errors
///
/// Returns an error if the URL is invalid, the homepage cannot be fetched,
/// rendering fails, or the output file cannot be written. Every other
/// fetch failure only empties its own report section.
pub(crate) async fn run_scrape(
    config: &AppConfig,
    url: &str,
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let target = StoreTarget::parse(url)?;
    let scraper = StoreScraper::new(target.clone(), &ScrapeOptions::from(config))?;

    let report = match scraper.run_all().await {
        Ok(report) => report,
        Err(ScraperError::HomepageUnavailable { url, source }) => {
            tracing::error!(url = %url, error = %source, "homepage unavailable");
            anyhow::bail!(HOMEPAGE_UNAVAILABLE);
        }
        Err(e) => return Err(e.into()),
    };

    let rendered = render(&report, &target, format)?;
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!(path = %path.display(), "report written");
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// Pretty-printed JSON, or CSV with one row per fact.
pub(crate) fn render(
    report: &ScrapeReport,
    target: &StoreTarget,
    format: OutputFormat,
) -> anyhow::Result<String> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Csv => render_csv(&flatten_report(report, target.as_str()))?,
    })
}
