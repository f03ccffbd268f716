//! The `check` command: the full monitoring run.

use std::fs;

use anyhow::bail;
use console::style;
use tracing::{error, info};

use crate::config::Settings;
use crate::extract::VariantTaxonomy;
use crate::fetch::PageFetcher;
use crate::history::VersionHistory;
use crate::models::UpdateRecord;
use crate::report::{write_summary_signal, write_updates};
use crate::scrape::PageScraper;

/// Run one monitoring pass over every listed page.
///
/// Exit policy: a missing URL list is the only fatal condition, and even
/// then the empty report and the zero summary signal are written first so
/// downstream automation keeps its contract. Individual page failures are
/// logged and skipped.
pub async fn cmd_check(settings: &Settings) -> anyhow::Result<()> {
    let urls = match fs::read_to_string(&settings.urls_file) {
        Ok(raw) => parse_url_list(&raw),
        Err(_) => {
            write_updates(&settings.output_file, &[])?;
            write_summary_signal(settings.summary_target.as_deref(), 0);
            bail!("URL list not found: {}", settings.urls_file.display());
        }
    };

    if urls.is_empty() {
        info!("URL list is empty (or comments only), nothing to check");
        write_updates(&settings.output_file, &[])?;
        write_summary_signal(settings.summary_target.as_deref(), 0);
        println!("{} no URLs to check", style("done:").green().bold());
        return Ok(());
    }

    let mut history = VersionHistory::load(&settings.tracker_file);
    let taxonomy = VariantTaxonomy::new();
    let scraper = PageScraper::new(&taxonomy);
    let fetcher = PageFetcher::default();

    let mut all_updates: Vec<UpdateRecord> = Vec::new();
    for page_url in &urls {
        let html = match fetcher.fetch_page(page_url).await {
            Ok(html) => html,
            Err(e) => {
                error!("failed to fetch {}: {}", page_url, e);
                continue;
            }
        };

        let records = scraper.scrape_page(page_url, &html, &history);
        for record in &records {
            history.record(&record.tracking_key, &record.version);
        }
        all_updates.extend(records);
    }

    write_updates(&settings.output_file, &all_updates)?;
    if let Err(e) = history.save(&settings.tracker_file) {
        // the report already stands; a stale tracker is recoverable
        error!(
            "failed to save history to {}: {}",
            settings.tracker_file.display(),
            e
        );
    }
    write_summary_signal(settings.summary_target.as_deref(), all_updates.len());

    println!(
        "{} {} update(s) found across {} page(s)",
        style("done:").green().bold(),
        style(all_updates.len()).bold(),
        urls.len()
    );
    Ok(())
}

/// One URL per line; blank lines and `#` comments ignored.
fn parse_url_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_list_skips_comments_and_blanks() {
        let raw = "# sites\nhttps://a.example/\n\n  https://b.example/  \n#https://c.example/\n";
        assert_eq!(
            parse_url_list(raw),
            vec!["https://a.example/", "https://b.example/"]
        );
    }

    #[test]
    fn test_parse_url_list_empty_input() {
        assert!(parse_url_list("").is_empty());
        assert!(parse_url_list("# only comments\n\n").is_empty());
    }
}
