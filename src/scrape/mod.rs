//! Page scraper: walks one page's download box and runs the extraction
//! pipeline over each download entry.
//!
//! Structural contract with the target pages: a `section.downloadbox`
//! containing `ul.download-links` with `li.download-link` items, each
//! carrying an `a.download-btn[href]` and an inner `span.txt` label.
//! Anything malformed is skipped at the smallest possible granularity.

use scraper::{Html, Selector};
use tracing::{debug, info, warn};
use url::Url;

use crate::compare::is_update;
use crate::extract::{
    build_identity, classify, extract_version, resolve_extension, variant_label, NameResolver,
    VariantTaxonomy,
};
use crate::extract::normalize::trim_title_suffix;
use crate::history::VersionHistory;
use crate::models::{DownloadEntry, UpdateRecord};

pub struct PageScraper<'a> {
    taxonomy: &'a VariantTaxonomy,
    heading: Selector,
    title: Selector,
    download_box: Selector,
    link_list: Selector,
    link_item: Selector,
    anchor: Selector,
    label: Selector,
}

impl<'a> PageScraper<'a> {
    pub fn new(taxonomy: &'a VariantTaxonomy) -> Self {
        Self {
            taxonomy,
            heading: Selector::parse(r#"h1[class*="title"]"#).unwrap(),
            title: Selector::parse("title").unwrap(),
            download_box: Selector::parse("section.downloadbox").unwrap(),
            link_list: Selector::parse("ul.download-links").unwrap(),
            link_item: Selector::parse("li.download-link").unwrap(),
            anchor: Selector::parse("a.download-btn").unwrap(),
            label: Selector::parse("span.txt").unwrap(),
        }
    }

    /// Process one fetched page; returns the update records it yields.
    ///
    /// The history is read-only here: recording accepted versions is the
    /// caller's job, after it decides what to do with the records.
    pub fn scrape_page(
        &self,
        page_url: &str,
        html: &str,
        history: &VersionHistory,
    ) -> Vec<UpdateRecord> {
        let document = Html::parse_document(html);
        let display_name = self.resolve_display_name(&document, page_url);
        info!("processing {} (app: '{}')", page_url, display_name);

        let Some(download_box) = document.select(&self.download_box).next() else {
            warn!("no download box found on {}", page_url);
            return Vec::new();
        };
        let Some(link_list) = download_box.select(&self.link_list).next() else {
            warn!("no download link list found on {}", page_url);
            return Vec::new();
        };

        let mut records = Vec::new();
        for (index, item) in link_list.select(&self.link_item).enumerate() {
            let Some(entry) = self.read_entry(page_url, item) else {
                debug!("skipping malformed download item {} on {}", index, page_url);
                continue;
            };

            let filename_stem = crate::extract::filetype::strip_known_extension(&entry.filename);
            let Some(version) = extract_version(&entry.link_text, filename_stem) else {
                debug!(
                    "no version in '{}' / '{}', skipping",
                    entry.link_text, entry.filename
                );
                continue;
            };

            let combined = format!("{} {}", entry.filename, entry.link_text);
            let extension = resolve_extension(&entry.href, &combined);
            let tags = classify(&entry.link_text, &entry.filename, &extension, self.taxonomy);
            let variant = variant_label(&tags);
            let (tracking_key, suggested_filename) =
                build_identity(&display_name, &version, &tags, &extension, self.taxonomy);

            let last_known = history.last_known(&tracking_key);
            if is_update(&version, last_known) {
                info!(
                    "update for {}: {} (was: {})",
                    tracking_key,
                    version,
                    last_known.unwrap_or("never seen")
                );
                records.push(UpdateRecord {
                    app_name: display_name.clone(),
                    version,
                    variant,
                    download_url: entry.href,
                    page_url: page_url.to_string(),
                    tracking_key,
                    suggested_filename,
                });
            } else {
                debug!("{} is up to date at {}", tracking_key, version);
            }
        }
        records
    }

    /// Best name candidate: page heading, then <title> with its site tail
    /// trimmed, then the URL-derived fallback inside the resolver.
    fn resolve_display_name(&self, document: &Html, page_url: &str) -> String {
        let resolver = NameResolver::new(self.taxonomy);

        let heading = document
            .select(&self.heading)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|t| !t.is_empty());
        if let Some(heading) = heading {
            return resolver.resolve(Some(&heading), page_url);
        }

        let title = document
            .select(&self.title)
            .next()
            .map(|el| trim_title_suffix(el.text().collect::<String>().trim()))
            .filter(|t| !t.is_empty());
        resolver.resolve(title.as_deref(), page_url)
    }

    /// Pull out one entry's anchor, label, and decoded filename. `None`
    /// means a malformed item to skip.
    fn read_entry(&self, page_url: &str, item: scraper::ElementRef<'_>) -> Option<DownloadEntry> {
        let anchor = item.select(&self.anchor).next()?;
        let href = anchor.value().attr("href").filter(|h| !h.is_empty())?;
        let download_url = Url::parse(page_url).ok()?.join(href).ok()?;

        let link_text = anchor
            .select(&self.label)
            .next()
            .map(|el| el.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        let filename = download_url
            .path()
            .rsplit('/')
            .next()
            .map(|segment| {
                urlencoding::decode(segment)
                    .map(|d| d.into_owned())
                    .unwrap_or_else(|_| segment.to_string())
            })
            .unwrap_or_default();

        Some(DownloadEntry {
            link_text,
            href: download_url.to_string(),
            filename,
        })
    }
}
