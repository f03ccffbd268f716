//! Data model for scraped download entries and emitted update records.

use serde::{Deserialize, Serialize};

/// One discovered download link, before the pipeline has run.
#[derive(Debug, Clone)]
pub struct DownloadEntry {
    /// Visible label of the download button.
    pub link_text: String,
    /// Raw href as found in the page.
    pub href: String,
    /// Percent-decoded filename component of the resolved download URL.
    pub filename: String,
}

/// One accepted update, ready for the output report.
///
/// Only constructed when the update decision engine judged the version newer
/// than the stored one for the same tracking key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateRecord {
    pub app_name: String,
    pub version: String,
    pub variant: String,
    pub download_url: String,
    pub page_url: String,
    pub tracking_key: String,
    pub suggested_filename: String,
}
