//! Run settings: artifact paths resolved from CLI arguments and environment.

use std::path::PathBuf;

/// Default input list of page URLs to check.
pub const DEFAULT_URLS_FILE: &str = "urls_to_check.txt";
/// Default persisted version history.
pub const DEFAULT_TRACKER_FILE: &str = "versions_tracker.json";
/// Default output report.
pub const DEFAULT_OUTPUT_FILE: &str = "updates_found.json";

/// Resolved file locations for one run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Input URL list (one per line, `#` comments allowed).
    pub urls_file: PathBuf,
    /// Persisted tracking map.
    pub tracker_file: PathBuf,
    /// Output JSON report.
    pub output_file: PathBuf,
    /// Key=value summary target for CI automation, from `GITHUB_OUTPUT`.
    pub summary_target: Option<PathBuf>,
}

impl Settings {
    /// Resolve settings from optional CLI overrides plus the environment.
    pub fn resolve(
        urls: Option<PathBuf>,
        tracker: Option<PathBuf>,
        output: Option<PathBuf>,
    ) -> Self {
        Self {
            urls_file: urls.unwrap_or_else(|| PathBuf::from(DEFAULT_URLS_FILE)),
            tracker_file: tracker.unwrap_or_else(|| PathBuf::from(DEFAULT_TRACKER_FILE)),
            output_file: output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
            summary_target: std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from),
        }
    }
}
