//! Run artifacts: the updates JSON and the automation summary signal.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::models::UpdateRecord;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write output file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize updates: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write the output JSON array, pretty-printed, even when empty. Downstream
/// automation relies on this file always existing after a run.
pub fn write_updates(path: &Path, records: &[UpdateRecord]) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(records)?;
    std::fs::write(path, json + "\n")?;
    info!("wrote {} update(s) to {}", records.len(), path.display());
    Ok(())
}

/// Append the `updates_count=N` line for the automation collaborator.
///
/// An unavailable target must not fail the run; the error is logged and
/// swallowed.
pub fn write_summary_signal(target: Option<&Path>, count: usize) {
    let Some(path) = target else {
        return;
    };
    let result = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .and_then(|mut file| writeln!(file, "updates_count={count}"));
    if let Err(e) = result {
        warn!("could not write summary signal to {}: {}", path.display(), e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> UpdateRecord {
        UpdateRecord {
            app_name: "Sample App".to_string(),
            version: "1.2.0".to_string(),
            variant: "Universal".to_string(),
            download_url: "https://dl.example.com/sample-1.2.0.apk".to_string(),
            page_url: "https://example.com/sample/".to_string(),
            tracking_key: "sample_app_universal".to_string(),
            suggested_filename: "sample_app_v1_2_0.apk".to_string(),
        }
    }

    #[test]
    fn test_empty_output_is_valid_json_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updates.json");
        write_updates(&path, &[]).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<UpdateRecord> = serde_json::from_str(&raw).unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_records_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("updates.json");
        write_updates(&path, &[sample_record()]).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: Vec<UpdateRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, vec![sample_record()]);
    }

    #[test]
    fn test_summary_signal_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gh_output.txt");
        std::fs::write(&path, "existing=1\n").unwrap();
        write_summary_signal(Some(&path), 3);
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "existing=1\nupdates_count=3\n");
    }

    #[test]
    fn test_summary_signal_failure_is_swallowed() {
        write_summary_signal(Some(Path::new("/nonexistent/dir/out.txt")), 0);
    }

    #[test]
    fn test_summary_signal_no_target() {
        write_summary_signal(None, 5);
    }
}
