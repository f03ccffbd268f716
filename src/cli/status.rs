//! The `status` command: show the tracked version history.

use console::style;

use crate::config::Settings;
use crate::history::VersionHistory;

pub fn cmd_status(settings: &Settings) -> anyhow::Result<()> {
    let history = VersionHistory::load(&settings.tracker_file);
    if history.is_empty() {
        println!("no tracked versions in {}", settings.tracker_file.display());
        return Ok(());
    }

    println!(
        "{} tracked build(s) in {}",
        style(history.len()).bold(),
        settings.tracker_file.display()
    );
    for (tracking_key, version) in history.iter() {
        println!("  {}  {}", style(tracking_key).cyan(), version);
    }
    Ok(())
}
