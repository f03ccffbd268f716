//! appwatch - download-page update monitor.
//!
//! The core is a normalization and extraction pipeline ([`extract`]) that
//! turns noisy, multi-language download-page text into three stable facts
//! per entry: app identity, version, and variant. Around it sit a page
//! scraper ([`scrape`]), an update decision engine ([`compare`]), and a
//! persisted version history ([`history`]).

pub mod cli;
pub mod compare;
pub mod config;
pub mod extract;
pub mod fetch;
pub mod history;
pub mod models;
pub mod report;
pub mod scrape;
