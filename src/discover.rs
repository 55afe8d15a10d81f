//! Notebook discovery: scrape the landing page for notebook cards.
//!
//! Card markup is unstable, so titles come from a fallback chain evaluated
//! inside the page (heading, known title class, `title` attribute, then a
//! placeholder); extraction runs as one JavaScript pass that hands back
//! JSON, which keeps the Rust side to filtering and URL normalization.

use crate::browser::{BrowserSession, LaunchOptions};
use crate::error::{CaptureError, Result};
use crate::RunOptions;
use headless_chrome::Tab;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Application origin used to absolutize relative card links
pub const APP_ORIGIN: &str = "https://notebooklm.google.com";

/// Selector that identifies one notebook card on the landing page
const LIST_ITEM_SELECTOR: &str = "div[role='listitem']";

/// How long to wait for the first card before declaring the run dead
const LIST_TIMEOUT: Duration = Duration::from_secs(15);

/// One scraped notebook card. Duplicates are permitted; the sequence is
/// materialized once per call.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NotebookEntry {
    pub title: String,
    pub url: String,
}

/// Shape handed back by the in-page extraction script
#[derive(Debug, Deserialize)]
struct RawEntry {
    title: String,
    href: String,
}

const EXTRACT_ENTRIES_JS: &str = r#"
    (function() {
        const cards = document.querySelectorAll("div[role='listitem']");
        const entries = [];
        for (const card of cards) {
            const titleEl = card.querySelector('h2')
                || card.querySelector('.notebook-title')
                || card.querySelector('[title]');
            const text = titleEl ? titleEl.innerText.trim() : '';
            const link = card.querySelector('a');
            entries.push({
                title: text !== '' ? text : 'Unknown Title',
                href: link ? (link.getAttribute('href') || '') : ''
            });
        }
        return JSON.stringify(entries);
    })()
"#;

/// Scrape the landing page open in `tab`, keeping entries whose title
/// contains `filter` case-insensitively (all entries when `None`).
///
/// Fails with `DiscoveryTimeout` when no card appears within the bounded
/// wait; there is no partial result.
pub fn scan(tab: &Arc<Tab>, filter: Option<&str>) -> Result<Vec<NotebookEntry>> {
    tab.wait_for_element_with_custom_timeout(LIST_ITEM_SELECTOR, LIST_TIMEOUT)
        .map_err(|e| CaptureError::DiscoveryTimeout(format!("no notebook cards appeared: {}", e)))?;

    let result = tab
        .evaluate(EXTRACT_ENTRIES_JS, false)
        .map_err(|e| CaptureError::TabOperationFailed(format!("card extraction failed: {}", e)))?;

    let json_value = result
        .value
        .ok_or_else(|| CaptureError::TabOperationFailed("card extraction returned no value".to_string()))?;

    // The script returns a JSON string, so unwrap the string first
    let json_str: String = serde_json::from_value(json_value)
        .map_err(|e| CaptureError::TabOperationFailed(format!("unexpected extraction result: {}", e)))?;
    let raw: Vec<RawEntry> = serde_json::from_str(&json_str)
        .map_err(|e| CaptureError::TabOperationFailed(format!("failed to parse card JSON: {}", e)))?;

    log::info!("found {} notebook cards", raw.len());

    Ok(raw
        .into_iter()
        .filter(|entry| retained(&entry.title, filter))
        .map(|entry| NotebookEntry { title: entry.title, url: absolutize(&entry.href) })
        .collect())
}

/// Run a full discovery: pre-flight auth check, launch, scrape, close
pub fn run(filter: Option<&str>, options: &RunOptions) -> Result<Vec<NotebookEntry>> {
    if !options.auth.is_authenticated() {
        return Err(CaptureError::NotAuthenticated);
    }

    let session = BrowserSession::launch(
        LaunchOptions::new()
            .headless(options.headless)
            .user_data_dir(options.auth.profile_dir()),
    )?;

    let entries = scan_landing_page(&session, filter);
    session.close();
    entries
}

fn scan_landing_page(session: &BrowserSession, filter: Option<&str>) -> Result<Vec<NotebookEntry>> {
    session.navigate(APP_ORIGIN)?;
    session.wait_for_navigation()?;
    scan(session.tab(), filter)
}

/// Prefix relative card links with the application origin
pub(crate) fn absolutize(href: &str) -> String {
    if href.is_empty() || href.starts_with("http") {
        return href.to_string();
    }
    format!("{}{}", APP_ORIGIN, href)
}

/// Case-insensitive substring filter over the title
pub(crate) fn retained(title: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(query) => title.to_lowercase().contains(&query.to_lowercase()),
    }
}
