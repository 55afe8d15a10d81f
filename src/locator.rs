//! Layered element location for an unstable, undocumented UI.
//!
//! No single selector reliably finds a NotebookLM control across releases,
//! so every lookup is described as a [`Target`] plus an ordered list of
//! [`Strategy`] values. Strategies are swept strictly in priority order and
//! the first candidate that scrolls into view and reports itself visible
//! wins - first match, never best match. Strategy tables are data, so new
//! fallbacks can be appended without touching the sweep loop.

use crate::error::{CaptureError, Result};
use headless_chrome::browser::tab::point::Point;
use headless_chrome::{Element, Tab};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Pause between full strategy sweeps while the time budget lasts
const SWEEP_PAUSE: Duration = Duration::from_millis(500);

/// What kind of element a lookup is after
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A panel tab in the notebook chrome (e.g. "Studio")
    PanelTab,
    /// A document entry in the Studio panel, identified by its title
    DocumentName,
    /// The control that starts the slideshow view
    PresentationControl,
    /// The isolated slide image inside the slideshow view
    SlideImage,
}

/// Semantic statement of what is being searched for, independent of
/// selector syntax. Immutable; one is constructed per navigation step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub kind: TargetKind,
    /// Text the element is expected to carry (empty where irrelevant)
    pub value: String,
}

impl Target {
    pub fn panel_tab(name: impl Into<String>) -> Self {
        Self { kind: TargetKind::PanelTab, value: name.into() }
    }

    pub fn document(name: impl Into<String>) -> Self {
        Self { kind: TargetKind::DocumentName, value: name.into() }
    }

    pub fn presentation_control() -> Self {
        Self { kind: TargetKind::PresentationControl, value: "Present".to_string() }
    }

    pub fn slide_image() -> Self {
        Self { kind: TargetKind::SlideImage, value: String::new() }
    }
}

/// How candidate text is compared against the target value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextMatch {
    /// Normalized equality
    Exact,
    /// Normalized substring containment
    Contains,
}

/// One concrete way to query candidates for a target
#[derive(Debug, Clone, PartialEq)]
pub enum Strategy {
    /// Direct CSS query; first visible hit in document order wins
    Selector { css: String },

    /// Query `scope` and compare each candidate's inner text against the
    /// target value
    Text { scope: String, matching: TextMatch },

    /// Blind click at a fixed screen position. Last resort only: no
    /// candidate query, no verification, reported as best-effort success.
    Coordinate { x: f64, y: f64 },
}

impl Strategy {
    fn selector(css: &str) -> Self {
        Strategy::Selector { css: css.to_string() }
    }

    fn text(scope: &str, matching: TextMatch) -> Self {
        Strategy::Text { scope: scope.to_string(), matching }
    }
}

/// The ranked default strategy table for a target: specific role-based
/// selectors first, text equality second, broad substring sweeps last.
pub fn strategies_for(target: &Target) -> Vec<Strategy> {
    match target.kind {
        TargetKind::PanelTab => vec![
            Strategy::text("[role='tab']", TextMatch::Exact),
            Strategy::text("button, div", TextMatch::Exact),
        ],
        TargetKind::DocumentName => vec![
            Strategy::text("[role='button']", TextMatch::Contains),
            Strategy::text("span", TextMatch::Contains),
            Strategy::text("div", TextMatch::Contains),
        ],
        TargetKind::PresentationControl => vec![
            Strategy::selector("button[aria-label='Present']"),
            Strategy::selector("button[aria-label='Start slideshow']"),
            Strategy::text("button", TextMatch::Exact),
            Strategy::text("button, span", TextMatch::Contains),
            // Observed stable position of the slideshow control when every
            // selector above misses
            Strategy::Coordinate { x: 895.0, y: 46.0 },
        ],
        TargetKind::SlideImage => vec![
            Strategy::selector("img.slide-image"),
            Strategy::selector("div.slideshow-view img"),
        ],
    }
}

/// A successful location
pub enum Located<'a> {
    /// A visible element handle
    Element(Element<'a>),

    /// The coordinate fallback fired. The click has already been issued
    /// with no verification; callers must treat this as degraded
    /// availability, not confirmed success.
    Coordinates { x: f64, y: f64 },
}

impl Located<'_> {
    /// Click the located element. For the coordinate fallback the click
    /// already happened, so this is a no-op.
    pub fn click(&self) -> Result<()> {
        match self {
            Located::Element(element) => {
                element
                    .click()
                    .map_err(|e| CaptureError::TabOperationFailed(format!("click failed: {}", e)))?;
                Ok(())
            }
            Located::Coordinates { .. } => Ok(()),
        }
    }

    /// Whether this came from the unverified coordinate fallback
    pub fn is_best_effort(&self) -> bool {
        matches!(self, Located::Coordinates { .. })
    }
}

/// Try every strategy in priority order until one yields a visible element.
///
/// Non-coordinate strategies are swept repeatedly until `budget` expires;
/// candidates within a strategy are taken in document order. After the
/// budget is spent a trailing [`Strategy::Coordinate`], if present, is fired
/// blind. With no coordinate fallback the lookup fails with
/// `ElementNotFound` - never with a handle to an invisible element.
pub fn locate<'a>(
    tab: &'a Arc<Tab>,
    target: &Target,
    strategies: &[Strategy],
    budget: Duration,
) -> Result<Located<'a>> {
    let deadline = Instant::now() + budget;

    loop {
        for strategy in strategies {
            match strategy {
                Strategy::Selector { css } => {
                    for element in tab.find_elements(css).unwrap_or_default() {
                        if ensure_visible(&element) {
                            log::debug!("located {:?} via selector '{}'", target.kind, css);
                            return Ok(Located::Element(element));
                        }
                    }
                }
                Strategy::Text { scope, matching } => {
                    for element in tab.find_elements(scope).unwrap_or_default() {
                        let Ok(text) = element.get_inner_text() else { continue };
                        if text_matches(&text, &target.value, *matching) && ensure_visible(&element) {
                            log::debug!("located {:?} via text match in '{}'", target.kind, scope);
                            return Ok(Located::Element(element));
                        }
                    }
                }
                // Held back until the candidate strategies are out of time
                Strategy::Coordinate { .. } => continue,
            }
        }

        if Instant::now() >= deadline {
            break;
        }
        std::thread::sleep(SWEEP_PAUSE);
    }

    if let Some(Strategy::Coordinate { x, y }) =
        strategies.iter().find(|s| matches!(s, Strategy::Coordinate { .. }))
    {
        log::warn!(
            "all selector strategies missed {:?}; blind-clicking ({}, {}) - locator table needs a follow-up",
            target.kind,
            x,
            y
        );
        tab.click_point(Point { x: *x, y: *y })
            .map_err(|e| CaptureError::TabOperationFailed(format!("coordinate click failed: {}", e)))?;
        return Ok(Located::Coordinates { x: *x, y: *y });
    }

    Err(CaptureError::ElementNotFound(format!(
        "no visible match for {:?} '{}'",
        target.kind, target.value
    )))
}

/// Scroll a candidate into view and check that it renders as visible
fn ensure_visible(element: &Element) -> bool {
    if element.scroll_into_view().is_err() {
        return false;
    }
    is_visible(element)
}

fn is_visible(element: &Element) -> bool {
    const VISIBILITY_JS: &str = r#"
        function() {
            const rect = this.getBoundingClientRect();
            const style = window.getComputedStyle(this);
            return rect.width > 0 && rect.height > 0
                && style.visibility !== 'hidden'
                && style.display !== 'none';
        }
    "#;

    element
        .call_js_fn(VISIBILITY_JS, vec![], false)
        .ok()
        .and_then(|o| o.value)
        .and_then(|v| v.as_bool())
        .unwrap_or(false)
}

/// Trimmed, case-folded text used for all comparisons
fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Compare a candidate's inner text against the wanted value
fn text_matches(candidate: &str, wanted: &str, matching: TextMatch) -> bool {
    let candidate = normalize_text(candidate);
    let wanted = normalize_text(wanted);

    match matching {
        TextMatch::Exact => candidate == wanted,
        TextMatch::Contains => candidate.contains(&wanted),
    }
}
