//! Stage-by-stage navigation from a notebook URL to the target slide.
//!
//! The UI exposes no "ready" signal, so each UI-mutating step is followed by
//! a fixed settle delay that absorbs the asynchronous re-render. Stages are
//! ordered and non-skippable; any failure short-circuits the run and there
//! is no partial-progress resume.

use crate::error::{CaptureError, Result};
use crate::locator::{locate, strategies_for, Target};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::Tab;
use std::sync::Arc;
use std::time::Duration;

/// Per-step element-wait budget
const LOCATOR_BUDGET: Duration = Duration::from_secs(10);

/// Where a run failed, for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    OpenNotebook,
    ActivatePanel,
    SelectDocument,
    StartPresentation,
    AdvanceSlides,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::OpenNotebook => "open_notebook",
            Stage::ActivatePanel => "activate_panel",
            Stage::SelectDocument => "select_document",
            Stage::StartPresentation => "start_presentation",
            Stage::AdvanceSlides => "advance_slides",
        }
    }
}

/// Fixed waits inserted after UI-mutating actions.
///
/// Empirically chosen; a zeroed set ([`SettleDelays::none`]) keeps tests
/// fast. A stronger implementation would poll a DOM predicate with the same
/// worst-case bound.
#[derive(Debug, Clone)]
pub struct SettleDelays {
    /// After the initial page load
    pub after_load: Duration,
    /// After activating the Studio panel
    pub after_panel: Duration,
    /// After selecting the document entry
    pub after_select: Duration,
    /// After entering the slideshow view
    pub after_present: Duration,
    /// After each forward-advance key signal
    pub per_advance: Duration,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            after_load: Duration::from_secs(5),
            after_panel: Duration::from_secs(2),
            after_select: Duration::from_secs(3),
            after_present: Duration::from_secs(3),
            per_advance: Duration::from_secs(1),
        }
    }
}

impl SettleDelays {
    /// All-zero delays for tests
    pub fn none() -> Self {
        Self {
            after_load: Duration::ZERO,
            after_panel: Duration::ZERO,
            after_select: Duration::ZERO,
            after_present: Duration::ZERO,
            per_advance: Duration::ZERO,
        }
    }
}

/// Progress of one capture run. Fields are monotonic: booleans only ever
/// become true and the slide index only increases, mirroring the number of
/// forward-advance signals issued. Discarded with the browsing context.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavState {
    panel_active: bool,
    document_open: bool,
    presentation_active: bool,
    advances_issued: usize,
}

impl NavState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn panel_active(&self) -> bool {
        self.panel_active
    }

    pub fn document_open(&self) -> bool {
        self.document_open
    }

    pub fn presentation_active(&self) -> bool {
        self.presentation_active
    }

    /// 1-based index of the slide currently assumed to be shown
    pub fn current_index(&self) -> usize {
        self.advances_issued + 1
    }

    /// Number of forward-advance signals issued so far
    pub fn advances_issued(&self) -> usize {
        self.advances_issued
    }

    fn mark_panel_active(&mut self) {
        self.panel_active = true;
    }

    fn mark_document_open(&mut self) {
        self.document_open = true;
    }

    fn mark_presentation_active(&mut self) {
        self.presentation_active = true;
    }

    fn record_advance(&mut self) {
        self.advances_issued += 1;
    }
}

/// Forward-advance signals needed to reach a 1-based page index
pub fn advance_signals(target_page: usize) -> usize {
    target_page.saturating_sub(1)
}

/// Drives the fixed stage sequence
/// `Landed -> PanelActive -> DocumentOpen -> PresentationActive -> AtTargetIndex`
/// against a single page.
pub struct SlideNavigator<'a> {
    tab: &'a Arc<Tab>,
    delays: SettleDelays,
    state: NavState,
}

impl<'a> SlideNavigator<'a> {
    pub fn new(tab: &'a Arc<Tab>) -> Self {
        Self { tab, delays: SettleDelays::default(), state: NavState::new() }
    }

    /// Builder method: override the settle delays
    pub fn with_delays(mut self, delays: SettleDelays) -> Self {
        self.delays = delays;
        self
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// Run all stages up to the requested page
    pub fn run(&mut self, notebook_url: &str, document_name: &str, page: usize) -> Result<()> {
        self.open_notebook(notebook_url)?;
        self.activate_studio_panel()?;
        self.select_document(document_name)?;
        self.start_presentation()?;
        self.advance_to_page(page)
    }

    /// Stage 1: load the notebook page
    pub fn open_notebook(&mut self, url: &str) -> Result<()> {
        log::info!("opening notebook {}", url);

        self.tab
            .navigate_to(url)
            .and_then(|tab| tab.wait_until_navigated())
            .map_err(|e| stage_failure(Stage::OpenNotebook, e.to_string()))?;

        self.settle(self.delays.after_load);
        Ok(())
    }

    /// Stage 2: bring the Studio panel to the front
    pub fn activate_studio_panel(&mut self) -> Result<()> {
        log::info!("activating Studio panel");

        let target = Target::panel_tab("Studio");
        locate(self.tab, &target, &strategies_for(&target), LOCATOR_BUDGET)
            .and_then(|located| located.click())
            .map_err(|e| stage_failure(Stage::ActivatePanel, e.to_string()))?;

        self.state.mark_panel_active();
        self.settle(self.delays.after_panel);
        Ok(())
    }

    /// Stage 3: click the named document entry in the panel
    pub fn select_document(&mut self, name: &str) -> Result<()> {
        log::info!("selecting document '{}'", name);

        let target = Target::document(name);
        let located = match locate(self.tab, &target, &strategies_for(&target), LOCATOR_BUDGET) {
            Ok(located) => located,
            Err(e) => {
                self.dump_debug_screenshot();
                return Err(stage_failure(Stage::SelectDocument, e.to_string()));
            }
        };

        located.click().map_err(|e| stage_failure(Stage::SelectDocument, e.to_string()))?;

        self.state.mark_document_open();
        self.settle(self.delays.after_select);
        Ok(())
    }

    /// Stage 4: enter the slideshow view for a chrome-free capture
    pub fn start_presentation(&mut self) -> Result<()> {
        log::info!("starting slideshow");

        let target = Target::presentation_control();
        let located = locate(self.tab, &target, &strategies_for(&target), LOCATOR_BUDGET)
            .map_err(|e| stage_failure(Stage::StartPresentation, e.to_string()))?;

        if located.is_best_effort() {
            log::warn!("slideshow started via coordinate fallback; outcome unverified");
        } else {
            located.click().map_err(|e| stage_failure(Stage::StartPresentation, e.to_string()))?;
        }

        self.state.mark_presentation_active();
        self.settle(self.delays.after_present);
        Ok(())
    }

    /// Stage 5: issue `page - 1` forward-advance key signals.
    ///
    /// Assumes each signal moves exactly one slide forward; the UI exposes
    /// no position readback to verify against.
    pub fn advance_to_page(&mut self, page: usize) -> Result<()> {
        let signals = advance_signals(page);
        log::info!("advancing to page {} ({} signals)", page, signals);

        for _ in 0..signals {
            self.tab
                .press_key("ArrowRight")
                .map_err(|e| stage_failure(Stage::AdvanceSlides, e.to_string()))?;
            self.state.record_advance();
            self.settle(self.delays.per_advance);
        }

        Ok(())
    }

    fn settle(&self, delay: Duration) {
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    /// Best-effort full-page screenshot for diagnosing a missing document
    /// entry; failures only log.
    fn dump_debug_screenshot(&self) {
        let path = "debug_not_found.png";
        match self.tab.capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true) {
            Ok(png) => {
                if std::fs::write(path, png).is_ok() {
                    log::warn!("document not found; debug screenshot written to {}", path);
                }
            }
            Err(e) => log::debug!("debug screenshot failed: {}", e),
        }
    }
}

fn stage_failure(stage: Stage, reason: String) -> CaptureError {
    CaptureError::StageFailed { stage: stage.as_str().to_string(), reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_signal_counts() {
        // Page 1 is already showing when the slideshow opens
        assert_eq!(advance_signals(1), 0);
        assert_eq!(advance_signals(4), 3);
        assert_eq!(advance_signals(0), 0);
    }

    #[test]
    fn test_nav_state_starts_at_index_one() {
        let state = NavState::new();

        assert!(!state.panel_active());
        assert!(!state.document_open());
        assert!(!state.presentation_active());
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.advances_issued(), 0);
    }

    #[test]
    fn test_nav_state_is_monotonic() {
        let mut state = NavState::new();

        state.mark_panel_active();
        state.mark_document_open();
        state.mark_presentation_active();
        assert!(state.presentation_active());

        // Re-marking never resets anything
        state.mark_presentation_active();
        assert!(state.panel_active());
        assert!(state.document_open());
        assert!(state.presentation_active());

        let before = state.current_index();
        state.record_advance();
        state.record_advance();
        assert_eq!(state.current_index(), before + 2);
        assert_eq!(state.advances_issued(), 2);
    }

    #[test]
    fn test_current_index_tracks_signals() {
        let mut state = NavState::new();
        for _ in 0..advance_signals(4) {
            state.record_advance();
        }
        assert_eq!(state.current_index(), 4);
    }

    #[test]
    fn test_stage_names() {
        assert_eq!(Stage::OpenNotebook.as_str(), "open_notebook");
        assert_eq!(Stage::AdvanceSlides.as_str(), "advance_slides");
    }

    #[test]
    fn test_settle_delays_none_is_zero() {
        let delays = SettleDelays::none();
        assert!(delays.after_load.is_zero());
        assert!(delays.per_advance.is_zero());
    }
}
