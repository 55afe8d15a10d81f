//! Slide capture: navigation to the target slide plus screenshot isolation

pub mod extract;
pub mod navigator;

pub use extract::{capture_slide, CaptureOutcome};
pub use navigator::{advance_signals, NavState, SettleDelays, SlideNavigator, Stage};

use crate::browser::{BrowserSession, LaunchOptions};
use crate::error::{CaptureError, Result};
use crate::RunOptions;
use std::path::PathBuf;

/// Everything one capture run needs
#[derive(Debug, Clone)]
pub struct CaptureRequest {
    /// Full notebook URL
    pub notebook_url: String,

    /// Title of the document to open in the Studio panel
    pub document_name: String,

    /// 1-based slide index to capture
    pub page: usize,

    /// Where to write the PNG
    pub output_path: PathBuf,
}

/// Run one full capture: pre-flight auth check, launch, navigate, capture.
///
/// The browser is released on every exit path; the session never outlives
/// the run and is never shared.
pub fn run(request: &CaptureRequest, options: &RunOptions) -> Result<CaptureOutcome> {
    // Abort before launching anything when no signed-in profile exists
    if !options.auth.is_authenticated() {
        return Err(CaptureError::NotAuthenticated);
    }

    let session = BrowserSession::launch(
        LaunchOptions::new()
            .headless(options.headless)
            .user_data_dir(options.auth.profile_dir()),
    )?;

    let outcome = run_with_session(&session, request, options);
    session.close();
    outcome
}

fn run_with_session(
    session: &BrowserSession,
    request: &CaptureRequest,
    options: &RunOptions,
) -> Result<CaptureOutcome> {
    let mut navigator = SlideNavigator::new(session.tab()).with_delays(options.delays.clone());
    navigator.run(&request.notebook_url, &request.document_name, request.page)?;

    capture_slide(session.tab(), &request.output_path)
}
