//! # slidecap
//!
//! Automated slide screenshot capture for NotebookLM Studio via the Chrome
//! DevTools Protocol (CDP).
//!
//! ## Features
//!
//! - **Resilient element location**: ranked fallback strategies (role-based
//!   selectors, text matching, broad sweeps, blind coordinate click) for a UI
//!   with no stable selectors
//! - **Slide navigation**: fixed stage sequence from notebook URL to target
//!   slide, with settle delays and a keyboard advance protocol
//! - **Slide isolation**: captures the narrowest element representing the
//!   slide, degrading to a viewport screenshot when none is found
//! - **Notebook discovery**: scrapes the landing page for notebook cards,
//!   optionally filtered by title substring
//!
//! ## CLI
//!
//! The usual entry point is the `slidecap` binary:
//!
//! ```bash
//! # Capture page 3 of a document into out/slide.png
//! slidecap capture --doc-name "Q3 Roadmap" --page 3 --output out/slide.png
//!
//! # List notebooks whose title contains "plan"
//! slidecap discover plan
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use slidecap::capture::{self, CaptureRequest};
//! use slidecap::RunOptions;
//!
//! # fn main() -> slidecap::Result<()> {
//! let request = CaptureRequest {
//!     notebook_url: "https://notebooklm.google.com/notebook/abc".to_string(),
//!     document_name: "Q3 Roadmap".to_string(),
//!     page: 3,
//!     output_path: "out/slide.png".into(),
//! };
//!
//! let outcome = capture::run(&request, &RunOptions::new())?;
//! println!("saved to {}", outcome.path.display());
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - [`browser`]: Browser session management and launch configuration
//! - [`auth`]: Persistent-profile authentication check
//! - [`library`]: Notebook catalog (id to URL lookup)
//! - [`locator`]: Layered element location strategies
//! - [`capture`]: Navigation to the target slide and screenshot isolation
//! - [`discover`]: Landing-page notebook discovery
//! - [`error`]: Error types and result alias

pub mod auth;
pub mod browser;
pub mod capture;
pub mod discover;
pub mod error;
pub mod library;
pub mod locator;

pub use auth::AuthSession;
pub use browser::{BrowserSession, LaunchOptions};
pub use capture::{CaptureOutcome, CaptureRequest, NavState, SettleDelays, SlideNavigator};
pub use discover::NotebookEntry;
pub use error::{CaptureError, Result};
pub use library::{Notebook, NotebookLibrary};
pub use locator::{Located, Strategy, Target, TargetKind};

/// Options shared by capture and discovery runs
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Run Chrome without a visible window (default: true)
    pub headless: bool,

    /// Authenticated profile to launch with
    pub auth: AuthSession,

    /// Settle delays between navigation stages
    pub delays: SettleDelays,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            headless: true,
            auth: AuthSession::new(),
            delays: SettleDelays::default(),
        }
    }
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set the auth session
    pub fn auth(mut self, auth: AuthSession) -> Self {
        self.auth = auth;
        self
    }

    /// Builder method: set the settle delays
    pub fn delays(mut self, delays: SettleDelays) -> Self {
        self.delays = delays;
        self
    }
}
