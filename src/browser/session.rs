use crate::browser::config::LaunchOptions;
use crate::error::{CaptureError, Result};
use headless_chrome::{Browser, Tab};
use std::{ffi::OsStr, sync::Arc, time::Duration};

/// Browser session that manages a Chrome/Chromium instance for one run.
///
/// A session holds exclusive mutable UI focus; runs must not share one.
/// The Chrome process is released when the session is dropped, and
/// [`BrowserSession::close`] can be called for an eager best-effort shutdown.
pub struct BrowserSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// The single page used by this run
    tab: Arc<Tab>,
}

impl BrowserSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // A capture run can spend minutes waiting on slow UI re-renders;
        // keep the browser alive well past the 30 second library default
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        launch_opts.headless = options.headless;
        launch_opts.window_size = Some((options.window_width, options.window_height));
        launch_opts.sandbox = options.sandbox;

        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        // Persistent profile keeps the authenticated Google session alive
        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        let browser = Browser::new(launch_opts).map_err(|e| CaptureError::LaunchFailed(e.to_string()))?;

        let tab = browser
            .new_tab()
            .map_err(|e| CaptureError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self { browser, tab })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get the page used by this run
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate the page to a URL
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab
            .navigate_to(url)
            .map_err(|e| CaptureError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab
            .wait_until_navigated()
            .map_err(|e| CaptureError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Close the browser.
    ///
    /// The Chrome process is terminated when the `Browser` instance is
    /// dropped; closing the tab here just shuts the session down eagerly.
    /// Errors are ignored so close is safe on every exit path.
    pub fn close(&self) {
        let _ = self.tab.close(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests (require Chrome to be installed)
    #[test]
    #[ignore] // Run with: cargo test -- --ignored
    fn test_launch_browser() {
        let result = BrowserSession::launch(LaunchOptions::new().headless(true));
        assert!(result.is_ok());
    }

    #[test]
    #[ignore]
    fn test_navigate() {
        let session = BrowserSession::launch(LaunchOptions::new().headless(true)).expect("Failed to launch browser");

        let result = session.navigate("about:blank");
        assert!(result.is_ok());
        session.close();
    }
}
