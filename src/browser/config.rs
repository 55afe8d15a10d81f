use std::path::PathBuf;

/// Options for launching a Chrome/Chromium instance
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Run without a visible window (default: true)
    pub headless: bool,

    /// Browser window width in pixels
    pub window_width: u32,

    /// Browser window height in pixels
    pub window_height: u32,

    /// Path to the Chrome binary (default: auto-detect)
    pub chrome_path: Option<PathBuf>,

    /// Persistent profile directory; cookies and storage survive across runs
    pub user_data_dir: Option<PathBuf>,

    /// Enable the Chrome sandbox (default: true)
    pub sandbox: bool,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1280,
            window_height: 900,
            chrome_path: None,
            user_data_dir: None,
            sandbox: true,
        }
    }
}

impl LaunchOptions {
    /// Create launch options with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set headless mode
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Builder method: set window size
    pub fn window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Builder method: set the Chrome binary path
    pub fn chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Builder method: set the persistent profile directory
    pub fn user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    /// Builder method: set sandbox mode
    pub fn sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_options_builder() {
        let opts = LaunchOptions::new().headless(false).window_size(800, 600);

        assert!(!opts.headless);
        assert_eq!(opts.window_width, 800);
        assert_eq!(opts.window_height, 600);
        assert!(opts.sandbox);
    }

    #[test]
    fn test_launch_options_profile_dir() {
        let opts = LaunchOptions::new().user_data_dir("/tmp/profile");
        assert_eq!(opts.user_data_dir, Some(PathBuf::from("/tmp/profile")));
    }
}
