//! Slide isolation and screenshot writing.
//!
//! Once the slideshow view is up, the narrowest element plausibly showing
//! "just the slide" is captured. When no structural guess matches, the
//! capture degrades to the whole viewport rather than failing - the
//! slideshow view is already mostly chrome-free.

use crate::error::{CaptureError, Result};
use crate::locator::{locate, strategies_for, Located, Target};
use headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption;
use headless_chrome::Tab;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Result of one capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureOutcome {
    /// Absolute path the image was written to
    pub path: PathBuf,

    /// Whether an isolated slide element was captured, as opposed to the
    /// degraded whole-viewport fallback
    pub isolated: bool,
}

/// Capture the current slide to `output_path` as PNG.
///
/// The destination directory is created if absent; the file lands at the
/// exact (absolutized) caller-specified path. Only filesystem errors fail
/// the operation.
pub fn capture_slide(tab: &Arc<Tab>, output_path: &Path) -> Result<CaptureOutcome> {
    let path = prepare_output_path(output_path)?;

    let target = Target::slide_image();
    let (png, isolated) = match locate(tab, &target, &strategies_for(&target), Duration::ZERO) {
        Ok(Located::Element(element)) => {
            let png = element
                .capture_screenshot(CaptureScreenshotFormatOption::Png)
                .map_err(|e| CaptureError::TabOperationFailed(format!("element screenshot failed: {}", e)))?;
            (png, true)
        }
        _ => {
            log::warn!("no isolated slide element found; capturing full viewport");
            let png = tab
                .capture_screenshot(CaptureScreenshotFormatOption::Png, None, None, true)
                .map_err(|e| CaptureError::TabOperationFailed(format!("viewport screenshot failed: {}", e)))?;
            (png, false)
        }
    };

    std::fs::write(&path, png)?;
    log::info!("screenshot saved to {}", path.display());

    Ok(CaptureOutcome { path, isolated })
}

/// Absolutize the output path and make sure its directory exists
pub(crate) fn prepare_output_path(path: &Path) -> std::io::Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    if let Some(parent) = absolute.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(absolute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_output_path_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let requested = dir.path().join("captures").join("deep").join("slide.png");

        let prepared = prepare_output_path(&requested).unwrap();

        assert_eq!(prepared, requested);
        assert!(requested.parent().unwrap().is_dir());
    }

    #[test]
    fn test_prepare_output_path_absolutizes_relative() {
        let prepared = prepare_output_path(Path::new("out/slide.png")).unwrap();
        assert!(prepared.is_absolute());
        assert!(prepared.ends_with("out/slide.png"));

        // Cleanup the directory created in the working directory
        let _ = std::fs::remove_dir("out");
    }

    #[test]
    fn test_prepare_output_path_existing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let requested = dir.path().join("slide.png");

        let prepared = prepare_output_path(&requested).unwrap();
        assert_eq!(prepared, requested);
    }
}
