use thiserror::Error;

/// Errors that can occur during a capture or discovery run
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No authenticated browser profile is available
    #[error("not authenticated - run the sign-in setup first")]
    NotAuthenticated,

    /// Browser failed to launch
    #[error("failed to launch browser: {0}")]
    LaunchFailed(String),

    /// Tab operation failed
    #[error("tab operation failed: {0}")]
    TabOperationFailed(String),

    /// Navigation to a URL failed
    #[error("navigation failed: {0}")]
    NavigationFailed(String),

    /// The element locator exhausted every strategy without a visible match
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// A navigation stage failed, aborting the run
    #[error("stage '{stage}' failed: {reason}")]
    StageFailed {
        /// Name of the stage that failed
        stage: String,
        /// Underlying failure description
        reason: String,
    },

    /// Writing the captured image to disk failed
    #[error("failed to write capture: {0}")]
    CaptureWriteFailed(#[from] std::io::Error),

    /// No list items appeared on the landing page within the timeout
    #[error("discovery timed out: {0}")]
    DiscoveryTimeout(String),

    /// Notebook library could not be read or written
    #[error("notebook library error: {0}")]
    Library(String),
}

/// Result type alias for slidecap operations
pub type Result<T> = std::result::Result<T, CaptureError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_failed_display() {
        let err = CaptureError::StageFailed {
            stage: "start_presentation".to_string(),
            reason: "no 'Present' button".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("start_presentation"));
        assert!(msg.contains("Present"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CaptureError = io.into();
        assert!(matches!(err, CaptureError::CaptureWriteFailed(_)));
    }
}
