//! Browser session management and launch configuration

pub mod config;
pub mod session;

pub use config::LaunchOptions;
pub use session::BrowserSession;
