//! Configuration structures and defaults for the library.
//!
//! # Examples
//!
//! ```rust
//! use itchdl::library::{GameCallback, Status};
//!
//! let callback: GameCallback = Box::new(|summary| match summary.status() {
//!     Status::Success => println!("✓ {}", summary.name()),
//!     Status::NothingToDownload(msg) => println!("- {}", msg),
//!     Status::Fail(msg) => println!("✗ {} - {}", summary.name(), msg),
//! });
//! ```

use super::summary::Summary;
use crate::api::Endpoints;
use crate::progress::StyleOptions;

use reqwest::header::HeaderMap;
use std::env::current_dir;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Callback invoked as each game of a library download finishes.
pub type GameCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Default number of concurrent game downloads.
pub const DEFAULT_JOBS: usize = 4;

/// Configuration structure for the library.
#[derive(Clone)]
pub struct LibraryConfig {
    /// Root under which `<publisher_slug>/...` is created.
    pub directory: PathBuf,
    /// Maximum number of games downloaded at once.
    pub jobs: usize,
    /// Deadline for each request.
    pub timeout: Option<Duration>,
    /// Deadline for establishing each connection.
    pub connect_timeout: Option<Duration>,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Library style options.
    pub style_options: StyleOptions,
    /// Where API and storefront requests go.
    pub endpoints: Endpoints,
    /// Callback for when each game completes.
    pub on_complete: Option<Arc<GameCallback>>,
}

impl std::fmt::Debug for LibraryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LibraryConfig")
            .field("directory", &self.directory)
            .field("jobs", &self.jobs)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .field("headers", &self.headers)
            .field("style_options", &self.style_options)
            .field("endpoints", &self.endpoints)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            directory: current_dir().unwrap_or_default(),
            jobs: DEFAULT_JOBS,
            timeout: None,
            connect_timeout: None,
            headers: None,
            style_options: StyleOptions::default(),
            endpoints: Endpoints::default(),
            on_complete: None,
        }
    }
}
