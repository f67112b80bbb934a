//! Builder pattern implementation for creating [`Library`] instances.
//!
//! # Examples
//!
//! ```rust
//! use itchdl::library::LibraryBuilder;
//! use std::path::PathBuf;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), itchdl::Error> {
//! let library = LibraryBuilder::new("my-api-key")
//!     .directory(PathBuf::from("./games"))
//!     .jobs(8)
//!     .timeout(Duration::from_secs(300))
//!     .on_complete(|summary| println!("{}", summary.line()))
//!     .build()?;
//! assert_eq!(library.jobs(), 8);
//! # Ok(())
//! # }
//! ```

use super::config::LibraryConfig;
use super::library::Library;
use super::summary::Summary;
use crate::api::{ApiClient, Endpoints};
use crate::error::Result;
use crate::http::HttpClientConfig;
use crate::progress::StyleOptions;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::{path::PathBuf, sync::Arc, time::Duration};

/// A builder used to create a [`Library`].
pub struct LibraryBuilder {
    token: String,
    config: LibraryConfig,
}

impl LibraryBuilder {
    /// Creates a builder for the account owning `token`, with the default options.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            config: LibraryConfig::default(),
        }
    }

    /// Convenience function to hide the progress bars.
    pub fn hidden(token: impl Into<String>) -> Self {
        Self::new(token).style_options(StyleOptions::hidden())
    }

    /// Sets the directory under which games are stored.
    pub fn directory(mut self, directory: PathBuf) -> Self {
        self.config.directory = directory;
        self
    }

    /// Set the number of games downloaded at once. Zero is treated as one.
    pub fn jobs(mut self, jobs: usize) -> Self {
        self.config.jobs = jobs.max(1);
        self
    }

    /// Set a deadline for every request, body included.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Set a deadline for establishing connections.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = Some(timeout);
        self
    }

    /// Set the progress bar style options.
    pub fn style_options(mut self, style_options: StyleOptions) -> Self {
        self.config.style_options = style_options;
        self
    }

    /// Send requests somewhere other than the public storefront.
    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.config.endpoints = endpoints;
        self
    }

    /// Set callback for when each game completes.
    ///
    /// The callback runs as soon as the game finishes, while other games may
    /// still be downloading.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    /// Add the http headers. Repeated calls are merged.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.config.headers.take().unwrap_or_default();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add one http header.
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.config.headers.take().unwrap_or_default();
        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`Library`] with the specified options.
    pub fn build(self) -> Result<Library> {
        let http = HttpClientConfig {
            timeout: self.config.timeout,
            connect_timeout: self.config.connect_timeout,
            proxy: None,
            headers: self.config.headers.clone(),
        };
        let client = ApiClient::new(self.token, self.config.endpoints.clone(), http)?;
        Ok(Library::new(client, self.config))
    }
}
