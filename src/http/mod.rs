//! HTTP module containing HTTP client functionality.
//!
//! This module provides the middleware-wrapped reqwest client shared by every
//! request the crate makes. Requests are traced through `reqwest-tracing`;
//! there is deliberately no retry layer, a failed call fails its operation.
//!
//! # Examples
//!
//! ```rust
//! use itchdl::http::{create_http_client, HttpClientConfig};
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpClientConfig {
//!     timeout: Some(Duration::from_secs(60)),
//!     ..HttpClientConfig::default()
//! };
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{create_http_client, HttpClientConfig};
