//! Storefront API access.
//!
//! - [`endpoints`] - URL construction for every resource the crate touches
//! - [`types`] - serde models of the API payloads
//! - [`client`] - [`ApiClient`], the authenticated HTTP/JSON collaborator
//!
//! # Examples
//!
//! ```rust,no_run
//! use itchdl::api::{ApiClient, Endpoints};
//! use itchdl::http::HttpClientConfig;
//!
//! # async fn example() -> Result<(), itchdl::Error> {
//! let client = ApiClient::new("my-api-key", Endpoints::default(), HttpClientConfig::default())?;
//! let keys = client.owned_keys(1).await?;
//! println!("{} games on the first page", keys.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::ApiClient;
pub use endpoints::{canonical_link, Endpoints, DEFAULT_API_BASE};
pub use types::{DownloadSession, GameRecord, OwnedKey, PublicGameData};
