//! itchdl downloads the games of an itch.io account to local disk,
//! organized as `<publisher>/<title>/`.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use itchdl::{Error, LibraryBuilder};
//! use std::path::PathBuf;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Error> {
//! let mut library = LibraryBuilder::new("my-api-key")
//!     .directory(PathBuf::from("games"))
//!     .jobs(4)
//!     .build()?;
//! library.load_owned_games().await?;
//! let report = library.download_library(None).await;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`api`] - endpoints, payload models and the authenticated [`ApiClient`]
//! - [`game`] - the [`Game`] entity, uploads, platforms and manifests
//! - [`library`] - the [`Library`] aggregate and the bounded batch downloader
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client construction
//! - [`progress`] - Progress bar styling and display management

pub mod api;
pub mod error;
pub mod game;
pub mod http;
pub mod library;
pub mod progress;

pub use api::{ApiClient, Endpoints};
pub use error::{Error, Result};
pub use game::{Game, Manifest, Platform, Upload};
pub use http::{create_http_client, HttpClientConfig};
pub use library::{GameLookup, Library, LibraryBuilder, Report, Status, Summary};
pub use progress::{ProgressBarOpts, ProgressDisplay, StyleOptions};
