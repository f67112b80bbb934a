//! The user's game library and its batch downloader.
//!
//! - `library` - the [`Library`] aggregate, its loading strategies and
//!   [`Library::download_library`]
//! - `builder` - [`LibraryBuilder`] for configuring a library
//! - `config` - [`LibraryConfig`] and the completion callback type
//! - `storefront` - game ids from a publisher's storefront page
//! - `summary` - per-game [`Summary`] and the batch [`Report`]
//!
//! # Examples
//!
//! ```rust,no_run
//! use itchdl::library::{GameLookup, LibraryBuilder};
//!
//! # async fn example() -> Result<(), itchdl::Error> {
//! let mut library = LibraryBuilder::new("my-api-key").build()?;
//! if library.load_game("maddymakesgames", "celeste-classic").await? == GameLookup::NotOwned {
//!     println!("not in this library");
//! }
//! library.download_library(None).await;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod library;
pub mod storefront;
pub mod summary;

pub use builder::LibraryBuilder;
pub use config::{GameCallback, LibraryConfig, DEFAULT_JOBS};
pub use library::{GameLookup, Library};
pub use summary::{Report, Status, Summary};
