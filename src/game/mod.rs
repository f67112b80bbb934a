//! Game entities and what they write to disk.
//!
//! - [`game`] - the [`Game`] entity: identity, slugs, upload list, download
//! - [`upload`] - upload descriptors and destination filename resolution
//! - [`platform`] - the optional platform filter
//! - [`manifest`] - the `<game_slug>.json` document written beside each game
//!
//! Files land under the output directory as
//! `<publisher_slug>/<game_slug>/<filename>`, with the manifest at
//! `<publisher_slug>/<game_slug>.json`.

pub mod game;
pub mod manifest;
pub mod platform;
pub mod upload;

pub use game::{parse_link, Game};
pub use manifest::Manifest;
pub use platform::Platform;
pub use upload::Upload;
