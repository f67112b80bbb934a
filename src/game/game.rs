//! The game entity.
//!
//! A [`Game`] is built from a catalog record, optionally paired with the
//! ownership key it was found through. It knows where its files go and how
//! to fetch them.
//!
//! # Examples
//!
//! ```rust
//! use itchdl::game::Game;
//! use serde_json::json;
//!
//! let game = Game::from_catalog(json!({
//!     "id": 42,
//!     "title": "Celeste Classic",
//!     "url": "https://maddymakesgames.itch.io/celeste-classic",
//!     "user": {"username": "Maddy Makes Games"}
//! }))?;
//! assert_eq!(game.publisher_slug, "maddymakesgames");
//! assert_eq!(game.game_slug, "celeste-classic");
//! # Ok::<(), itchdl::Error>(())
//! ```

use super::manifest::Manifest;
use super::platform::Platform;
use super::upload::Upload;
use crate::api::types::{GameRecord, OwnedKey};
use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::progress::ProgressDisplay;

use regex::Regex;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tokio::fs;
use tracing::debug;

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https://([^/.]+)\.itch\.io/([^/?#]+)/?$")
        .expect("game link regex is valid")
});

/// Splits a canonical game link into `(publisher_slug, game_slug)`.
///
/// Fails unless the link looks like `https://<publisher>.itch.io/<title>`.
pub fn parse_link(link: &str) -> Result<(String, String)> {
    LINK_PATTERN
        .captures(link)
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .ok_or_else(|| {
            Error::InvalidUrl(format!(
                "\"{link}\" is not of the form https://<publisher>.itch.io/<title>"
            ))
        })
}

/// One ownable title.
#[derive(Debug, Clone)]
pub struct Game {
    /// Ownership-key id. `None` when the game came straight from the catalog.
    pub id: Option<u64>,
    /// Catalog id.
    pub game_id: u64,
    pub name: String,
    /// Display username of the publisher.
    pub publisher: String,
    /// Canonical URL.
    pub link: String,
    pub publisher_slug: String,
    pub game_slug: String,
    /// The full catalog record.
    pub data: Value,
    /// Upload list, `None` until loaded.
    pub downloads: Option<Vec<Upload>>,
}

impl Game {
    /// Builds a game from its catalog record.
    pub fn new(id: Option<u64>, game_id: u64, data: Value) -> Result<Self> {
        let record: GameRecord = serde_json::from_value(data.clone())?;
        let (publisher_slug, game_slug) = parse_link(&record.url)?;
        let publisher = record
            .user
            .map(|user| user.username)
            .unwrap_or_else(|| publisher_slug.clone());

        Ok(Self {
            id,
            game_id,
            name: record.title,
            publisher,
            link: record.url,
            publisher_slug,
            game_slug,
            data,
            downloads: None,
        })
    }

    /// Builds a game from an ownership-key record.
    pub fn from_owned_key(key: OwnedKey) -> Result<Self> {
        Self::new(Some(key.id), key.game_id, key.game)
    }

    /// Builds a game from a bare catalog record, without ownership key.
    pub fn from_catalog(data: Value) -> Result<Self> {
        let game_id = data
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| Error::Internal("catalog record has no numeric id".into()))?;
        Self::new(None, game_id, data)
    }

    /// The loaded uploads, empty when none were loaded.
    pub fn downloads(&self) -> &[Upload] {
        self.downloads.as_deref().unwrap_or_default()
    }

    /// `<root>/<publisher_slug>/<game_slug>`
    pub fn directory(&self, root: &Path) -> PathBuf {
        root.join(&self.publisher_slug).join(&self.game_slug)
    }

    /// `<root>/<publisher_slug>/<game_slug>.json`
    pub fn manifest_path(&self, root: &Path) -> PathBuf {
        root.join(&self.publisher_slug)
            .join(format!("{}.json", self.game_slug))
    }

    pub fn manifest(&self) -> Manifest {
        Manifest {
            name: self.name.clone(),
            publisher: self.publisher.clone(),
            link: self.link.clone(),
            itch_id: self.id,
            game_id: self.game_id,
            itch_data: self.data.clone(),
        }
    }

    /// Fetches the upload list, replacing any previously loaded one.
    ///
    /// Returns the number of uploads.
    pub async fn load_downloads(&mut self, client: &ApiClient) -> Result<usize> {
        let uploads = client.uploads(self.game_id, self.id).await?;
        let count = uploads.len();
        self.downloads = Some(uploads);
        Ok(count)
    }

    /// Downloads every upload of the game below `root`.
    ///
    /// Uses the loaded upload list, or fetches one without storing it when
    /// none was loaded. With a `platform`, only uploads tagged for it are
    /// kept. Fails with [`Error::NoDownload`] before touching the disk when
    /// nothing is left. Otherwise writes the manifest, then fetches each file
    /// through its own download session.
    ///
    /// Returns the number of files written.
    pub async fn download(
        &self,
        client: &ApiClient,
        root: &Path,
        platform: Option<Platform>,
        progress: &ProgressDisplay,
    ) -> Result<usize> {
        let fetched;
        let uploads = match &self.downloads {
            Some(uploads) => uploads.as_slice(),
            None => {
                fetched = client.uploads(self.game_id, self.id).await?;
                fetched.as_slice()
            }
        };

        let uploads: Vec<&Upload> = uploads
            .iter()
            .filter(|upload| match platform {
                Some(platform) => upload.supports(platform),
                None => true,
            })
            .collect();
        if uploads.is_empty() {
            return Err(Error::NoDownload(self.name.clone()));
        }

        let directory = self.directory(root);
        debug!("Creating destination directory {:?}", directory);
        fs::create_dir_all(&directory).await?;
        self.manifest().write(&self.manifest_path(root)).await?;

        for upload in &uploads {
            let session = client.open_download_session(self.game_id).await?;
            let file = upload.file_name();
            let url = client.endpoints().upload_download(
                upload.id,
                client.token(),
                self.id,
                &session.uuid,
            );
            let label = format!("{} - {}", self.name, file);
            client
                .download_file(&url, &directory.join(&file), &label, progress)
                .await?;
        }

        Ok(uploads.len())
    }
}
