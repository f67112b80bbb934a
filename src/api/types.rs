//! Payloads returned by the storefront API.
//!
//! Only the fields the crate reads are typed. Game records are kept as raw
//! [`Value`]s so the full record can be written back out in the manifest.

use crate::game::Upload;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// One page of `GET /profile/owned-keys`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OwnedKeysPage {
    #[serde(deserialize_with = "list_or_map")]
    pub owned_keys: Vec<OwnedKey>,
}

/// A record linking the account to a purchased or claimed game.
#[derive(Debug, Clone, Deserialize)]
pub struct OwnedKey {
    /// Ownership-key id, used to scope uploads and downloads.
    pub id: u64,
    /// Catalog id of the game.
    pub game_id: u64,
    /// The full catalog record of the game.
    pub game: Value,
}

/// Response of `GET /games/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogResponse {
    pub game: Value,
}

/// Response of `GET /games/{id}/uploads`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploadList {
    #[serde(deserialize_with = "list_or_map")]
    pub uploads: Vec<Upload>,
}

/// The public `data.json` of a game page. Only the catalog id matters.
#[derive(Debug, Clone, Deserialize)]
pub struct PublicGameData {
    pub id: u64,
}

/// A short-lived token authorizing a single file fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadSession {
    pub uuid: String,
}

/// The subset of a catalog record a [`Game`](crate::game::Game) is built from.
#[derive(Debug, Clone, Deserialize)]
pub struct GameRecord {
    pub id: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub user: Option<GameUser>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GameUser {
    pub username: String,
}

/// Empty collections come back as `{}` rather than `[]`.
fn list_or_map<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrMap<T> {
        List(Vec<T>),
        Map(BTreeMap<String, T>),
        Null(()),
    }

    Ok(match ListOrMap::deserialize(deserializer)? {
        ListOrMap::List(items) => items,
        ListOrMap::Map(items) => items.into_values().collect(),
        ListOrMap::Null(()) => Vec::new(),
    })
}
