//! The per-game manifest.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// Metadata written to `<publisher_slug>/<game_slug>.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub publisher: String,
    pub link: String,
    /// Ownership-key id, `null` for games loaded from the catalog.
    pub itch_id: Option<u64>,
    pub game_id: u64,
    /// The raw catalog record.
    pub itch_data: Value,
}

impl Manifest {
    /// Write the manifest, replacing any previous one.
    pub async fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_vec(self)?;
        fs::write(path, json).await?;
        Ok(())
    }

    pub async fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}
