//! Upload descriptors.

use super::platform::Platform;
use serde::Deserialize;

/// One downloadable file variant of a game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Upload {
    pub id: u64,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub p_windows: bool,
    #[serde(default)]
    pub p_linux: bool,
    #[serde(default)]
    pub p_osx: bool,
    #[serde(default)]
    pub p_android: bool,
}

impl Upload {
    /// The name the file is saved under.
    ///
    /// `filename` wins, then `display_name`, then the numeric id. Path
    /// separators are replaced so the file stays inside the game directory.
    pub fn file_name(&self) -> String {
        let name = non_empty(&self.filename)
            .or_else(|| non_empty(&self.display_name))
            .map(String::from)
            .unwrap_or_else(|| self.id.to_string());
        name.replace(['/', '\\'], "_")
    }

    /// Whether the upload is tagged for `platform`.
    pub fn supports(&self, platform: Platform) -> bool {
        match platform {
            Platform::Windows => self.p_windows,
            Platform::Linux => self.p_linux,
            Platform::Osx => self.p_osx,
            Platform::Android => self.p_android,
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
