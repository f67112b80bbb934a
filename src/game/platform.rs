//! Platform filter for uploads.

use std::fmt;
use std::str::FromStr;

/// A platform an upload can be built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Linux,
    Osx,
    Android,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Platform::Windows,
        Platform::Linux,
        Platform::Osx,
        Platform::Android,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Osx => "osx",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "windows" | "win" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "osx" | "mac" | "macos" => Ok(Platform::Osx),
            "android" => Ok(Platform::Android),
            other => Err(format!(
                "unknown platform \"{other}\", expected one of windows, linux, osx, android"
            )),
        }
    }
}
