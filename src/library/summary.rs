//! Per-game outcomes and the batch report.
//!
//! # Examples
//!
//! ```rust
//! use itchdl::library::Report;
//!
//! let report = Report::new(2, 1, Vec::new());
//! assert_eq!(report.to_string(), "Downloaded 2 Games, 1 Errors");
//! ```

use crate::game::Game;
use std::fmt;

/// How a single game's download ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Every file was written.
    Success,
    /// The game had no upload to fetch.
    NothingToDownload(String),
    /// Any other failure, with its message.
    Fail(String),
}

/// Represents the outcome of one [`Game`] in a library download.
#[derive(Debug, Clone)]
pub struct Summary {
    name: String,
    link: String,
    files: usize,
    status: Status,
    line: String,
}

impl Summary {
    /// Mark a game as downloaded, `done` being the running success count.
    pub fn success(game: &Game, files: usize, done: usize, total: usize) -> Self {
        Self {
            name: game.name.clone(),
            link: game.link.clone(),
            files,
            status: Status::Success,
            line: format!("Downloaded {} ({} of {})", game.name, done, total),
        }
    }

    /// Mark a game as having nothing to download.
    pub fn nothing_to_download(game: &Game, msg: impl fmt::Display) -> Self {
        let msg = msg.to_string();
        Self {
            name: game.name.clone(),
            link: game.link.clone(),
            files: 0,
            status: Status::NothingToDownload(msg.clone()),
            line: msg,
        }
    }

    /// Mark a game as failed with a message.
    pub fn fail(game: &Game, msg: impl fmt::Display) -> Self {
        let msg = msg.to_string();
        Self {
            name: game.name.clone(),
            link: game.link.clone(),
            files: 0,
            line: format!("Failed to download {}: {}", game.name, msg),
            status: Status::Fail(msg),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// Number of files written.
    pub fn files(&self) -> usize {
        self.files
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// The progress line printed for this game.
    pub fn line(&self) -> &str {
        &self.line
    }
}

/// Final tally of a library download.
#[derive(Debug, Clone, Default)]
pub struct Report {
    downloaded: usize,
    errors: usize,
    summaries: Vec<Summary>,
}

impl Report {
    pub fn new(downloaded: usize, errors: usize, summaries: Vec<Summary>) -> Self {
        Self {
            downloaded,
            errors,
            summaries,
        }
    }

    /// Games fully downloaded.
    pub fn downloaded(&self) -> usize {
        self.downloaded
    }

    /// Games that ended in any other way.
    pub fn errors(&self) -> usize {
        self.errors
    }

    /// Per-game outcomes, in completion order.
    pub fn summaries(&self) -> &[Summary] {
        &self.summaries
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Downloaded {} Games, {} Errors",
            self.downloaded, self.errors
        )
    }
}
