//! The library aggregate and the bounded download coordinator.
//!
//! A [`Library`] is filled by one or more loading strategies, each of which
//! appends to the game list without clearing it:
//!
//! - [`Library::load_owned_games`] walks every page of ownership keys
//! - [`Library::load_game`] resolves one game by publisher and title
//! - [`Library::load_games`] scans a publisher's storefront page
//!
//! [`Library::download_library`] then downloads every game with at most
//! `jobs` games in flight.
//!
//! # Examples
//!
//! ```rust,no_run
//! use itchdl::library::LibraryBuilder;
//!
//! # async fn example() -> Result<(), itchdl::Error> {
//! let mut library = LibraryBuilder::new("my-api-key").jobs(4).build()?;
//! library.load_owned_games().await?;
//! let report = library.download_library(None).await;
//! assert_eq!(report.downloaded() + report.errors(), library.games().len());
//! # Ok(())
//! # }
//! ```

use super::config::LibraryConfig;
use super::storefront;
use super::summary::{Report, Summary};
use crate::api::{canonical_link, ApiClient};
use crate::error::{Error, Result};
use crate::game::{Game, Platform};
use crate::progress::ProgressDisplay;

use futures::stream::{self, StreamExt};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, error, info};

/// How [`Library::load_game`] resolved a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameLookup {
    /// The game's files are public; its catalog record was added.
    Direct,
    /// The game is key-gated and was found among the owned keys.
    Keyed,
    /// The game is key-gated and no owned key matches it.
    NotOwned,
}

/// Running success and failure counts of a batch, kept under one lock so the
/// two never disagree.
#[derive(Debug, Default)]
struct Tally {
    downloaded: usize,
    errors: usize,
}

/// A user's collection of games.
pub struct Library {
    client: ApiClient,
    games: Vec<Game>,
    config: LibraryConfig,
}

impl fmt::Debug for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Library")
            .field("client", &self.client)
            .field("games", &self.games.len())
            .field("config", &self.config)
            .finish()
    }
}

impl Library {
    pub(crate) fn new(client: ApiClient, config: LibraryConfig) -> Self {
        Self {
            client,
            games: Vec::new(),
            config,
        }
    }

    /// The API key the library authenticates with.
    pub fn login(&self) -> &str {
        self.client.token()
    }

    /// Maximum number of games downloaded at once.
    pub fn jobs(&self) -> usize {
        self.config.jobs
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// The games loaded so far, in load order.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Append a game built elsewhere.
    pub fn add_game(&mut self, game: Game) {
        self.games.push(game);
    }

    /// Loads one page of ownership keys and appends their games.
    ///
    /// Returns the number of keys on the page.
    pub async fn load_game_page(&mut self, page: u32) -> Result<usize> {
        info!("Loading page {}", page);
        let keys = self.client.owned_keys(page).await?;
        let count = keys.len();
        for key in keys {
            self.games.push(Game::from_owned_key(key)?);
        }
        Ok(count)
    }

    /// Loads every owned game, one page at a time, until a page comes back empty.
    ///
    /// Returns the number of games appended.
    pub async fn load_owned_games(&mut self) -> Result<usize> {
        let mut total = 0;
        let mut page = 1;
        loop {
            let count = self.load_game_page(page).await?;
            if count == 0 {
                break;
            }
            total += count;
            page += 1;
        }
        Ok(total)
    }

    /// Loads a single game by publisher and title.
    ///
    /// A game whose upload list is visible without a key is added from the
    /// catalog, upload list included. Otherwise the owned keys are scanned
    /// for a game with the matching link, stopping at the first match. Not
    /// finding one is reported as [`GameLookup::NotOwned`], not as an error.
    pub async fn load_game(&mut self, publisher: &str, title: &str) -> Result<GameLookup> {
        let data = self.client.game_data(publisher, title).await?;
        let record = self.client.game(data.id).await?;
        let uploads = self.client.uploads(data.id, None).await?;

        if !uploads.is_empty() {
            let mut game = Game::new(None, data.id, record)?;
            game.downloads = Some(uploads);
            self.games.push(game);
            return Ok(GameLookup::Direct);
        }

        info!("{} is a purchased game.", title);
        let link = canonical_link(publisher, title);
        let mut page = 1;
        loop {
            info!("Loading page {}", page);
            let keys = self.client.owned_keys(page).await?;
            if keys.is_empty() {
                break;
            }
            if let Some(key) = keys
                .into_iter()
                .find(|key| key.game.get("url").and_then(Value::as_str) == Some(link.as_str()))
            {
                self.games.push(Game::from_owned_key(key)?);
                return Ok(GameLookup::Keyed);
            }
            page += 1;
        }

        info!("Cannot find {} in owned keys, you may not own it.", title);
        Ok(GameLookup::NotOwned)
    }

    /// Loads every game listed on a publisher's storefront page.
    ///
    /// The page itself is fetched without credentials; each catalog record
    /// is fetched with them. Returns the number of games appended.
    pub async fn load_games(&mut self, publisher: &str) -> Result<usize> {
        let html = self.client.storefront_page(publisher).await?;
        let ids = storefront::game_ids(&html)?;
        debug!("Found {} game links for {}", ids.len(), publisher);

        for id in &ids {
            let record = self.client.game(*id).await?;
            self.games.push(Game::new(None, *id, record)?);
        }
        Ok(ids.len())
    }

    /// Downloads every game, at most [`jobs`](Library::jobs) at a time.
    ///
    /// Each finished game prints one line, in completion order: its running
    /// success count for a success, the error message otherwise. No game's
    /// failure stops the others. Once all are done the summary line
    /// `Downloaded <n> Games, <m> Errors` is printed and returned as a
    /// [`Report`].
    pub async fn download_library(&self, platform: Option<Platform>) -> Report {
        let total = self.games.len();
        let progress = ProgressDisplay::new(self.config.style_options.clone(), total);
        let tally = Mutex::new(Tally::default());

        let summaries = stream::iter(&self.games)
            .map(|game| self.download_game(game, platform, total, &tally, &progress))
            .buffer_unordered(self.jobs())
            .collect::<Vec<_>>()
            .await;

        let tally = tally.into_inner().unwrap_or_else(PoisonError::into_inner);
        let report = Report::new(tally.downloaded, tally.errors, summaries);

        progress.println(&report.to_string());
        progress.finish();

        report
    }

    async fn download_game(
        &self,
        game: &Game,
        platform: Option<Platform>,
        total: usize,
        tally: &Mutex<Tally>,
        progress: &ProgressDisplay,
    ) -> Summary {
        let result = game
            .download(&self.client, &self.config.directory, platform, progress)
            .await;

        let summary = {
            let mut tally = tally.lock().unwrap_or_else(PoisonError::into_inner);
            match result {
                Ok(files) => {
                    tally.downloaded += 1;
                    Summary::success(game, files, tally.downloaded, total)
                }
                Err(e) if e.is_no_download() => {
                    tally.errors += 1;
                    Summary::nothing_to_download(game, e)
                }
                Err(e) => {
                    tally.errors += 1;
                    let msg = error_chain(&e);
                    error!(game = %game.name, error = %msg, "download failed");
                    Summary::fail(game, msg)
                }
            }
        };

        progress.println(summary.line());
        progress.increment_main();

        if let Some(ref callback) = self.config.on_complete {
            callback(&summary);
        }

        summary
    }
}

/// `error: cause: cause ...`
fn error_chain(e: &Error) -> String {
    let mut msg = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
