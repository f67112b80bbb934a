//! Error handling for itchdl.
//!
//! Every fallible operation in the crate returns [`Result`]. Transport and
//! decoding failures abort the operation that hit them; the only variant the
//! batch downloader treats specially is [`Error::NoDownload`].

use reqwest::StatusCode;
use std::io;
use thiserror::Error;

/// Errors that can happen when talking to the storefront or writing games to disk.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    #[error("Internal error: {0}")]
    Internal(String),

    /// A URL could not be parsed or does not have the expected shape.
    ///
    /// Returned when a game's canonical link is not of the form
    /// `https://<publisher>.itch.io/<title>`, since every destination path is
    /// derived from it.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The game has no upload that could be downloaded.
    ///
    /// This is the one failure the library batch absorbs and counts instead of
    /// propagating.
    #[error("No downloads found for {0}")]
    NoDownload(String),

    /// The API answered with an `errors` envelope.
    #[error("API error: {0}")]
    Api(String),

    /// The server answered with a non-success status and no usable body.
    #[error("HTTP {status} from {url}")]
    HttpStatus { status: StatusCode, url: String },

    /// A storefront page contained a game link we could not read.
    #[error("Invalid storefront page: {0}")]
    InvalidPage(String),

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error raised while sending a request through the middleware stack.
    #[error("Request error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// The response body was not the JSON we expected.
    #[error("Malformed JSON")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl Error {
    /// Whether this is the "nothing to download" condition.
    pub fn is_no_download(&self) -> bool {
        matches!(self, Error::NoDownload(_))
    }
}

/// Result type alias for operations that can fail with an itchdl error.
pub type Result<T> = std::result::Result<T, Error>;
