//! The authenticated HTTP/JSON client.
//!
//! [`ApiClient`] performs every network call of the crate: JSON requests
//! against the API carrying the `Authorization` header, the unauthenticated
//! storefront page fetch, and streamed file downloads. Failures are returned
//! as-is; nothing here retries.

use super::endpoints::{redact, Endpoints};
use super::types::{
    CatalogResponse, DownloadSession, OwnedKey, OwnedKeysPage, PublicGameData, UploadList,
};
use crate::error::{Error, Result};
use crate::game::Upload;
use crate::http::{create_http_client, HttpClientConfig};
use crate::progress::ProgressDisplay;

use futures::StreamExt;
use reqwest::{header::AUTHORIZATION, Response};
use reqwest_middleware::ClientWithMiddleware;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::path::Path;
use tokio::{fs, fs::File, io::AsyncWriteExt};
use tracing::debug;

/// Client for the storefront API, bound to one API key.
#[derive(Clone)]
pub struct ApiClient {
    client: ClientWithMiddleware,
    token: String,
    endpoints: Endpoints,
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("endpoints", &self.endpoints)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl ApiClient {
    /// Creates a client sending `token` as its API key.
    pub fn new(
        token: impl Into<String>,
        endpoints: Endpoints,
        config: HttpClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            client: create_http_client(config)?,
            token: token.into(),
            endpoints,
        })
    }

    /// The API key.
    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetches one page of ownership keys. An empty page marks the end.
    pub async fn owned_keys(&self, page: u32) -> Result<Vec<OwnedKey>> {
        let page: OwnedKeysPage = self.get_json(&self.endpoints.owned_keys(page)).await?;
        Ok(page.owned_keys)
    }

    /// Fetches the public `data.json` of a game page.
    pub async fn game_data(&self, publisher: &str, title: &str) -> Result<PublicGameData> {
        self.get_json(&self.endpoints.game_data(publisher, title))
            .await
    }

    /// Fetches the catalog record of a game.
    pub async fn game(&self, game_id: u64) -> Result<Value> {
        let response: CatalogResponse = self.get_json(&self.endpoints.game(game_id)).await?;
        Ok(response.game)
    }

    /// Fetches the upload list of a game, scoped by ownership key when given.
    pub async fn uploads(&self, game_id: u64, download_key_id: Option<u64>) -> Result<Vec<Upload>> {
        let list: UploadList = self
            .get_json(&self.endpoints.uploads(game_id, download_key_id))
            .await?;
        Ok(list.uploads)
    }

    /// Opens a download session for one file of a game.
    pub async fn open_download_session(&self, game_id: u64) -> Result<DownloadSession> {
        let url = self.endpoints.download_session(game_id);
        debug!("POST {}", url);
        let res = self
            .client
            .post(url.as_str())
            .header(AUTHORIZATION, self.token.as_str())
            .send()
            .await?;
        decode(&url, res).await
    }

    /// Fetches a publisher's storefront page. No credentials are sent.
    pub async fn storefront_page(&self, publisher: &str) -> Result<String> {
        let url = self.endpoints.storefront(publisher);
        debug!("GET {}", url);
        let res = self.client.get(url.as_str()).send().await?;
        let res = res.error_for_status()?;
        Ok(res.text().await?)
    }

    /// Streams `url` into `destination`, replacing any existing file.
    ///
    /// A child progress bar labelled with `label` tracks the transfer.
    /// Returns the number of bytes written.
    pub async fn download_file(
        &self,
        url: &str,
        destination: &Path,
        label: &str,
        progress: &ProgressDisplay,
    ) -> Result<u64> {
        debug!("Fetching {} into {:?}", redact(url), destination);
        let res = self.client.get(url).send().await?;
        if !res.status().is_success() {
            return Err(Error::HttpStatus {
                status: res.status(),
                url: redact(url).to_string(),
            });
        }

        let size = res.content_length().unwrap_or(0);
        let pb = progress.create_child_progress(size, label);

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await?;
        }
        let mut file = File::create(destination).await?;

        let mut written: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let mut chunk = item?;
            let chunk_size = chunk.len() as u64;
            written += chunk_size;
            pb.inc(chunk_size);
            file.write_all_buf(&mut chunk).await?;
        }
        file.flush().await?;

        progress.finish_child(pb);
        Ok(written)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        debug!("GET {}", url);
        let res = self
            .client
            .get(url)
            .header(AUTHORIZATION, self.token.as_str())
            .send()
            .await?;
        decode(url, res).await
    }
}

/// Decodes an API response body.
///
/// An `errors` envelope wins over the status code, since the API reports bad
/// keys that way.
async fn decode<T: DeserializeOwned>(url: &str, res: Response) -> Result<T> {
    let status = res.status();
    let body = res.bytes().await?;

    let value: Value = match serde_json::from_slice(&body) {
        Ok(value) => value,
        Err(_) if !status.is_success() => {
            return Err(Error::HttpStatus {
                status,
                url: redact(url).to_string(),
            })
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(errors) = value.get("errors") {
        return Err(Error::Api(api_errors(errors)));
    }
    if !status.is_success() {
        return Err(Error::HttpStatus {
            status,
            url: redact(url).to_string(),
        });
    }

    Ok(serde_json::from_value(value)?)
}

fn api_errors(errors: &Value) -> String {
    match errors {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
