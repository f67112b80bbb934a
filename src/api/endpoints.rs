//! URL construction for the storefront API and publisher pages.

/// Base URL of the public storefront API.
pub const DEFAULT_API_BASE: &str = "https://api.itch.io";

/// The canonical page of a game, as reported in its `url` field.
pub fn canonical_link(publisher: &str, title: &str) -> String {
    format!("https://{publisher}.itch.io/{title}")
}

/// Where requests are sent.
///
/// Publisher pages normally live on their own subdomain
/// (`https://{publisher}.itch.io`). Setting a site root replaces that with
/// `{site_root}/{publisher}`, which lets a single local server stand in for
/// every publisher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    api_base: String,
    site_root: Option<String>,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl Endpoints {
    /// Creates endpoints rooted at `api_base`.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: trim(api_base.into()),
            site_root: None,
        }
    }

    /// Serve publisher pages from `site_root` instead of publisher subdomains.
    pub fn with_site_root(mut self, site_root: impl Into<String>) -> Self {
        self.site_root = Some(trim(site_root.into()));
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// `GET /profile/owned-keys?page=N`
    pub fn owned_keys(&self, page: u32) -> String {
        format!("{}/profile/owned-keys?page={page}", self.api_base)
    }

    /// `GET /games/{id}`
    pub fn game(&self, game_id: u64) -> String {
        format!("{}/games/{game_id}", self.api_base)
    }

    /// `GET /games/{id}/uploads`, scoped by ownership key when one is known.
    pub fn uploads(&self, game_id: u64, download_key_id: Option<u64>) -> String {
        let base = format!("{}/games/{game_id}/uploads", self.api_base);
        match download_key_id {
            Some(key) => format!("{base}?download_key_id={key}"),
            None => base,
        }
    }

    /// `POST /games/{id}/download-sessions`
    pub fn download_session(&self, game_id: u64) -> String {
        format!("{}/games/{game_id}/download-sessions", self.api_base)
    }

    /// Signed `GET /uploads/{id}/download` URL.
    ///
    /// The query carries the API key itself, so the result must never be logged.
    pub fn upload_download(
        &self,
        upload_id: u64,
        api_key: &str,
        download_key_id: Option<u64>,
        uuid: &str,
    ) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        query.append_pair("api_key", api_key);
        if let Some(key) = download_key_id {
            query.append_pair("download_key_id", &key.to_string());
        }
        query.append_pair("uuid", uuid);
        format!(
            "{}/uploads/{upload_id}/download?{}",
            self.api_base,
            query.finish()
        )
    }

    /// The publisher's storefront page.
    pub fn storefront(&self, publisher: &str) -> String {
        match &self.site_root {
            Some(root) => format!("{root}/{publisher}"),
            None => format!("https://{publisher}.itch.io"),
        }
    }

    /// The public `data.json` document of a game page.
    pub fn game_data(&self, publisher: &str, title: &str) -> String {
        format!("{}/{title}/data.json", self.storefront(publisher))
    }
}

fn trim(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Strips the query string so signed URLs can appear in logs and errors.
pub(crate) fn redact(url: &str) -> &str {
    url.split('?').next().unwrap_or(url)
}
