use async_trait::async_trait;
use itertools::Itertools;
use reqwest::{Client, Response, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use shared::musicbrainz::RemoteRelease;
use std::{future::Future, time::Duration};
use tracing::{debug, info};
use url::Url;

use crate::{
    error::{DiscmatchError, Result},
    traits::{Catalog, Include},
};

pub const DEFAULT_BASE_URL: &str = "https://musicbrainz.org/ws/2/";
pub const DEFAULT_CONTACT: &str = "contact@example.com";

/// Timeout for individual MusicBrainz requests (15 seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

/// Connection settings handed to the client at construction.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    pub app_name: String,
    pub app_version: String,
    pub contact: String,
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            app_name: "discmatch".to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            contact: DEFAULT_CONTACT.to_string(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
        }
    }
}

impl CatalogConfig {
    pub fn user_agent(&self) -> String {
        format!("{}/{} ( {} )", self.app_name, self.app_version, self.contact)
    }
}

#[derive(Debug, Clone)]
pub struct MusicBrainzClient {
    base_url: Url,
    timeout: Duration,
    client: Client,
}

#[derive(Default)]
pub struct MusicBrainzClientBuilder {
    config: CatalogConfig,
}

impl MusicBrainzClientBuilder {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn config(mut self, config: CatalogConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = url.to_string();
        self
    }

    pub fn contact(mut self, contact: &str) -> Self {
        self.config.contact = contact.to_string();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<MusicBrainzClient> {
        // Url::join drops the last path segment unless it ends with a slash.
        let base = format!("{}/", self.config.base_url.trim_end_matches('/'));
        let base_url = Url::parse(&base)?;
        let user_agent = self.config.user_agent();
        info!("Using MusicBrainz at {} as {}", base_url, user_agent);

        let client = Client::builder().user_agent(user_agent).build()?;

        Ok(MusicBrainzClient {
            base_url,
            timeout: self.config.timeout,
            client,
        })
    }
}

#[derive(Deserialize)]
struct ReleaseSearchResponse {
    #[serde(default)]
    releases: Vec<RemoteRelease>,
}

/// Escapes a value for use inside a quoted Lucene phrase.
fn quote_phrase(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

pub(crate) fn barcode_query(barcode: &str) -> String {
    format!("barcode:{}", barcode.trim())
}

pub(crate) fn text_query(artist: &str, title: &str) -> String {
    format!(
        "artist:{} AND release:{}",
        quote_phrase(artist),
        quote_phrase(title)
    )
}

pub(crate) fn include_param(includes: &[Include]) -> String {
    includes.iter().unique().map(Include::as_param).join("+")
}

impl MusicBrainzClient {
    async fn with_timeout<T, Fut>(&self, operation_name: &str, operation: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.timeout, operation).await {
            Ok(result) => result,
            Err(_elapsed) => Err(DiscmatchError::CatalogUnavailable(format!(
                "{} timed out after {:?}",
                operation_name, self.timeout
            ))),
        }
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                DiscmatchError::Config(format!("{} cannot be a base URL", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, segments: &[&str], params: &[(&str, String)]) -> Result<Response> {
        let mut url = self.endpoint(segments)?;
        url.query_pairs_mut()
            .extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())))
            .append_pair("fmt", "json");
        debug!("Request: GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            let text = response.text().await?;
            serde_json::from_str(&text).map_err(|e| {
                DiscmatchError::CatalogUnavailable(format!("JSON parse error: {e}"))
            })
        } else {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_string());
            Err(DiscmatchError::CatalogUnavailable(format!(
                "HTTP {}: {}",
                status.as_u16(),
                text
            )))
        }
    }

    async fn search_releases(&self, query: String, limit: usize) -> Result<Vec<RemoteRelease>> {
        info!("Searching releases: {}", query);
        let response = self
            .get(&["release"], &[("query", query), ("limit", limit.to_string())])
            .await?;
        let body: ReleaseSearchResponse = Self::decode(response).await?;
        Ok(body.releases)
    }
}

#[async_trait]
impl Catalog for MusicBrainzClient {
    fn id(&self) -> &'static str {
        "musicbrainz"
    }

    fn name(&self) -> &'static str {
        "MusicBrainz"
    }

    async fn search_by_barcode(&self, barcode: &str, limit: usize) -> Result<Vec<RemoteRelease>> {
        self.with_timeout(
            "MusicBrainz barcode search",
            self.search_releases(barcode_query(barcode), limit),
        )
        .await
    }

    async fn search_by_text(
        &self,
        artist: &str,
        title: &str,
        limit: usize,
    ) -> Result<Vec<RemoteRelease>> {
        self.with_timeout(
            "MusicBrainz text search",
            self.search_releases(text_query(artist, title), limit),
        )
        .await
    }

    async fn fetch_release(
        &self,
        id: &str,
        includes: &[Include],
    ) -> Result<Option<RemoteRelease>> {
        self.with_timeout("MusicBrainz release fetch", async {
            let mut params = Vec::new();
            if !includes.is_empty() {
                params.push(("inc", include_param(includes)));
            }
            let response = self.get(&["release", id], &params).await?;
            if response.status() == StatusCode::NOT_FOUND {
                info!("Release {} not found", id);
                return Ok(None);
            }
            Self::decode(response).await.map(Some)
        })
        .await
    }
}
