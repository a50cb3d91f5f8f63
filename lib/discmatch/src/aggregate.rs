use itertools::Itertools;
use shared::{local::LocalMetadata, musicbrainz::RemoteRelease};
use tracing::{info, warn};

use crate::traits::Catalog;

/// Result caps for each search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchLimits {
    pub barcode: usize,
    pub text: usize,
}

impl Default for SearchLimits {
    fn default() -> Self {
        Self {
            barcode: 5,
            text: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
    Barcode,
    Text,
}

/// Deduplicated candidates, barcode matches first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResultSet {
    releases: Vec<RemoteRelease>,
    barcode_matches: usize,
    attempted: Vec<SearchSource>,
    failed: Vec<SearchSource>,
}

impl SearchResultSet {
    /// Merges barcode and text hits. Later duplicates of an id are dropped, so relative
    /// order within each source is kept and barcode hits stay in front.
    pub fn merge(barcode_hits: Vec<RemoteRelease>, text_hits: Vec<RemoteRelease>) -> Self {
        let barcode: Vec<RemoteRelease> = barcode_hits
            .into_iter()
            .unique_by(|release| release.id.clone())
            .collect();
        let barcode_matches = barcode.len();
        let releases = barcode
            .into_iter()
            .chain(text_hits)
            .unique_by(|release| release.id.clone())
            .collect();

        Self {
            releases,
            barcode_matches,
            attempted: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn releases(&self) -> &[RemoteRelease] {
        &self.releases
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn barcode_matches(&self) -> usize {
        self.barcode_matches
    }

    pub fn failed_sources(&self) -> &[SearchSource] {
        &self.failed
    }

    /// True when searches were issued and every one of them failed.
    pub fn all_sources_failed(&self) -> bool {
        !self.attempted.is_empty() && self.failed.len() == self.attempted.len()
    }
}

/// Runs the barcode search (when a barcode is known) and then the text search,
/// treating a failed search as one that found nothing.
pub async fn aggregate<C>(
    catalog: &C,
    local: &LocalMetadata,
    limits: &SearchLimits,
) -> SearchResultSet
where
    C: Catalog + ?Sized,
{
    let album = &local.album;
    let mut attempted = Vec::new();
    let mut failed = Vec::new();

    let mut barcode_hits = Vec::new();
    if let Some(barcode) = album.barcode() {
        info!("Searching {} by barcode: {}", catalog.name(), barcode);
        attempted.push(SearchSource::Barcode);
        match catalog.search_by_barcode(barcode, limits.barcode).await {
            Ok(hits) => {
                info!("Found {} releases by barcode", hits.len());
                barcode_hits = hits;
            }
            Err(e) => {
                warn!(
                    catalog = catalog.id(),
                    "Barcode search failed, continuing without it: {}",
                    e
                );
                failed.push(SearchSource::Barcode);
            }
        }
    }

    info!(
        "Searching {} by artist/album: {} - {}",
        catalog.name(),
        album.artist,
        album.title
    );
    attempted.push(SearchSource::Text);
    let text_hits = match catalog
        .search_by_text(&album.artist, &album.title, limits.text)
        .await
    {
        Ok(hits) => hits,
        Err(e) => {
            warn!(
                catalog = catalog.id(),
                "Artist/album search failed, continuing without it: {}",
                e
            );
            failed.push(SearchSource::Text);
            Vec::new()
        }
    };

    let mut results = SearchResultSet::merge(barcode_hits, text_hits);
    info!(
        "{} candidates ({} by barcode, {} additional by search)",
        results.len(),
        results.barcode_matches,
        results.len() - results.barcode_matches
    );
    results.attempted = attempted;
    results.failed = failed;
    results
}
