use async_trait::async_trait;
use shared::musicbrainz::RemoteRelease;

use crate::error::Result;

/// Related data requested alongside a release lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Include {
    Recordings,
    Credits,
    Labels,
    DiscIds,
}

impl Include {
    /// Everything the comparator needs.
    pub const FULL: [Include; 4] = [
        Include::Recordings,
        Include::Credits,
        Include::Labels,
        Include::DiscIds,
    ];

    pub fn as_param(&self) -> &'static str {
        match self {
            Include::Recordings => "recordings",
            Include::Credits => "artist-credits",
            Include::Labels => "labels",
            Include::DiscIds => "discids",
        }
    }
}

/// Read access to a remote release catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    fn id(&self) -> &'static str;
    fn name(&self) -> &'static str;

    async fn search_by_barcode(&self, barcode: &str, limit: usize) -> Result<Vec<RemoteRelease>>;

    async fn search_by_text(
        &self,
        artist: &str,
        title: &str,
        limit: usize,
    ) -> Result<Vec<RemoteRelease>>;

    /// `Ok(None)` when the catalog does not know the id.
    async fn fetch_release(&self, id: &str, includes: &[Include])
        -> Result<Option<RemoteRelease>>;
}
