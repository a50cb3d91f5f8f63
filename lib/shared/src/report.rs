use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffField {
    Title,
    TrackCount,
}

impl DiffField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffField::Title => "title",
            DiffField::TrackCount => "track_count",
        }
    }
}

impl std::fmt::Display for DiffField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlbumFieldDiff {
    pub field: DiffField,
    pub local: String,
    pub remote: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackDiff {
    /// 1-based position; `None` for issues concerning the whole track list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    pub field: DiffField,
    pub local: String,
    pub remote: String,
}

/// Differences between a catalog release and the local metadata. Empty means full agreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    pub release_id: String,
    pub album_differences: Vec<AlbumFieldDiff>,
    pub track_differences: Vec<TrackDiff>,
}

impl DiffReport {
    pub fn new(release_id: impl Into<String>) -> Self {
        Self {
            release_id: release_id.into(),
            album_differences: Vec::new(),
            track_differences: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.album_differences.is_empty() && self.track_differences.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedAlbum {
    pub title: String,
    pub artist: String,
    pub date: String,
    pub label: String,
    pub barcode: String,
    pub country: String,
    pub status: String,
    pub packaging: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedTrack {
    pub position: u32,
    pub title: String,
    pub artist: String,
    pub length: String,
}

/// A proposed new catalog entry built from local metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionSuggestion {
    #[serde(rename = "type")]
    pub kind: String,
    pub album: SuggestedAlbum,
    pub tracks: Vec<SuggestedTrack>,
    pub submission_notes: Vec<String>,
}
