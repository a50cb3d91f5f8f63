use serde::{Deserialize, Serialize};

/// A release as returned by the catalog. Everything except the id may be missing,
/// so all access to nested data goes through the accessors below.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RemoteRelease {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "artist-credit", default, skip_serializing_if = "Option::is_none")]
    pub artist_credit: Option<Vec<ArtistCredit>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(
        rename = "label-info",
        alias = "label-info-list",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub label_info: Option<Vec<LabelInfo>>,
    #[serde(alias = "medium-list", default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Vec<Medium>>,
    /// Relevance score attached to search hits.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArtistCredit {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelInfo {
    #[serde(default)]
    pub label: Option<Label>,
    #[serde(rename = "catalog-number", default, skip_serializing_if = "Option::is_none")]
    pub catalog_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Medium {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(alias = "track-list", default, skip_serializing_if = "Option::is_none")]
    pub tracks: Option<Vec<ReleaseTrack>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReleaseTrack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording: Option<Recording>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recording {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,
}

impl RemoteRelease {
    /// Name of the first credited artist.
    pub fn primary_artist(&self) -> &str {
        self.artist_credit
            .as_ref()
            .and_then(|credits| credits.first())
            .and_then(|credit| credit.name.as_deref())
            .unwrap_or("Unknown")
    }

    pub fn label_names(&self) -> Vec<&str> {
        self.label_info
            .iter()
            .flatten()
            .filter_map(|info| info.label.as_ref()?.name.as_deref())
            .collect()
    }

    /// Every medium's tracks in order, or `None` when the release carries no media at all.
    /// A medium without a track list contributes nothing.
    pub fn flattened_tracks(&self) -> Option<Vec<&ReleaseTrack>> {
        self.media.as_ref().map(|media| {
            media
                .iter()
                .flat_map(|medium| medium.tracks.iter().flatten())
                .collect()
        })
    }
}

impl ReleaseTrack {
    /// The recording title, then the track's own title, then empty.
    pub fn recording_title(&self) -> &str {
        self.recording
            .as_ref()
            .and_then(|recording| recording.title.as_deref())
            .or(self.title.as_deref())
            .unwrap_or_default()
    }

    pub fn length_ms(&self) -> Option<u32> {
        self.length
            .or_else(|| self.recording.as_ref().and_then(|r| r.length))
    }
}

/// Formats a duration from milliseconds to a MM:SS string.
pub fn format_duration(duration_ms: Option<u32>) -> Option<String> {
    duration_ms.map(|ms| {
        let total_seconds = ms / 1000;
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        format!("{minutes:02}:{seconds:02}")
    })
}
