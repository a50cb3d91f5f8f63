use chrono::{DateTime, Local, TimeZone};
use shared::{
    local::LocalMetadata,
    report::{SubmissionSuggestion, SuggestedAlbum, SuggestedTrack},
};

pub const NOT_FOUND_NOTE: &str = "This release was not found in the catalog during automated search";
pub const PROVENANCE_NOTE: &str = "Metadata sourced from physical media";

/// Assumed values for fields that cannot be read off the local metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionDefaults {
    pub status: String,
    pub packaging: String,
}

impl Default for SubmissionDefaults {
    fn default() -> Self {
        Self {
            status: "Official".to_string(),
            packaging: "Jewel Case".to_string(),
        }
    }
}

pub fn synthesize(local: &LocalMetadata, defaults: &SubmissionDefaults) -> SubmissionSuggestion {
    synthesize_at(local, defaults, Local::now())
}

/// Same as [`synthesize`] with an explicit generation time.
pub fn synthesize_at<Tz>(
    local: &LocalMetadata,
    defaults: &SubmissionDefaults,
    generated: DateTime<Tz>,
) -> SubmissionSuggestion
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let album = &local.album;
    let text = |field: &Option<String>| field.clone().unwrap_or_default();

    SubmissionSuggestion {
        kind: "new_release".to_string(),
        album: SuggestedAlbum {
            title: album.title.clone(),
            artist: album.artist.clone(),
            date: text(&album.date),
            label: text(&album.label),
            barcode: album.barcode().unwrap_or_default().to_string(),
            country: text(&album.country),
            status: defaults.status.clone(),
            packaging: defaults.packaging.clone(),
        },
        tracks: local
            .tracks
            .iter()
            .map(|track| SuggestedTrack {
                position: track.number,
                title: track.title.clone(),
                artist: track.artist_or(&album.artist).to_string(),
                length: text(&track.length),
            })
            .collect(),
        submission_notes: vec![
            NOT_FOUND_NOTE.to_string(),
            PROVENANCE_NOTE.to_string(),
            format!("Generated on {}", generated.format("%Y-%m-%d %H:%M:%S")),
        ],
    }
}
