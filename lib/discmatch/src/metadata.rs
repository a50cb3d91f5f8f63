use regex::Regex;
use shared::local::LocalMetadata;
use std::{path::Path, sync::OnceLock};
use tracing::info;

use crate::error::{DiscmatchError, Result};

fn date_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{4}(-\d{2}(-\d{2})?)?$").expect("valid date regex"))
}

fn barcode_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\d{12,14}$").expect("valid barcode regex"))
}

fn invalid(message: impl Into<String>) -> DiscmatchError {
    DiscmatchError::InvalidLocalMetadata(message.into())
}

/// Reads and validates a YAML metadata document.
pub fn load_metadata(path: &Path) -> Result<LocalMetadata> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| invalid(format!("cannot read {}: {}", path.display(), e)))?;
    let metadata = parse_metadata(&text)?;
    info!(
        "Parsed metadata: {} - {} ({} tracks)",
        metadata.album.artist,
        metadata.album.title,
        metadata.tracks.len()
    );
    Ok(metadata)
}

pub fn parse_metadata(text: &str) -> Result<LocalMetadata> {
    let metadata: LocalMetadata =
        serde_yaml::from_str(text).map_err(|e| invalid(format!("failed to parse YAML: {e}")))?;
    normalize(metadata)
}

/// Trims optional fields to `None` when blank, validates, and orders tracks by number.
pub fn normalize(mut metadata: LocalMetadata) -> Result<LocalMetadata> {
    let album = &mut metadata.album;
    for field in [
        &mut album.barcode,
        &mut album.date,
        &mut album.label,
        &mut album.country,
    ] {
        blank_to_none(field);
    }
    for track in &mut metadata.tracks {
        blank_to_none(&mut track.artist);
        blank_to_none(&mut track.length);
    }

    validate(&metadata)?;
    metadata.tracks.sort_by_key(|track| track.number);
    Ok(metadata)
}

fn blank_to_none(field: &mut Option<String>) {
    *field = field
        .take()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
}

fn validate(metadata: &LocalMetadata) -> Result<()> {
    let album = &metadata.album;
    if album.title.trim().is_empty() {
        return Err(invalid("album title is required"));
    }
    if album.artist.trim().is_empty() {
        return Err(invalid("album artist is required"));
    }
    if metadata.tracks.is_empty() {
        return Err(invalid("at least one track is required"));
    }

    for (i, track) in metadata.tracks.iter().enumerate() {
        if track.number == 0 {
            return Err(invalid(format!(
                "track {}: invalid track number {}",
                i + 1,
                track.number
            )));
        }
        if track.title.trim().is_empty() {
            return Err(invalid(format!("track {}: track title is required", track.number)));
        }
    }

    if let Some(date) = &album.date {
        if !date_pattern().is_match(date) {
            return Err(invalid(format!(
                "invalid date format: {date} (use YYYY, YYYY-MM, or YYYY-MM-DD)"
            )));
        }
    }
    if let Some(barcode) = &album.barcode {
        if !barcode_pattern().is_match(barcode) {
            return Err(invalid(format!(
                "invalid barcode format: {barcode} (must be 12-14 digits)"
            )));
        }
    }

    Ok(())
}
