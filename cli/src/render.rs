use discmatch::{CompareFailure, Outcome, Result, SearchResultSet};
use shared::report::{DiffReport, SubmissionSuggestion};
use std::{
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

const SEARCH_ONLY_LIMIT: usize = 5;

pub fn search_summary(
    out: &mut impl Write,
    catalog: &str,
    results: &SearchResultSet,
) -> Result<()> {
    if results.all_sources_failed() {
        writeln!(out, "Warning: could not reach {catalog}, every search failed")?;
    }
    if results.is_empty() {
        writeln!(out, "No matches found")?;
        return Ok(());
    }
    writeln!(out, "Found {} potential matches", results.len())?;
    for release in results.releases().iter().take(SEARCH_ONLY_LIMIT) {
        writeln!(
            out,
            "- {} by {} ({})",
            release.title,
            release.primary_artist(),
            release.id
        )?;
    }
    Ok(())
}

pub fn outcome(out: &mut impl Write, outcome: &Outcome) -> Result<()> {
    match outcome {
        Outcome::Compared(report) => differences(out, report),
        Outcome::CouldNotCompare { release_id, reason } => {
            match reason {
                CompareFailure::NotFound => {
                    writeln!(out, "\nCould not compare: release {release_id} returned no details")?
                }
                CompareFailure::Unavailable(message) => writeln!(
                    out,
                    "\nCould not compare with {release_id}: the catalog could not be reached ({message})"
                )?,
            }
            Ok(())
        }
        Outcome::Suggested(suggestion) => suggestion_summary(out, suggestion),
    }
}

fn differences(out: &mut impl Write, report: &DiffReport) -> Result<()> {
    if report.is_empty() {
        writeln!(out, "\nLocal metadata matches the catalog release!")?;
        return Ok(());
    }

    writeln!(out, "\nFound differences between local metadata and the catalog:")?;
    for diff in &report.album_differences {
        writeln!(out, "  {}: '{}' vs '{}'", diff.field, diff.local, diff.remote)?;
    }
    for diff in &report.track_differences {
        match diff.position {
            Some(position) => writeln!(
                out,
                "  Track {} {}: '{}' vs '{}'",
                position, diff.field, diff.local, diff.remote
            )?,
            None => writeln!(out, "  {}: {} vs {}", diff.field, diff.local, diff.remote)?,
        }
    }
    Ok(())
}

fn suggestion_summary(out: &mut impl Write, suggestion: &SubmissionSuggestion) -> Result<()> {
    let album = &suggestion.album;
    writeln!(out, "\nNo matching release found. Submission suggestion:")?;
    writeln!(out, "Artist: {}", album.artist)?;
    writeln!(out, "Album: {}", album.title)?;
    writeln!(out, "Tracks: {}", suggestion.tracks.len())?;
    writeln!(out, "Date: {}", album.date)?;
    writeln!(out, "Label: {}", album.label)?;
    Ok(())
}

pub fn submission_steps(out: &mut impl Write) -> Result<()> {
    writeln!(out, "\nTo submit this release to MusicBrainz:")?;
    writeln!(out, "1. Visit https://musicbrainz.org/")?;
    writeln!(out, "2. Create an account if you don't have one")?;
    writeln!(out, "3. Use 'Add Release' and fill in the suggested information")?;
    writeln!(out, "4. Include the generated submission notes")?;
    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
        .unwrap_or(false)
}

/// Serializes the suggestion as YAML or pretty JSON depending on the extension.
pub fn save_suggestion(path: &Path, suggestion: &SubmissionSuggestion) -> Result<PathBuf> {
    let body = if is_yaml(path) {
        serde_yaml::to_string(suggestion)?
    } else {
        let mut json = serde_json::to_string_pretty(suggestion)?;
        json.push('\n');
        json
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, body)?;
    info!("Suggestion saved to {}", path.display());
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use discmatch::{
        aggregate::aggregate, metadata::parse_metadata, musicbrainz::MusicBrainzClientBuilder,
        SearchLimits,
    };
    use shared::report::{AlbumFieldDiff, DiffField, SuggestedAlbum, SuggestedTrack, TrackDiff};
    use std::time::Duration;

    fn suggestion() -> SubmissionSuggestion {
        SubmissionSuggestion {
            kind: "new_release".into(),
            album: SuggestedAlbum {
                title: "Moon Safari".into(),
                artist: "Air".into(),
                date: "1998".into(),
                label: String::new(),
                barcode: "731458189329".into(),
                country: String::new(),
                status: "Official".into(),
                packaging: "Jewel Case".into(),
            },
            tracks: vec![SuggestedTrack {
                position: 1,
                title: "La femme d'argent".into(),
                artist: "Air".into(),
                length: "7:11".into(),
            }],
            submission_notes: vec!["note".into()],
        }
    }

    fn render(outcome_value: &Outcome) -> String {
        let mut out = Vec::new();
        outcome(&mut out, outcome_value).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn differences_are_listed_per_kind() {
        let report = DiffReport {
            release_id: "X".into(),
            album_differences: vec![AlbumFieldDiff {
                field: DiffField::Title,
                local: "Moon Safari".into(),
                remote: "Moon Safari (Remastered)".into(),
            }],
            track_differences: vec![
                TrackDiff {
                    position: None,
                    field: DiffField::TrackCount,
                    local: "12".into(),
                    remote: "11".into(),
                },
                TrackDiff {
                    position: Some(3),
                    field: DiffField::Title,
                    local: "Kelly Watch the Stars".into(),
                    remote: "Kelly Watch The Stars".into(),
                },
            ],
        };
        let text = render(&Outcome::Compared(report));
        assert!(text.contains("title: 'Moon Safari' vs 'Moon Safari (Remastered)'"));
        assert!(text.contains("track_count: 12 vs 11"));
        assert!(text.contains("Track 3 title: 'Kelly Watch the Stars'"));
    }

    #[test]
    fn agreement_is_announced() {
        let text = render(&Outcome::Compared(DiffReport::new("X")));
        assert!(text.contains("matches the catalog release"));
    }

    #[test]
    fn unreachable_and_missing_are_worded_differently() {
        let missing = render(&Outcome::CouldNotCompare {
            release_id: "X".into(),
            reason: CompareFailure::NotFound,
        });
        let unreachable = render(&Outcome::CouldNotCompare {
            release_id: "X".into(),
            reason: CompareFailure::Unavailable("timed out".into()),
        });
        assert!(missing.contains("returned no details"));
        assert!(unreachable.contains("could not be reached"));
    }

    #[test]
    fn empty_search_says_so() {
        let mut out = Vec::new();
        search_summary(&mut out, "MusicBrainz", &SearchResultSet::default()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No matches found\n");
    }

    #[tokio::test]
    async fn unreachable_catalog_is_called_out_in_search_summary() {
        let client = MusicBrainzClientBuilder::new()
            .base_url("http://127.0.0.1:1/ws/2/")
            .timeout(Duration::from_secs(2))
            .build()
            .unwrap();
        let local = parse_metadata(
            "album:\n  title: Moon Safari\n  artist: Air\ntracks:\n  - number: 1\n    title: Sexy Boy\n",
        )
        .unwrap();
        let results = aggregate(&client, &local, &SearchLimits::default()).await;

        let mut out = Vec::new();
        search_summary(&mut out, "MusicBrainz", &results).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Warning: could not reach MusicBrainz, every search failed\nNo matches found\n"
        );
    }

    #[test]
    fn saves_json_by_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("suggestion.json");
        save_suggestion(&path, &suggestion()).unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["type"], "new_release");
        assert_eq!(value["album"]["packaging"], "Jewel Case");
        assert_eq!(value["tracks"][0]["position"], 1);
    }

    #[test]
    fn saves_yaml_for_yaml_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suggestion.yml");
        save_suggestion(&path, &suggestion()).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let parsed: SubmissionSuggestion = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, suggestion());
    }
}
