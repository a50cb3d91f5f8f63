use async_trait::async_trait;
use discmatch::{
    metadata::parse_metadata, Catalog, CompareFailure, DiscmatchError, Include, Outcome,
    ReconcilerBuilder, Result,
};
use shared::{
    musicbrainz::{ArtistCredit, Medium, Recording, ReleaseTrack, RemoteRelease},
    report::DiffField,
};
use std::io::Cursor;

const METADATA: &str = r#"
album:
  title: Moon Safari
  artist: Air
  barcode: 731458189329
  date: 1998
tracks:
  - number: 1
    title: La femme d'argent
  - number: 2
    title: Sexy Boy
  - number: 3
    title: All I Need
"#;

#[derive(Default)]
struct ScriptedCatalog {
    barcode_hits: Vec<RemoteRelease>,
    text_hits: Vec<RemoteRelease>,
    detail: Option<RemoteRelease>,
    offline: bool,
}

impl ScriptedCatalog {
    fn check(&self) -> Result<()> {
        if self.offline {
            return Err(DiscmatchError::CatalogUnavailable("offline".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl Catalog for ScriptedCatalog {
    fn id(&self) -> &'static str {
        "scripted"
    }

    fn name(&self) -> &'static str {
        "Scripted"
    }

    async fn search_by_barcode(&self, _barcode: &str, limit: usize) -> Result<Vec<RemoteRelease>> {
        self.check()?;
        Ok(self.barcode_hits.iter().take(limit).cloned().collect())
    }

    async fn search_by_text(
        &self,
        _artist: &str,
        _title: &str,
        limit: usize,
    ) -> Result<Vec<RemoteRelease>> {
        self.check()?;
        Ok(self.text_hits.iter().take(limit).cloned().collect())
    }

    async fn fetch_release(
        &self,
        id: &str,
        _includes: &[Include],
    ) -> Result<Option<RemoteRelease>> {
        self.check()?;
        Ok(self.detail.clone().filter(|release| release.id == id))
    }
}

fn release(id: &str, title: &str) -> RemoteRelease {
    RemoteRelease {
        id: id.into(),
        title: title.into(),
        artist_credit: Some(vec![ArtistCredit {
            name: Some("Air".into()),
        }]),
        ..Default::default()
    }
}

fn remastered() -> RemoteRelease {
    let tracks = ["La femme d'argent", "Sexy Boy"]
        .iter()
        .map(|title| ReleaseTrack {
            recording: Some(Recording {
                title: Some(title.to_string()),
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect();
    RemoteRelease {
        media: Some(vec![Medium {
            tracks: Some(tracks),
            ..Default::default()
        }]),
        ..release("mbid-remaster", "Moon Safari (Remastered)")
    }
}

async fn run(catalog: ScriptedCatalog, script: &str) -> (Result<Outcome>, String) {
    let reconciler = ReconcilerBuilder::new().catalog(catalog).build().unwrap();
    let local = parse_metadata(METADATA).unwrap();
    let mut output = Vec::new();
    let outcome = reconciler
        .run(&local, Cursor::new(script.to_string()), &mut output)
        .await;
    (outcome, String::from_utf8(output).unwrap())
}

#[tokio::test]
async fn selected_release_is_compared() {
    let catalog = ScriptedCatalog {
        barcode_hits: vec![release("mbid-remaster", "Moon Safari (Remastered)")],
        text_hits: vec![
            release("mbid-original", "Moon Safari"),
            release("mbid-remaster", "Moon Safari (Remastered)"),
        ],
        detail: Some(remastered()),
        ..Default::default()
    };

    let (outcome, output) = run(catalog, "d\n1\n").await;

    let Outcome::Compared(report) = outcome.unwrap() else {
        panic!("expected a comparison");
    };
    assert_eq!(report.release_id, "mbid-remaster");
    assert_eq!(report.album_differences.len(), 1);
    assert_eq!(report.album_differences[0].remote, "Moon Safari (Remastered)");
    assert_eq!(report.track_differences.len(), 1);
    assert_eq!(report.track_differences[0].field, DiffField::TrackCount);
    assert!(output.contains(" 1. Moon Safari (Remastered) by Air"));
    assert!(output.contains(" 2. Moon Safari by Air"));
    assert!(!output.contains(" 3. "));
    assert!(output.contains("Selected release: mbid-remaster"));
}

#[tokio::test]
async fn declining_drafts_a_submission() {
    let catalog = ScriptedCatalog {
        text_hits: vec![release("mbid-other", "Premiers Symptômes")],
        ..Default::default()
    };

    let (outcome, _) = run(catalog, "n\n").await;

    let Outcome::Suggested(suggestion) = outcome.unwrap() else {
        panic!("expected a suggestion");
    };
    assert_eq!(suggestion.album.barcode, "731458189329");
    assert_eq!(suggestion.album.date, "1998");
    assert_eq!(suggestion.tracks.len(), 3);
}

#[tokio::test]
async fn no_candidates_skip_the_prompt() {
    let (outcome, output) = run(ScriptedCatalog::default(), "").await;

    let Outcome::Suggested(suggestion) = outcome.unwrap() else {
        panic!("expected a suggestion");
    };
    assert_eq!(suggestion.album.status, "Official");
    assert_eq!(suggestion.album.packaging, "Jewel Case");
    assert_eq!(suggestion.submission_notes.len(), 3);
    assert!(!output.contains("Enter the number"));
}

#[tokio::test]
async fn unreachable_catalog_degrades_to_a_submission() {
    let catalog = ScriptedCatalog {
        offline: true,
        ..Default::default()
    };

    let (outcome, output) = run(catalog, "").await;

    let Outcome::Suggested(suggestion) = outcome.unwrap() else {
        panic!("expected a suggestion");
    };
    assert_eq!(suggestion.kind, "new_release");
    assert_eq!(suggestion.tracks.len(), 3);
    assert!(output.contains("Warning: could not reach Scripted"));
    assert!(output.contains("No matches found in Scripted"));
    assert!(!output.contains("Enter the number"));
}

#[tokio::test]
async fn vanished_release_cannot_be_compared() {
    let catalog = ScriptedCatalog {
        text_hits: vec![release("mbid-gone", "Moon Safari")],
        ..Default::default()
    };

    let (outcome, _) = run(catalog, "1\n").await;

    assert_eq!(
        outcome.unwrap(),
        Outcome::CouldNotCompare {
            release_id: "mbid-gone".into(),
            reason: CompareFailure::NotFound,
        }
    );
}
