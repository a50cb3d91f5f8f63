use shared::{
    local::LocalMetadata,
    musicbrainz::RemoteRelease,
    report::{AlbumFieldDiff, DiffField, DiffReport, TrackDiff},
};
use tracing::info;

use crate::{
    error::Result,
    traits::{Catalog, Include},
};

/// Fetches `release_id` in full and diffs it against `local`.
/// `Ok(None)` when the catalog does not know the release.
pub async fn compare<C>(
    catalog: &C,
    release_id: &str,
    local: &LocalMetadata,
) -> Result<Option<DiffReport>>
where
    C: Catalog + ?Sized,
{
    let Some(release) = catalog.fetch_release(release_id, &Include::FULL).await? else {
        info!("Release {} returned no details", release_id);
        return Ok(None);
    };
    Ok(Some(diff_release(release_id, &release, local)))
}

/// Compares titles only; dates, labels and countries are too sparse on the catalog side
/// to compare without drowning the report in noise.
pub fn diff_release(release_id: &str, release: &RemoteRelease, local: &LocalMetadata) -> DiffReport {
    let mut report = DiffReport::new(release_id);

    if release.title != local.album.title {
        report.album_differences.push(AlbumFieldDiff {
            field: DiffField::Title,
            local: local.album.title.clone(),
            remote: release.title.clone(),
        });
    }

    // No media at all: nothing to compare tracks against.
    let Some(remote_tracks) = release.flattened_tracks() else {
        return report;
    };

    if remote_tracks.len() != local.tracks.len() {
        report.track_differences.push(TrackDiff {
            position: None,
            field: DiffField::TrackCount,
            local: local.tracks.len().to_string(),
            remote: remote_tracks.len().to_string(),
        });
    }

    // Only the overlapping range is compared.
    for (i, (local_track, remote_track)) in local.tracks.iter().zip(&remote_tracks).enumerate() {
        let remote_title = remote_track.recording_title();
        if local_track.title != remote_title {
            report.track_differences.push(TrackDiff {
                position: Some(i + 1),
                field: DiffField::Title,
                local: local_track.title.clone(),
                remote: remote_title.to_string(),
            });
        }
    }

    report
}
