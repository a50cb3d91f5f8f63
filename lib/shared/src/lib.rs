pub mod local;
pub mod musicbrainz;
pub mod report;
