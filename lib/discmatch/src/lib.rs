pub mod aggregate;
pub mod compare;
pub mod disambiguate;
pub mod error;
pub mod metadata;
pub mod musicbrainz;
pub mod reconcile;
pub mod submission;
pub mod traits;

pub use aggregate::{SearchLimits, SearchResultSet};
pub use disambiguate::Resolution;
pub use error::{DiscmatchError, Result};
pub use reconcile::{CompareFailure, Outcome, Reconciler, ReconcilerBuilder};
pub use submission::SubmissionDefaults;
pub use traits::{Catalog, Include};
