//! Command-line and environment configuration.
//!
//! Every setting is resolved once at startup into an [`AppConfig`] that is
//! passed down explicitly; nothing reads the environment after that.

use clap::Parser;
use discmatch::{
    musicbrainz::{CatalogConfig, DEFAULT_BASE_URL, DEFAULT_CONTACT, REQUEST_TIMEOUT_SECS},
    SubmissionDefaults,
};
use std::{path::PathBuf, time::Duration};

/// Reconcile ripped CD metadata against MusicBrainz.
#[derive(Debug, Parser)]
#[command(name = "discmatch", version, about)]
pub struct Args {
    /// YAML metadata file describing the album and its tracks
    pub metadata_file: PathBuf,

    /// Contact address sent in the user agent
    #[arg(long, alias = "contact", env = "DISCMATCH_CONTACT", default_value = DEFAULT_CONTACT)]
    pub email: String,

    /// MusicBrainz web service root
    #[arg(long, env = "MUSICBRAINZ_URL", default_value = DEFAULT_BASE_URL)]
    pub musicbrainz_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "DISCMATCH_TIMEOUT_SECS", default_value_t = REQUEST_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Only search, don't prompt for choices
    #[arg(long)]
    pub search_only: bool,

    /// Where to save a submission suggestion (.json, .yaml or .yml)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Release status assumed for a new submission
    #[arg(long, default_value = "Official")]
    pub status: String,

    /// Packaging assumed for a new submission
    #[arg(long, default_value = "Jewel Case")]
    pub packaging: String,

    /// Log progress at info level unless RUST_LOG says otherwise
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub metadata_file: PathBuf,
    pub catalog: CatalogConfig,
    pub submission: SubmissionDefaults,
    pub search_only: bool,
    pub output: Option<PathBuf>,
    pub verbose: bool,
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            metadata_file: args.metadata_file,
            catalog: CatalogConfig {
                base_url: args.musicbrainz_url,
                contact: args.email,
                timeout: Duration::from_secs(args.timeout_secs),
                ..Default::default()
            },
            submission: SubmissionDefaults {
                status: args.status,
                packaging: args.packaging,
            },
            search_only: args.search_only,
            output: args.output,
            verbose: args.verbose,
        }
    }
}

impl AppConfig {
    pub fn from_args() -> Self {
        Args::parse().into()
    }

    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "info"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_assumptions() {
        let args = Args::try_parse_from(["discmatch", "album.yaml"]).unwrap();
        let config = AppConfig::from(args);

        assert_eq!(config.metadata_file, PathBuf::from("album.yaml"));
        assert_eq!(config.submission, SubmissionDefaults::default());
        assert_eq!(config.catalog.timeout, Duration::from_secs(15));
        assert!(!config.search_only);
        assert_eq!(config.log_filter(), "warn");
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "discmatch",
            "album.yaml",
            "--contact",
            "me@example.org",
            "--search-only",
            "--output",
            "out.yaml",
            "--packaging",
            "Digipak",
            "--timeout-secs",
            "3",
            "-v",
        ])
        .unwrap();
        let config = AppConfig::from(args);

        assert_eq!(config.catalog.contact, "me@example.org");
        assert!(config.search_only);
        assert_eq!(config.output, Some(PathBuf::from("out.yaml")));
        assert_eq!(config.submission.packaging, "Digipak");
        assert_eq!(config.catalog.timeout, Duration::from_secs(3));
        assert_eq!(config.log_filter(), "info");
    }

    #[test]
    fn metadata_file_is_required() {
        assert!(Args::try_parse_from(["discmatch"]).is_err());
    }
}
