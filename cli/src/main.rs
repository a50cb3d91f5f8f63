use discmatch::{
    metadata::load_metadata, musicbrainz::MusicBrainzClientBuilder, CompareFailure,
    DiscmatchError, Outcome, ReconcilerBuilder,
};
use std::{
    io::{self, Write},
    process::ExitCode,
};
use tracing_subscriber::EnvFilter;

mod config;
mod render;

use config::AppConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = AppConfig::from_args();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    match run(&config).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", describe(&e));
            exit_code(&e)
        }
    }
}

async fn run(config: &AppConfig) -> discmatch::Result<ExitCode> {
    // Invalid input stops the run before any request goes out.
    let local = load_metadata(&config.metadata_file)?;

    let client = MusicBrainzClientBuilder::new()
        .config(config.catalog.clone())
        .build()?;
    let reconciler = ReconcilerBuilder::new()
        .catalog(client)
        .defaults(config.submission.clone())
        .build()
        .map_err(|e| DiscmatchError::Config(e.to_string()))?;

    let stdout = io::stdout();

    if config.search_only {
        let results = reconciler.search(&local).await;
        render::search_summary(&mut stdout.lock(), reconciler.catalog().name(), &results)?;
        return Ok(ExitCode::SUCCESS);
    }

    let outcome = reconciler
        .run(&local, io::stdin().lock(), stdout.lock())
        .await?;

    let mut out = stdout.lock();
    render::outcome(&mut out, &outcome)?;

    match &outcome {
        Outcome::Suggested(suggestion) => {
            if let Some(path) = &config.output {
                let saved = render::save_suggestion(path, suggestion)?;
                writeln!(out, "\nSuggestion saved to: {}", saved.display())?;
            }
            render::submission_steps(&mut out)?;
            Ok(ExitCode::SUCCESS)
        }
        Outcome::CouldNotCompare {
            reason: CompareFailure::Unavailable(_),
            ..
        } => Ok(ExitCode::from(2)),
        _ => Ok(ExitCode::SUCCESS),
    }
}

fn describe(error: &DiscmatchError) -> String {
    match error {
        DiscmatchError::InvalidLocalMetadata(message) => {
            format!("Input was invalid and needs correcting: {message}")
        }
        DiscmatchError::CatalogUnavailable(message) => {
            format!("Could not reach the catalog service, try again later: {message}")
        }
        DiscmatchError::Interrupted => "Interrupted, nothing was written".to_string(),
        other => format!("Error: {other}"),
    }
}

fn exit_code(error: &DiscmatchError) -> ExitCode {
    match error {
        DiscmatchError::InvalidLocalMetadata(_) => ExitCode::from(1),
        DiscmatchError::CatalogUnavailable(_) => ExitCode::from(2),
        DiscmatchError::Interrupted => ExitCode::from(130),
        _ => ExitCode::FAILURE,
    }
}
