//! Interactive selection of the catalog release that matches the local metadata.
//!
//! The operator sees at most [`DISPLAY_WINDOW`] candidates and answers with a
//! 1-based index, `n` for none, or `d` to expand the first [`DETAIL_WINDOW`]
//! candidates with their full catalog records. Anything else is re-prompted
//! until a decision is made or the input stream ends.

use shared::musicbrainz::{format_duration, RemoteRelease};
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::{
    aggregate::SearchResultSet,
    error::{DiscmatchError, Result},
    traits::{Catalog, Include},
};

pub const DISPLAY_WINDOW: usize = 10;
pub const DETAIL_WINDOW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The operator picked this release id.
    Selected(String),
    /// The operator said none of the candidates match.
    Declined,
    /// There was nothing to choose from.
    NoCandidates,
}

impl Resolution {
    pub fn release_id(&self) -> Option<&str> {
        match self {
            Resolution::Selected(id) => Some(id.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    /// Zero-based index into the displayed window.
    Select(usize),
    Details,
    Decline,
}

/// Parses one line of operator input against a window of `window` candidates.
pub fn parse_choice(input: &str, window: usize) -> Result<Choice> {
    let answer = input.trim().to_lowercase();
    match answer.as_str() {
        "n" | "none" => Ok(Choice::Decline),
        "d" | "details" => Ok(Choice::Details),
        _ => {
            let index: usize = answer.parse().map_err(|_| {
                DiscmatchError::AmbiguousInput(format!("'{}' is not a choice", input.trim()))
            })?;
            if (1..=window).contains(&index) {
                Ok(Choice::Select(index - 1))
            } else {
                Err(DiscmatchError::AmbiguousInput(format!(
                    "{index} is outside 1-{window}"
                )))
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Idle,
    Listing,
    AwaitingChoice,
    Resolved(String),
    Declined,
}

/// Drives the selection loop over an injected input and output.
pub struct Disambiguator<'a, C: ?Sized, R, W> {
    catalog: &'a C,
    input: R,
    output: W,
}

impl<'a, C, R, W> Disambiguator<'a, C, R, W>
where
    C: Catalog + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(catalog: &'a C, input: R, output: W) -> Self {
        Self {
            catalog,
            input,
            output,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn resolve(&mut self, results: &SearchResultSet) -> Result<Resolution> {
        if results.is_empty() {
            writeln!(self.output, "No matches found in {}", self.catalog.name())?;
            writeln!(self.output, "This appears to be a new release that could be added")?;
            return Ok(Resolution::NoCandidates);
        }

        let candidates = results.releases();
        let window = candidates.len().min(DISPLAY_WINDOW);
        let mut state = State::Idle;

        loop {
            state = match state {
                State::Idle => State::Listing,
                State::Listing => {
                    self.list(candidates, window)?;
                    State::AwaitingChoice
                }
                State::AwaitingChoice => {
                    let Some(line) = self.prompt(window)? else {
                        return Err(DiscmatchError::Interrupted);
                    };
                    match parse_choice(&line, window) {
                        Ok(Choice::Decline) => State::Declined,
                        Ok(Choice::Select(index)) => State::Resolved(candidates[index].id.clone()),
                        Ok(Choice::Details) => {
                            self.show_details(candidates).await?;
                            State::AwaitingChoice
                        }
                        Err(e) => {
                            writeln!(self.output, "Invalid choice ({e}). Please try again.")?;
                            State::AwaitingChoice
                        }
                    }
                }
                State::Resolved(id) => {
                    info!("Operator selected release {}", id);
                    return Ok(Resolution::Selected(id));
                }
                State::Declined => {
                    info!("Operator declined all candidates");
                    return Ok(Resolution::Declined);
                }
            };
        }
    }

    fn list(&mut self, candidates: &[RemoteRelease], window: usize) -> Result<()> {
        writeln!(self.output)?;
        writeln!(self.output, "Found {} potential matches:", candidates.len())?;
        writeln!(self.output, "{}", "-".repeat(80))?;

        for (i, release) in candidates.iter().take(window).enumerate() {
            writeln!(
                self.output,
                "{:2}. {} by {}",
                i + 1,
                release.title,
                release.primary_artist()
            )?;
            writeln!(self.output, "    ID: {}", release.id)?;
            if let Some(date) = &release.date {
                writeln!(self.output, "    Date: {date}")?;
            }
            let labels = release.label_names();
            if !labels.is_empty() {
                writeln!(self.output, "    Label(s): {}", labels.join(", "))?;
            }
            if let Some(barcode) = &release.barcode {
                writeln!(self.output, "    Barcode: {barcode}")?;
            }
            if let Some(score) = release.score {
                writeln!(self.output, "    Score: {score}")?;
            }
            writeln!(self.output)?;
        }
        Ok(())
    }

    /// `None` once the input is exhausted.
    fn prompt(&mut self, window: usize) -> Result<Option<String>> {
        write!(
            self.output,
            "Enter the number of matching release (1-{window}), 'n' for none, or 'd' for details: "
        )?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    async fn show_details(&mut self, candidates: &[RemoteRelease]) -> Result<()> {
        for (i, candidate) in candidates.iter().take(DETAIL_WINDOW).enumerate() {
            writeln!(self.output)?;
            writeln!(self.output, "=== Release {}: {} ===", i + 1, candidate.title)?;
            match self.catalog.fetch_release(&candidate.id, &Include::FULL).await {
                Ok(Some(details)) => self.write_details(&details)?,
                Ok(None) => writeln!(self.output, "No details available")?,
                Err(e) => {
                    warn!("Could not fetch details for {}: {}", candidate.id, e);
                    writeln!(self.output, "Could not fetch details: {e}")?;
                }
            }
        }
        writeln!(self.output)?;
        Ok(())
    }

    fn write_details(&mut self, details: &RemoteRelease) -> Result<()> {
        let unknown = || "Unknown".to_string();
        writeln!(self.output, "Artist: {}", details.primary_artist())?;
        writeln!(self.output, "Date: {}", details.date.clone().unwrap_or_else(unknown))?;
        writeln!(self.output, "Country: {}", details.country.clone().unwrap_or_else(unknown))?;
        writeln!(self.output, "Status: {}", details.status.clone().unwrap_or_else(unknown))?;
        if let Some(tracks) = details.flattened_tracks() {
            let total_ms: Option<u32> = tracks.iter().map(|t| t.length_ms()).sum();
            match format_duration(total_ms) {
                Some(total) => writeln!(self.output, "Tracks: {} ({total})", tracks.len())?,
                None => writeln!(self.output, "Tracks: {}", tracks.len())?,
            }
        }
        let labels = details.label_names();
        if !labels.is_empty() {
            writeln!(self.output, "Labels: {}", labels.join(", "))?;
        }
        Ok(())
    }
}
