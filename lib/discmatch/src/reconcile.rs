use shared::{
    local::LocalMetadata,
    report::{DiffReport, SubmissionSuggestion},
};
use std::{
    io::{BufRead, Write},
    sync::Arc,
};
use tracing::{info, warn};

use crate::{
    aggregate::{aggregate, SearchLimits, SearchResultSet},
    compare::compare,
    disambiguate::{Disambiguator, Resolution},
    error::Result,
    submission::{synthesize, SubmissionDefaults},
    traits::Catalog,
};

/// Why a selected release could not be compared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompareFailure {
    NotFound,
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Compared(DiffReport),
    CouldNotCompare {
        release_id: String,
        reason: CompareFailure,
    },
    Suggested(SubmissionSuggestion),
}

pub struct Reconciler {
    catalog: Arc<dyn Catalog>,
    limits: SearchLimits,
    defaults: SubmissionDefaults,
}

impl Reconciler {
    pub fn catalog(&self) -> &dyn Catalog {
        self.catalog.as_ref()
    }

    pub async fn search(&self, local: &LocalMetadata) -> SearchResultSet {
        aggregate(self.catalog.as_ref(), local, &self.limits).await
    }

    pub async fn resolve<R: BufRead, W: Write>(
        &self,
        results: &SearchResultSet,
        input: R,
        output: W,
    ) -> Result<Resolution> {
        Disambiguator::new(self.catalog.as_ref(), input, output)
            .resolve(results)
            .await
    }

    pub async fn compare(&self, release_id: &str, local: &LocalMetadata) -> Outcome {
        match compare(self.catalog.as_ref(), release_id, local).await {
            Ok(Some(report)) => Outcome::Compared(report),
            Ok(None) => Outcome::CouldNotCompare {
                release_id: release_id.to_string(),
                reason: CompareFailure::NotFound,
            },
            Err(e) => {
                warn!(
                    catalog = self.catalog.id(),
                    "Comparison with {} abandoned: {}",
                    release_id,
                    e
                );
                Outcome::CouldNotCompare {
                    release_id: release_id.to_string(),
                    reason: CompareFailure::Unavailable(e.to_string()),
                }
            }
        }
    }

    pub fn suggest(&self, local: &LocalMetadata) -> SubmissionSuggestion {
        synthesize(local, &self.defaults)
    }

    /// Search, let the operator pick, then either diff the pick or draft a submission.
    pub async fn run<R: BufRead, W: Write>(
        &self,
        local: &LocalMetadata,
        input: R,
        mut output: W,
    ) -> Result<Outcome> {
        let results = self.search(local).await;
        if results.all_sources_failed() {
            warn!(catalog = self.catalog.id(), "Every search failed");
            writeln!(
                output,
                "\nWarning: could not reach {}, continuing as if nothing was found",
                self.catalog.name()
            )?;
        }

        let resolution = self.resolve(&results, input, &mut output).await?;
        match resolution {
            Resolution::Selected(release_id) => {
                writeln!(output, "\nSelected release: {release_id}")?;
                Ok(self.compare(&release_id, local).await)
            }
            Resolution::Declined | Resolution::NoCandidates => {
                info!("No matching release, drafting a submission");
                Ok(Outcome::Suggested(self.suggest(local)))
            }
        }
    }
}

pub struct ReconcilerBuilder {
    catalog: Option<Arc<dyn Catalog>>,
    limits: SearchLimits,
    defaults: SubmissionDefaults,
}

impl ReconcilerBuilder {
    pub fn new() -> Self {
        Self {
            catalog: None,
            limits: SearchLimits::default(),
            defaults: SubmissionDefaults::default(),
        }
    }

    pub fn catalog(mut self, catalog: impl Catalog + 'static) -> Self {
        self.catalog = Some(Arc::new(catalog));
        self
    }

    pub fn shared_catalog(mut self, catalog: Arc<dyn Catalog>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn limits(mut self, limits: SearchLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn defaults(mut self, defaults: SubmissionDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn build(self) -> std::result::Result<Reconciler, &'static str> {
        let catalog = self.catalog.ok_or("a catalog is required")?;
        if self.limits.barcode == 0 || self.limits.text == 0 {
            return Err("search limits must be positive");
        }

        Ok(Reconciler {
            catalog,
            limits: self.limits,
            defaults: self.defaults,
        })
    }
}

impl Default for ReconcilerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
