use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::assembler::{Diagnostic, SampleAssembler};
use crate::config::CorpusConfig;
use crate::dataset::Dataset;
use crate::metrics::DatasetSummary;
use crate::query::{DatasetView, Predicate, filter};

/// A loaded dataset owned by one UI or CLI session.
///
/// The dataset is an immutable snapshot behind an [`Arc`]. [`reload`] builds
/// a fresh snapshot and swaps it in whole, so holders of an earlier snapshot
/// keep a consistent view.
///
/// [`reload`]: DatasetSession::reload
pub struct DatasetSession {
    assembler: SampleAssembler,
    dataset: Arc<Dataset>,
    diagnostics: Vec<Diagnostic>,
    loaded_at: DateTime<Utc>,
}

impl DatasetSession {
    /// Assemble the corpus described by `config` with the built-in extractors.
    pub fn load(config: CorpusConfig) -> Self {
        Self::with_assembler(SampleAssembler::new(config))
    }

    pub fn with_assembler(assembler: SampleAssembler) -> Self {
        let mut session = Self {
            assembler,
            dataset: Arc::new(Dataset::default()),
            diagnostics: Vec::new(),
            loaded_at: Utc::now(),
        };
        session.reload();
        session
    }

    /// Re-scan the corpus and replace the snapshot.
    pub fn reload(&mut self) -> Arc<Dataset> {
        let report = self.assembler.assemble();
        self.diagnostics = report.diagnostics.clone();
        self.dataset = Arc::new(Dataset::build(&report.into_records()));
        self.loaded_at = Utc::now();
        info!(
            root = %self.assembler.config().root().display(),
            rows = self.dataset.len(),
            diagnostics = self.diagnostics.len(),
            loaded_at = %self.loaded_at,
            "dataset session loaded"
        );
        Arc::clone(&self.dataset)
    }

    /// Current snapshot.
    pub fn dataset(&self) -> Arc<Dataset> {
        Arc::clone(&self.dataset)
    }

    /// Diagnostics from the most recent load.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    pub fn config(&self) -> &CorpusConfig {
        self.assembler.config()
    }

    pub fn summary(&self) -> DatasetSummary {
        DatasetSummary::from_dataset(&self.dataset)
    }

    /// Filter the current snapshot.
    pub fn filter(&self, predicates: &[Predicate]) -> DatasetView<'_> {
        filter(&self.dataset, predicates)
    }
}
