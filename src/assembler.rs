use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::CorpusConfig;
use crate::constants::corpus::SAMPLE_ID_SEPARATOR;
use crate::constants::logging::{
    EMPTY_COMPOSITION_MSG, MISSING_OWNER_DIR_MSG, SAMPLE_FAILED_MSG, SKIP_UNREADABLE_NOTE_MSG,
};
use crate::data::SampleRecord;
use crate::errors::AlloyError;
use crate::extract::{FieldExtractor, default_extractors};
use crate::transport::fs::{dir_name, group_dirs, note_exists, read_note, sample_dirs};
use crate::types::{LogMessage, PathString, SampleId};

/// What happened to one sample directory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SampleOutcome {
    /// Every present note was processed and a composition was found.
    Assembled(SampleRecord),
    /// Notes were processed but no composition was found.
    RejectedEmptyComposition(SampleRecord),
    /// Processing stopped early; `record` holds the fields merged before the fault.
    Failed {
        record: SampleRecord,
        reason: LogMessage,
    },
}

impl SampleOutcome {
    /// The record as assembled, whatever the outcome.
    pub fn record(&self) -> &SampleRecord {
        match self {
            SampleOutcome::Assembled(record)
            | SampleOutcome::RejectedEmptyComposition(record)
            | SampleOutcome::Failed { record, .. } => record,
        }
    }

    /// Whether the record belongs in a dataset.
    ///
    /// Failed samples are kept when the fields merged before the fault include
    /// a composition.
    pub fn is_accepted(&self) -> bool {
        match self {
            SampleOutcome::Assembled(_) => true,
            SampleOutcome::RejectedEmptyComposition(_) => false,
            SampleOutcome::Failed { record, .. } => record.is_valid(),
        }
    }
}

/// Category of an assembly diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// The owner directory does not exist under the database root.
    MissingOwnerDir,
    /// A note exists but could not be read as UTF-8 text.
    UnreadableNote,
    /// A sample stopped assembling early.
    SampleFailed,
    /// A sample was dropped because it has no composition.
    EmptyComposition,
}

/// One non-fatal problem seen during assembly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Affected sample, when the problem is sample-scoped.
    pub sample_id: Option<SampleId>,
    /// Affected file or directory.
    pub path: PathString,
    pub message: LogMessage,
}

/// Result of one corpus scan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssemblyReport {
    /// One outcome per sample directory, in scan order.
    pub outcomes: Vec<SampleOutcome>,
    pub diagnostics: Vec<Diagnostic>,
}

impl AssemblyReport {
    /// Accepted records, in scan order.
    pub fn records(&self) -> Vec<SampleRecord> {
        self.outcomes
            .iter()
            .filter(|outcome| outcome.is_accepted())
            .map(|outcome| outcome.record().clone())
            .collect()
    }

    /// Consume the report, keeping only accepted records.
    pub fn into_records(self) -> Vec<SampleRecord> {
        self.outcomes
            .into_iter()
            .filter(|outcome| outcome.is_accepted())
            .map(|outcome| match outcome {
                SampleOutcome::Assembled(record)
                | SampleOutcome::RejectedEmptyComposition(record)
                | SampleOutcome::Failed { record, .. } => record,
            })
            .collect()
    }

    /// Number of samples that stopped early.
    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|outcome| matches!(outcome, SampleOutcome::Failed { .. }))
            .count()
    }
}

/// Walks a notes database and builds one [`SampleRecord`] per sample directory.
pub struct SampleAssembler {
    config: CorpusConfig,
    extractors: Vec<Box<dyn FieldExtractor>>,
}

impl SampleAssembler {
    /// Assembler using the built-in extractors.
    pub fn new(config: CorpusConfig) -> Self {
        Self::with_extractors(config, default_extractors())
    }

    /// Assembler using a custom extractor set. Notes are merged in the order
    /// the extractors are given.
    pub fn with_extractors(config: CorpusConfig, extractors: Vec<Box<dyn FieldExtractor>>) -> Self {
        Self { config, extractors }
    }

    pub fn config(&self) -> &CorpusConfig {
        &self.config
    }

    /// Scan the whole database.
    ///
    /// Never fails at the corpus level: a missing owner directory yields an
    /// empty report with one diagnostic, and per-sample faults are recorded
    /// as [`SampleOutcome::Failed`].
    pub fn assemble(&self) -> AssemblyReport {
        let mut report = AssemblyReport::default();
        let owner = self.config.owner_path();
        if !owner.is_dir() {
            warn!(path = %owner.display(), MISSING_OWNER_DIR_MSG);
            report.diagnostics.push(Diagnostic {
                kind: DiagnosticKind::MissingOwnerDir,
                sample_id: None,
                path: owner.display().to_string(),
                message: MISSING_OWNER_DIR_MSG.to_string(),
            });
            return report;
        }

        let follow_links = self.config.follow_links;
        for group in group_dirs(&owner, &self.config.group_prefix, follow_links) {
            let group_name = dir_name(&group);
            let samples = sample_dirs(&group, follow_links);
            info!(group = group_name, samples = samples.len(), "assembling group");
            for sample_dir in samples {
                let outcome = self.assemble_sample(group_name, &sample_dir, &mut report.diagnostics);
                report.outcomes.push(outcome);
            }
        }

        info!(
            samples = report.outcomes.len(),
            accepted = report.outcomes.iter().filter(|o| o.is_accepted()).count(),
            failed = report.failed_count(),
            "corpus assembly finished"
        );
        report
    }

    /// Scan the database and return only the accepted records.
    pub fn assemble_records(&self) -> Vec<SampleRecord> {
        self.assemble().into_records()
    }

    /// Build one sample from its directory.
    pub fn assemble_sample(
        &self,
        group_name: &str,
        sample_dir: &Path,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> SampleOutcome {
        let sample_name = dir_name(sample_dir);
        let sample_id = format!("{group_name}{SAMPLE_ID_SEPARATOR}{sample_name}");
        let mut record = SampleRecord::new(sample_id.clone(), sample_dir.display().to_string());

        for extractor in &self.extractors {
            let note_path = sample_dir.join(extractor.kind().file_name(sample_name));
            match self.merge_note(extractor.as_ref(), &sample_id, &note_path, &mut record) {
                Ok(()) => {}
                Err(AlloyError::NoteUnreadable { path, reason }) => {
                    warn!(sample_id = %sample_id, path = %path.display(), error = %reason, SKIP_UNREADABLE_NOTE_MSG);
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::UnreadableNote,
                        sample_id: Some(sample_id.clone()),
                        path: path.display().to_string(),
                        message: reason,
                    });
                }
                Err(err) => {
                    warn!(sample_id = %sample_id, path = %note_path.display(), error = %err, SAMPLE_FAILED_MSG);
                    let reason = err.to_string();
                    diagnostics.push(Diagnostic {
                        kind: DiagnosticKind::SampleFailed,
                        sample_id: Some(sample_id),
                        path: note_path.display().to_string(),
                        message: reason.clone(),
                    });
                    return SampleOutcome::Failed { record, reason };
                }
            }
        }

        if record.is_valid() {
            debug!(sample_id = %sample_id, elements = record.composition.len(), "sample assembled");
            SampleOutcome::Assembled(record)
        } else {
            debug!(sample_id = %sample_id, EMPTY_COMPOSITION_MSG);
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::EmptyComposition,
                sample_id: Some(sample_id),
                path: record.source_path.clone(),
                message: EMPTY_COMPOSITION_MSG.to_string(),
            });
            SampleOutcome::RejectedEmptyComposition(record)
        }
    }

    /// Read one note and merge what its extractor finds.
    ///
    /// A missing note is skipped. Unreadable notes return
    /// [`AlloyError::NoteUnreadable`]; any other error ends the sample.
    fn merge_note(
        &self,
        extractor: &dyn FieldExtractor,
        sample_id: &str,
        note_path: &Path,
        record: &mut SampleRecord,
    ) -> Result<(), AlloyError> {
        if !note_exists(note_path)? {
            debug!(sample_id, kind = %extractor.kind(), "note not present");
            return Ok(());
        }
        let text = read_note(note_path)?;
        let partial = panic::catch_unwind(AssertUnwindSafe(|| extractor.extract(&text, sample_id)))
            .map_err(|_| AlloyError::SampleUnavailable {
                sample_id: sample_id.to_string(),
                reason: format!("{} extractor panicked", extractor.kind()),
            })?;
        record.merge(partial);
        Ok(())
    }
}
