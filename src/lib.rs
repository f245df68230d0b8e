#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Sample assembly over a notes database.
pub mod assembler;
/// Corpus layout configuration.
pub mod config;
/// Centralized constants for layout, field names, queries, and log messages.
pub mod constants;
/// Sample and partial record types.
pub mod data;
/// Fixed-width tabular materialization of sample records.
pub mod dataset;
/// Reusable example runners shared by demos.
pub mod example_apps;
/// JSON export of datasets and records.
pub mod export;
/// Heuristic note extractors.
pub mod extract;
/// Dataset summaries and field ranges.
pub mod metrics;
/// Filtering and plot projection.
pub mod query;
/// Session-scoped dataset handle.
pub mod session;
/// Input transports (filesystem).
pub mod transport;
/// Shared type aliases.
pub mod types;
/// Text helpers.
pub mod utils;

mod errors;

pub use assembler::{AssemblyReport, Diagnostic, DiagnosticKind, SampleAssembler, SampleOutcome};
pub use config::CorpusConfig;
pub use data::{Composition, PartialRecord, SampleRecord, ScalarField};
pub use dataset::{Column, ColumnKind, Dataset, DatasetRow};
pub use errors::AlloyError;
pub use extract::{FieldExtractor, NoteKind, default_extractors, parse_formula};
pub use metrics::{DatasetSummary, FieldRange, field_range};
pub use query::{
    DatasetView, PlotPoint, PlotSeries, Predicate, Projection, filter, project,
    project_composition,
};
pub use session::DatasetSession;
pub use types::{ElementSymbol, FieldName, GroupName, LogMessage, PathString, SampleId};
