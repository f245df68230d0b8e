//! Heuristic note extractors.
//!
//! Each extractor turns the raw text of one note category into a
//! [`PartialRecord`]. Extractors never fail: text they cannot interpret yields
//! an empty partial record. They hold no mutable state, so running one twice
//! on the same text gives the same result.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::corpus::{
    NOTE_EXTENSION, SUFFIX_ALLOY, SUFFIX_DSC, SUFFIX_MECHANICAL, SUFFIX_VSM,
};
use crate::data::PartialRecord;

/// Composition (formula) extractor.
pub mod composition;
/// Pinhole count and area extractor.
pub mod defect;
/// Curie temperature extractor.
pub mod magnetic;
/// Shared numeric pattern ladders.
pub mod numbers;
/// Crystallization peak extractor.
pub mod thermal;

pub use composition::{CompositionExtractor, parse_formula};
pub use defect::DefectExtractor;
pub use magnetic::MagneticExtractor;
pub use thermal::ThermalExtractor;

/// Note categories, one file per category per sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteKind {
    Alloy,
    Dsc,
    Mechanical,
    Vsm,
}

impl NoteKind {
    /// Order in which a sample's notes are merged.
    pub const ALL: [NoteKind; 4] = [
        NoteKind::Alloy,
        NoteKind::Dsc,
        NoteKind::Mechanical,
        NoteKind::Vsm,
    ];

    /// File-name suffix following the sample number.
    pub const fn suffix(self) -> &'static str {
        match self {
            NoteKind::Alloy => SUFFIX_ALLOY,
            NoteKind::Dsc => SUFFIX_DSC,
            NoteKind::Mechanical => SUFFIX_MECHANICAL,
            NoteKind::Vsm => SUFFIX_VSM,
        }
    }

    /// Expected note file name for a sample directory, e.g. `0457DSC.md`.
    pub fn file_name(self, sample_dir_name: &str) -> String {
        format!("{sample_dir_name}{}.{NOTE_EXTENSION}", self.suffix())
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Text-to-fields parser for one note category.
pub trait FieldExtractor: Send + Sync {
    /// Note category this extractor reads.
    fn kind(&self) -> NoteKind;

    /// Extract whatever fields the text supports.
    ///
    /// `sample_id` is only used for log context.
    fn extract(&self, text: &str, sample_id: &str) -> PartialRecord;
}

/// Built-in extractors, one per note category, in merge order.
pub fn default_extractors() -> Vec<Box<dyn FieldExtractor>> {
    vec![
        Box::new(CompositionExtractor),
        Box::new(ThermalExtractor),
        Box::new(DefectExtractor),
        Box::new(MagneticExtractor),
    ]
}
