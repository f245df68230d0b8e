use tracing::debug;

use super::numbers::{MAGNETIC_LADDER, first_number};
use super::{FieldExtractor, NoteKind};
use crate::data::PartialRecord;

/// Reads the Curie temperature from a `*VSM.md` note.
///
/// Scanning stops at the first `curie` + `temp` line that yields a number.
#[derive(Debug, Clone, Copy, Default)]
pub struct MagneticExtractor;

impl FieldExtractor for MagneticExtractor {
    fn kind(&self) -> NoteKind {
        NoteKind::Vsm
    }

    fn extract(&self, text: &str, sample_id: &str) -> PartialRecord {
        let curie_temperature = text
            .lines()
            .map(|line| line.trim().to_lowercase())
            .filter(|line| line.contains("curie") && line.contains("temp"))
            .find_map(|line| first_number(&line, &MAGNETIC_LADDER));

        debug!(sample_id, ?curie_temperature, "parsed magnetic note");
        PartialRecord {
            curie_temperature,
            ..PartialRecord::default()
        }
    }
}
