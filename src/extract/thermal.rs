use tracing::debug;

use super::numbers::{THERMAL_LADDER, first_number_in_window};
use super::{FieldExtractor, NoteKind};
use crate::constants::extract::THERMAL_CONTEXT_LINES;
use crate::data::PartialRecord;

/// Reads crystallization peaks from a `*DSC.md` note.
///
/// A line mentioning `primary` (or `secondary`) together with
/// `crystallization` or `peak` opens a three-line window in which the first
/// temperature found is taken. A later qualifying line overwrites an earlier one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThermalExtractor;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Peak {
    Primary,
    Secondary,
}

fn classify(line: &str) -> Option<Peak> {
    let line = line.trim().to_lowercase();
    if !(line.contains("crystallization") || line.contains("peak")) {
        return None;
    }
    if line.contains("primary") {
        Some(Peak::Primary)
    } else if line.contains("secondary") {
        Some(Peak::Secondary)
    } else {
        None
    }
}

impl FieldExtractor for ThermalExtractor {
    fn kind(&self) -> NoteKind {
        NoteKind::Dsc
    }

    fn extract(&self, text: &str, sample_id: &str) -> PartialRecord {
        let lines: Vec<&str> = text.lines().collect();
        let mut partial = PartialRecord::default();

        for (idx, line) in lines.iter().enumerate() {
            let Some(peak) = classify(line) else {
                continue;
            };
            let end = (idx + THERMAL_CONTEXT_LINES).min(lines.len());
            let Some(temperature) =
                first_number_in_window(lines[idx..end].iter().copied(), &THERMAL_LADDER)
            else {
                continue;
            };
            match peak {
                Peak::Primary => partial.primary_crystallization = Some(temperature),
                Peak::Secondary => partial.secondary_crystallization = Some(temperature),
            }
        }

        debug!(sample_id, fields = ?partial.field_names(), "parsed thermal note");
        partial
    }
}
