use tracing::debug;

use super::numbers::{DEFECT_LADDER, first_count, first_number};
use super::{FieldExtractor, NoteKind};
use crate::data::PartialRecord;

/// Reads pinhole statistics from a `*Mechanical.md` note.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefectExtractor;

impl FieldExtractor for DefectExtractor {
    fn kind(&self) -> NoteKind {
        NoteKind::Mechanical
    }

    fn extract(&self, text: &str, sample_id: &str) -> PartialRecord {
        let mut partial = PartialRecord::default();

        for line in text.lines() {
            let line = line.trim().to_lowercase();
            if !line.contains("pinhole") {
                continue;
            }
            if line.contains("number") {
                if let Some(count) = first_count(&line, &DEFECT_LADDER) {
                    partial.num_pinholes = Some(count);
                }
            } else if (line.contains("area") || line.contains('%'))
                && let Some(percent) = first_number(&line, &DEFECT_LADDER)
            {
                partial.pinhole_area_percent = Some(percent);
            }
        }

        debug!(sample_id, fields = ?partial.field_names(), "parsed mechanical note");
        partial
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> PartialRecord {
        DefectExtractor.extract(text, "HOTG1_0001")
    }

    #[test]
    fn count_and_area_are_read_from_separate_lines() {
        let partial = extract("Number of pinholes: 12\nPinhole area: 3.5%\n");
        assert_eq!(partial.num_pinholes, Some(12));
        assert_eq!(partial.pinhole_area_percent, Some(3.5));
    }

    #[test]
    fn count_is_truncated() {
        let partial = extract("Number of pinholes (avg of 3 scans): 7.8\n");
        assert_eq!(partial.num_pinholes, Some(7));
    }

    #[test]
    fn percent_sign_alone_marks_an_area_line() {
        let partial = extract("- pinholes cover ~ 0.75 % of ribbon\n");
        assert_eq!(partial.pinhole_area_percent, Some(0.75));
        assert_eq!(partial.num_pinholes, None);
    }

    #[test]
    fn count_rule_wins_when_a_line_mentions_both() {
        let partial = extract("Number of pinholes: 4 (area 1.2%)\n");
        assert_eq!(partial.num_pinholes, Some(1));
        assert_eq!(partial.pinhole_area_percent, None);
    }

    #[test]
    fn zero_count_is_kept() {
        assert_eq!(extract("Number of pinholes: 0\n").num_pinholes, Some(0));
    }

    #[test]
    fn lines_without_pinhole_are_ignored() {
        assert!(extract("Number of cracks: 3\nArea: 20%\n").is_empty());
    }

    #[test]
    fn oversized_count_leaves_field_unset() {
        let partial = extract("Number of pinholes: 99999999999999999999999999\n");
        assert_eq!(partial.num_pinholes, None);
        assert!(partial.is_empty());
    }

    #[test]
    fn unconvertible_numbers_leave_field_unset() {
        assert!(extract("Number of pinholes: ١٢\n").is_empty());
    }
}
