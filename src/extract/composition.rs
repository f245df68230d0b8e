use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::{FieldExtractor, NoteKind};
use crate::constants::extract::DEFAULT_ELEMENT_AMOUNT;
use crate::data::{Composition, PartialRecord};
use crate::utils::{has_uppercase_and_digit, is_skippable_line, trimmed_lines};

static RE_FORMULA_LABEL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)Chemical\s+Formula[:\s]+(.+)").ok());
static RE_COMPOSITION_LABEL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)Composition[:\s]+(.+)").ok());
static RE_LABEL_PREFIX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:Chemical Formula|Composition)[:\s]*").ok());
static RE_ELEMENT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]?)(\d*\.?\d*)").ok());

/// Reads the alloy formula from an `*Alloy.md` note.
///
/// Lines carrying a `Chemical Formula:` or `Composition:` label win over any
/// unlabeled line. Without a label, the first line holding both an uppercase
/// letter and a digit that parses to at least one element is used.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositionExtractor;

impl FieldExtractor for CompositionExtractor {
    fn kind(&self) -> NoteKind {
        NoteKind::Alloy
    }

    fn extract(&self, text: &str, sample_id: &str) -> PartialRecord {
        let candidates: Vec<&str> = trimmed_lines(text)
            .filter(|line| !is_skippable_line(line))
            .collect();

        let composition = candidates
            .iter()
            .find_map(|line| labeled_formula(line))
            .or_else(|| {
                candidates
                    .iter()
                    .filter(|line| has_uppercase_and_digit(line))
                    .map(|line| parse_formula(line))
                    .find(|composition| !composition.is_empty())
            });

        match &composition {
            Some(found) => debug!(sample_id, elements = found.len(), "parsed composition"),
            None => debug!(sample_id, "no composition line found"),
        }

        PartialRecord {
            composition,
            ..PartialRecord::default()
        }
    }
}

fn labeled_formula(line: &str) -> Option<Composition> {
    for pattern in [&RE_FORMULA_LABEL, &RE_COMPOSITION_LABEL] {
        let Some(regex) = pattern.as_ref() else {
            continue;
        };
        if let Some(captures) = regex.captures(line)
            && let Some(formula) = captures.get(1)
        {
            let composition = parse_formula(formula.as_str());
            if !composition.is_empty() {
                return Some(composition);
            }
        }
    }
    None
}

/// Parse formula text such as `Fe2Co1.5Nb` into element amounts.
///
/// Every `<Upper><lower?><number?>` token becomes one entry. A missing or
/// unconvertible amount is recorded as `1.0`. Prose is not rejected, so any
/// capitalized word contributes a token.
pub fn parse_formula(formula: &str) -> Composition {
    let mut composition = Composition::new();
    let Some(element_re) = RE_ELEMENT.as_ref() else {
        return composition;
    };
    let stripped = match RE_LABEL_PREFIX.as_ref() {
        Some(prefix) => prefix.replace(formula, ""),
        None => formula.into(),
    };
    for captures in element_re.captures_iter(stripped.trim()) {
        let Some(element) = captures.get(1) else {
            continue;
        };
        let amount = captures
            .get(2)
            .map(|raw| raw.as_str())
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| raw.parse::<f64>().ok())
            .unwrap_or(DEFAULT_ELEMENT_AMOUNT);
        composition.insert(element.as_str().to_string(), amount);
    }
    composition
}
