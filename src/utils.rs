//! Text helpers shared by extractors and the query layer.

/// Trimmed lines of a note, in order.
pub fn trimmed_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim)
}

/// True for blank lines and markdown headings.
pub fn is_skippable_line(line: &str) -> bool {
    line.is_empty() || line.starts_with('#')
}

/// True when the line contains at least one uppercase letter and one digit.
pub fn has_uppercase_and_digit(line: &str) -> bool {
    line.chars().any(char::is_uppercase) && line.chars().any(char::is_numeric)
}

/// Human label for a column name: underscores become spaces, words are title-cased.
///
/// A word starts after any non-alphabetic character, so `pinhole_area_percent`
/// becomes `Pinhole Area Percent` and `Fe` stays `Fe`.
pub fn field_label(name: &str) -> String {
    let mut label = String::with_capacity(name.len());
    let mut at_word_start = true;
    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if at_word_start {
                label.extend(ch.to_uppercase());
            } else {
                label.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            label.push(ch);
            at_word_start = true;
        }
    }
    label
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skippable_lines_are_blank_or_headings() {
        assert!(is_skippable_line(""));
        assert!(is_skippable_line("# Alloy"));
        assert!(is_skippable_line("## Composition: Fe2"));
        assert!(!is_skippable_line("Composition: Fe2"));
    }

    #[test]
    fn uppercase_and_digit_both_required() {
        assert!(has_uppercase_and_digit("Fe80B20"));
        assert!(!has_uppercase_and_digit("fe80b20"));
        assert!(!has_uppercase_and_digit("Iron Boron"));
    }

    #[test]
    fn field_labels_are_title_cased() {
        assert_eq!(field_label("primary_crystallization"), "Primary Crystallization");
        assert_eq!(field_label("pinhole_area_percent"), "Pinhole Area Percent");
        assert_eq!(field_label("Fe"), "Fe");
        assert_eq!(field_label("NB"), "Nb");
    }

    #[test]
    fn trimmed_lines_strip_each_line() {
        let lines: Vec<&str> = trimmed_lines("  a \n\tb\n").collect();
        assert_eq!(lines, vec!["a", "b"]);
    }
}
