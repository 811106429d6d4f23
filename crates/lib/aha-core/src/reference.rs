//! Reference number classification.
//!
//! Aha! reference numbers encode the resource kind in their shape:
//! `DEVELOP-123` is a feature, `ADT-123-1` a requirement and `ABC-N-213` a
//! note (page). The patterns are applied as separate alternatives so a
//! feature match always wins over the requirement fallback. Digits are ASCII
//! only.

use std::sync::LazyLock;

use regex::Regex;

static FEATURE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)-([0-9]+)$").expect("valid feature pattern"));
static REQUIREMENT_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)-([0-9]+)-([0-9]+)$").expect("valid requirement pattern"));
static NOTE_REF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Z]+)-N-([0-9]+)$").expect("valid note pattern"));

/// Resource kind resolved from a reference number for `get_record`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Feature,
    Requirement,
}

/// Classifies a record reference. Returns `None` when neither shape matches.
#[must_use]
pub fn classify_record(reference: &str) -> Option<RecordKind> {
    if FEATURE_REF.is_match(reference) {
        Some(RecordKind::Feature)
    } else if REQUIREMENT_REF.is_match(reference) {
        Some(RecordKind::Requirement)
    } else {
        None
    }
}

/// Returns true when `reference` has the note/page shape.
#[must_use]
pub fn is_note_reference(reference: &str) -> bool {
    NOTE_REF.is_match(reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_token_references_are_features() {
        for reference in ["DEVELOP-123", "A-0", "ADT-9999999"] {
            assert_eq!(classify_record(reference), Some(RecordKind::Feature), "{reference}");
        }
    }

    #[test]
    fn three_numeric_tokens_are_requirements() {
        for reference in ["ADT-123-1", "DEVELOP-1-22"] {
            assert_eq!(
                classify_record(reference),
                Some(RecordKind::Requirement),
                "{reference}"
            );
        }
    }

    #[test]
    fn malformed_references_are_rejected() {
        for reference in [
            "",
            "develop-123",
            "DEVELOP",
            "DEVELOP-",
            "DEVELOP-12a",
            "DEVELOP-1-2-3",
            "ABC-N-213",
            " DEVELOP-123",
            "DEVELOP-123\n",
            "DEVELOP-\u{0661}\u{0662}",
        ] {
            assert_eq!(classify_record(reference), None, "{reference:?}");
        }
    }

    #[test]
    fn note_shape_is_distinct_from_records() {
        assert!(is_note_reference("ABC-N-213"));
        assert!(!is_note_reference("ABC-213"));
        assert!(!is_note_reference("ABC-1-213"));
        assert!(!is_note_reference("abc-N-213"));
        assert!(!is_note_reference("ABC-N-"));
    }
}
