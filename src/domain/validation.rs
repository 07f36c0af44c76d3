//! Input classification for the cache-creation form.
//!
//! Pure functions, no I/O. Format detection works by attempting full parses
//! and discarding the result; the try-JSON-then-try-XML order is observable
//! (a document valid as both is classified JSON) and must not change.

use super::InputMode;

/// Syntactic family of an inline configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Xml,
    Unrecognized,
}

/// Per-field validation state. Fields start [`Unvalidated`] and only move
/// to [`Valid`]/[`Invalid`] on an explicit validation pass.
///
/// [`Unvalidated`]: FieldValidity::Unvalidated
/// [`Valid`]: FieldValidity::Valid
/// [`Invalid`]: FieldValidity::Invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldValidity {
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

/// A cache name is valid iff it is non-empty after trimming. Uniqueness is
/// the server's to enforce.
pub fn validate_name(name: &str) -> FieldValidity {
    if name.trim().is_empty() {
        FieldValidity::Invalid
    } else {
        FieldValidity::Valid
    }
}

/// Classify a document as JSON, XML, or neither.
pub fn detect_format(document: &str) -> DocumentFormat {
    let trimmed = document.trim();
    if serde_json::from_str::<serde_json::Value>(trimmed).is_ok() {
        return DocumentFormat::Json;
    }
    if roxmltree::Document::parse(trimmed).is_ok() {
        return DocumentFormat::Xml;
    }
    DocumentFormat::Unrecognized
}

/// The configuration input is valid iff a template is selected, or the
/// inline document is non-empty and parses as JSON or XML. An empty inline
/// document and a malformed one report the same [`FieldValidity::Invalid`];
/// the operator-facing message does not distinguish them.
pub fn validate_configuration(mode: &InputMode) -> FieldValidity {
    match mode {
        InputMode::Template(name) if !name.is_empty() => FieldValidity::Valid,
        InputMode::Document(text) => {
            let trimmed = text.trim();
            if !trimmed.is_empty() && detect_format(trimmed) != DocumentFormat::Unrecognized {
                FieldValidity::Valid
            } else {
                FieldValidity::Invalid
            }
        }
        _ => FieldValidity::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_names_are_invalid() {
        assert_eq!(validate_name(""), FieldValidity::Invalid);
        assert_eq!(validate_name("   "), FieldValidity::Invalid);
        assert_eq!(validate_name("\t\n"), FieldValidity::Invalid);
    }

    #[test]
    fn non_blank_names_are_valid() {
        assert_eq!(validate_name("sessions"), FieldValidity::Valid);
        assert_eq!(validate_name("  padded  "), FieldValidity::Valid);
    }

    #[test]
    fn detects_json() {
        assert_eq!(detect_format(r#"{"a":1}"#), DocumentFormat::Json);
        assert_eq!(detect_format(r#"  {"distributed-cache":{}}  "#), DocumentFormat::Json);
        assert_eq!(detect_format("[1, 2, 3]"), DocumentFormat::Json);
    }

    #[test]
    fn detects_xml() {
        assert_eq!(detect_format("<a/>"), DocumentFormat::Xml);
        assert_eq!(
            detect_format("<infinispan><cache-container/></infinispan>"),
            DocumentFormat::Xml
        );
    }

    #[test]
    fn rejects_everything_else() {
        assert_eq!(detect_format("not a doc"), DocumentFormat::Unrecognized);
        assert_eq!(detect_format(""), DocumentFormat::Unrecognized);
        assert_eq!(detect_format("<unclosed"), DocumentFormat::Unrecognized);
        assert_eq!(detect_format("{broken json"), DocumentFormat::Unrecognized);
    }

    #[test]
    fn json_probe_runs_first() {
        // A bare scalar parses as JSON and never reaches the XML probe.
        assert_eq!(detect_format("42"), DocumentFormat::Json);
    }

    #[test]
    fn template_selection_validates() {
        let mode = InputMode::Template("default".to_string());
        assert_eq!(validate_configuration(&mode), FieldValidity::Valid);
    }

    #[test]
    fn empty_template_selection_is_invalid() {
        let mode = InputMode::Template(String::new());
        assert_eq!(validate_configuration(&mode), FieldValidity::Invalid);
    }

    #[test]
    fn unset_mode_is_invalid() {
        assert_eq!(validate_configuration(&InputMode::Unset), FieldValidity::Invalid);
    }

    #[test]
    fn well_formed_documents_validate() {
        let json = InputMode::Document(r#"{"distributed-cache":{}}"#.to_string());
        assert_eq!(validate_configuration(&json), FieldValidity::Valid);

        let xml = InputMode::Document("<infinispan/>".to_string());
        assert_eq!(validate_configuration(&xml), FieldValidity::Valid);
    }

    #[test]
    fn empty_and_malformed_documents_are_equally_invalid() {
        let empty = InputMode::Document(String::new());
        let blank = InputMode::Document("   ".to_string());
        let malformed = InputMode::Document("not a doc".to_string());
        assert_eq!(validate_configuration(&empty), FieldValidity::Invalid);
        assert_eq!(validate_configuration(&blank), FieldValidity::Invalid);
        assert_eq!(validate_configuration(&malformed), FieldValidity::Invalid);
    }
}
