use thiserror::Error;

use crate::models::DocumentKind;

/// Failures surfaced by the document composer.
///
/// Asset (logo) failures are deliberately absent: they always degrade to the
/// text fallback and are logged, never raised.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("Failed to render {kind}: {reason}")]
    Render { kind: DocumentKind, reason: String },

    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

impl DocumentError {
    /// Wraps a rendering/serialization failure with the document kind.
    pub fn render(kind: DocumentKind, err: impl std::fmt::Display) -> Self {
        Self::Render {
            kind,
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_missing_field() {
        let err = DocumentError::MissingField {
            field: "patient_name",
        };
        assert!(err.to_string().contains("patient_name"));
    }

    #[test]
    fn render_errors_carry_the_kind() {
        let err = DocumentError::render(DocumentKind::Prescription, "boom");
        let msg = err.to_string();
        assert!(msg.contains("receita"));
        assert!(msg.contains("boom"));
    }
}
