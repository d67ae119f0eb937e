use thiserror::Error;

/// Errors that abort the export of a single document.
///
/// Everything that has a sane default is resolved locally; only conditions
/// that would make the emitted document schema-invalid surface here.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// A mandatory identifier (document number, issue date) could not be
    /// constructed from the input.
    #[error("cannot construct mandatory identifier: {0}")]
    MissingIdentifier(String),

    /// An amount computation exceeded the decimal range.
    #[error("amount out of range: {0}")]
    AmountOutOfRange(String),

    /// XML generation error.
    #[error("XML error: {0}")]
    Xml(String),
}

/// Failure of an optional enrichment step (currently: PDF retrieval).
///
/// Callers log these and continue; they never fail a document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EnrichmentError {
    /// The upstream renderer has nothing for this document.
    #[error("enrichment unavailable: {0}")]
    Unavailable(String),

    /// The upstream renderer failed.
    #[error("enrichment failed: {0}")]
    Failed(String),
}

/// A single validation finding with field path and message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the offending field (e.g. "buyer.address.country_code").
    pub field: String,
    /// Human-readable error description.
    pub message: String,
    /// Peppol / EN 16931 rule ID if applicable (e.g. "BR-61").
    pub rule: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rule) = &self.rule {
            write!(f, "[{}] {}: {}", rule, self.field, self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl ValidationError {
    /// Create a validation error without a rule ID.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Create a validation error with a rule ID.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}
