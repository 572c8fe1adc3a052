//! Export failure taxonomy.
//!
//! Nothing here is fatal: every failure is caught at the export boundary,
//! surfaced as a single transient notice, and leaves the in-memory diagram
//! untouched.

use thiserror::Error;

/// Errors raised by the export path.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("canvas capture failed: {0}")]
    Capture(String),
    #[error("image encoding failed: {0}")]
    Encode(String),
    #[error("save failed: {0}")]
    Save(String),
    #[error("share failed: {0}")]
    Share(String),
    #[error("destination picker dismissed")]
    Cancelled,
}

impl ExportError {
    /// The user-visible transient message shown for any export failure.
    pub fn user_notice(&self) -> &'static str {
        "Could not export the diagram. Please try again."
    }
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = ExportError::Capture("no canvas mounted".to_string());
        assert_eq!(err.to_string(), "canvas capture failed: no canvas mounted");
        assert_eq!(ExportError::Cancelled.to_string(), "destination picker dismissed");
    }

    #[test]
    fn test_single_user_notice() {
        let notices = [
            ExportError::Capture("x".into()).user_notice(),
            ExportError::Save("y".into()).user_notice(),
            ExportError::Cancelled.user_notice(),
        ];
        assert!(notices.iter().all(|n| *n == notices[0]));
    }
}
