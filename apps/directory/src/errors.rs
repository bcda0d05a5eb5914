use thiserror::Error;

use crate::cv_client::CvParseError;
use crate::store::StoreError;

/// Input rejected before any network call. The message is shown as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please use a valid email address ending in {allowed}.")]
    EmailDomain { allowed: String },

    #[error("Please enter a name.")]
    MissingName,

    #[error("Only PDF, DOCX, DOC, and TXT files are allowed.")]
    UnsupportedFileType,

    #[error("File is too large. Max 10MB.")]
    FileTooLarge,

    #[error("Please paste CV text first.")]
    MissingCvText,

    #[error("Please select a file first.")]
    MissingCvFile,
}

/// Editor workflow error. Every variant leaves the workflow in a state the
/// user can retry from; none of them discards form values.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Something went wrong looking up this email. Please try again.")]
    Lookup(#[source] StoreError),

    #[error("Failed to extract data ({0}). You can still enter it manually.")]
    Parse(#[source] CvParseError),

    #[error("Failed to save profile. Please try again.")]
    Save(#[source] StoreError),

    #[error("Could not read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is already in progress")]
    Busy(&'static str),

    #[error("This action is not available while {0}")]
    WrongState(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_user_facing() {
        let err = ValidationError::EmailDomain {
            allowed: "@gmail.com".into(),
        };
        assert_eq!(
            err.to_string(),
            "Please use a valid email address ending in @gmail.com."
        );
        assert_eq!(
            EditorError::from(ValidationError::MissingCvText).to_string(),
            "Please paste CV text first."
        );
    }

    #[test]
    fn test_parse_error_includes_server_message() {
        let err = EditorError::Parse(CvParseError::Api {
            status: 400,
            message: "Unsupported file".into(),
        });
        assert_eq!(
            err.to_string(),
            "Failed to extract data (Unsupported file). You can still enter it manually."
        );
    }
}
