use std::time::Duration;
use strum::{AsRefStr, EnumDiscriminants};

/// Every way a selection or submission can fail. None of them is fatal:
/// after any of these the workflow accepts a new selection or submit.
#[derive(Debug, thiserror::Error, EnumDiscriminants)]
#[strum_discriminants(name(ErrorKind), derive(AsRefStr, Hash))]
pub enum WorkflowError {
    #[error("Please select or upload an image before submitting")]
    NoSelection,
    #[error("Please select a valid image file")]
    InvalidFileType { mime_type: String },
    #[error("A submission is already being processed")]
    SubmissionInProgress,
    #[error("request timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),
    #[error("HTTP error! status: {status}, message: {body}")]
    ServiceError { status: u16, body: String },
    #[error("Invalid API response format: {0}")]
    MalformedResponse(String),
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("submission cancelled by a new selection")]
    Cancelled,
}

impl WorkflowError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::from(self)
    }
}

impl ErrorKind {
    /// Whether the presenter shows the message as is, without the generic
    /// "error while processing" prefix.
    pub fn is_user_input(self) -> bool {
        matches!(self, ErrorKind::NoSelection | ErrorKind::InvalidFileType)
    }
}
