pub mod config;
pub mod error;
pub mod presenter;
pub mod selection;
pub mod submission;
pub mod validate;
pub mod workflow;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use config::ClientConfig;
pub use error::{ErrorKind, WorkflowError};
pub use presenter::{DisplayState, ProbabilityRow, ResultView, present};
pub use selection::{Advisory, ImageSource, SampleIndex, SelectionState, UploadedFile};
pub use submission::{
    Clock, Completion, HttpReply, ImagePayload, Submission, SubmissionController, Transport,
};
pub use validate::validate;
pub use workflow::Workflow;

/// Response body as the classification service sends it. Every field is
/// optional here so that a missing one is reported by `validate` rather
/// than by serde.
#[derive(Debug, Deserialize, Default)]
pub struct RawClassification {
    #[serde(rename = "class")]
    pub predicted_class: Option<String>,
    pub confidence: Option<f64>,
    pub probabilities: Option<BTreeMap<String, f64>>,
}

/// A response that passed validation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClassificationResult {
    #[serde(rename = "class")]
    pub predicted_class: String,
    pub confidence: f64,
    pub probabilities: BTreeMap<String, f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum RequestOutcome {
    Pending,
    Success(ClassificationResult),
    Failure(ErrorKind, String),
}

impl From<Result<ClassificationResult, WorkflowError>> for RequestOutcome {
    fn from(result: Result<ClassificationResult, WorkflowError>) -> Self {
        match result {
            Ok(result) => RequestOutcome::Success(result),
            Err(err) => RequestOutcome::from(err),
        }
    }
}

impl From<WorkflowError> for RequestOutcome {
    fn from(err: WorkflowError) -> Self {
        RequestOutcome::Failure(ErrorKind::from(&err), err.to_string())
    }
}
