use crate::error::{ErrorKind, WorkflowError};
use crate::presenter::{DisplayState, present};
use crate::selection::{Advisory, ImageSource, SampleIndex, SelectionState, UploadedFile};
use crate::submission::{Clock, Completion, Submission, SubmissionController, Transport};
use crate::{ClientConfig, RequestOutcome};
use log::{debug, error, info};

/// One selection/submission cycle owner. Selections replace the previous
/// one and abort whatever submission is still in flight; completions of
/// aborted attempts are discarded.
pub struct Workflow<T, C> {
    selection: SelectionState,
    controller: SubmissionController<T, C>,
    outcome: Option<RequestOutcome>,
    pending_attempt: Option<u64>,
    advisory: Option<Advisory>,
}

impl<T, C> Workflow<T, C>
where
    T: Transport + 'static,
    C: Clock + 'static,
{
    pub fn new(config: ClientConfig, transport: T, clock: C) -> Self {
        Self {
            selection: SelectionState::new(),
            controller: SubmissionController::new(config, transport, clock),
            outcome: None,
            pending_attempt: None,
            advisory: None,
        }
    }

    pub fn controller(&self) -> &SubmissionController<T, C> {
        &self.controller
    }

    pub fn active_source(&self) -> Option<&ImageSource> {
        self.selection.active_source()
    }

    pub fn is_processing(&self) -> bool {
        self.controller.is_processing()
    }

    pub fn outcome(&self) -> Option<&RequestOutcome> {
        self.outcome.as_ref()
    }

    pub fn advisory(&self) -> Option<&Advisory> {
        self.advisory.as_ref()
    }

    pub fn display(&self) -> DisplayState {
        present(self.outcome.as_ref())
    }

    pub fn dismiss_advisory(&mut self) {
        self.advisory = None;
    }

    pub fn select_sample(&mut self, index: SampleIndex) {
        self.abandon_pending();
        self.selection.select_sample(index);
        self.outcome = None;
        self.advisory = None;
    }

    /// A rejected file leaves the selection and any running submission
    /// alone; only the displayed error changes.
    pub fn select_upload(&mut self, file: UploadedFile) -> Result<(), ErrorKind> {
        match self.selection.select_upload(file) {
            Ok(advisory) => {
                self.abandon_pending();
                self.outcome = None;
                self.advisory = advisory;
                Ok(())
            }
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Starts a submission. The caller drives the returned future and hands
    /// its `Completion` back to [`Workflow::complete`].
    pub fn submit(&mut self) -> Result<Submission, ErrorKind> {
        match self.controller.submit(&self.selection) {
            Ok(submission) => {
                self.pending_attempt = Some(submission.attempt());
                self.outcome = Some(RequestOutcome::Pending);
                Ok(submission)
            }
            // Not recorded as the current error: the running attempt keeps
            // its pending state (see "Concurrent submit" in DESIGN.md).
            Err(WorkflowError::SubmissionInProgress) => Err(ErrorKind::SubmissionInProgress),
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Records the outcome of a finished submission. Returns false when the
    /// completion belongs to an attempt that was abandoned meanwhile.
    pub fn complete(&mut self, completion: Completion) -> bool {
        if self.pending_attempt != Some(completion.attempt) {
            debug!("Discarding result of abandoned attempt {}", completion.attempt);
            return false;
        }
        self.pending_attempt = None;

        match &completion.result {
            Ok(result) => info!(
                "Prediction result: {} ({})",
                result.predicted_class, result.confidence
            ),
            Err(err) => error!("Error processing image: {err}"),
        }
        self.outcome = Some(RequestOutcome::from(completion.result));
        true
    }

    fn abandon_pending(&mut self) {
        if self.pending_attempt.take().is_some() {
            self.controller.cancel();
        }
    }

    fn fail(&mut self, err: WorkflowError) -> ErrorKind {
        let kind = err.kind();
        self.outcome = Some(RequestOutcome::from(err));
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submission::{HttpReply, ImagePayload};
    use futures::FutureExt;
    use futures::future;
    use std::cell::Cell;
    use std::future::IntoFuture;
    use std::time::Duration;

    const NORMAL: &str = r#"{"class":"Normal","confidence":0.81,"probabilities":{"Normal":0.81,"Pneumonia":0.19}}"#;

    /// Answers with `NORMAL` unless `hold` is set.
    #[derive(Default)]
    struct ScriptedTransport {
        hold: Cell<bool>,
        posts: Cell<usize>,
    }

    impl Transport for ScriptedTransport {
        async fn fetch_sample(&self, _path: &str) -> Result<Vec<u8>, WorkflowError> {
            Ok(vec![1, 2, 3])
        }

        async fn post_image(
            &self,
            _endpoint: &str,
            _image: ImagePayload,
        ) -> Result<HttpReply, WorkflowError> {
            self.posts.set(self.posts.get() + 1);
            if self.hold.get() {
                future::pending::<()>().await;
            }
            Ok(HttpReply {
                status: 200,
                body: NORMAL.to_string(),
            })
        }
    }

    struct NeverClock;

    impl Clock for NeverClock {
        async fn sleep(&self, _duration: Duration) {
            future::pending::<()>().await
        }
    }

    fn workflow() -> Workflow<ScriptedTransport, NeverClock> {
        Workflow::new(ClientConfig::default(), ScriptedTransport::default(), NeverClock)
    }

    fn sample(index: u8) -> SampleIndex {
        SampleIndex::new(index).unwrap()
    }

    #[test]
    fn submit_without_selection_shows_error() {
        let mut workflow = workflow();

        assert_eq!(workflow.submit().err(), Some(ErrorKind::NoSelection));
        assert_eq!(
            workflow.display(),
            DisplayState::Error("Please select or upload an image before submitting".into())
        );
        assert_eq!(workflow.controller().transport().posts.get(), 0);
    }

    #[test]
    fn pending_then_success() {
        let mut workflow = workflow();
        workflow.select_sample(sample(1));

        let submission = workflow.submit().unwrap();
        assert_eq!(workflow.outcome(), Some(&RequestOutcome::Pending));
        assert!(workflow.is_processing());

        let completion = submission.into_future().now_or_never().unwrap();
        assert!(workflow.complete(completion));

        assert!(!workflow.is_processing());
        assert!(matches!(workflow.display(), DisplayState::Result(view) if view.predicted_class == "Normal"));
    }

    #[test]
    fn new_submission_clears_previous_error() {
        let mut workflow = workflow();
        workflow.submit().unwrap_err();
        assert!(matches!(workflow.display(), DisplayState::Error(_)));

        workflow.select_sample(sample(2));
        assert_eq!(workflow.display(), DisplayState::Idle);
        let _submission = workflow.submit().unwrap();
        assert_eq!(workflow.display(), DisplayState::Processing);
    }

    #[test]
    fn rejected_upload_keeps_selection_and_shows_error() {
        let mut workflow = workflow();
        workflow.select_sample(sample(3));

        let kind = workflow
            .select_upload(UploadedFile::new("report.pdf", "application/pdf", vec![0; 4]))
            .unwrap_err();

        assert_eq!(kind, ErrorKind::InvalidFileType);
        assert_eq!(workflow.active_source(), Some(&ImageSource::Sample(sample(3))));
        assert_eq!(
            workflow.display(),
            DisplayState::Error("Please select a valid image file".into())
        );
    }

    #[test]
    fn selection_clears_prior_result() {
        let mut workflow = workflow();
        workflow.select_sample(sample(1));
        let completion = workflow.submit().unwrap().into_future().now_or_never().unwrap();
        workflow.complete(completion);
        assert!(matches!(workflow.display(), DisplayState::Result(_)));

        workflow
            .select_upload(UploadedFile::new("xray.png", "image/png", vec![9; 16]))
            .unwrap();

        assert_eq!(workflow.display(), DisplayState::Idle);
    }

    #[test]
    fn concurrent_submit_keeps_pending_state() {
        let mut workflow = workflow();
        workflow.controller().transport().hold.set(true);
        workflow.select_sample(sample(1));

        let mut first = workflow.submit().unwrap().into_future();
        assert!((&mut first).now_or_never().is_none());

        assert_eq!(workflow.submit().err(), Some(ErrorKind::SubmissionInProgress));
        assert_eq!(workflow.display(), DisplayState::Processing);
        assert_eq!(workflow.controller().transport().posts.get(), 1);
    }

    #[test]
    fn selection_change_abandons_in_flight_submission() {
        let mut workflow = workflow();
        workflow.controller().transport().hold.set(true);
        workflow.select_sample(sample(1));
        let mut stale = workflow.submit().unwrap().into_future();
        assert!((&mut stale).now_or_never().is_none());

        workflow.select_sample(sample(2));
        assert!(!workflow.is_processing());

        let completion = stale.now_or_never().unwrap();
        assert!(!workflow.complete(completion));
        assert_eq!(workflow.display(), DisplayState::Idle);

        workflow.controller().transport().hold.set(false);
        let completion = workflow.submit().unwrap().into_future().now_or_never().unwrap();
        assert!(workflow.complete(completion));
        assert!(matches!(workflow.display(), DisplayState::Result(_)));
    }

    #[test]
    fn duplicate_upload_advisory_is_dismissible() {
        let mut workflow = workflow();
        let file = UploadedFile::new("xray.png", "image/png", vec![9; 16]);
        workflow.select_upload(file.clone()).unwrap();
        assert!(workflow.advisory().is_none());

        workflow.select_upload(file).unwrap();
        assert!(matches!(
            workflow.advisory(),
            Some(Advisory::DuplicateUpload { name }) if name == "xray.png"
        ));

        workflow.dismiss_advisory();
        assert!(workflow.advisory().is_none());
    }
}
