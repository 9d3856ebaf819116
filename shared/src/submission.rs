use crate::ClassificationResult;
use crate::config::{ClientConfig, UPLOAD_FIELD};
use crate::error::WorkflowError;
use crate::selection::{ImageSource, SelectionState};
use crate::validate::validate;
use futures::FutureExt;
use futures::future::{self, AbortHandle, Abortable, Either, LocalBoxFuture};
use log::{debug, error, info, warn};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::pin;
use std::rc::Rc;
use std::time::Duration;

/// The image part of the multipart body.
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePayload {
    pub field_name: &'static str,
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Status and body text of a finished HTTP exchange, whatever the status.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network access used by a submission. Dropping a returned future must
/// abort the underlying request.
pub trait Transport {
    fn fetch_sample(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, WorkflowError>>;

    fn post_image(
        &self,
        endpoint: &str,
        image: ImagePayload,
    ) -> impl Future<Output = Result<HttpReply, WorkflowError>>;
}

pub trait Clock {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;
}

#[derive(Debug)]
pub struct Completion {
    pub attempt: u64,
    pub result: Result<ClassificationResult, WorkflowError>,
}

/// An accepted submission. Await it to run the exchange.
pub struct Submission {
    attempt: u64,
    future: LocalBoxFuture<'static, Completion>,
}

impl Submission {
    pub fn attempt(&self) -> u64 {
        self.attempt
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submission")
            .field("attempt", &self.attempt)
            .finish_non_exhaustive()
    }
}

impl IntoFuture for Submission {
    type Output = Completion;
    type IntoFuture = LocalBoxFuture<'static, Completion>;

    fn into_future(self) -> Self::IntoFuture {
        self.future
    }
}

/// Clears the in-flight slot when the submission future finishes or is
/// dropped, unless a newer attempt has taken the slot meanwhile.
struct InFlight {
    slot: Rc<Cell<Option<u64>>>,
    attempt: u64,
}

impl Drop for InFlight {
    fn drop(&mut self) {
        if self.slot.get() == Some(self.attempt) {
            self.slot.set(None);
        }
    }
}

pub struct SubmissionController<T, C> {
    config: Rc<ClientConfig>,
    transport: Rc<T>,
    clock: Rc<C>,
    in_flight: Rc<Cell<Option<u64>>>,
    abort: RefCell<Option<AbortHandle>>,
    next_attempt: Cell<u64>,
}

impl<T, C> SubmissionController<T, C>
where
    T: Transport + 'static,
    C: Clock + 'static,
{
    pub fn new(config: ClientConfig, transport: T, clock: C) -> Self {
        Self {
            config: Rc::new(config),
            transport: Rc::new(transport),
            clock: Rc::new(clock),
            in_flight: Rc::new(Cell::new(None)),
            abort: RefCell::new(None),
            next_attempt: Cell::new(0),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.get().is_some()
    }

    /// Checks the preconditions synchronously and marks the controller as
    /// processing. Nothing touches the network until the returned
    /// submission is awaited.
    pub fn submit(&self, state: &SelectionState) -> Result<Submission, WorkflowError> {
        let source = state
            .active_source()
            .cloned()
            .ok_or(WorkflowError::NoSelection)?;

        if let Some(pending) = self.in_flight.get() {
            warn!("Submit ignored: attempt {pending} is still in flight");
            return Err(WorkflowError::SubmissionInProgress);
        }

        let attempt = self.next_attempt.get() + 1;
        self.next_attempt.set(attempt);
        self.in_flight.set(Some(attempt));
        info!("Submitting {source} (attempt {attempt})");

        let guard = InFlight {
            slot: Rc::clone(&self.in_flight),
            attempt,
        };
        let (handle, registration) = AbortHandle::new_pair();
        self.abort.replace(Some(handle));

        let config = Rc::clone(&self.config);
        let transport = Rc::clone(&self.transport);
        let clock = Rc::clone(&self.clock);
        let work = async move {
            let _guard = guard;
            exchange_with_deadline(&*transport, &*clock, &config, source).await
        };

        let future = Abortable::new(work, registration)
            .map(move |outcome| Completion {
                attempt,
                result: outcome.unwrap_or_else(|_| Err(WorkflowError::Cancelled)),
            })
            .boxed_local();

        Ok(Submission { attempt, future })
    }

    /// Aborts the in-flight submission, if any. Returns whether one was
    /// pending.
    pub fn cancel(&self) -> bool {
        let Some(attempt) = self.in_flight.take() else {
            return false;
        };
        if let Some(handle) = self.abort.take() {
            handle.abort();
        }
        info!("Cancelled submission attempt {attempt}");
        true
    }
}

async fn exchange_with_deadline<T: Transport, C: Clock>(
    transport: &T,
    clock: &C,
    config: &ClientConfig,
    source: ImageSource,
) -> Result<ClassificationResult, WorkflowError> {
    let exchange = pin!(exchange(transport, config, source));
    let deadline = pin!(clock.sleep(config.request_timeout));

    match future::select(exchange, deadline).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => {
            warn!(
                "No response from {} within {:?}, aborting request",
                config.endpoint, config.request_timeout
            );
            Err(WorkflowError::Timeout(config.request_timeout))
        }
    }
}

async fn exchange<T: Transport>(
    transport: &T,
    config: &ClientConfig,
    source: ImageSource,
) -> Result<ClassificationResult, WorkflowError> {
    let payload = resolve(transport, config, source).await?;

    info!("Sending request to API...");
    let reply = transport.post_image(&config.endpoint, payload).await?;

    if !reply.is_success() {
        error!(
            "Classification service answered {}: {}",
            reply.status, reply.body
        );
        return Err(WorkflowError::ServiceError {
            status: reply.status,
            body: reply.body,
        });
    }

    debug!("Raw API response: {}", reply.body);
    validate(&reply.body)
}

async fn resolve<T: Transport>(
    transport: &T,
    config: &ClientConfig,
    source: ImageSource,
) -> Result<ImagePayload, WorkflowError> {
    match source {
        ImageSource::Sample(index) => {
            let path = config.sample_path(index);
            debug!("Fetching sample asset {path}");
            let bytes = transport.fetch_sample(&path).await?;
            Ok(ImagePayload {
                field_name: UPLOAD_FIELD,
                filename: index.asset_name(),
                mime_type: "image/png".to_string(),
                bytes,
            })
        }
        ImageSource::Upload(file) => {
            info!("File name: {}", file.name);
            info!("File size: {}", file.byte_size);
            info!("File type: {}", file.mime_type);
            Ok(ImagePayload {
                field_name: UPLOAD_FIELD,
                filename: file.name,
                mime_type: file.mime_type,
                bytes: file.data,
            })
        }
    }
}
