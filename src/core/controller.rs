//! Lead submission controller
//!
//! Drives a [`LeadForm`] through one submission: validation, the persistence
//! write, and the exit side effects (open the scheduling page, dismiss the
//! modal). The controller is platform-neutral; the browser supplies the form
//! storage, the lead sink and the side effects.
//!
//! [`LeadController::begin`] runs synchronously so that the fire-and-forget
//! redirect happens inside the triggering event handler.

use std::cell::RefCell;
use std::future::Future;
use std::pin::pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use futures::future::{self, Either, LocalBoxFuture};

use super::form::{LeadForm, Submission, SubmitRejection};
use super::lead::{LeadReceipt, LeadRecord};

/// Upper bound on one persistence write before it counts as failed
pub const WRITE_TIMEOUT: Duration = Duration::from_secs(15);

/// Failure to hand a lead to the persistence side
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Lead rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Lead submission is not available here")]
    Unavailable,

    #[error("Lead store did not answer in time")]
    TimedOut,
}

/// Destination for submitted leads
pub trait LeadSink: Clone + 'static {
    fn save(&self, record: LeadRecord) -> impl Future<Output = Result<LeadReceipt, SubmitError>>;
}

/// Side effects performed around a submission
pub trait SubmissionEffects: Clone + 'static {
    /// Open the external scheduling page in a new navigation context
    fn open_scheduler(&self, url: &str);

    /// Close the surrounding modal
    fn dismiss(&self);

    /// Run a background task that outlives the current call
    fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>);

    /// Resolve once `duration` has elapsed
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()>;
}

/// Shared storage for a [`LeadForm`].
///
/// `with_form` returns `None` once the storage is gone (for example after the
/// modal was unmounted), in which case late results are dropped.
pub trait FormCell: Clone + 'static {
    fn with_form<R>(&self, f: impl FnOnce(&mut LeadForm) -> R) -> Option<R>;
}

impl FormCell for Rc<RefCell<LeadForm>> {
    fn with_form<R>(&self, f: impl FnOnce(&mut LeadForm) -> R) -> Option<R> {
        let mut form = self.try_borrow_mut().ok()?;
        Some(f(&mut *form))
    }
}

/// Result of one call to [`LeadController::submit`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Required fields missing; the form shows the validation message
    Invalid,
    /// A submission was already in flight
    Ignored,
    /// The visitor was sent to the scheduling page
    Redirected,
    /// The write failed; the form shows the retry message
    Failed,
    /// The form storage went away before the write finished
    Abandoned,
}

/// What is left of a submission once [`LeadController::begin`] returned
pub enum SubmitStep {
    /// Nothing left to wait for
    Finished(SubmitOutcome),
    /// A blocking write is in flight; the future resolves with its outcome
    Awaiting(LocalBoxFuture<'static, SubmitOutcome>),
}

impl SubmitStep {
    pub async fn finish(self) -> SubmitOutcome {
        match self {
            SubmitStep::Finished(outcome) => outcome,
            SubmitStep::Awaiting(pending) => pending.await,
        }
    }
}

/// Coordinates form state, persistence and exit side effects
#[derive(Clone)]
pub struct LeadController<C, S, E> {
    form: C,
    sink: S,
    effects: E,
    scheduling_url: Arc<str>,
}

impl<C, S, E> LeadController<C, S, E>
where
    C: FormCell,
    S: LeadSink,
    E: SubmissionEffects,
{
    pub fn new(form: C, sink: S, effects: E, scheduling_url: impl Into<String>) -> Self {
        Self {
            form,
            sink,
            effects,
            scheduling_url: Arc::from(scheduling_url.into()),
        }
    }

    /// Start a submission of the current draft without suspending.
    ///
    /// Under the fire-and-forget policy the redirect has happened by the time
    /// this returns and the write runs as a detached task. Under the blocking
    /// policy the returned [`SubmitStep::Awaiting`] future performs the write
    /// and the redirect.
    pub fn begin(&self) -> SubmitStep {
        let Some(started) = self.form.with_form(LeadForm::submit) else {
            return SubmitStep::Finished(SubmitOutcome::Abandoned);
        };

        match started {
            Err(SubmitRejection::Invalid(err)) => {
                tracing::debug!("Lead form rejected: {err}");
                SubmitStep::Finished(SubmitOutcome::Invalid)
            }
            Err(SubmitRejection::InFlight) => {
                tracing::debug!("Ignoring submit while a lead is in flight");
                SubmitStep::Finished(SubmitOutcome::Ignored)
            }
            Ok(Submission::Detached(record)) => {
                self.redirect();
                let timeout = self.effects.sleep(WRITE_TIMEOUT);
                self.effects.spawn_detached(Box::pin(write_detached(
                    self.sink.clone(),
                    self.form.clone(),
                    record,
                    timeout,
                )));
                SubmitStep::Finished(SubmitOutcome::Redirected)
            }
            Ok(Submission::Awaiting(record)) => {
                let controller = self.clone();
                SubmitStep::Awaiting(Box::pin(async move { controller.write_awaited(record).await }))
            }
        }
    }

    /// Submit the current draft and wait until nothing is left in flight
    /// for the blocking policy.
    pub async fn submit(&self) -> SubmitOutcome {
        self.begin().finish().await
    }

    async fn write_awaited(&self, record: LeadRecord) -> SubmitOutcome {
        let timeout = self.effects.sleep(WRITE_TIMEOUT);
        let saved = match save_within(&self.sink, record, timeout).await {
            Ok(receipt) => {
                tracing::info!("Lead saved with id {}", receipt.id);
                true
            }
            Err(err) => {
                tracing::warn!("Failed to save lead: {err}");
                false
            }
        };

        match self.form.with_form(|form| form.settle_awaited(saved)) {
            Some(true) => {
                self.redirect();
                SubmitOutcome::Redirected
            }
            Some(false) => SubmitOutcome::Failed,
            None => SubmitOutcome::Abandoned,
        }
    }

    fn redirect(&self) {
        self.effects.open_scheduler(&self.scheduling_url);
        self.effects.dismiss();
    }
}

async fn save_within<S: LeadSink>(
    sink: &S,
    record: LeadRecord,
    timeout: LocalBoxFuture<'static, ()>,
) -> Result<LeadReceipt, SubmitError> {
    let save = pin!(sink.save(record));
    match future::select(save, timeout).await {
        Either::Left((result, _)) => result,
        Either::Right(((), _)) => Err(SubmitError::TimedOut),
    }
}

/// Background write for the fire-and-forget policy. Owns everything it touches.
async fn write_detached<S: LeadSink, C: FormCell>(
    sink: S,
    form: C,
    record: LeadRecord,
    timeout: LocalBoxFuture<'static, ()>,
) {
    match save_within(&sink, record, timeout).await {
        Ok(receipt) => tracing::info!("Lead saved with id {}", receipt.id),
        Err(err) => tracing::error!("Failed to save lead: {err}"),
    }
    form.with_form(LeadForm::settle_detached);
}
