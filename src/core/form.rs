//! Lead form state machine
//!
//! [`LeadForm`] owns the draft bound to the form inputs and the UI status
//! (idle, submitting, error). It performs no I/O: `submit` decides what the
//! caller must do next and the `settle_*` methods record how it went.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::lead::{LeadField, LeadRecord, PERSISTENCE_FAILED_MESSAGE, ValidationError};

/// How a valid submission is sequenced against the persistence write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubmissionPolicy {
    /// Redirect immediately and write the lead in the background.
    /// Write failures are logged, never shown.
    #[default]
    FireAndForget,
    /// Wait for the write; redirect only once it succeeded.
    /// Failures are shown and the draft is kept for a retry.
    Blocking,
}

impl SubmissionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionPolicy::FireAndForget => "fire-and-forget",
            SubmissionPolicy::Blocking => "blocking",
        }
    }
}

impl fmt::Display for SubmissionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown submission policy '{0}'")]
pub struct UnknownPolicy(pub String);

impl FromStr for SubmissionPolicy {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fire-and-forget" | "fire_and_forget" | "background" => {
                Ok(SubmissionPolicy::FireAndForget)
            }
            "blocking" | "await" => Ok(SubmissionPolicy::Blocking),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}

/// UI-facing status of the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    /// A blocking write is in flight; the submit control is disabled
    Submitting,
    /// Inline message shown under the fields
    Error(String),
}

/// Work handed to the caller by a successful [`LeadForm::submit`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The draft was already reset; redirect now and write `record` in the background,
    /// then call [`LeadForm::settle_detached`].
    Detached(LeadRecord),
    /// Write `record`, wait for the outcome, then call [`LeadForm::settle_awaited`].
    Awaiting(LeadRecord),
}

/// Why a submit attempt produced no work
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejection {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error("a submission is already in flight")]
    InFlight,
}

/// Draft plus status for one lead capture form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeadForm {
    draft: LeadRecord,
    status: FormStatus,
    policy: SubmissionPolicy,
    /// A detached write has not reported back yet
    detached_in_flight: bool,
}

impl LeadForm {
    pub fn new(policy: SubmissionPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn draft(&self) -> &LeadRecord {
        &self.draft
    }

    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    pub fn policy(&self) -> SubmissionPolicy {
        self.policy
    }

    pub fn field(&self, field: LeadField) -> &str {
        self.draft.get(field)
    }

    pub fn is_submitting(&self) -> bool {
        self.status == FormStatus::Submitting
    }

    /// Whether a new submission would currently be ignored
    pub fn is_busy(&self) -> bool {
        self.is_submitting() || self.detached_in_flight
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FormStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Update one field of the draft. Any shown error is cleared.
    ///
    /// Edits are ignored while a blocking write is in flight.
    pub fn set_field(&mut self, field: LeadField, value: impl Into<String>) {
        if self.is_submitting() {
            return;
        }
        self.draft.set(field, value);
        if matches!(self.status, FormStatus::Error(_)) {
            self.status = FormStatus::Idle;
        }
    }

    /// Validate the draft and start a submission according to the policy.
    ///
    /// On a validation failure the form moves to [`FormStatus::Error`] and the
    /// draft is kept for correction. While a submission is in flight, further
    /// attempts are rejected with [`SubmitRejection::InFlight`] and change nothing.
    pub fn submit(&mut self) -> Result<Submission, SubmitRejection> {
        if self.is_busy() {
            return Err(SubmitRejection::InFlight);
        }

        if let Err(err) = self.draft.validate() {
            self.status = FormStatus::Error(err.to_string());
            return Err(err.into());
        }

        match self.policy {
            SubmissionPolicy::FireAndForget => {
                self.status = FormStatus::Idle;
                self.detached_in_flight = true;
                Ok(Submission::Detached(std::mem::take(&mut self.draft)))
            }
            SubmissionPolicy::Blocking => {
                self.status = FormStatus::Submitting;
                Ok(Submission::Awaiting(self.draft.clone()))
            }
        }
    }

    /// Record that the background write of a detached submission finished
    pub fn settle_detached(&mut self) {
        self.detached_in_flight = false;
    }

    /// Record the outcome of an awaited write.
    ///
    /// Returns `true` when the caller should run the exit side effects
    /// (redirect and dismiss). On failure the draft is kept and the form shows
    /// the retry message.
    pub fn settle_awaited(&mut self, saved: bool) -> bool {
        if !self.is_submitting() {
            return false;
        }

        if saved {
            self.draft = LeadRecord::default();
            self.status = FormStatus::Idle;
        } else {
            self.status = FormStatus::Error(PERSISTENCE_FAILED_MESSAGE.to_string());
        }
        saved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(policy: SubmissionPolicy) -> LeadForm {
        let mut form = LeadForm::new(policy);
        form.set_field(LeadField::FullName, "Jane Doe");
        form.set_field(LeadField::Email, "jane@x.com");
        form.set_field(LeadField::Telephone, "+1555");
        form
    }

    #[test]
    fn test_new_form_is_idle_and_empty() {
        let form = LeadForm::new(SubmissionPolicy::Blocking);

        assert_eq!(form.status(), &FormStatus::Idle);
        assert!(form.draft().is_empty());
        assert_eq!(form.policy(), SubmissionPolicy::Blocking);
        assert!(!form.is_busy());
    }

    #[test]
    fn test_invalid_submit_moves_to_error_and_keeps_draft() {
        let mut form = LeadForm::new(SubmissionPolicy::FireAndForget);
        form.set_field(LeadField::Email, "a@b.com");
        form.set_field(LeadField::Telephone, "555");

        let result = form.submit();

        assert!(matches!(result, Err(SubmitRejection::Invalid(_))));
        assert_eq!(
            form.error_message(),
            Some("Please fill in all required fields")
        );
        assert_eq!(form.field(LeadField::Email), "a@b.com");
        assert_eq!(form.field(LeadField::Telephone), "555");
        assert!(!form.is_busy());
    }

    #[test]
    fn test_editing_clears_error() {
        let mut form = LeadForm::new(SubmissionPolicy::Blocking);
        let _ = form.submit();
        assert!(form.error_message().is_some());

        form.set_field(LeadField::FullName, "J");

        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_fire_and_forget_resets_draft_immediately() {
        let mut form = filled(SubmissionPolicy::FireAndForget);
        let expected = form.draft().clone();

        let submission = form.submit().unwrap();

        assert_eq!(submission, Submission::Detached(expected));
        assert!(form.draft().is_empty());
        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_fire_and_forget_guards_against_double_submit() {
        let mut form = filled(SubmissionPolicy::FireAndForget);
        form.submit().unwrap();

        form.set_field(LeadField::FullName, "Jane Doe");
        form.set_field(LeadField::Email, "jane@x.com");
        form.set_field(LeadField::Telephone, "+1555");

        assert_eq!(form.submit(), Err(SubmitRejection::InFlight));
        assert_eq!(form.field(LeadField::FullName), "Jane Doe");

        form.settle_detached();
        assert!(matches!(form.submit(), Ok(Submission::Detached(_))));
    }

    #[test]
    fn test_blocking_enters_submitting() {
        let mut form = filled(SubmissionPolicy::Blocking);
        let expected = form.draft().clone();

        let submission = form.submit().unwrap();

        assert_eq!(submission, Submission::Awaiting(expected.clone()));
        assert!(form.is_submitting());
        assert_eq!(form.draft(), &expected);
    }

    #[test]
    fn test_blocking_ignores_reentrant_submit() {
        let mut form = filled(SubmissionPolicy::Blocking);
        form.submit().unwrap();

        assert_eq!(form.submit(), Err(SubmitRejection::InFlight));
        assert!(form.is_submitting());
    }

    #[test]
    fn test_blocking_ignores_edits_while_submitting() {
        let mut form = filled(SubmissionPolicy::Blocking);
        form.submit().unwrap();

        form.set_field(LeadField::FullName, "Someone Else");

        assert_eq!(form.field(LeadField::FullName), "Jane Doe");
    }

    #[test]
    fn test_blocking_success_resets() {
        let mut form = filled(SubmissionPolicy::Blocking);
        form.submit().unwrap();

        assert!(form.settle_awaited(true));
        assert!(form.draft().is_empty());
        assert_eq!(form.status(), &FormStatus::Idle);
    }

    #[test]
    fn test_blocking_failure_keeps_draft_for_retry() {
        let mut form = filled(SubmissionPolicy::Blocking);
        let before = form.draft().clone();
        form.submit().unwrap();

        assert!(!form.settle_awaited(false));
        assert_eq!(form.draft(), &before);
        assert_eq!(
            form.error_message(),
            Some("Something went wrong. Please try again")
        );

        // Retry from the error state
        assert!(matches!(form.submit(), Ok(Submission::Awaiting(_))));
        assert!(form.is_submitting());
    }

    #[test]
    fn test_settle_awaited_without_submission_is_noop() {
        let mut form = filled(SubmissionPolicy::Blocking);
        assert!(!form.settle_awaited(true));
        assert_eq!(form.field(LeadField::FullName), "Jane Doe");
    }

    #[test]
    fn test_policy_parse_and_display() {
        assert_eq!(
            "fire-and-forget".parse::<SubmissionPolicy>(),
            Ok(SubmissionPolicy::FireAndForget)
        );
        assert_eq!(
            " Blocking ".parse::<SubmissionPolicy>(),
            Ok(SubmissionPolicy::Blocking)
        );
        assert!("later".parse::<SubmissionPolicy>().is_err());
        assert_eq!(SubmissionPolicy::Blocking.to_string(), "blocking");
    }
}
