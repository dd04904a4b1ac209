//! Core domain models and business logic for lead capture

#[cfg(feature = "ssr")]
pub mod config;
pub mod controller;
pub mod form;
#[cfg(feature = "ssr")]
pub mod gateway;
mod lead;
#[cfg(feature = "ssr")]
pub mod leads_api;
pub mod settings;

pub use controller::{
    FormCell, LeadController, LeadSink, SubmissionEffects, SubmitError, SubmitOutcome,
    SubmitStep, WRITE_TIMEOUT,
};
pub use form::{FormStatus, LeadForm, Submission, SubmissionPolicy, SubmitRejection};
pub use lead::*;
