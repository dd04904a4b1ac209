//! Lead capture modal and its browser bindings

mod client;
mod modal;

pub use client::{ApiLeadSink, BrowserEffects};
pub use modal::LeadCaptureModal;
