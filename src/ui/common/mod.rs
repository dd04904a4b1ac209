//! Common reusable UI components
//!
//! Building blocks shared by the sales page and the lead capture modal.

pub mod form;
pub mod message;
pub mod modal;

pub use form::{FormField, TextAreaField};
pub use message::ErrorMessage;
pub use modal::BaseModal;
