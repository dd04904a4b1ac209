pub mod common;
pub mod icon;
pub mod lead_capture;
pub mod pages;

pub use icon::{Icon, icons};
pub use lead_capture::LeadCaptureModal;
pub use pages::{NotFoundPage, SalesPage};
