//! Application pages module
//!
//! - Sales page (home) with the lead capture modal
//! - Not found page

mod not_found;
mod sales;

pub use not_found::NotFoundPage;
pub use sales::SalesPage;
