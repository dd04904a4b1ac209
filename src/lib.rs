//! Sales landing page with lead capture
//!
//! Server-rendered Leptos application: a sales page whose calls to action open
//! a lead capture form. Submitted leads are stored in Cloud Firestore and the
//! visitor is sent on to an external scheduling page.

#![recursion_limit = "256"]

pub mod app;
pub mod core;
pub mod ui;

#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    use crate::app::*;
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    leptos::mount::hydrate_body(App);
}
