//! Browser side of lead submission
//!
//! Binds the platform-neutral [`LeadController`](crate::core::LeadController)
//! to the lead API, the reactive form signal and the browser window.

use std::time::Duration;

use futures::future::LocalBoxFuture;
use leptos::prelude::*;

use crate::core::{FormCell, LeadForm, LeadReceipt, LeadRecord, LeadSink, SubmissionEffects, SubmitError};

/// Posts leads to the server's lead API
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiLeadSink;

#[cfg(not(feature = "ssr"))]
#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

impl LeadSink for ApiLeadSink {
    #[cfg(not(feature = "ssr"))]
    async fn save(&self, record: LeadRecord) -> Result<LeadReceipt, SubmitError> {
        use crate::core::LEADS_ENDPOINT;
        use gloo_net::http::Request;

        let response = Request::post(LEADS_ENDPOINT)
            .header("Content-Type", "application/json")
            .json(&record)
            .map_err(|e| SubmitError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| SubmitError::Network(e.to_string()))?;

        if response.ok() {
            return response
                .json::<LeadReceipt>()
                .await
                .map_err(|e| SubmitError::Decode(e.to_string()));
        }

        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => response.status_text(),
        };

        Err(SubmitError::Rejected { status, message })
    }

    #[cfg(feature = "ssr")]
    async fn save(&self, _record: LeadRecord) -> Result<LeadReceipt, SubmitError> {
        Err(SubmitError::Unavailable)
    }
}

impl FormCell for RwSignal<LeadForm> {
    fn with_form<R>(&self, f: impl FnOnce(&mut LeadForm) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Window and modal side effects of a submission
#[derive(Clone, Copy)]
pub struct BrowserEffects {
    on_close: Callback<()>,
}

impl BrowserEffects {
    pub fn new(on_close: Callback<()>) -> Self {
        Self { on_close }
    }
}

impl SubmissionEffects for BrowserEffects {
    fn open_scheduler(&self, url: &str) {
        #[cfg(not(feature = "ssr"))]
        {
            let opened = web_sys::window()
                .map(|window| window.open_with_url_and_target(url, "_blank"));
            if !matches!(opened, Some(Ok(Some(_)))) {
                // Popup blockers return no window handle
                tracing::warn!("Could not open scheduling page {url}");
            }
        }
        #[cfg(feature = "ssr")]
        {
            let _ = url;
        }
    }

    fn dismiss(&self) {
        self.on_close.run(());
    }

    fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }

    #[cfg(not(feature = "ssr"))]
    fn sleep(&self, duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(gloo_timers::future::sleep(duration))
    }

    #[cfg(feature = "ssr")]
    fn sleep(&self, _duration: Duration) -> LocalBoxFuture<'static, ()> {
        Box::pin(futures::future::pending())
    }
}
