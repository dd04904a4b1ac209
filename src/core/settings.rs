//! Build-time settings shared by the server render and the hydrated client.
//!
//! Both values are read with `option_env!` so the SSR binary and the WASM
//! bundle, built from the same environment, always agree.

use super::form::SubmissionPolicy;

/// Scheduling page opened after a lead is captured when `SCHEDULING_URL` is unset
pub const DEFAULT_SCHEDULING_URL: &str = "https://calendly.com";

/// External scheduling URL the visitor is sent to after submitting the form
pub fn scheduling_url() -> &'static str {
    resolve_scheduling_url(option_env!("SCHEDULING_URL"))
}

/// Submission policy selected with `LEAD_SUBMISSION_POLICY`
pub fn submission_policy() -> SubmissionPolicy {
    resolve_submission_policy(option_env!("LEAD_SUBMISSION_POLICY"))
}

fn resolve_scheduling_url(value: Option<&'static str>) -> &'static str {
    value
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .unwrap_or(DEFAULT_SCHEDULING_URL)
}

fn resolve_submission_policy(value: Option<&str>) -> SubmissionPolicy {
    match value.map(str::parse::<SubmissionPolicy>) {
        Some(Ok(policy)) => policy,
        Some(Err(err)) => {
            tracing::warn!("{err}, falling back to {}", SubmissionPolicy::default());
            SubmissionPolicy::default()
        }
        None => SubmissionPolicy::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduling_url_fallback() {
        assert_eq!(resolve_scheduling_url(None), DEFAULT_SCHEDULING_URL);
        assert_eq!(resolve_scheduling_url(Some("  ")), DEFAULT_SCHEDULING_URL);
    }

    #[test]
    fn test_scheduling_url_override() {
        assert_eq!(
            resolve_scheduling_url(Some("https://calendly.com/acme/strategy")),
            "https://calendly.com/acme/strategy"
        );
    }

    #[test]
    fn test_policy_fallback() {
        assert_eq!(resolve_submission_policy(None), SubmissionPolicy::FireAndForget);
        assert_eq!(
            resolve_submission_policy(Some("eventually")),
            SubmissionPolicy::FireAndForget
        );
    }

    #[test]
    fn test_policy_override() {
        assert_eq!(
            resolve_submission_policy(Some("blocking")),
            SubmissionPolicy::Blocking
        );
    }
}
