//! Lead capture modal
//!
//! Collects the visitor's contact details and hands them to a
//! [`LeadController`]. The inputs and the submit button are disabled while
//! any submission is still being written.

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::client::{ApiLeadSink, BrowserEffects};
use crate::core::{LeadController, LeadField, LeadForm, SubmissionPolicy, SubmitStep};
use crate::ui::common::{BaseModal, ErrorMessage, FormField, TextAreaField};
use crate::ui::icon::{Icon, icons};

#[component]
pub fn LeadCaptureModal(
    /// Whether the modal is visible
    is_open: Signal<bool>,
    /// Callback to close the modal
    on_close: Callback<()>,
    /// External scheduling page opened after a successful submission
    #[prop(into)]
    scheduling_url: String,
    /// Submission policy, fire-and-forget unless given
    #[prop(optional)]
    policy: SubmissionPolicy,
) -> impl IntoView {
    let form = RwSignal::new(LeadForm::new(policy));
    let controller = LeadController::new(
        form,
        ApiLeadSink,
        BrowserEffects::new(on_close),
        scheduling_url,
    );

    let value = move |field: LeadField| {
        Signal::derive(move || form.with(|form| form.field(field).to_string()))
    };
    let on_input = move |field: LeadField| {
        Callback::new(move |input: String| form.update(|form| form.set_field(field, input)))
    };

    let busy = Signal::derive(move || form.with(LeadForm::is_busy));
    let error = Signal::derive(move || form.with(|form| form.error_message().map(str::to_string)));

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        // window.open must run inside the user gesture
        match controller.begin() {
            SubmitStep::Finished(outcome) => {
                tracing::debug!("Lead form submit finished: {:?}", outcome);
            }
            SubmitStep::Awaiting(pending) => spawn_local(async move {
                let outcome = pending.await;
                tracing::debug!("Lead form submit finished: {:?}", outcome);
            }),
        }
    };

    view! {
        <BaseModal
            title="Book your free strategy call"
            subtitle="Tell us a little about you and pick a time that works."
            is_open=is_open
            on_close=on_close
        >
            <form on:submit=on_submit class="space-y-4" novalidate=true>
                <FormField
                    label="Full name"
                    name=LeadField::FullName.name()
                    required=true
                    autocomplete="name"
                    placeholder="Jane Doe"
                    value=value(LeadField::FullName)
                    on_input=on_input(LeadField::FullName)
                    disabled=busy
                />
                <FormField
                    label="Email"
                    name=LeadField::Email.name()
                    required=true
                    input_type="email"
                    autocomplete="email"
                    placeholder="you@company.com"
                    value=value(LeadField::Email)
                    on_input=on_input(LeadField::Email)
                    disabled=busy
                />
                <FormField
                    label="Phone"
                    name=LeadField::Telephone.name()
                    required=true
                    input_type="tel"
                    autocomplete="tel"
                    placeholder="+1 555 000 0000"
                    value=value(LeadField::Telephone)
                    on_input=on_input(LeadField::Telephone)
                    disabled=busy
                />
                <FormField
                    label="Business name"
                    name=LeadField::BusinessName.name()
                    autocomplete="organization"
                    placeholder="Acme Inc."
                    value=value(LeadField::BusinessName)
                    on_input=on_input(LeadField::BusinessName)
                    disabled=busy
                />
                <TextAreaField
                    label="What do you want to achieve?"
                    name=LeadField::Goal.name()
                    placeholder="More booked calls, a fuller pipeline..."
                    value=value(LeadField::Goal)
                    on_input=on_input(LeadField::Goal)
                    disabled=busy
                />

                <ErrorMessage error=error />

                <button
                    type="submit"
                    class="btn-primary w-full disabled:opacity-50 disabled:cursor-not-allowed"
                    disabled=move || busy.get()
                >
                    {move || {
                        if busy.get() {
                            view! {
                                <span class="flex items-center justify-center">
                                    <Icon name=icons::LOADER class="animate-spin -ml-1 mr-2 h-4 w-4" />
                                    "Sending your details..."
                                </span>
                            }.into_any()
                        } else {
                            view! {
                                <span class="flex items-center justify-center gap-2">
                                    <Icon name=icons::CALENDAR class="h-4 w-4" />
                                    "Schedule my call"
                                </span>
                            }.into_any()
                        }
                    }}
                </button>
            </form>
        </BaseModal>
    }
}
