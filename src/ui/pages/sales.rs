//! Sales landing page
//!
//! A single long-form page:
//! - Hero section with the primary call to action
//! - Pain points the offer addresses
//! - Final call to action
//! - Sticky bottom bar on small screens
//!
//! Every call to action opens the [`LeadCaptureModal`].

use leptos::prelude::*;
use leptos_meta::{Meta, Title};

use crate::core::settings;
use crate::ui::icon::{Icon, icons};
use crate::ui::lead_capture::LeadCaptureModal;

const PAIN_POINTS: [(&str, &str); 4] = [
    (
        "Leads go cold before you call back",
        "Prospects fill in a form and hear nothing for days. By then they have booked with someone else.",
    ),
    (
        "Your calendar is full of no-shows",
        "Calls booked without context waste the slots you need for buyers who are ready.",
    ),
    (
        "Marketing spend with no clear return",
        "Traffic arrives, but nothing turns visitors into conversations you can close.",
    ),
    (
        "Follow-up depends on memory",
        "Contact details sit in inboxes and spreadsheets instead of one place your team can act on.",
    ),
];

#[component]
pub fn SalesPage() -> impl IntoView {
    let modal_open = RwSignal::new(false);
    let open_modal = Callback::new(move |_: ()| modal_open.set(true));
    let close_modal = Callback::new(move |_: ()| modal_open.set(false));

    view! {
        <Title text="Book a Strategy Call"/>
        <Meta
            name="description"
            content="Turn visitors into booked sales calls. Leave your details and pick a time that suits you."
        />

        <div class="min-h-screen bg-theme-primary overflow-x-hidden pb-24 sm:pb-0">
            // Hero Section
            <section class="min-h-[80vh] flex items-center justify-center px-4 pt-16">
                <div class="text-center max-w-4xl mx-auto">
                    <h1 class="text-5xl sm:text-6xl font-bold text-theme-primary mb-6 tracking-tight">
                        "Fill your calendar with buyers, not browsers"
                    </h1>
                    <p class="text-xl text-theme-secondary max-w-2xl mx-auto mb-10 leading-relaxed">
                        "We build the funnel that turns your traffic into qualified sales calls. "
                        "Tell us about your business and book a free strategy session."
                    </p>
                    <CtaButton label="Book my free call" on_click=open_modal />
                </div>
            </section>

            // Pain Points Section
            <section class="py-20 px-4 bg-theme-secondary/10">
                <div class="max-w-5xl mx-auto">
                    <h2 class="text-3xl sm:text-4xl font-bold text-theme-primary text-center mb-12">
                        "Sound familiar?"
                    </h2>
                    <ul class="grid md:grid-cols-2 gap-6">
                        {PAIN_POINTS
                            .into_iter()
                            .map(|(title, description)| view! { <PainPoint title=title description=description /> })
                            .collect_view()}
                    </ul>
                </div>
            </section>

            // Final CTA Section
            <section class="py-20 px-4">
                <div class="max-w-3xl mx-auto text-center">
                    <h2 class="text-3xl sm:text-4xl font-bold text-theme-primary mb-4">
                        "Ready to talk?"
                    </h2>
                    <p class="text-lg text-theme-secondary mb-8">
                        "Thirty minutes, no obligation. You leave with a plan either way."
                    </p>
                    <CtaButton label="Schedule my strategy call" on_click=open_modal />
                </div>
            </section>

            // Sticky CTA
            <div class="fixed bottom-0 inset-x-0 z-40 p-4 bg-theme-primary/95 border-t border-theme sm:hidden">
                <CtaButton label="Book my free call" on_click=open_modal full_width=true />
            </div>
        </div>

        <LeadCaptureModal
            is_open=modal_open.into()
            on_close=close_modal
            scheduling_url=settings::scheduling_url()
            policy=settings::submission_policy()
        />
    }
}

#[component]
fn CtaButton(
    label: &'static str,
    on_click: Callback<()>,
    #[prop(default = false)] full_width: bool,
) -> impl IntoView {
    view! {
        <button
            type="button"
            class="landing-btn-primary inline-flex items-center justify-center gap-2"
            class:w-full=full_width
            on:click=move |_| on_click.run(())
        >
            {label}
            <Icon name=icons::ARROW_RIGHT class="w-5 h-5" />
        </button>
    }
}

#[component]
fn PainPoint(title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <li class="flex gap-4 p-6 rounded-xl border border-theme bg-theme-primary">
            <Icon name=icons::CHECK class="w-6 h-6 shrink-0 mt-1" />
            <div>
                <h3 class="text-lg font-semibold text-theme-primary mb-1">{title}</h3>
                <p class="text-theme-secondary">{description}</p>
            </div>
        </li>
    }
}
