//! Modal dialog shell

use crate::ui::icon::{Icon, icons};
use leptos::prelude::*;

#[cfg(not(feature = "ssr"))]
use leptos::wasm_bindgen::JsCast;

const BACKDROP_CLASS: &str = "modal-backdrop";

/// Base modal component.
///
/// Closes through the header button, the Escape key and, unless disabled, a
/// click on the backdrop. Content stays mounted while hidden so form state
/// survives closing and reopening.
#[component]
pub fn BaseModal(
    /// Modal title
    title: &'static str,
    /// Optional subtitle/description
    #[prop(optional)]
    subtitle: Option<&'static str>,
    /// Whether modal is open
    is_open: Signal<bool>,
    /// Callback to close modal
    on_close: Callback<()>,
    /// Modal content
    children: Children,
    /// Maximum width class
    #[prop(default = "max-w-lg")]
    max_width: &'static str,
    /// Whether clicking backdrop closes modal
    #[prop(default = true)]
    close_on_backdrop: bool,
) -> impl IntoView {
    #[cfg(not(feature = "ssr"))]
    {
        use leptos::ev::keydown;

        let handle_keydown = window_event_listener(keydown, move |ev| {
            if ev.key() == "Escape" && is_open.get_untracked() {
                on_close.run(());
            }
        });

        on_cleanup(move || drop(handle_keydown));
    }

    view! {
        <div
            class=move || {
                if is_open.get() {
                    format!("fixed inset-0 z-50 flex items-center justify-center p-4 {BACKDROP_CLASS} transition-all duration-300")
                } else {
                    format!("fixed inset-0 z-50 flex items-center justify-center p-4 {BACKDROP_CLASS} opacity-0 pointer-events-none transition-all duration-300")
                }
            }
            aria-hidden=move || (!is_open.get()).to_string()
            on:click=move |e| {
                if close_on_backdrop {
                    #[cfg(not(feature = "ssr"))]
                    {
                        let on_backdrop = e
                            .target()
                            .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
                            .is_some_and(|element| element.class_list().contains(BACKDROP_CLASS));
                        if on_backdrop {
                            on_close.run(());
                        }
                    }
                    #[cfg(feature = "ssr")]
                    {
                        let _ = e;
                    }
                }
            }
        >
            <div
                class=format!("w-full {} card", max_width)
                role="dialog"
                aria-modal="true"
                aria-label=title
            >
                <div class="card-header">
                    <div>
                        <h3 class="title-lg">{title}</h3>
                        {subtitle.map(|s| view! { <p class="subtitle">{s}</p> })}
                    </div>
                    <button
                        type="button"
                        class="btn-icon"
                        on:click=move |_| on_close.run(())
                        title="Close"
                        aria-label="Close modal"
                    >
                        <Icon name=icons::X class="icon-standalone"/>
                    </button>
                </div>

                <div class="p-6">
                    {children()}
                </div>
            </div>
        </div>
    }
}
