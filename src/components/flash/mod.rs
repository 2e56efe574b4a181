//! Inline message shown for validation, network and lookup errors.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/flash/flash.module.css");

#[component]
pub fn Flash() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <Show when=move || ctx.flash.with(Option::is_some)>
            <div class=css::flash role="alert">
                <span class=css::message>{move || ctx.flash.get().unwrap_or_default()}</span>
                <button
                    class=css::dismiss
                    title="Dismiss"
                    aria-label="Dismiss"
                    on:click=move |_| ctx.flash.set(None)
                >
                    <Icon icon=ic::CLOSE />
                </button>
            </div>
        </Show>
    }
}
