//! Application router component.
//!
//! The current [`AppRoute`] lives in [`AppContext`]; it changes through
//! [`AppContext::navigate`] and browser back/forward (`popstate`).

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::detail::RecipeDetail;
use crate::components::flash::Flash;
use crate::components::home::HomePage;
use crate::components::icons as ic;
use crate::config::APP_NAME;
use crate::models::AppRoute;

stylance::import_crate_style!(css, "src/components/router.module.css");

/// Main application router.
///
/// - `/` → search page
/// - `/?id=<id>` → recipe detail page
#[component]
pub fn AppRouter() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <Header />
        <main class=css::main>
            <Flash />
            {move || match ctx.route.get() {
                AppRoute::Home => view! { <HomePage /> }.into_any(),
                AppRoute::Detail { id } => view! { <RecipeDetail id=id /> }.into_any(),
            }}
        </main>
    }
}

/// Page header with the app name and, on detail pages, a way back.
#[component]
fn Header() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let on_detail = Signal::derive(move || ctx.route.with(AppRoute::is_detail));

    view! {
        <header class=css::header>
            <a
                class=css::brand
                href="?"
                on:click=move |ev: leptos::ev::MouseEvent| {
                    ev.prevent_default();
                    ctx.navigate(AppRoute::Home);
                }
            >
                <Icon icon=ic::LOGO />
                <span>{APP_NAME}</span>
            </a>
            <Show when=move || on_detail.get()>
                <button class=css::back on:click=move |_| ctx.navigate(AppRoute::Home)>
                    <Icon icon=ic::BACK />
                    <span>"Return to Search"</span>
                </button>
            </Show>
        </header>
    }
}
