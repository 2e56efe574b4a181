//! Search page: form, results and suggestions.

use leptos::prelude::*;
use leptos_icons::Icon;

use crate::app::AppContext;
use crate::components::grid::RecipeGrid;
use crate::components::icons as ic;
use crate::components::search::SearchPanel;

stylance::import_crate_style!(css, "src/components/home/home.module.css");

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <SearchPanel />
        <Results />
        <Suggestions />
    }
}

#[component]
fn Results() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    view! {
        <section class=css::section aria-label="Search results">
            <h2 class=css::heading>"Results"</h2>
            {move || match ctx.results.get() {
                Some(recipes) => view! { <RecipeGrid recipes=recipes /> }.into_any(),
                None => view! {
                    <p class=css::hint>"Search by keyword, ingredient, or both."</p>
                }
                .into_any(),
            }}
        </section>
    }
}

#[component]
fn Suggestions() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let busy = ctx.suggestions_busy;

    view! {
        <section class=css::section aria-label="Suggested recipes">
            <div class=css::heading_row>
                <h2 class=css::heading>"Suggestions"</h2>
                <button
                    class=css::refresh
                    title="Refresh suggestions"
                    disabled=move || busy.get()
                    on:click=move |_| ctx.refresh_suggestions()
                >
                    <Icon icon=ic::REFRESH />
                    <span>{move || if busy.get() { "Loading…" } else { "Refresh" }}</span>
                </button>
            </div>
            {move || match ctx.suggestions.get() {
                Some(recipes) => view! { <RecipeGrid recipes=recipes /> }.into_any(),
                None => view! {
                    <p class=css::hint>"Press refresh for a few random ideas."</p>
                }
                .into_any(),
            }}
        </section>
    }
}
