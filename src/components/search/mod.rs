//! Search form with keyword and ingredient fields and recent searches.
//!
//! Every control in the form is disabled while a search is in flight.

use leptos::{ev, prelude::*};
use leptos_icons::Icon;
use web_sys::HtmlSelectElement;

use crate::app::AppContext;
use crate::components::icons as ic;

stylance::import_crate_style!(css, "src/components/search/search.module.css");

#[component]
pub fn SearchPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");
    let busy = ctx.search_busy;

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        ctx.search();
    };

    // Choosing a recent search only fills the form. The dropdown goes back to
    // its placeholder so the same entry can be picked again.
    let on_recent = move |ev: ev::Event| {
        let key = event_target_value(&ev);
        if !key.is_empty() {
            ctx.recall_recent(&key);
        }
        reset_to_placeholder(&event_target::<HtmlSelectElement>(&ev));
    };

    view! {
        <section class=css::panel aria-label="Search recipes">
            <form class=css::form on:submit=on_submit>
                <input
                    class=css::input
                    type="search"
                    placeholder="Keyword (e.g. stew)"
                    aria-label="Keyword"
                    prop:value=move || ctx.query.with(|q| q.text.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.query.update(|q| q.text = value);
                    }
                    disabled=move || busy.get()
                />
                <input
                    class=css::input
                    type="search"
                    placeholder="Ingredient (e.g. beef)"
                    aria-label="Ingredient"
                    prop:value=move || ctx.query.with(|q| q.ingredient.clone())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        ctx.query.update(|q| q.ingredient = value);
                    }
                    disabled=move || busy.get()
                />
                <button class=css::submit type="submit" disabled=move || busy.get()>
                    <Icon icon=ic::SEARCH />
                    <span>{move || if busy.get() { "Searching…" } else { "Search" }}</span>
                </button>
                <label class=css::recent>
                    <Icon icon=ic::HISTORY />
                    <select
                        aria-label="Recent searches"
                        on:change=on_recent
                        disabled=move || busy.get()
                    >
                        <option value="" selected=true disabled=true>"Choose a recent search…"</option>
                        <For
                            each=move || ctx.recent.get()
                            key=|entry| (entry.canonical_key.clone(), entry.timestamp)
                            children=move |entry| {
                                view! {
                                    <option value=entry.canonical_key.clone()>{entry.label()}</option>
                                }
                            }
                        />
                    </select>
                </label>
            </form>
        </section>
    }
}

fn reset_to_placeholder(select: &HtmlSelectElement) {
    select.set_selected_index(0);
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_recent_select_returns_to_placeholder() {
        let select: HtmlSelectElement = document()
            .create_element("select")
            .unwrap()
            .dyn_into()
            .unwrap();
        select.set_inner_html(
            r#"<option value="" disabled>pick</option><option value="stew|beef">stew + beef</option>"#,
        );
        select.set_value("stew|beef");
        assert_eq!(select.selected_index(), 1);

        reset_to_placeholder(&select);
        assert_eq!(select.selected_index(), 0);
        assert_eq!(select.value(), "");
    }
}
