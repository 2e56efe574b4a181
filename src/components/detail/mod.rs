//! Recipe detail page.
//!
//! Rendered entirely from the local cache; a recipe that was never shown in
//! results or suggestions cannot be opened here.

use leptos::prelude::*;

use crate::app::AppContext;
use crate::core::render::render_detail;

stylance::import_crate_style!(css, "src/components/detail/detail.module.css");

#[component]
pub fn RecipeDetail(id: String) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    match ctx.resolve(&id) {
        Ok(recipe) => {
            let html = render_detail(&recipe);
            view! { <article class=css::detail inner_html=html /> }.into_any()
        }
        Err(message) => view! { <p class=css::missing role="alert">{message}</p> }.into_any(),
    }
}
