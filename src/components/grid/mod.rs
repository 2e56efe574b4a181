//! Recipe card grid.
//!
//! Markup comes from [`render_cards`]; each card's navigation command runs
//! when the card is clicked or activated from the keyboard.

use leptos::{ev, prelude::*};

use crate::app::AppContext;
use crate::core::render::{CardGrid, render_cards};
use crate::models::Recipe;

stylance::import_crate_style!(css, "src/components/grid/grid.module.css");

#[component]
pub fn RecipeGrid(recipes: Vec<Recipe>) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext must be provided");

    match render_cards(&recipes) {
        CardGrid::Empty(html) => view! { <div class=css::empty inner_html=html /> }.into_any(),
        CardGrid::Cards(cards) => view! {
            <div class=css::grid>
                {cards
                    .into_iter()
                    .map(|card| {
                        let on_click = card.navigate.clone();
                        let on_key = card.navigate.clone();
                        view! {
                            <div
                                class=css::cell
                                role="link"
                                tabindex="0"
                                data-recipe-id=card.id.to_string()
                                on:click=move |_| ctx.navigate(on_click.clone())
                                on:keydown=move |ev: ev::KeyboardEvent| {
                                    if ev.key() == "Enter" {
                                        ctx.navigate(on_key.clone());
                                    }
                                }
                                inner_html=card.html
                            />
                        }
                    })
                    .collect_view()}
            </div>
        }
        .into_any(),
    }
}
