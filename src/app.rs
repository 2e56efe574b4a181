//! Root application module.
//!
//! Contains the main App component, AppContext definition, and
//! application-level setup logic following Leptos conventions.

use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

use crate::components::AppRouter;
use crate::config;
use crate::core::error::ActionError;
use crate::core::{Controller, RecipeApi, RecipeCache};
use crate::models::{AppRoute, RecentSearch, Recipe, SearchQuery};
use crate::utils::storage::LocalStore;
use crate::utils::{FetchTransport, dom, log};

/// Controller wired to the browser fetch API and localStorage.
pub type AppController = Controller<FetchTransport, LocalStore>;

// ============================================================================
// AppContext
// ============================================================================

/// Application-wide reactive context.
///
/// Constructed once at the root and accessed from child components with
/// `use_context::<AppContext>()`. The controller is the only owner of the
/// HTTP client and the cache; the signals mirror what the page shows.
#[derive(Clone, Copy)]
pub struct AppContext {
    controller: StoredValue<Rc<AppController>, LocalStorage>,

    /// Current page.
    pub route: RwSignal<AppRoute>,
    /// Search form fields.
    pub query: RwSignal<SearchQuery>,
    /// Last rendered search results (`None` until there is something to show).
    pub results: RwSignal<Option<Vec<Recipe>>>,
    /// Last rendered suggestions (`None` until the first refresh).
    pub suggestions: RwSignal<Option<Vec<Recipe>>>,
    /// Recent-search dropdown contents, newest first.
    pub recent: RwSignal<Vec<RecentSearch>>,
    /// Search controls disabled while a search is in flight.
    pub search_busy: RwSignal<bool>,
    /// Refresh control disabled while suggestions are loading.
    pub suggestions_busy: RwSignal<bool>,
    /// Inline dismissable message.
    pub flash: RwSignal<Option<String>>,
}

impl AppContext {
    /// Creates the context and restores cached state. No network calls.
    pub fn new() -> Self {
        let store = LocalStore;
        let api_key = config::resolve_api_key(&store);
        if api_key.is_empty() {
            log::warn(config::messages::MISSING_API_KEY);
        }
        let api = RecipeApi::new(FetchTransport, api_key, config::FETCH_TIMEOUT_MS);
        let controller = Rc::new(Controller::new(api, RecipeCache::new(store)));

        let last_search = controller.last_search();
        let results = last_search.as_ref().map(|_| controller.cached_results());
        let suggestions = Some(controller.cached_suggestions()).filter(|s| !s.is_empty());

        let search_busy = RwSignal::new(false);
        let suggestions_busy = RwSignal::new(false);
        controller
            .search_lock()
            .observe(move |busy| search_busy.set(busy));
        controller
            .suggestions_lock()
            .observe(move |busy| suggestions_busy.set(busy));

        Self {
            route: RwSignal::new(AppRoute::current()),
            query: RwSignal::new(last_search.unwrap_or_default()),
            results: RwSignal::new(results),
            suggestions: RwSignal::new(suggestions),
            recent: RwSignal::new(controller.recent_searches()),
            search_busy,
            suggestions_busy,
            flash: RwSignal::new(None),
            controller: StoredValue::new_local(controller),
        }
    }

    fn controller(&self) -> Rc<AppController> {
        self.controller.get_value()
    }

    /// Navigate to `route`, pushing browser history.
    pub fn navigate(&self, route: AppRoute) {
        route.push();
        self.flash.set(None);
        self.route.set(route);
        dom::scroll_to_top();
    }

    /// Submit the search form.
    pub fn search(&self) {
        let ctx = *self;
        let controller = self.controller();
        let query = self.query.get_untracked();

        spawn_local(async move {
            match controller.search(&query).await {
                Ok(recipes) => {
                    ctx.flash.set(None);
                    ctx.query.set(query.trimmed());
                    ctx.results.set(Some(recipes));
                    ctx.recent.set(controller.recent_searches());
                }
                // The controls are already disabled; nothing to report.
                Err(ActionError::Busy) => {}
                Err(e) => ctx.report(e.to_string()),
            }
        });
    }

    /// Fetch a new set of suggestions.
    pub fn refresh_suggestions(&self) {
        let ctx = *self;
        let controller = self.controller();

        spawn_local(async move {
            match controller.refresh_suggestions().await {
                Ok(recipes) => {
                    ctx.flash.set(None);
                    ctx.suggestions.set(Some(recipes));
                }
                Err(ActionError::Busy) => {}
                Err(e) => ctx.report(e.to_string()),
            }
        });
    }

    /// Fill the form from a recent search without running it.
    pub fn recall_recent(&self, canonical_key: &str) {
        if let Some(query) = self.controller().recall_recent(canonical_key) {
            self.query.set(query);
        }
    }

    /// Resolve a recipe for the detail page from cache.
    pub fn resolve(&self, id: &str) -> Result<Recipe, String> {
        self.controller().resolve(id).map_err(|e| e.to_string())
    }

    /// Show an inline message.
    pub fn report(&self, message: impl Into<String>) {
        let message = message.into();
        log::info(&message);
        self.flash.set(Some(message));
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Root application component with error boundary.
///
/// This component:
/// - Creates and provides the global AppContext
/// - Keeps the route in sync with browser back/forward
/// - Wraps the app in an ErrorBoundary for graceful error handling
#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use wasm_bindgen::prelude::Closure;

        let closure = Closure::wrap(Box::new(move || {
            ctx.route.set(AppRoute::current());
        }) as Box<dyn Fn()>);

        if let Some(window) = dom::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // Keep the closure alive for the lifetime of the app
        closure.forget();
    }

    view! {
        <ErrorBoundary
            fallback=|errors| view! {
                <div class="fatal">
                    <h1>"Something went wrong"</h1>
                    <p>"An unexpected error occurred. Please try reloading the page."</p>
                    <ul>
                        {move || errors.get()
                            .into_iter()
                            .map(|(_, e)| view! { <li>{e.to_string()}</li> })
                            .collect::<Vec<_>>()
                        }
                    </ul>
                    <button on:click=move |_| {
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().reload();
                        }
                    }>
                        "Reload Page"
                    </button>
                </div>
            }
        >
            <AppRouter />
        </ErrorBoundary>
    }
}
