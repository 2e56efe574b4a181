//! UI components built with Leptos.
//!
//! - [`router`] - Page switching between search and recipe detail (main entry point)
//! - [`flash`] - Inline dismissable message
//! - [`search`] - Search form and recent-search dropdown
//! - [`grid`] - Recipe card grid
//! - [`home`] - Search page: form, results and suggestions
//! - [`detail`] - Recipe detail page served from cache
//! - [`icons`] - Centralized icon definitions (change theme here)

pub mod detail;
pub mod flash;
pub mod grid;
pub mod home;
pub mod icons;
pub mod router;
pub mod search;

pub use router::AppRouter;
