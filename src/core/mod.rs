//! Core application logic.
//!
//! This module provides:
//! - [`RecipeApi`] HTTP client over an [`api::Transport`]
//! - [`RecipeCache`] best-effort persistence of searches and recipes
//! - [`Controller`] single-flight search and suggestion actions
//! - [`render`] escaped markup for cards and the detail page
//! - [`resolver`] cache-only lookup for the detail page

pub mod api;
pub mod cache;
pub mod controller;
pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod render;
pub mod resolver;

pub use api::RecipeApi;
pub use cache::RecipeCache;
pub use controller::Controller;
