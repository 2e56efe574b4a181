//! Data models and types for the application.
//!
//! Contains domain types for:
//! - [`Recipe`], [`Step`], [`StepItem`] - Canonical recipe records and the upstream normalizer
//! - [`SearchQuery`], [`RecentSearch`] - Search form state and history
//! - [`AppRoute`] - Query-string navigation between search and detail pages

mod recipe;
mod route;
mod search;

pub use recipe::{Recipe, Step, StepItem, normalize_list};
#[cfg(test)]
pub use recipe::InstructionSet;
pub use route::AppRoute;
pub use search::{RecentSearch, SearchQuery};
