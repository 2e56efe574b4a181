//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuArrowLeft as Back, LuChefHat as Logo, LuHistory as History, LuRefreshCw as Refresh,
        LuSearch as Search, LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Refresh, BsArrowLeft as Back, BsClockHistory as History,
        BsEggFried as Logo, BsSearch as Search, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(LOGO, Logo);
themed_icon!(SEARCH, Search);
themed_icon!(REFRESH, Refresh);
themed_icon!(HISTORY, History);
themed_icon!(BACK, Back);
themed_icon!(CLOSE, Close);
