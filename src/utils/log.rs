//! Console logging.
//!
//! Messages go to the browser devtools console. On non-wasm targets these
//! functions do nothing, so host-side tests never call into JS.

/// Log an informational message.
pub fn info(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

/// Log a warning.
pub fn warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&message.into());
    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}
