//! Small crate-wide convenience macros.
//!
//! Console logging goes through these so reducers and other pure logic can be
//! exercised by native `cargo test` runs, where calling into `web_sys` would
//! abort the test binary.

/// Log to the browser console in debug builds only.
///
/// ```rust,ignore
/// debug_log!("Fetched {} runs for {}", runs.len(), project_id);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        if cfg!(all(debug_assertions, target_arch = "wasm32")) {
            web_sys::console::log_1(&format!($($arg)*).into());
        }
    };
}

/// `console.warn` on wasm, silent elsewhere.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        if cfg!(target_arch = "wasm32") {
            web_sys::console::warn_1(&format!($($arg)*).into());
        }
    };
}

/// `console.error` on wasm, silent elsewhere.
#[macro_export]
macro_rules! error_log {
    ($($arg:tt)*) => {
        if cfg!(target_arch = "wasm32") {
            web_sys::console::error_1(&format!($($arg)*).into());
        }
    };
}
