use wasm_bindgen::prelude::*;

mod macros;

mod command_executors;
mod components;
mod constants;
mod dom_utils;
mod feed;
mod messages;
mod models;
mod network;
mod polling;
mod reducers;
mod state;
mod toast;
mod ui;
mod update;
mod utils;
mod views;

use network::config::RuntimeConfig;
use network::ApiConfig;

// Main entry point for the WASM application
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Initialize better panic messages
    console_error_panic_hook::set_once();

    network::init_api_config(ApiConfig::from_env());
    debug_log!("Backend at {}", network::api_config().base_url());

    let document = dom_utils::document()?;

    // Fixed layout first, then the delegated listeners that hang off it
    ui::setup::create_base_ui(&document)?;
    ui::events::setup_ui_event_handlers(&document)?;

    // Best-effort initial load; each fetch reports back on its own
    state::dispatch_global_message(messages::Message::Bootstrap);

    Ok(())
}

/// Override the backend origin at runtime, e.g.
/// `init_api_config_js({ backend_url: "https://api.example.com" })`.
#[wasm_bindgen]
pub fn init_api_config_js(config: JsValue) -> Result<(), JsValue> {
    let config: RuntimeConfig = serde_wasm_bindgen::from_value(config)?;
    let api = match config.backend_url.as_deref() {
        Some(url) if !url.trim().is_empty() => ApiConfig::from_url(url),
        _ => ApiConfig::from_env(),
    };
    network::init_api_config(api);

    // The preview iframe and link are derived from the backend origin.
    views::refresh_ui()
}
