//! Simple *TabBar* helper – central place to create the standard markup for
//! `.tab-container` + `.tab-button` elements.
//!
//! Pure markup factory: the caller owns "which tab is active" (in
//! `AppState`), and clicks are picked up by the delegated handler through
//! each button's `data-action` / `data-arg`.

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element};

use crate::constants::{ATTR_ACTION, ATTR_ARG, ATTR_TYPE, BUTTON_TYPE_BUTTON, CSS_TAB_BUTTON, CSS_TAB_BUTTON_ACTIVE};

/// One tab: visible label, `data-arg` value, active flag.
pub struct Tab<'a> {
    pub label: &'a str,
    pub arg: &'a str,
    pub active: bool,
}

/// Fill `container` with one `<button>` per tab, all sharing `action`.
pub fn build_tab_bar(
    document: &Document,
    container: &Element,
    action: &str,
    tabs: &[Tab<'_>],
) -> Result<(), JsValue> {
    container.set_inner_html("");
    container.set_attribute("role", "tablist")?;

    for tab in tabs {
        let btn = document.create_element("button")?;
        btn.set_attribute(ATTR_TYPE, BUTTON_TYPE_BUTTON)?;
        btn.set_attribute("role", "tab")?;
        btn.set_attribute("aria-selected", if tab.active { "true" } else { "false" })?;
        btn.set_attribute(ATTR_ACTION, action)?;
        btn.set_attribute(ATTR_ARG, tab.arg)?;
        btn.set_text_content(Some(tab.label));
        btn.set_class_name(if tab.active { CSS_TAB_BUTTON_ACTIVE } else { CSS_TAB_BUTTON });
        container.append_child(&btn)?;
    }

    Ok(())
}
