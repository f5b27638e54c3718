//! dom_utils.rs – thin helper layer for repetitive DOM operations.
//!
//! Panels are rebuilt from `AppState` on every refresh, so most of this is
//! small element factories plus the show / hide / activate toggles.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{
    ATTR_ACTION, ATTR_ARG, ATTR_TYPE, BUTTON_TYPE_BUTTON, CSS_HIDDEN, CSS_TAB_BUTTON,
    CSS_TAB_BUTTON_ACTIVE,
};

pub fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))
}

/// Look up a fixed element created by `ui::setup`.
pub fn by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("#{} not found", id)))
}

/// Make the element visible by removing the `hidden` class.
pub fn show(el: &Element) {
    let _ = el.class_list().remove_1(CSS_HIDDEN);
}

/// Hide the element by adding the `hidden` class.
pub fn hide(el: &Element) {
    let _ = el.class_list().add_1(CSS_HIDDEN);
}

pub fn set_visible(el: &Element, visible: bool) {
    if visible {
        show(el)
    } else {
        hide(el)
    }
}

/// Mark a tab button as the active one (adds "tab-button active" class).
pub fn set_active(btn: &Element) {
    btn.set_class_name(CSS_TAB_BUTTON_ACTIVE);
}

/// Remove the `active` modifier from a tab button.
pub fn set_inactive(btn: &Element) {
    btn.set_class_name(CSS_TAB_BUTTON);
}

pub fn clear_children(el: &Element) {
    el.set_inner_html("");
}

/// `<tag class="..">text</tag>`; empty class / text are skipped.
pub fn element(document: &Document, tag: &str, class: &str, text: &str) -> Result<Element, JsValue> {
    let el = document.create_element(tag)?;
    if !class.is_empty() {
        el.set_class_name(class);
    }
    if !text.is_empty() {
        el.set_text_content(Some(text));
    }
    Ok(el)
}

/// A `<button type="button">` carrying a `data-action` (and optional
/// `data-arg`) for the delegated click handler in `ui::events`.
pub fn action_button(
    document: &Document,
    label: &str,
    action: &str,
    arg: Option<&str>,
) -> Result<Element, JsValue> {
    let btn = document.create_element("button")?;
    btn.set_attribute(ATTR_TYPE, BUTTON_TYPE_BUTTON)?;
    btn.set_attribute(ATTR_ACTION, action)?;
    if let Some(arg) = arg {
        btn.set_attribute(ATTR_ARG, arg)?;
    }
    btn.set_text_content(Some(label));
    Ok(btn)
}

pub fn set_disabled(el: &Element, disabled: bool) -> Result<(), JsValue> {
    if disabled {
        el.set_attribute("disabled", "")
    } else {
        el.remove_attribute("disabled")
    }
}

/// Nearest element (self included) carrying a `data-action`, with its
/// action and optional argument.
pub fn find_action(target: &Element) -> Option<(String, Option<String>)> {
    let selector = format!("[{}]", ATTR_ACTION);
    let el = target.closest(&selector).ok().flatten()?;
    let action = el.get_attribute(ATTR_ACTION)?;
    Some((action, el.get_attribute(ATTR_ARG)))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn action_lookup_walks_up_to_the_button() {
        let document = document().unwrap();
        let btn = action_button(&document, "", "select-run", Some("t-1")).unwrap();
        let inner = element(&document, "span", "", "label").unwrap();
        btn.append_child(&inner).unwrap();

        assert_eq!(
            find_action(&inner),
            Some(("select-run".to_string(), Some("t-1".to_string())))
        );
    }

    #[wasm_bindgen_test]
    fn visibility_toggles_hidden_class() {
        let document = document().unwrap();
        let el = element(&document, "div", "panel", "").unwrap();
        set_visible(&el, false);
        assert!(el.class_list().contains(CSS_HIDDEN));
        set_visible(&el, true);
        assert!(!el.class_list().contains(CSS_HIDDEN));
    }
}
