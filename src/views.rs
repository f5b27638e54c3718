// Renders every panel from the current application state.  Called after each
// dispatched message once its commands have been started.

use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::components::{chat_panel, file_browser, header, preview_pane, right_panel};
use crate::constants::ID_APP_ROOT;
use crate::state::{AppState, APP_STATE};

pub fn refresh_ui() -> Result<(), JsValue> {
    let document = crate::dom_utils::document()?;
    // Nothing to draw into before `ui::setup` ran.
    if document.get_element_by_id(ID_APP_ROOT).is_none() {
        return Ok(());
    }
    APP_STATE.with(|state| render_all(&document, &state.borrow()))
}

pub fn render_all(document: &Document, state: &AppState) -> Result<(), JsValue> {
    header::render(document, state)?;
    chat_panel::render(document, state)?;
    preview_pane::render(document, state)?;
    file_browser::render(document, state)?;
    right_panel::render(document, state)?;
    Ok(())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::constants::*;
    use crate::state::{MiddleMode, RightTab};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn setup() -> Document {
        let document = crate::dom_utils::document().unwrap();
        crate::ui::setup::create_base_ui(&document).unwrap();
        document
    }

    #[wasm_bindgen_test]
    fn full_render_from_default_state() {
        let document = setup();
        let state = AppState::new();

        render_all(&document, &state).unwrap();

        let status = document.get_element_by_id(ID_CHAT_STATUS).unwrap();
        assert_eq!(status.text_content().as_deref(), Some("Ready"));
        let send = document.get_element_by_id(ID_CHAT_SEND).unwrap();
        assert!(send.has_attribute("disabled"));
        let tabs = document.get_element_by_id(ID_RIGHT_TABS).unwrap();
        assert_eq!(tabs.child_element_count(), 4);
        let frame = document.get_element_by_id(ID_PREVIEW_FRAME).unwrap();
        assert!(frame.get_attribute("src").unwrap().ends_with("/preview/default/preview/"));
    }

    #[wasm_bindgen_test]
    fn busy_state_and_fullscreen() {
        let document = setup();
        let mut state = AppState::new();
        state.busy = true;
        state.draft = "hello".into();
        state.preview_fullscreen = true;
        state.middle_mode = MiddleMode::Files;
        state.right_tab = RightTab::Maps;

        render_all(&document, &state).unwrap();

        let status = document.get_element_by_id(ID_CHAT_STATUS).unwrap();
        assert_eq!(status.text_content().as_deref(), Some("Working\u{2026}"));
        assert!(document.get_element_by_id(ID_CHAT_SEND).unwrap().has_attribute("disabled"));
        assert!(document.get_element_by_id(ID_LEFT_COLUMN).unwrap().class_list().contains(CSS_HIDDEN));
        assert!(document.get_element_by_id(ID_PREVIEW_FRAME).unwrap().class_list().contains(CSS_HIDDEN));
        let body = document.get_element_by_id(ID_RIGHT_BODY).unwrap();
        assert!(body.text_content().unwrap().contains("Maps not loaded yet."));
    }
}
