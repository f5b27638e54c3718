//! Middle column: mode switch, fullscreen toggle and the live preview iframe.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::*;
use crate::dom_utils::{action_button, by_id, clear_children, set_active, set_inactive, set_visible};
use crate::network::api_config;
use crate::state::{AppState, MiddleMode};

pub fn render(document: &Document, state: &AppState) -> Result<(), JsValue> {
    render_head(document, &by_id(document, ID_MIDDLE_HEAD)?, state)?;

    let frame = by_id(document, ID_PREVIEW_FRAME)?;
    sync_frame(&frame, &api_config().preview_url(&state.project_id), state.preview_nonce)?;
    set_visible(&frame, state.middle_mode == MiddleMode::Preview);
    set_visible(&by_id(document, ID_FILE_BROWSER)?, state.middle_mode == MiddleMode::Files);

    // Fullscreen gives the whole width to the middle column.
    set_visible(&by_id(document, ID_LEFT_COLUMN)?, !state.preview_fullscreen);
    set_visible(&by_id(document, ID_RIGHT_COLUMN)?, !state.preview_fullscreen);
    let main = by_id(document, ID_MAIN)?;
    if state.preview_fullscreen {
        main.class_list().add_1(CSS_FULLSCREEN)?;
    } else {
        main.class_list().remove_1(CSS_FULLSCREEN)?;
    }
    Ok(())
}

fn render_head(document: &Document, head: &Element, state: &AppState) -> Result<(), JsValue> {
    clear_children(head);

    for (mode, label) in [(MiddleMode::Preview, "Preview"), (MiddleMode::Files, "Files")] {
        let btn = action_button(document, label, ACTION_MIDDLE_MODE, Some(mode.id()))?;
        if state.middle_mode == mode {
            set_active(&btn);
        } else {
            set_inactive(&btn);
        }
        head.append_child(&btn)?;
    }

    if state.middle_mode == MiddleMode::Files {
        let button = action_button(document, "Refresh", ACTION_REFRESH_FILES, None)?;
        head.append_child(&button)?;
    }

    let label = if state.preview_fullscreen { "Exit fullscreen" } else { "Fullscreen" };
    let button = action_button(document, label, ACTION_TOGGLE_FULLSCREEN, None)?;
    head.append_child(&button)?;
    Ok(())
}

/// Point the iframe at `url`.  It only navigates when the url or the reload
/// nonce changed, so ordinary re-renders leave the preview alone.
fn sync_frame(frame: &Element, url: &str, nonce: u32) -> Result<(), JsValue> {
    let nonce = nonce.to_string();
    let same_url = frame.get_attribute("src").as_deref() == Some(url);
    let same_nonce = frame.get_attribute(ATTR_NONCE).as_deref() == Some(nonce.as_str());
    if same_url && same_nonce {
        return Ok(());
    }
    frame.set_attribute(ATTR_NONCE, &nonce)?;
    frame.set_attribute("src", url)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn frame_follows_project_and_nonce() {
        let document = crate::dom_utils::document().unwrap();
        let frame = document.create_element("iframe").unwrap();

        sync_frame(&frame, "http://localhost:8000/preview/site/preview/", 0).unwrap();
        assert_eq!(
            frame.get_attribute("src").as_deref(),
            Some("http://localhost:8000/preview/site/preview/")
        );

        sync_frame(&frame, "http://localhost:8000/preview/site/preview/", 1).unwrap();
        assert_eq!(frame.get_attribute(ATTR_NONCE).as_deref(), Some("1"));
    }

    #[wasm_bindgen_test]
    fn files_mode_adds_refresh_button() {
        let document = crate::dom_utils::document().unwrap();
        let head = document.create_element("div").unwrap();
        let mut state = AppState::new();
        state.middle_mode = MiddleMode::Files;

        render_head(&document, &head, &state).unwrap();

        assert!(head.query_selector("[data-action='refresh-files']").unwrap().is_some());
        let active = head.query_selector(".active").unwrap().unwrap();
        assert_eq!(active.text_content().as_deref(), Some("Files"));
    }
}
