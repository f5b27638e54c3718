//! Read-only workspace file browser shown in the middle column's Files mode.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{ACTION_SELECT_FILE, CSS_ERROR, CSS_MUTED, ID_FILE_BROWSER};
use crate::dom_utils::{action_button, by_id, clear_children, element, set_active, set_inactive};
use crate::state::AppState;

pub fn render(document: &Document, state: &AppState) -> Result<(), JsValue> {
    let container = by_id(document, ID_FILE_BROWSER)?;
    clear_children(&container);
    let file_list = build_list(document, state)?;
    container.append_child(&file_list)?;
    let file_viewer = build_viewer(document, state)?;
    container.append_child(&file_viewer)?;
    Ok(())
}

fn build_list(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let list = element(document, "div", "file-list", "")?;
    if state.workspace_files.is_empty() {
        let line = element(document, "div", CSS_MUTED, "No files yet.")?;
        list.append_child(&line)?;
        return Ok(list);
    }
    for path in &state.workspace_files {
        let btn = action_button(document, path, ACTION_SELECT_FILE, Some(path))?;
        if state.selected_file.as_deref() == Some(path.as_str()) {
            set_active(&btn);
        } else {
            set_inactive(&btn);
        }
        list.append_child(&btn)?;
    }
    Ok(list)
}

fn build_viewer(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let viewer = element(document, "div", "file-viewer", "")?;
    let Some(path) = state.selected_file.as_deref() else {
        let line = element(document, "div", CSS_MUTED, "Pick a file from the list.")?;
        viewer.append_child(&line)?;
        return Ok(viewer);
    };

    let line = element(document, "div", "file-path", path)?;
    viewer.append_child(&line)?;
    if let Some(error) = &state.file_error {
        let line = element(document, "div", CSS_ERROR, error)?;
        viewer.append_child(&line)?;
        return Ok(viewer);
    }
    let text = if state.file_content.is_empty() { "(empty)" } else { state.file_content.as_str() };
    let pre = element(document, "pre", "file-content", text)?;
    viewer.append_child(&pre)?;
    Ok(viewer)
}
