use wasm_bindgen::JsValue;
use web_sys::Document;

use crate::components::tab_bar::{build_tab_bar, Tab};
use crate::components::{actions_panel, maps_panel, runs_panel, workflow_panel};
use crate::constants::{ACTION_RIGHT_TAB, ID_RIGHT_BODY, ID_RIGHT_TABS};
use crate::dom_utils::{by_id, clear_children};
use crate::state::{AppState, RightTab};

pub fn render(document: &Document, state: &AppState) -> Result<(), JsValue> {
    let tabs: Vec<Tab<'_>> = RightTab::ALL
        .iter()
        .map(|tab| Tab { label: tab.label(), arg: tab.id(), active: *tab == state.right_tab })
        .collect();
    build_tab_bar(document, &by_id(document, ID_RIGHT_TABS)?, ACTION_RIGHT_TAB, &tabs)?;

    let body = by_id(document, ID_RIGHT_BODY)?;
    clear_children(&body);
    let content = match state.right_tab {
        RightTab::Workflow => workflow_panel::build(document, state)?,
        RightTab::Actions => actions_panel::build(document, state)?,
        RightTab::Runs => runs_panel::build(document, state)?,
        RightTab::Maps => maps_panel::build(document, state)?,
    };
    body.append_child(&content)?;
    Ok(())
}
