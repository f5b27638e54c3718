use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::components::workflow_panel::feed_row;
use crate::constants::{ACTIONS_FEED_LIMIT, ACTION_TOGGLE_PERMISSION, CSS_MUTED};
use crate::dom_utils::{action_button, element};
use crate::feed::{flatten_events, latest};
use crate::models::{PermissionFlag, Permissions};
use crate::state::AppState;

pub fn build(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let panel = element(document, "div", "actions-panel", "")?;

    let heading = element(document, "h3", "", "Permissions")?;
    panel.append_child(&heading)?;
    let toggles = build_toggles(document, &state.permissions)?;
    panel.append_child(&toggles)?;

    let heading = element(document, "h3", "", "Recent actions")?;
    panel.append_child(&heading)?;
    let feed = element(document, "div", "feed recent-actions", "")?;
    if state.active_trace_id.is_none() {
        let idle = "No active trace. Run a workflow to populate actions.";
        let line = element(document, "div", CSS_MUTED, idle)?;
        feed.append_child(&line)?;
    } else {
        let flat = flatten_events(&state.events_by_agent);
        if flat.is_empty() {
            let line = element(document, "div", CSS_MUTED, "No actions yet.")?;
            feed.append_child(&line)?;
        }
        for item in latest(&flat, ACTIONS_FEED_LIMIT) {
            let entry = feed_row(document, Some(&item.agent), &item.event)?;
            feed.append_child(&entry)?;
        }
    }
    panel.append_child(&feed)?;
    Ok(panel)
}

fn build_toggles(document: &Document, permissions: &Permissions) -> Result<Element, JsValue> {
    let toggles = element(document, "div", "toolbar permissions", "")?;
    for flag in PermissionFlag::ALL {
        let on = permissions.get(flag);
        let label = format!("{}: {}", flag.label(), if on { "ON" } else { "OFF" });
        let btn = action_button(document, &label, ACTION_TOGGLE_PERMISSION, Some(flag.key()))?;
        btn.set_class_name(if on { "perm-toggle perm-on" } else { "perm-toggle" });
        btn.set_attribute("aria-pressed", if on { "true" } else { "false" })?;
        toggles.append_child(&btn)?;
    }
    Ok(toggles)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::models::{EventTimestamp, WorkflowEvent};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn event(ms: f64, text: &str) -> WorkflowEvent {
        WorkflowEvent {
            ts: Some(EventTimestamp::Millis(ms)),
            text: text.into(),
            kind: "info".into(),
            level: "info".into(),
        }
    }

    #[wasm_bindgen_test]
    fn default_permissions_render_as_toggles() {
        let document = crate::dom_utils::document().unwrap();
        let panel = build(&document, &AppState::new()).unwrap();

        let on = panel.query_selector_all(".perm-on").unwrap();
        assert_eq!(on.length(), 1);
        let file_write = panel.query_selector("[data-arg='file_write']").unwrap().unwrap();
        assert_eq!(file_write.text_content().as_deref(), Some("File write: ON"));
    }

    #[wasm_bindgen_test]
    fn idle_message_without_trace() {
        let document = crate::dom_utils::document().unwrap();
        let panel = build(&document, &AppState::new()).unwrap();
        assert!(panel
            .text_content()
            .unwrap()
            .contains("No active trace. Run a workflow to populate actions."));
    }

    #[wasm_bindgen_test]
    fn recent_actions_are_capped_and_chronological() {
        let document = crate::dom_utils::document().unwrap();
        let mut state = AppState::new();
        state.active_trace_id = Some("t1".into());
        state
            .events_by_agent
            .insert("a".into(), (0..100).map(|i| event(2.0 * i as f64, "a")).collect());
        state
            .events_by_agent
            .insert("b".into(), (0..100).map(|i| event(2.0 * i as f64 + 1.0, "b")).collect());

        let panel = build(&document, &state).unwrap();

        let feed = panel.query_selector(".recent-actions").unwrap().unwrap();
        assert_eq!(feed.child_element_count(), 120);
    }
}
