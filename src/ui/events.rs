//! Delegated UI event handlers.
//!
//! Panels are re-rendered from state on every dispatch, so instead of wiring
//! a closure per button we listen once on the app root and translate the
//! clicked element's `data-action` / `data-arg` into a `Message`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlSelectElement, HtmlTextAreaElement, KeyboardEvent, MouseEvent};

use crate::constants::*;
use crate::dom_utils::{by_id, find_action};
use crate::messages::Message;
use crate::models::PermissionFlag;
use crate::state::{dispatch_global_message, MiddleMode, RightTab, APP_STATE};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Entry point – call once after `setup::create_base_ui`.
pub fn setup_ui_event_handlers(document: &Document) -> Result<(), JsValue> {
    let root = by_id(document, ID_APP_ROOT)?;
    setup_click_handler(&root)?;
    setup_change_handler(&root)?;
    setup_chat_input_handlers(document)?;
    Ok(())
}

/// Map a `data-action` (plus optional `data-arg`) to the message it stands
/// for.  Unknown actions and missing required arguments yield `None`.
pub fn action_to_message(action: &str, arg: Option<&str>) -> Option<Message> {
    let arg = arg.map(str::to_string);
    let msg = match action {
        ACTION_CREATE_PROJECT => Message::CreateProject,
        ACTION_SELECT_PROJECT => Message::SelectProject(arg.filter(|a| !a.is_empty())?),
        ACTION_SELECT_MODEL => Message::SelectModel(arg?),
        ACTION_SEND => Message::SendDraft,
        ACTION_RUN_WORKFLOW => Message::StartWorkflow(arg.unwrap_or_default()),
        ACTION_MIDDLE_MODE => Message::SetMiddleMode(MiddleMode::from_id(&arg?)?),
        ACTION_TOGGLE_FULLSCREEN => Message::ToggleFullscreen,
        ACTION_REFRESH_FILES => Message::RefreshWorkspaceFiles,
        ACTION_SELECT_FILE => Message::SelectFile(arg?),
        ACTION_RIGHT_TAB => Message::SelectRightTab(RightTab::from_id(&arg?)?),
        ACTION_SELECT_AGENT => Message::SelectAgent(arg?),
        ACTION_TOGGLE_PERMISSION => Message::TogglePermission(PermissionFlag::from_key(&arg?)?),
        ACTION_LOAD_RUN => Message::LoadRun(arg?),
        ACTION_WATCH_TRACE => Message::SetActiveTrace(Some(arg?)),
        ACTION_STOP_WATCHING => Message::SetActiveTrace(None),
        ACTION_TOGGLE_MAPS_RAW => Message::ToggleMapsRaw,
        _ => return None,
    };
    Some(msg)
}

// ---------------------------------------------------------------------------
// Individual handlers
// ---------------------------------------------------------------------------

fn setup_click_handler(root: &Element) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: MouseEvent| {
        let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
            return;
        };
        // Selects report through "change", not "click".
        if target.dyn_ref::<HtmlSelectElement>().is_some() {
            return;
        }
        let Some((action, arg)) = find_action(&target) else {
            return;
        };
        let arg = if action == ACTION_RUN_WORKFLOW {
            Some(APP_STATE.with(|s| s.borrow().draft.clone()))
        } else {
            arg
        };
        match action_to_message(&action, arg.as_deref()) {
            Some(msg) => dispatch_global_message(msg),
            None => crate::debug_log!("Ignoring click on action '{}'", action),
        }
    }));
    root.add_event_listener_with_callback("click", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// <select data-action="..."> for project and model pickers.
fn setup_change_handler(root: &Element) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
        let Some(select) = e.target().and_then(|t| t.dyn_into::<HtmlSelectElement>().ok()) else {
            return;
        };
        let Some(action) = select.get_attribute(ATTR_ACTION) else {
            return;
        };
        if let Some(msg) = action_to_message(&action, Some(&select.value())) {
            dispatch_global_message(msg);
        }
    }));
    root.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())?;
    cb.forget();
    Ok(())
}

/// Draft sync on every keystroke; Enter sends, Shift+Enter inserts a newline.
fn setup_chat_input_handlers(document: &Document) -> Result<(), JsValue> {
    let input: HtmlTextAreaElement = by_id(document, ID_CHAT_INPUT)?.dyn_into()?;

    let input_cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: Event| {
        if let Some(area) = e.target().and_then(|t| t.dyn_into::<HtmlTextAreaElement>().ok()) {
            dispatch_global_message(Message::UpdateDraft(area.value()));
        }
    }));
    input.add_event_listener_with_callback("input", input_cb.as_ref().unchecked_ref())?;
    input_cb.forget();

    let key_cb = Closure::<dyn FnMut(_)>::wrap(Box::new(move |e: KeyboardEvent| {
        if e.key() == "Enter" && !e.shift_key() && !e.is_composing() {
            e.prevent_default();
            dispatch_global_message(Message::SendDraft);
        }
    }));
    input.add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref())?;
    key_cb.forget();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_free_actions() {
        assert!(matches!(action_to_message(ACTION_SEND, None), Some(Message::SendDraft)));
        assert!(matches!(action_to_message(ACTION_CREATE_PROJECT, None), Some(Message::CreateProject)));
        assert!(matches!(action_to_message(ACTION_TOGGLE_MAPS_RAW, None), Some(Message::ToggleMapsRaw)));
        assert!(matches!(
            action_to_message(ACTION_STOP_WATCHING, None),
            Some(Message::SetActiveTrace(None))
        ));
    }

    #[test]
    fn actions_with_arguments() {
        assert!(matches!(
            action_to_message(ACTION_RIGHT_TAB, Some("runs")),
            Some(Message::SelectRightTab(RightTab::Runs))
        ));
        assert!(matches!(
            action_to_message(ACTION_MIDDLE_MODE, Some("files")),
            Some(Message::SetMiddleMode(MiddleMode::Files))
        ));
        assert!(matches!(
            action_to_message(ACTION_TOGGLE_PERMISSION, Some("self_modify")),
            Some(Message::TogglePermission(PermissionFlag::SelfModify))
        ));
        assert!(matches!(
            action_to_message(ACTION_LOAD_RUN, Some("t-1")),
            Some(Message::LoadRun(id)) if id == "t-1"
        ));
        assert!(matches!(
            action_to_message(ACTION_RUN_WORKFLOW, Some("build it")),
            Some(Message::StartWorkflow(goal)) if goal == "build it"
        ));
    }

    #[test]
    fn missing_or_unknown_arguments_are_ignored() {
        assert!(action_to_message(ACTION_SELECT_FILE, None).is_none());
        assert!(action_to_message(ACTION_SELECT_PROJECT, Some("")).is_none());
        assert!(action_to_message(ACTION_RIGHT_TAB, Some("logs")).is_none());
        assert!(action_to_message(ACTION_TOGGLE_PERMISSION, Some("root")).is_none());
        assert!(action_to_message("launch-missiles", None).is_none());
    }
}
