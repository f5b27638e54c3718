use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlTextAreaElement};

use crate::constants::{ID_CHAT_INPUT, ID_CHAT_LOG, ID_CHAT_RUN_WORKFLOW, ID_CHAT_SEND, ID_CHAT_STATUS};
use crate::dom_utils::{by_id, clear_children, element, set_disabled};
use crate::models::{ChatMessage, Role};
use crate::state::AppState;

pub fn status_text(busy: bool) -> &'static str {
    if busy {
        "Working\u{2026}"
    } else {
        "Ready"
    }
}

pub fn render(document: &Document, state: &AppState) -> Result<(), JsValue> {
    by_id(document, ID_CHAT_STATUS)?.set_text_content(Some(status_text(state.busy)));

    let log = by_id(document, ID_CHAT_LOG)?;
    render_log(document, &log, &state.messages)?;

    // Only write the textarea when it drifted, so the caret is not reset
    // while the user types.
    let input: HtmlTextAreaElement = by_id(document, ID_CHAT_INPUT)?.dyn_into()?;
    if input.value() != state.draft {
        input.set_value(&state.draft);
    }

    let blocked = state.busy || state.draft.trim().is_empty();
    set_disabled(&by_id(document, ID_CHAT_SEND)?, blocked)?;
    set_disabled(&by_id(document, ID_CHAT_RUN_WORKFLOW)?, blocked)?;
    Ok(())
}

const ATTR_RENDERED: &str = "data-rendered";

/// Whether the log must be rebuilt: the transcript only grows, so its length
/// identifies what is already on screen.
pub fn log_is_stale(rendered: Option<&str>, message_count: usize) -> bool {
    rendered.and_then(|n| n.parse::<usize>().ok()) != Some(message_count)
}

/// One bubble per user/assistant message; the system prompt is not shown.
/// Rebuilds and scrolls to the newest message only when the transcript grew,
/// so polling refreshes leave the reader's scroll position alone.
pub fn render_log(document: &Document, log: &Element, messages: &[ChatMessage]) -> Result<(), JsValue> {
    if !log_is_stale(log.get_attribute(ATTR_RENDERED).as_deref(), messages.len()) {
        return Ok(());
    }
    clear_children(log);
    for msg in messages.iter().filter(|m| m.role != Role::System) {
        let class = format!("bubble bubble-{}", msg.role.as_str());
        let bubble = element(document, "div", &class, &msg.content.display_text())?;
        log.append_child(&bubble)?;
    }
    log.set_attribute(ATTR_RENDERED, &messages.len().to_string())?;
    log.set_scroll_top(log.scroll_height());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_reflects_busy_flag() {
        assert_eq!(status_text(true), "Working\u{2026}");
        assert_eq!(status_text(false), "Ready");
    }

    #[test]
    fn log_rebuilds_only_when_the_transcript_grows() {
        assert!(log_is_stale(None, 1));
        assert!(log_is_stale(Some("2"), 3));
        assert!(log_is_stale(Some("junk"), 3));
        assert!(!log_is_stale(Some("3"), 3));
    }
}
