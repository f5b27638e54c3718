//! Runs tab: history of workflow runs (newest first) and the outcome of the
//! selected one.

use serde_json::Value;
use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{ACTION_LOAD_RUN, ACTION_WATCH_TRACE, CSS_ERROR, CSS_MUTED};
use crate::dom_utils::{action_button, element, set_active, set_inactive};
use crate::models::{value_to_text, RunDetail, RunView};
use crate::state::AppState;
use crate::utils::short_id;

pub fn build(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let panel = element(document, "div", "runs-panel", "")?;

    let heading = element(document, "h3", "", "Runs")?;
    panel.append_child(&heading)?;
    let list = element(document, "div", "run-list", "")?;
    if state.runs.is_empty() {
        let line = element(document, "div", CSS_MUTED, "No runs yet.")?;
        list.append_child(&line)?;
    }
    for id in state.runs.iter().rev() {
        let btn = action_button(document, &short_id(id), ACTION_LOAD_RUN, Some(id))?;
        btn.set_attribute("title", id)?;
        if state.selected_run_id.as_deref() == Some(id.as_str()) {
            set_active(&btn);
        } else {
            set_inactive(&btn);
        }
        list.append_child(&btn)?;
    }
    panel.append_child(&list)?;

    let heading = element(document, "h3", "", "Selected")?;
    panel.append_child(&heading)?;
    match &state.selected_run {
        None => {
            let line = element(document, "div", CSS_MUTED, "Pick a run to inspect outcomes.")?;
            panel.append_child(&line)?;
        }
        Some(RunView::Failed(error)) => {
            let line = element(document, "div", CSS_ERROR, error)?;
            panel.append_child(&line)?;
        }
        Some(RunView::Loaded(run)) => {
            if let Some(trace_id) = state.selected_run_id.as_deref() {
                if state.active_trace_id.as_deref() != Some(trace_id) {
                    let button = action_button(document, "Watch live", ACTION_WATCH_TRACE, Some(trace_id))?;
                    panel.append_child(&button)?;
                }
            }
            let run_detail = build_run_detail(document, run)?;
            panel.append_child(&run_detail)?;
        }
    }
    Ok(panel)
}

fn build_run_detail(document: &Document, run: &RunDetail) -> Result<Element, JsValue> {
    let detail = element(document, "div", "run-detail", "")?;

    match run.summary() {
        Some(summary) => {
            let card = element(document, "div", "card architect-summary", "")?;
            let heading = element(document, "h3", "", "Architect summary")?;
            card.append_child(&heading)?;
            let field = labelled(document, "Goal", summary.goal.as_ref())?;
            card.append_child(&field)?;
            let field = labelled(document, "Changes", summary.changes_summary.as_ref())?;
            card.append_child(&field)?;
            let lists = [
                ("Decisions", &summary.decisions),
                ("Files touched", &summary.files_touched),
                ("Open questions", &summary.open_questions),
                ("Next steps", &summary.next_steps),
            ];
            for (title, items) in lists {
                let bullet_list = bullets(document, title, items)?;
                card.append_child(&bullet_list)?;
            }
            detail.append_child(&card)?;
        }
        None => {
            let none = "No architect summary found for this run.";
            let line = element(document, "div", CSS_MUTED, none)?;
            detail.append_child(&line)?;
        }
    }

    if let Some(notes) = run.notes.as_deref().filter(|n| !n.is_empty()) {
        let card = element(document, "div", "card run-notes", "")?;
        let heading = element(document, "h3", "", "Notes")?;
        card.append_child(&heading)?;
        let pre = element(document, "pre", "file-content", notes)?;
        card.append_child(&pre)?;
        detail.append_child(&card)?;
    }
    Ok(detail)
}

fn labelled(document: &Document, label: &str, value: Option<&Value>) -> Result<Element, JsValue> {
    let block = element(document, "div", "block", "")?;
    let strong = element(document, "b", "", label)?;
    block.append_child(&strong)?;
    let text = value.and_then(value_to_text).unwrap_or_default();
    let line = element(document, "div", "", &text)?;
    block.append_child(&line)?;
    Ok(block)
}

fn bullets(document: &Document, title: &str, items: &[Value]) -> Result<Element, JsValue> {
    let section = element(document, "div", "bullets", "")?;
    let line = element(document, "div", "map-title", title)?;
    section.append_child(&line)?;
    if items.is_empty() {
        return Ok(section);
    }
    let ul = document.create_element("ul")?;
    for item in items {
        let li = element(document, "li", "", &value_to_text(item).unwrap_or_default())?;
        ul.append_child(&li)?;
    }
    section.append_child(&ul)?;
    Ok(section)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn runs_are_listed_newest_first() {
        let document = crate::dom_utils::document().unwrap();
        let mut state = AppState::new();
        state.runs = vec!["aaaaaaaaaaaa".into(), "bbbbbbbbbbbb".into()];

        let panel = build(&document, &state).unwrap();

        let first = panel.query_selector(".run-list button").unwrap().unwrap();
        assert_eq!(first.text_content().as_deref(), Some("bbbbbbbb\u{2026}"));
        assert!(panel.text_content().unwrap().contains("Pick a run to inspect outcomes."));
    }

    #[wasm_bindgen_test]
    fn summary_lists_are_rendered() {
        let document = crate::dom_utils::document().unwrap();
        let mut state = AppState::new();
        state.selected_run_id = Some("t-1".into());
        let run: RunDetail = serde_json::from_value(json!({
            "ok": true,
            "architect_summary": {
                "goal": "Landing page",
                "decisions": ["use flexbox", "dark theme"],
                "files_touched": ["index.html"]
            },
            "notes": "all good"
        }))
        .unwrap();
        state.selected_run = Some(RunView::Loaded(run));

        let panel = build(&document, &state).unwrap();

        assert_eq!(panel.query_selector_all("li").unwrap().length(), 3);
        assert!(panel.query_selector(".run-notes").unwrap().is_some());
        assert!(panel.query_selector("[data-action='watch-trace']").unwrap().is_some());
    }

    #[wasm_bindgen_test]
    fn missing_summary_is_explained() {
        let document = crate::dom_utils::document().unwrap();
        let mut state = AppState::new();
        state.selected_run = Some(RunView::Loaded(RunDetail { ok: Some(true), ..Default::default() }));

        let panel = build(&document, &state).unwrap();

        assert!(panel.text_content().unwrap().contains("No architect summary found for this run."));
    }
}
