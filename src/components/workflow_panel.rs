//! Workflow tab: orchestrator decision card, per-agent tabs, live feed and
//! the timeline / communications split for the selected agent.

use wasm_bindgen::JsValue;
use web_sys::{Document, Element};

use crate::constants::{ACTION_SELECT_AGENT, ACTION_STOP_WATCHING, CSS_MUTED, LIVE_FEED_LIMIT};
use crate::dom_utils::{action_button, element, set_active, set_inactive};
use crate::feed::{format_time, latest, partition_comms};
use crate::models::{OrchestratorDecision, WorkflowEvent};
use crate::state::AppState;
use crate::utils::{format_confidence, short_id};

pub fn build(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let panel = element(document, "div", "workflow-panel", "")?;

    let top = element(document, "div", "toolbar", "")?;
    match state.active_trace_id.as_deref() {
        Some(trace) => {
            let span = element(document, "span", CSS_MUTED, &format!("Trace: {}", short_id(trace)))?;
            top.append_child(&span)?;
            let button = action_button(document, "Stop watching", ACTION_STOP_WATCHING, None)?;
            top.append_child(&button)?;
        }
        None => {
            let idle = "No workflow run yet. Send a message in Chat to start agents.";
            let span = element(document, "span", CSS_MUTED, idle)?;
            top.append_child(&span)?;
        }
    }
    panel.append_child(&top)?;

    if let Some(decision) = &state.orchestrator_decision {
        let decision_card = build_decision_card(document, decision)?;
        panel.append_child(&decision_card)?;
    }

    let agent_tabs = build_agent_tabs(document, state)?;
    panel.append_child(&agent_tabs)?;

    if let Some(agent) = state.effective_agent() {
        let events = state.events_by_agent.get(&agent.name).map(Vec::as_slice).unwrap_or(&[]);
        let card = element(document, "div", "card", "")?;
        let heading = element(document, "h3", "", &agent.name)?;
        card.append_child(&heading)?;
        let status = if agent.status.is_empty() { "Idle" } else { agent.status.as_str() };
        let meta = element(document, "div", "agent-meta", "")?;
        let span = element(document, "span", "badge", status)?;
        meta.append_child(&span)?;
        let span = element(document, "span", "", &format!(" {}", agent.mission))?;
        meta.append_child(&span)?;
        card.append_child(&meta)?;
        let live_feed = build_live_feed(document, events)?;
        card.append_child(&live_feed)?;
        let human_map = build_human_map(document, events)?;
        card.append_child(&human_map)?;
        panel.append_child(&card)?;
    }

    Ok(panel)
}

fn build_decision_card(document: &Document, decision: &OrchestratorDecision) -> Result<Element, JsValue> {
    let card = element(document, "div", "card decision-card", "")?;
    let heading = element(document, "h3", "", "Orchestrator decision")?;
    card.append_child(&heading)?;

    let mut meta = format!("mode: {}", decision.mode);
    if decision.confidence.is_some() {
        meta.push_str(&format!(" \u{b7} confidence: {}", format_confidence(decision.confidence)));
    }
    meta.push_str(&format!(" \u{b7} {}", decision.at.with_timezone(&chrono::Local).format("%H:%M:%S")));
    let line = element(document, "div", CSS_MUTED, &meta)?;
    card.append_child(&line)?;

    let rows = [
        ("Why", decision.reason.as_str()),
        ("Goal", decision.goal.as_deref().unwrap_or("")),
        ("Trace", decision.trace_id.as_str()),
    ];
    for (label, value) in rows.iter().filter(|(_, v)| !v.is_empty()) {
        let row = element(document, "div", "decision-row", "")?;
        let span = element(document, "span", CSS_MUTED, &format!("{} ", label))?;
        row.append_child(&span)?;
        let span = element(document, "span", "", value)?;
        row.append_child(&span)?;
        card.append_child(&row)?;
    }
    Ok(card)
}

fn build_agent_tabs(document: &Document, state: &AppState) -> Result<Element, JsValue> {
    let tabs = element(document, "div", "tab-container", "")?;
    let names: Vec<&str> = state.agents.iter().map(|a| a.name.as_str()).filter(|n| !n.is_empty()).collect();
    if names.is_empty() {
        let hint = "No agent activity yet. Send a message in Chat to start a workflow and see live steps here.";
        let line = element(document, "div", CSS_MUTED, hint)?;
        tabs.append_child(&line)?;
        return Ok(tabs);
    }

    let current = state.effective_agent().map(|a| a.name.as_str());
    for name in names {
        let btn = action_button(document, name, ACTION_SELECT_AGENT, Some(name))?;
        if Some(name) == current {
            set_active(&btn);
        } else {
            set_inactive(&btn);
        }
        tabs.append_child(&btn)?;
    }
    Ok(tabs)
}

/// The last `LIVE_FEED_LIMIT` events of the agent, oldest first.
fn build_live_feed(document: &Document, events: &[WorkflowEvent]) -> Result<Element, JsValue> {
    let section = element(document, "div", "section", "")?;
    let heading = element(document, "h3", "", "Live feed")?;
    section.append_child(&heading)?;
    let feed = element(document, "div", "feed live-feed", "")?;
    if events.is_empty() {
        let line = element(document, "div", CSS_MUTED, "No events for this agent yet.")?;
        feed.append_child(&line)?;
    }
    for event in latest(events, LIVE_FEED_LIMIT) {
        let entry = feed_row(document, None, event)?;
        feed.append_child(&entry)?;
    }
    section.append_child(&feed)?;
    Ok(section)
}

fn build_human_map(document: &Document, events: &[WorkflowEvent]) -> Result<Element, JsValue> {
    let (comms, timeline) = partition_comms(events);
    let section = element(document, "div", "section human-map", "")?;
    let heading = element(document, "h3", "", "What it did")?;
    section.append_child(&heading)?;

    let timeline_col = element(document, "div", "feed timeline", "")?;
    let line = element(document, "div", "map-title", "Timeline")?;
    timeline_col.append_child(&line)?;
    if timeline.is_empty() {
        let line = element(document, "div", CSS_MUTED, "No timeline yet.")?;
        timeline_col.append_child(&line)?;
    }
    for event in timeline {
        let head = format!("{} \u{b7} {}", format_time(event.ts.as_ref()), event.level);
        let item = element(document, "div", &format!("map-item level-{}", event.level), "")?;
        let line = element(document, "div", CSS_MUTED, &head)?;
        item.append_child(&line)?;
        let line = element(document, "div", "", &event.text)?;
        item.append_child(&line)?;
        timeline_col.append_child(&item)?;
    }
    section.append_child(&timeline_col)?;

    let comms_col = element(document, "div", "feed comms", "")?;
    let line = element(document, "div", "map-title", "Communications")?;
    comms_col.append_child(&line)?;
    if comms.is_empty() {
        let line = element(document, "div", CSS_MUTED, "No messages exchanged.")?;
        comms_col.append_child(&line)?;
    }
    for event in comms {
        let entry = feed_row(document, None, event)?;
        comms_col.append_child(&entry)?;
    }
    section.append_child(&comms_col)?;
    Ok(section)
}

/// `time [agent] text` row shared by the live feed and the Actions tab.
pub(crate) fn feed_row(document: &Document, agent: Option<&str>, event: &WorkflowEvent) -> Result<Element, JsValue> {
    let row = element(document, "div", &format!("feed-row level-{}", event.level), "")?;
    let span = element(document, "span", "time", &format_time(event.ts.as_ref()))?;
    row.append_child(&span)?;
    if let Some(agent) = agent {
        let span = element(document, "span", "agent", agent)?;
        row.append_child(&span)?;
    }
    let span = element(document, "span", "text", &format!(" {}", event.text))?;
    row.append_child(&span)?;
    Ok(row)
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::models::{Agent, EventTimestamp};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn event(i: usize, kind: &str) -> WorkflowEvent {
        WorkflowEvent {
            ts: Some(EventTimestamp::Millis(1_700_000_000_000.0 + i as f64)),
            text: format!("event {}", i),
            kind: kind.into(),
            level: "info".into(),
        }
    }

    fn state_with_events(count: usize) -> AppState {
        let mut state = AppState::new();
        state.active_trace_id = Some("0123456789abcdef".into());
        state.agents = vec![
            Agent { name: "Planner".into(), status: "running".into(), mission: "plan".into() },
            Agent { name: "Coder".into(), status: String::new(), mission: String::new() },
        ];
        state.events_by_agent.insert("Planner".into(), (0..count).map(|i| event(i, "info")).collect());
        state
    }

    #[wasm_bindgen_test]
    fn live_feed_shows_last_sixty_in_order() {
        let document = crate::dom_utils::document().unwrap();
        let panel = build(&document, &state_with_events(75)).unwrap();

        let feed = panel.query_selector(".live-feed").unwrap().unwrap();
        assert_eq!(feed.child_element_count(), 60);
        let first = feed.first_element_child().unwrap();
        assert!(first.text_content().unwrap().ends_with("event 15"));
        let last = feed.last_element_child().unwrap();
        assert!(last.text_content().unwrap().ends_with("event 74"));
    }

    #[wasm_bindgen_test]
    fn first_agent_is_selected_by_default_and_trace_is_short() {
        let document = crate::dom_utils::document().unwrap();
        let panel = build(&document, &state_with_events(1)).unwrap();

        let active = panel.query_selector(".tab-button.active").unwrap().unwrap();
        assert_eq!(active.text_content().as_deref(), Some("Planner"));
        assert!(panel.text_content().unwrap().contains("Trace: 01234567\u{2026}"));
    }

    #[wasm_bindgen_test]
    fn comms_are_split_from_timeline() {
        let document = crate::dom_utils::document().unwrap();
        let mut state = state_with_events(0);
        state
            .events_by_agent
            .insert("Planner".into(), vec![event(1, "comms"), event(2, "info"), event(3, "info")]);

        let panel = build(&document, &state).unwrap();

        let comms = panel.query_selector(".comms").unwrap().unwrap();
        assert_eq!(comms.query_selector_all(".feed-row").unwrap().length(), 1);
        let timeline = panel.query_selector(".timeline").unwrap().unwrap();
        assert_eq!(timeline.query_selector_all(".map-item").unwrap().length(), 2);
    }
}
