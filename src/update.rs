use crate::messages::{Command, Message};
use crate::state::{AppState, MiddleMode, RightTab};

/// Root reducer.  Delegates to the domain reducers; the first one that
/// recognises the message consumes it.
pub fn update(state: &mut AppState, msg: Message) -> Vec<Command> {
    let mut commands = Vec::new();

    if crate::reducers::projects::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::chat::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::workflow::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::workspace::update(state, &msg, &mut commands) {
        return commands;
    }
    if crate::reducers::runs::update(state, &msg, &mut commands) {
        return commands;
    }

    crate::warn_log!("Unhandled message: {:?}", msg);
    commands
}

/// Point the live-trace subscription at `trace_id` (or stop it).  Agent and
/// event slices from a previous trace are dropped so they never render under
/// the new one.
pub(crate) fn set_active_trace(state: &mut AppState, trace_id: Option<String>, cmds: &mut Vec<Command>) {
    let trace_id = trace_id.filter(|t| !t.is_empty());
    if trace_id != state.active_trace_id {
        state.agents.clear();
        state.events_by_agent.clear();
        state.selected_agent = None;
    }
    state.active_trace_id = trace_id.clone();

    cmds.push(Command::StopPolling);
    if let Some(trace_id) = trace_id {
        cmds.push(Command::StartPolling { project_id: state.project_id.clone(), trace_id });
    }
}

/// Layout used whenever a workflow starts: Workflow tab, preview visible,
/// fullscreen off.
pub(crate) fn show_workflow_layout(state: &mut AppState) {
    state.right_tab = RightTab::Workflow;
    state.middle_mode = MiddleMode::Preview;
    state.preview_fullscreen = false;
}
