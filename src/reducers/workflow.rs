//! Live trace slices (agents, events) and the permission toggles.

use crate::debug_log;
use crate::messages::{Command, Message};
use crate::state::AppState;
use crate::update::set_active_trace;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::SetActiveTrace(trace_id) => {
            set_active_trace(state, trace_id.clone(), cmds);
            true
        }
        Message::AgentsPolled { project_id, trace_id, agents } => {
            if is_current(state, project_id, trace_id) {
                state.agents = agents.clone();
            } else {
                debug_log!("Dropping stale agents for {}/{}", project_id, trace_id);
            }
            true
        }
        Message::EventsPolled { project_id, trace_id, events_by_agent } => {
            if is_current(state, project_id, trace_id) {
                state.events_by_agent = events_by_agent.clone();
            } else {
                debug_log!("Dropping stale events for {}/{}", project_id, trace_id);
            }
            true
        }
        Message::SelectAgent(name) => {
            state.selected_agent = Some(name.clone()).filter(|n| !n.is_empty());
            true
        }
        Message::PermissionsLoaded { project_id, permissions } => {
            if *project_id == state.project_id {
                state.permissions = *permissions;
            }
            true
        }
        Message::TogglePermission(flag) => {
            // Optimistic: the local flip stands even if the save fails.
            state.permissions = state.permissions.toggled(*flag);
            cmds.push(Command::PersistPermissions {
                project_id: state.project_id.clone(),
                permissions: state.permissions,
            });
            true
        }
        _ => false,
    }
}

fn is_current(state: &AppState, project_id: &str, trace_id: &str) -> bool {
    project_id == state.project_id && trace_id == state.active_trace()
}
