//! Chat transcript and the single orchestration entry point.

use crate::debug_log;
use crate::messages::{Command, Message};
use crate::models::ChatMessage;
use crate::state::AppState;
use crate::toast::ToastKind;
use crate::update::{set_active_trace, show_workflow_layout};

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::UpdateDraft(text) => {
            state.draft = text.clone();
            true
        }
        Message::SendDraft => {
            let text = state.draft.trim().to_string();
            if text.is_empty() || state.busy {
                return true;
            }
            state.messages.push(ChatMessage::user(text));
            state.draft.clear();
            state.busy = true;
            cmds.push(Command::Orchestrate {
                model: state.selected_model.clone(),
                messages: state.messages.clone(),
                project_id: state.project_id.clone(),
                permissions: state.permissions,
            });
            true
        }
        Message::OrchestrateCompleted { project_id, response: resp } => {
            state.busy = false;
            debug_log!("Orchestrator decided mode={}", resp.mode());

            // The transcript is shared across projects; trace and layout are not.
            if *project_id != state.project_id {
                debug_log!("Reply for project {} arrived after a switch", project_id);
                let text = if resp.is_workflow() { resp.reply_text() } else { resp.chat_text() };
                if !text.is_empty() {
                    state.messages.push(ChatMessage::assistant(text));
                }
                return true;
            }

            state.orchestrator_decision = Some(resp.decision(chrono::Utc::now()));
            if resp.is_workflow() {
                show_workflow_layout(state);
                if let Some(trace_id) = resp.trace_id() {
                    set_active_trace(state, Some(trace_id), cmds);
                }
                let reply = resp.reply_text();
                if !reply.is_empty() {
                    state.messages.push(ChatMessage::assistant(reply));
                }
                cmds.push(Command::FetchRuns { project_id: state.project_id.clone() });
                return true;
            }

            let content = resp.chat_text();
            if !content.is_empty() {
                state.messages.push(ChatMessage::assistant(content));
            }
            true
        }
        Message::OrchestrateFailed(error) => {
            state.busy = false;
            state.messages.push(ChatMessage::assistant(format!("Error: {}", error)));
            true
        }
        Message::StartWorkflow(goal) => {
            let goal = goal.trim();
            if goal.is_empty() || state.busy {
                return true;
            }
            state.busy = true;
            if state.draft.trim() == goal {
                state.draft.clear();
            }
            show_workflow_layout(state);
            cmds.push(Command::StartWorkflow {
                model: state.selected_model.clone(),
                goal: goal.to_string(),
                project_id: state.project_id.clone(),
                permissions: state.permissions,
            });
            true
        }
        Message::WorkflowStarted { project_id, trace_id } => {
            state.busy = false;
            if *project_id != state.project_id {
                debug_log!("Workflow for project {} started after a switch", project_id);
                return true;
            }
            match trace_id.clone().filter(|t| !t.is_empty()) {
                Some(trace_id) => set_active_trace(state, Some(trace_id), cmds),
                None => cmds.push(Command::Toast {
                    kind: ToastKind::Info,
                    text: "Workflow started without a trace id; live view unavailable.".to_string(),
                }),
            }
            cmds.push(Command::FetchRuns { project_id: state.project_id.clone() });
            true
        }
        Message::WorkflowStartFailed(error) => {
            state.busy = false;
            cmds.push(Command::Toast {
                kind: ToastKind::Error,
                text: format!("Workflow did not start: {}", error),
            });
            true
        }
        _ => false,
    }
}
