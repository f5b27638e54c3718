//! Right column tabs, run history and the maps view toggle.

use crate::debug_log;
use crate::messages::{Command, Message};
use crate::models::RunView;
use crate::state::{AppState, RightTab};

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::SelectRightTab(tab) => {
            state.right_tab = *tab;
            true
        }
        Message::RunsLoaded { project_id, runs } => {
            if *project_id == state.project_id {
                state.runs = runs.clone();
            }
            true
        }
        Message::LoadRun(trace_id) => {
            if trace_id.is_empty() {
                return true;
            }
            cmds.push(Command::FetchRun {
                project_id: state.project_id.clone(),
                trace_id: trace_id.clone(),
            });
            true
        }
        Message::RunLoaded { project_id, trace_id, run } => {
            if *project_id != state.project_id {
                debug_log!("Dropping run {} from project {}", trace_id, project_id);
                return true;
            }
            state.selected_run_id = Some(trace_id.clone());
            state.selected_run = Some(match (run.ok, &run.error) {
                (Some(false), Some(error)) => RunView::Failed(error.clone()),
                (Some(false), None) => RunView::Failed("Run failed to load".to_string()),
                _ => RunView::Loaded((**run).clone()),
            });
            state.right_tab = RightTab::Runs;
            true
        }
        Message::RunLoadFailed { project_id, trace_id, error } => {
            if *project_id != state.project_id {
                return true;
            }
            state.selected_run_id = Some(trace_id.clone());
            state.selected_run = Some(RunView::Failed(error.clone()));
            state.right_tab = RightTab::Runs;
            true
        }
        Message::ToggleMapsRaw => {
            state.maps_show_raw = !state.maps_show_raw;
            true
        }
        _ => false,
    }
}
