//! Bootstrap, project switching/creation and model selection.

use crate::debug_log;
use crate::messages::{Command, Message};
use crate::state::{AppState, MiddleMode};
use crate::toast::ToastKind;
use crate::update::set_active_trace;

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::Bootstrap => {
            let project_id = state.project_id.clone();
            cmds.push(Command::FetchProjects);
            cmds.push(Command::FetchModels);
            cmds.push(Command::FetchSystemMaps);
            cmds.push(Command::FetchRuns { project_id: project_id.clone() });
            cmds.push(Command::FetchPermissions { project_id: project_id.clone() });
            cmds.push(Command::FetchAgents { project_id, trace_id: String::new() });
            true
        }
        Message::ProjectsLoaded(projects) => {
            if !projects.is_empty() {
                state.projects = projects.clone();
                if state.project_id.is_empty() {
                    state.project_id = projects[0].clone();
                }
            }
            true
        }
        Message::SelectProject(project_id) => {
            if project_id.is_empty() {
                return true;
            }
            debug_log!("Switching project {} -> {}", state.project_id, project_id);
            state.project_id = project_id.clone();
            state.preview_nonce = state.preview_nonce.wrapping_add(1);
            reset_project_scoped(state, cmds);
            true
        }
        Message::CreateProject => {
            cmds.push(Command::CreateProject);
            true
        }
        Message::ProjectCreated { project_id } => {
            if !state.projects.contains(project_id) {
                state.projects.push(project_id.clone());
            }
            state.middle_mode = MiddleMode::Preview;
            state.preview_fullscreen = false;
            cmds.push(Command::FetchProjects);
            cmds.push(Command::SendMessage(Message::SelectProject(project_id.clone())));
            cmds.push(Command::Toast {
                kind: ToastKind::Success,
                text: format!("Created project {}", project_id),
            });
            true
        }
        Message::ProjectCreateFailed(error) => {
            cmds.push(Command::Toast {
                kind: ToastKind::Error,
                text: format!("Could not create project: {}", error),
            });
            true
        }
        Message::ModelsLoaded(models) => {
            state.models = models.clone();
            if state.selected_model.is_empty() {
                if let Some(first) = models.first() {
                    state.selected_model = first.clone();
                }
            }
            true
        }
        Message::SelectModel(model) => {
            state.selected_model = model.clone();
            true
        }
        Message::SystemMapsLoaded(maps) => {
            state.system_maps = Some(maps.clone());
            true
        }
        _ => false,
    }
}

/// Everything that belongs to the previous project is dropped and re-fetched
/// for the current one.
fn reset_project_scoped(state: &mut AppState, cmds: &mut Vec<Command>) {
    set_active_trace(state, None, cmds);
    state.agents.clear();
    state.events_by_agent.clear();
    state.selected_run_id = None;
    state.selected_run = None;
    state.runs.clear();
    state.workspace_files.clear();
    state.selected_file = None;
    state.file_content.clear();
    state.file_error = None;

    let project_id = state.project_id.clone();
    cmds.push(Command::FetchRuns { project_id: project_id.clone() });
    cmds.push(Command::FetchPermissions { project_id: project_id.clone() });
    cmds.push(Command::FetchAgents { project_id: project_id.clone(), trace_id: String::new() });
    if state.middle_mode == MiddleMode::Files {
        cmds.push(Command::FetchWorkspaceFiles { project_id });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::test_support::names;

    #[test]
    fn bootstrap_requests_every_initial_slice() {
        let mut state = AppState::new();
        let cmds = state.dispatch(Message::Bootstrap);
        assert_eq!(
            names(&cmds),
            vec!["FetchProjects", "FetchModels", "FetchSystemMaps", "FetchRuns", "FetchPermissions", "FetchAgents"]
        );
    }

    #[test]
    fn empty_project_list_keeps_the_default() {
        let mut state = AppState::new();
        state.dispatch(Message::ProjectsLoaded(vec![]));
        assert_eq!(state.projects, vec!["default"]);

        state.dispatch(Message::ProjectsLoaded(vec!["default".into(), "site".into()]));
        assert_eq!(state.projects, vec!["default", "site"]);
        assert_eq!(state.project_id, "default");
    }

    #[test]
    fn first_model_is_selected_only_when_none_chosen() {
        let mut state = AppState::new();
        state.dispatch(Message::ModelsLoaded(vec!["m1".into(), "m2".into()]));
        assert_eq!(state.selected_model, "m1");

        state.dispatch(Message::SelectModel("m2".into()));
        state.dispatch(Message::ModelsLoaded(vec!["m1".into(), "m2".into()]));
        assert_eq!(state.selected_model, "m2");
    }

    #[test]
    fn switching_project_resets_dependent_state() {
        let mut state = AppState::new();
        state.active_trace_id = Some("trace-1".into());
        state.selected_run_id = Some("trace-0".into());
        state.runs = vec!["trace-0".into()];
        state.agents = vec![crate::models::Agent { name: "Planner".into(), ..Default::default() }];

        let cmds = state.dispatch(Message::SelectProject("site".into()));

        assert_eq!(state.project_id, "site");
        assert_eq!(state.active_trace_id, None);
        assert_eq!(state.selected_run_id, None);
        assert!(state.selected_run.is_none());
        assert!(state.agents.is_empty());
        assert_eq!(state.preview_nonce, 1);
        assert_eq!(names(&cmds), vec!["StopPolling", "FetchRuns", "FetchPermissions", "FetchAgents"]);
        assert!(matches!(&cmds[1], Command::FetchRuns { project_id } if project_id == "site"));
    }

    #[test]
    fn created_project_is_listed_and_selected() {
        let mut state = AppState::new();
        state.middle_mode = MiddleMode::Files;
        state.preview_fullscreen = true;

        let cmds = state.dispatch(Message::ProjectCreated { project_id: "proj_1".into() });

        assert!(state.projects.contains(&"proj_1".to_string()));
        assert_eq!(state.middle_mode, MiddleMode::Preview);
        assert!(!state.preview_fullscreen);
        assert_eq!(names(&cmds), vec!["FetchProjects", "SendMessage", "Toast"]);
    }
}
