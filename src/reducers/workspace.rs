//! Middle column: preview/files mode and the workspace file browser.

use crate::messages::{Command, Message};
use crate::state::{AppState, MiddleMode};

pub fn update(state: &mut AppState, msg: &Message, cmds: &mut Vec<Command>) -> bool {
    match msg {
        Message::SetMiddleMode(mode) => {
            state.middle_mode = *mode;
            if *mode == MiddleMode::Files {
                cmds.push(Command::FetchWorkspaceFiles { project_id: state.project_id.clone() });
            }
            true
        }
        Message::ToggleFullscreen => {
            state.preview_fullscreen = !state.preview_fullscreen;
            true
        }
        Message::RefreshWorkspaceFiles => {
            cmds.push(Command::FetchWorkspaceFiles { project_id: state.project_id.clone() });
            true
        }
        Message::WorkspaceFilesLoaded { project_id, files } => {
            if *project_id == state.project_id {
                state.workspace_files = files.clone();
            }
            true
        }
        Message::SelectFile(path) => {
            state.file_content.clear();
            state.file_error = None;
            if path.is_empty() {
                state.selected_file = None;
                return true;
            }
            state.selected_file = Some(path.clone());
            cmds.push(Command::ReadWorkspaceFile {
                project_id: state.project_id.clone(),
                path: path.clone(),
            });
            true
        }
        Message::FileContentLoaded { path, content } => {
            if state.selected_file.as_deref() == Some(path.as_str()) {
                state.file_content = content.clone();
                state.file_error = None;
            }
            true
        }
        Message::FileReadFailed { path, error } => {
            if state.selected_file.as_deref() == Some(path.as_str()) {
                state.file_content.clear();
                state.file_error = Some(error.clone());
            }
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducers::test_support::names;

    #[test]
    fn files_mode_fetches_listing() {
        let mut state = AppState::new();
        let cmds = state.dispatch(Message::SetMiddleMode(MiddleMode::Files));
        assert_eq!(state.middle_mode, MiddleMode::Files);
        assert_eq!(names(&cmds), vec!["FetchWorkspaceFiles"]);

        let cmds = state.dispatch(Message::SetMiddleMode(MiddleMode::Preview));
        assert!(cmds.is_empty());
    }

    #[test]
    fn fullscreen_toggles() {
        let mut state = AppState::new();
        state.dispatch(Message::ToggleFullscreen);
        assert!(state.preview_fullscreen);
        state.dispatch(Message::ToggleFullscreen);
        assert!(!state.preview_fullscreen);
    }

    #[test]
    fn selecting_a_file_clears_previous_content_before_reading() {
        let mut state = AppState::new();
        state.selected_file = Some("old.txt".into());
        state.file_content = "old".into();
        state.file_error = Some("boom".into());

        let cmds = state.dispatch(Message::SelectFile("index.html".into()));

        assert_eq!(state.selected_file.as_deref(), Some("index.html"));
        assert!(state.file_content.is_empty());
        assert!(state.file_error.is_none());
        assert!(matches!(&cmds[..], [Command::ReadWorkspaceFile { path, .. }] if path == "index.html"));
    }

    #[test]
    fn late_content_for_a_previous_file_is_ignored() {
        let mut state = AppState::new();
        state.dispatch(Message::SelectFile("a.txt".into()));
        state.dispatch(Message::SelectFile("b.txt".into()));

        state.dispatch(Message::FileContentLoaded { path: "a.txt".into(), content: "A".into() });
        assert!(state.file_content.is_empty());

        state.dispatch(Message::FileContentLoaded { path: "b.txt".into(), content: "B".into() });
        assert_eq!(state.file_content, "B");
    }

    #[test]
    fn read_failure_shows_error() {
        let mut state = AppState::new();
        state.dispatch(Message::SelectFile("missing.txt".into()));
        state.dispatch(Message::FileReadFailed {
            path: "missing.txt".into(),
            error: "Failed to read file".into(),
        });
        assert_eq!(state.file_error.as_deref(), Some("Failed to read file"));
    }

    #[test]
    fn listing_for_another_project_is_dropped() {
        let mut state = AppState::new();
        state.dispatch(Message::WorkspaceFilesLoaded { project_id: "other".into(), files: vec!["x".into()] });
        assert!(state.workspace_files.is_empty());
        state.dispatch(Message::WorkspaceFilesLoaded { project_id: "default".into(), files: vec!["x".into()] });
        assert_eq!(state.workspace_files, vec!["x"]);
    }
}
