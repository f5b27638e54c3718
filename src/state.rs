use std::cell::RefCell;

use serde_json::Value;

use crate::constants::{DEFAULT_PROJECT_ID, DEFAULT_SYSTEM_PROMPT};
use crate::messages::{Command, Message};
use crate::models::{Agent, ChatMessage, EventsByAgent, OrchestratorDecision, Permissions, RunView};
use crate::update::update;

/// What the middle column shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiddleMode {
    Preview,
    Files,
}

impl MiddleMode {
    pub fn id(&self) -> &'static str {
        match self {
            MiddleMode::Preview => "preview",
            MiddleMode::Files => "files",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "preview" => Some(MiddleMode::Preview),
            "files" => Some(MiddleMode::Files),
            _ => None,
        }
    }
}

/// Right-hand panel tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RightTab {
    Workflow,
    Actions,
    Runs,
    Maps,
}

impl RightTab {
    pub const ALL: [RightTab; 4] = [RightTab::Workflow, RightTab::Actions, RightTab::Runs, RightTab::Maps];

    pub fn id(&self) -> &'static str {
        match self {
            RightTab::Workflow => "workflow",
            RightTab::Actions => "actions",
            RightTab::Runs => "runs",
            RightTab::Maps => "maps",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RightTab::Workflow => "Workflow",
            RightTab::Actions => "Actions",
            RightTab::Runs => "Runs",
            RightTab::Maps => "Maps",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tab| tab.id() == id)
    }
}

// Top-level UI state.  All of it is transient view state; the backend owns
// durability.
pub struct AppState {
    // Project & model selection
    pub projects: Vec<String>,
    pub project_id: String,
    pub models: Vec<String>,
    pub selected_model: String,
    pub system_maps: Option<Value>,

    // Chat
    pub messages: Vec<ChatMessage>,
    pub draft: String,
    pub busy: bool,
    pub orchestrator_decision: Option<OrchestratorDecision>,

    // Middle column
    pub middle_mode: MiddleMode,
    pub preview_fullscreen: bool,
    // Bumped whenever the preview iframe must reload.
    pub preview_nonce: u32,
    pub workspace_files: Vec<String>,
    pub selected_file: Option<String>,
    pub file_content: String,
    pub file_error: Option<String>,

    // Right column
    pub right_tab: RightTab,
    pub runs: Vec<String>,
    pub selected_run_id: Option<String>,
    pub selected_run: Option<RunView>,
    pub maps_show_raw: bool,

    // Permissions (optimistic local mirror)
    pub permissions: Permissions,

    // Live trace
    pub active_trace_id: Option<String>,
    pub agents: Vec<Agent>,
    pub events_by_agent: EventsByAgent,
    pub selected_agent: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            projects: vec![DEFAULT_PROJECT_ID.to_string()],
            project_id: DEFAULT_PROJECT_ID.to_string(),
            models: Vec::new(),
            selected_model: String::new(),
            system_maps: None,
            messages: vec![ChatMessage::system(DEFAULT_SYSTEM_PROMPT)],
            draft: String::new(),
            busy: false,
            orchestrator_decision: None,
            middle_mode: MiddleMode::Preview,
            preview_fullscreen: false,
            preview_nonce: 0,
            workspace_files: Vec::new(),
            selected_file: None,
            file_content: String::new(),
            file_error: None,
            right_tab: RightTab::Workflow,
            runs: Vec::new(),
            selected_run_id: None,
            selected_run: None,
            maps_show_raw: false,
            permissions: Permissions::default(),
            active_trace_id: None,
            agents: Vec::new(),
            events_by_agent: EventsByAgent::new(),
            selected_agent: None,
        }
    }

    /// Trace id the polling results must match; empty when idle.
    pub fn active_trace(&self) -> &str {
        self.active_trace_id.as_deref().unwrap_or("")
    }

    /// Agent shown in the Workflow panel: the user's pick while it is still
    /// listed, otherwise the first agent.
    pub fn effective_agent(&self) -> Option<&Agent> {
        let picked = self
            .selected_agent
            .as_deref()
            .filter(|name| !name.is_empty())
            .and_then(|name| self.agents.iter().find(|a| a.name == name));
        picked.or_else(|| self.agents.iter().find(|a| !a.name.is_empty()))
    }

    pub fn dispatch(&mut self, msg: Message) -> Vec<Command> {
        update(self, msg)
    }
}

thread_local! {
    pub static APP_STATE: RefCell<AppState> = RefCell::new(AppState::new());
}

// Global helper function for dispatching messages with proper UI refresh handling
pub fn dispatch_global_message(msg: Message) {
    // 1. Perform state updates and collect commands
    let commands = APP_STATE.with(|state| state.borrow_mut().dispatch(msg));

    // 2. Execute commands after state borrow is dropped
    for cmd in commands {
        match cmd {
            Command::SendMessage(msg) => dispatch_global_message(msg),
            Command::Toast { kind, text } => crate::toast::show(&text, kind),
            cmd @ Command::StartPolling { .. } | cmd @ Command::StopPolling => {
                crate::polling::execute_polling_command(cmd)
            }
            cmd => crate::command_executors::execute_fetch_command(cmd),
        }
    }

    // 3. Re-render from the settled state
    if let Err(e) = crate::views::refresh_ui() {
        crate::warn_log!("Failed to refresh UI: {:?}", e);
    }
}
