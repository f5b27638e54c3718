// The events that can occur in the UI, and the side effects the reducers ask
// for in response.

use serde_json::Value;

use crate::models::{
    Agent, ChatMessage, EventsByAgent, OrchestrateResponse, PermissionFlag, Permissions,
    RunDetail,
};
use crate::state::{MiddleMode, RightTab};
use crate::toast::ToastKind;

#[derive(Debug, Clone)]
pub enum Message {
    /// Initial best-effort load on mount.
    Bootstrap,

    // Projects & models
    ProjectsLoaded(Vec<String>),
    SelectProject(String),
    CreateProject,
    ProjectCreated { project_id: String },
    ProjectCreateFailed(String),
    ModelsLoaded(Vec<String>),
    SelectModel(String),
    SystemMapsLoaded(Value),

    // Chat / orchestration
    UpdateDraft(String),
    SendDraft,
    OrchestrateCompleted { project_id: String, response: Box<OrchestrateResponse> },
    OrchestrateFailed(String),
    StartWorkflow(String),
    WorkflowStarted { project_id: String, trace_id: Option<String> },
    WorkflowStartFailed(String),

    // Live trace
    SetActiveTrace(Option<String>),
    AgentsPolled { project_id: String, trace_id: String, agents: Vec<Agent> },
    EventsPolled { project_id: String, trace_id: String, events_by_agent: EventsByAgent },
    SelectAgent(String),

    // Permissions
    PermissionsLoaded { project_id: String, permissions: Permissions },
    TogglePermission(PermissionFlag),

    // Middle column
    SetMiddleMode(MiddleMode),
    ToggleFullscreen,
    RefreshWorkspaceFiles,
    WorkspaceFilesLoaded { project_id: String, files: Vec<String> },
    SelectFile(String),
    FileContentLoaded { path: String, content: String },
    FileReadFailed { path: String, error: String },

    // Right column
    SelectRightTab(RightTab),
    RunsLoaded { project_id: String, runs: Vec<String> },
    LoadRun(String),
    RunLoaded { project_id: String, trace_id: String, run: Box<RunDetail> },
    RunLoadFailed { project_id: String, trace_id: String, error: String },
    ToggleMapsRaw,
}

/// Side effects returned by `update()` and executed once the state borrow
/// has been released.
pub enum Command {
    /// Chain another message to be processed
    SendMessage(Message),

    FetchProjects,
    CreateProject,
    FetchModels,
    FetchSystemMaps,
    FetchRuns { project_id: String },
    FetchRun { project_id: String, trace_id: String },
    FetchPermissions { project_id: String },
    PersistPermissions { project_id: String, permissions: Permissions },
    FetchWorkspaceFiles { project_id: String },
    ReadWorkspaceFile { project_id: String, path: String },

    /// One-shot agents fetch outside the polling loop (initial load,
    /// project switch).
    FetchAgents { project_id: String, trace_id: String },

    Orchestrate {
        model: String,
        messages: Vec<ChatMessage>,
        project_id: String,
        permissions: Permissions,
    },
    StartWorkflow {
        model: String,
        goal: String,
        project_id: String,
        permissions: Permissions,
    },

    /// Replace the live-trace subscription (tears down any previous one).
    StartPolling { project_id: String, trace_id: String },
    StopPolling,

    Toast { kind: ToastKind, text: String },
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::SendMessage(msg) => write!(f, "SendMessage({:?})", msg),
            Command::FetchProjects => f.write_str("FetchProjects"),
            Command::CreateProject => f.write_str("CreateProject"),
            Command::FetchModels => f.write_str("FetchModels"),
            Command::FetchSystemMaps => f.write_str("FetchSystemMaps"),
            Command::FetchRuns { project_id } => write!(f, "FetchRuns({})", project_id),
            Command::FetchRun { project_id, trace_id } => {
                write!(f, "FetchRun({}, {})", project_id, trace_id)
            }
            Command::FetchPermissions { project_id } => write!(f, "FetchPermissions({})", project_id),
            Command::PersistPermissions { project_id, permissions } => {
                write!(f, "PersistPermissions({}, {:?})", project_id, permissions)
            }
            Command::FetchWorkspaceFiles { project_id } => {
                write!(f, "FetchWorkspaceFiles({})", project_id)
            }
            Command::ReadWorkspaceFile { project_id, path } => {
                write!(f, "ReadWorkspaceFile({}, {})", project_id, path)
            }
            Command::FetchAgents { project_id, trace_id } => {
                write!(f, "FetchAgents({}, {:?})", project_id, trace_id)
            }
            Command::Orchestrate { model, messages, project_id, .. } => write!(
                f,
                "Orchestrate(model={}, project={}, {} messages)",
                model,
                project_id,
                messages.len()
            ),
            Command::StartWorkflow { model, goal, project_id, .. } => {
                write!(f, "StartWorkflow(model={}, project={}, goal={:?})", model, project_id, goal)
            }
            Command::StartPolling { project_id, trace_id } => {
                write!(f, "StartPolling({}, {})", project_id, trace_id)
            }
            Command::StopPolling => f.write_str("StopPolling"),
            Command::Toast { kind, text } => write!(f, "Toast({:?}, {:?})", kind, text),
        }
    }
}
