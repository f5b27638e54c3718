use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::config::api_config;
use super::ApiError;
use crate::constants::{DEFAULT_ENABLE_POSTPROCESS, DEFAULT_MAX_STEPS, DEFAULT_PARALLEL_TOOL_CALLS};
use crate::debug_log;
use crate::models::{
    AgentsResponse, ChatMessage, EventsResponse, OrchestrateRequest, OrchestrateResponse,
    Permissions, PermissionsResponse, PermissionsUpdate, ProjectCreateRequest,
    ProjectCreatedResponse, ProjectsResponse, RunDetail, RunsResponse, WorkflowRequest,
    WorkflowStartResponse, WorkspaceListResponse, WorkspaceReadResponse,
};

// REST client for the orchestrator backend.  Every call is fire-once: no
// retries, no timeout, no caching.
pub struct ApiClient;

impl ApiClient {
    fn url(segments: &[&str], query: &[(&str, &str)]) -> String {
        api_config().api(segments, query)
    }

    // ---------------- Catalogue ----------------

    /// GET /api/models – raw reply; see `models::model_ids` for the shapes.
    pub async fn fetch_models() -> Result<Value, ApiError> {
        Self::get(&Self::url(&["models"], &[])).await
    }

    /// GET /api/system/maps
    pub async fn fetch_system_maps() -> Result<Value, ApiError> {
        Self::get(&Self::url(&["system", "maps"], &[])).await
    }

    // ---------------- Projects ----------------

    pub async fn list_projects() -> Result<ProjectsResponse, ApiError> {
        Self::get(&Self::url(&["projects"], &[])).await
    }

    /// POST /api/projects – an empty name lets the backend pick an id.
    pub async fn create_project(name: &str) -> Result<ProjectCreatedResponse, ApiError> {
        let body = ProjectCreateRequest { name: name.to_string() };
        Self::post(&Self::url(&["projects"], &[]), &body).await
    }

    // ---------------- Runs ----------------

    pub async fn fetch_runs(project_id: &str) -> Result<RunsResponse, ApiError> {
        Self::get(&Self::url(&["runs"], &[("project_id", project_id)])).await
    }

    pub async fn fetch_run(project_id: &str, trace_id: &str) -> Result<RunDetail, ApiError> {
        Self::get(&Self::url(&["runs", project_id, trace_id], &[])).await
    }

    // ---------------- Workspace (read-only) ----------------

    pub async fn list_workspace_files(project_id: &str) -> Result<WorkspaceListResponse, ApiError> {
        Self::get(&Self::url(&["workspace", "list"], &[("project_id", project_id)])).await
    }

    pub async fn read_workspace_file(
        project_id: &str,
        path: &str,
    ) -> Result<WorkspaceReadResponse, ApiError> {
        let url = Self::url(&["workspace", "read"], &[("project_id", project_id), ("path", path)]);
        Self::get(&url).await
    }

    // ---------------- Permissions ----------------

    pub async fn get_permissions(project_id: &str) -> Result<PermissionsResponse, ApiError> {
        Self::get(&Self::url(&["permissions"], &[("project_id", project_id)])).await
    }

    pub async fn set_permissions(
        project_id: &str,
        permissions: Permissions,
    ) -> Result<PermissionsResponse, ApiError> {
        let body = PermissionsUpdate { project_id: project_id.to_string(), permissions };
        Self::post(&Self::url(&["permissions"], &[]), &body).await
    }

    // ---------------- Workflow observability ----------------

    pub async fn fetch_workflow_agents(
        project_id: &str,
        trace_id: &str,
    ) -> Result<AgentsResponse, ApiError> {
        let url = Self::url(
            &["workflow", "agents"],
            &[("project_id", project_id), ("trace_id", trace_id)],
        );
        Self::get(&url).await
    }

    pub async fn fetch_workflow_events(
        project_id: &str,
        trace_id: &str,
    ) -> Result<EventsResponse, ApiError> {
        let url = Self::url(
            &["workflow", "events"],
            &[("project_id", project_id), ("trace_id", trace_id)],
        );
        Self::get(&url).await
    }

    // ---------------- Orchestration ----------------

    /// POST /api/orchestrate – the backend decides between a chat reply and
    /// a workflow run.
    pub async fn orchestrate(
        model: &str,
        messages: Vec<ChatMessage>,
        project_id: &str,
        permissions: Permissions,
    ) -> Result<OrchestrateResponse, ApiError> {
        let body = OrchestrateRequest {
            model: model.to_string(),
            messages,
            project_id: project_id.to_string(),
            reasoning_model: String::new(),
            enable_postprocess: DEFAULT_ENABLE_POSTPROCESS,
            max_steps: DEFAULT_MAX_STEPS,
            permissions,
            parallel_tool_calls: DEFAULT_PARALLEL_TOOL_CALLS,
        };
        Self::post(&Self::url(&["orchestrate"], &[]), &body).await
    }

    /// POST /api/workflow – start a workflow straight from a goal.
    pub async fn start_workflow(
        model: &str,
        goal: &str,
        project_id: &str,
        permissions: Permissions,
    ) -> Result<WorkflowStartResponse, ApiError> {
        let body = WorkflowRequest {
            model: model.to_string(),
            goal: goal.to_string(),
            project_id: project_id.to_string(),
            enable_postprocess: DEFAULT_ENABLE_POSTPROCESS,
            max_steps: DEFAULT_MAX_STEPS,
            permissions,
        };
        Self::post(&Self::url(&["workflow"], &[]), &body).await
    }

    // -------------------------------------------------------------------
    // Plumbing
    // -------------------------------------------------------------------

    async fn get<T: DeserializeOwned>(url: &str) -> Result<T, ApiError> {
        let text = Self::fetch_json(url, "GET", None).await?;
        Ok(serde_json::from_str(&text)?)
    }

    async fn post<B: Serialize, T: DeserializeOwned>(url: &str, body: &B) -> Result<T, ApiError> {
        let payload = serde_json::to_string(body)?;
        let text = Self::fetch_json(url, "POST", Some(&payload)).await?;
        Ok(serde_json::from_str(&text)?)
    }

    // Helper function to make fetch requests.  Returns the raw body text;
    // callers decode.
    pub async fn fetch_json(url: &str, method: &str, body: Option<&str>) -> Result<String, ApiError> {
        use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

        debug_log!("{} {}", method, url);

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new()?;
        headers.append("Accept", "application/json")?;

        if let Some(data) = body {
            opts.set_body(&JsValue::from_str(data));
            headers.append("Content-Type", "application/json")?;
        }

        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts)?;

        let window = web_sys::window()
            .ok_or_else(|| ApiError::Transport("no global window exists".to_string()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request)).await?;
        let resp: Response = resp_value.dyn_into()?;

        if !resp.ok() {
            return Err(ApiError::Http { status: resp.status(), status_text: resp.status_text() });
        }

        let text = JsFuture::from(resp.text()?).await?;
        Ok(text.as_string().unwrap_or_default())
    }
}
