//! Wire and view types shared by the API client, reducers and panels.
//!
//! Every response field is optional on the wire: absent arrays and objects
//! deserialize to empty defaults so a partially-populated backend reply never
//! turns into a decode failure.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Chat transcript
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// Message content is usually text, but the backend is free to echo
/// structured JSON back into the transcript.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatContent {
    Text(String),
    Json(Value),
}

impl ChatContent {
    /// Text shown inside a chat bubble: strings verbatim, anything else as
    /// pretty-printed JSON.
    pub fn display_text(&self) -> String {
        match self {
            ChatContent::Text(text) => text.clone(),
            ChatContent::Json(Value::Null) => String::new(),
            ChatContent::Json(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: ChatContent,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, content: ChatContent::Text(text.into()) }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: ChatContent::Text(text.into()) }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self { role: Role::System, content: ChatContent::Text(text.into()) }
    }
}

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

/// Runtime capability toggles.  The server owns the authoritative copy; the
/// UI keeps an optimistic mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub self_modify: bool,
    pub file_write: bool,
    pub shell: bool,
    pub web: bool,
}

impl Default for Permissions {
    fn default() -> Self {
        Self { self_modify: false, file_write: true, shell: false, web: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionFlag {
    SelfModify,
    FileWrite,
    Shell,
    Web,
}

impl PermissionFlag {
    pub const ALL: [PermissionFlag; 4] = [
        PermissionFlag::SelfModify,
        PermissionFlag::FileWrite,
        PermissionFlag::Shell,
        PermissionFlag::Web,
    ];

    /// Key used on the wire and in `data-arg` attributes.
    pub fn key(&self) -> &'static str {
        match self {
            PermissionFlag::SelfModify => "self_modify",
            PermissionFlag::FileWrite => "file_write",
            PermissionFlag::Shell => "shell",
            PermissionFlag::Web => "web",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PermissionFlag::SelfModify => "Self-modify",
            PermissionFlag::FileWrite => "File write",
            PermissionFlag::Shell => "Shell",
            PermissionFlag::Web => "Web",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|flag| flag.key() == key)
    }
}

impl Permissions {
    pub fn get(&self, flag: PermissionFlag) -> bool {
        match flag {
            PermissionFlag::SelfModify => self.self_modify,
            PermissionFlag::FileWrite => self.file_write,
            PermissionFlag::Shell => self.shell,
            PermissionFlag::Web => self.web,
        }
    }

    /// Return a copy with exactly one flag flipped.
    pub fn toggled(&self, flag: PermissionFlag) -> Self {
        let mut next = *self;
        match flag {
            PermissionFlag::SelfModify => next.self_modify = !next.self_modify,
            PermissionFlag::FileWrite => next.file_write = !next.file_write,
            PermissionFlag::Shell => next.shell = !next.shell,
            PermissionFlag::Web => next.web = !next.web,
        }
        next
    }
}

// ---------------------------------------------------------------------------
// Workflow observability
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Agent {
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub mission: String,
}

/// Event timestamps arrive either as epoch milliseconds (what the backend
/// emits today) or as date-time strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EventTimestamp {
    Millis(f64),
    Text(String),
}

fn default_info() -> String {
    "info".to_string()
}

/// Explicit `null` decodes like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_info<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_info))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowEvent {
    #[serde(default)]
    pub ts: Option<EventTimestamp>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(default = "default_info", deserialize_with = "null_as_info")]
    pub kind: String,
    #[serde(default = "default_info", deserialize_with = "null_as_info")]
    pub level: String,
}

impl WorkflowEvent {
    pub fn is_comms(&self) -> bool {
        self.kind == "comms"
    }
}

/// Events grouped by agent name, in the order the backend listed them.
pub type EventsByAgent = IndexMap<String, Vec<WorkflowEvent>>;

/// Snapshot of the backend's classification of the last chat turn.
#[derive(Debug, Clone, PartialEq)]
pub struct OrchestratorDecision {
    pub at: chrono::DateTime<chrono::Utc>,
    pub mode: String,
    pub goal: Option<String>,
    pub confidence: Option<f64>,
    pub reason: String,
    pub trace_id: String,
}

// ---------------------------------------------------------------------------
// Runs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectSummary {
    pub goal: Option<Value>,
    pub changes_summary: Option<Value>,
    pub decisions: Vec<Value>,
    pub files_touched: Vec<Value>,
    pub open_questions: Vec<Value>,
    pub next_steps: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunDetail {
    pub ok: Option<bool>,
    pub error: Option<String>,
    pub trace_id: Option<String>,
    pub architect_summary: Option<Value>,
    pub notes: Option<String>,
}

impl RunDetail {
    /// The architect summary, when the backend stored an object for it.
    pub fn summary(&self) -> Option<ArchitectSummary> {
        match &self.architect_summary {
            Some(value @ Value::Object(_)) => serde_json::from_value(value.clone()).ok(),
            _ => None,
        }
    }
}

/// What the Runs panel shows for the selected run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunView {
    Loaded(RunDetail),
    Failed(String),
}

// ---------------------------------------------------------------------------
// Response envelopes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectsResponse {
    pub ok: bool,
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectCreatedResponse {
    pub ok: bool,
    pub project_id: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunsResponse {
    pub ok: bool,
    pub runs: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PermissionsResponse {
    pub ok: bool,
    pub permissions: Option<Permissions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkspaceListResponse {
    pub ok: bool,
    pub files: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkspaceReadResponse {
    pub ok: bool,
    pub content: Option<Value>,
    pub error: Option<String>,
}

impl WorkspaceReadResponse {
    /// File content as text; non-string payloads are rendered as JSON.
    pub fn content_text(&self) -> String {
        match &self.content {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgentsResponse {
    pub ok: bool,
    pub agents: Option<Vec<Agent>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventsResponse {
    pub ok: bool,
    pub events_by_agent: Option<EventsByAgent>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OrchestrateResponse {
    pub ok: Option<bool>,
    pub mode: Option<String>,
    pub reply: Option<String>,
    pub goal: Option<Value>,
    pub confidence: Option<f64>,
    pub reason: Option<String>,
    pub trace_id: Option<String>,
    pub result: Option<Value>,
    pub error: Option<String>,
}

impl OrchestrateResponse {
    /// Lower-cased mode, `chat` when absent.
    pub fn mode(&self) -> String {
        self.mode
            .as_deref()
            .map(str::to_lowercase)
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| "chat".to_string())
    }

    pub fn is_workflow(&self) -> bool {
        self.mode() == "workflow"
    }

    /// Trimmed explicit reply, empty when absent.
    pub fn reply_text(&self) -> String {
        self.reply.as_deref().unwrap_or("").trim().to_string()
    }

    /// Assistant text for chat mode: the explicit reply, otherwise the first
    /// completion choice nested under `result`.
    pub fn chat_text(&self) -> String {
        let reply = self.reply_text();
        if !reply.is_empty() {
            return reply;
        }
        self.result
            .as_ref()
            .and_then(|r| r.pointer("/choices/0/message/content"))
            .and_then(Value::as_str)
            .unwrap_or("")
            .to_string()
    }

    pub fn trace_id(&self) -> Option<String> {
        self.trace_id.clone().filter(|t| !t.is_empty())
    }

    pub fn decision(&self, at: chrono::DateTime<chrono::Utc>) -> OrchestratorDecision {
        OrchestratorDecision {
            at,
            mode: self.mode(),
            goal: self.goal.as_ref().and_then(value_to_text),
            confidence: self.confidence,
            reason: self.reason.clone().unwrap_or_default(),
            trace_id: self.trace_id.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WorkflowStartResponse {
    pub ok: Option<bool>,
    pub trace_id: Option<String>,
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct OrchestrateRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub project_id: String,
    pub reasoning_model: String,
    pub enable_postprocess: bool,
    pub max_steps: u32,
    pub permissions: Permissions,
    pub parallel_tool_calls: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkflowRequest {
    pub model: String,
    pub goal: String,
    pub project_id: String,
    pub enable_postprocess: bool,
    pub max_steps: u32,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Serialize)]
pub struct PermissionsUpdate {
    pub project_id: String,
    pub permissions: Permissions,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCreateRequest {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Model ids from a `/api/models` reply.  The list lives under `data` or
/// `models`; entries are strings or objects carrying `id` / `name`.  Ids are
/// deduplicated keeping first-seen order.
pub fn model_ids(response: &Value) -> Vec<String> {
    let list = response
        .get("data")
        .or_else(|| response.get("models"))
        .and_then(Value::as_array);

    let mut ids: Vec<String> = Vec::new();
    for entry in list.into_iter().flatten() {
        let id = match entry {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj
                .get("id")
                .or_else(|| obj.get("name"))
                .and_then(value_to_text),
            Value::Null => None,
            other => Some(other.to_string()),
        };
        if let Some(id) = id.filter(|id| !id.is_empty()) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    ids
}

/// Render a JSON scalar the way the panels print it: strings unquoted,
/// `null` as nothing.
pub fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn model_ids_dedupes_and_keeps_order() {
        let resp = json!({"data": [
            {"id": "mistral-large"},
            {"id": "mistral-small"},
            {"id": "mistral-large"},
            {"name": "codestral"},
            "mistral-small",
            {"other": true},
        ]});
        assert_eq!(model_ids(&resp), vec!["mistral-large", "mistral-small", "codestral"]);
    }

    #[test]
    fn model_ids_reads_models_key_and_tolerates_garbage() {
        assert_eq!(model_ids(&json!({"models": ["a", "b", "a"]})), vec!["a", "b"]);
        assert!(model_ids(&json!({"error": "no key"})).is_empty());
        assert!(model_ids(&json!({"data": "nope"})).is_empty());
    }

    #[test]
    fn toggling_flips_only_one_flag() {
        let base = Permissions::default();
        for flag in PermissionFlag::ALL {
            let next = base.toggled(flag);
            assert_eq!(next.get(flag), !base.get(flag));
            for other in PermissionFlag::ALL.into_iter().filter(|f| *f != flag) {
                assert_eq!(next.get(other), base.get(other), "{} changed", other.key());
            }
        }
    }

    #[test]
    fn permissions_fill_missing_keys_with_defaults() {
        let p: Permissions = serde_json::from_value(json!({"shell": true})).unwrap();
        assert_eq!(p, Permissions { shell: true, ..Permissions::default() });
    }

    #[test]
    fn events_accept_numeric_and_string_timestamps() {
        let events: Vec<WorkflowEvent> = serde_json::from_value(json!([
            {"ts": 1704067200000.0, "text": "a"},
            {"ts": "2024-01-01T00:00:01Z", "text": "b", "kind": "comms"},
            {"text": "c"},
        ]))
        .unwrap();
        assert_eq!(events[0].ts, Some(EventTimestamp::Millis(1704067200000.0)));
        assert!(events[1].is_comms());
        assert_eq!(events[2].ts, None);
        assert_eq!(events[2].kind, "info");
        assert_eq!(events[2].level, "info");
    }

    #[test]
    fn null_event_and_agent_fields_decode_as_defaults() {
        let events: EventsResponse = serde_json::from_str(
            r#"{"ok":true,"events_by_agent":{"A":[{"ts":1,"text":null,"kind":null,"level":null}]}}"#,
        )
        .unwrap();
        let by_agent = events.events_by_agent.unwrap();
        let event = &by_agent["A"][0];
        assert_eq!(event.text, "");
        assert_eq!(event.kind, "info");
        assert_eq!(event.level, "info");

        let agents: AgentsResponse = serde_json::from_str(
            r#"{"ok":true,"agents":[{"name":"Coder","status":null,"mission":null}]}"#,
        )
        .unwrap();
        let agents = agents.agents.unwrap();
        assert_eq!(agents[0], Agent { name: "Coder".into(), ..Agent::default() });
    }

    #[test]
    fn chat_text_prefers_reply_then_nested_choice() {
        let with_reply: OrchestrateResponse =
            serde_json::from_value(json!({"mode": "chat", "reply": "  hi  "})).unwrap();
        assert_eq!(with_reply.chat_text(), "hi");

        let nested: OrchestrateResponse = serde_json::from_value(json!({
            "reply": "",
            "result": {"choices": [{"message": {"content": "from choice"}}]}
        }))
        .unwrap();
        assert_eq!(nested.chat_text(), "from choice");
        assert_eq!(nested.mode(), "chat");
    }

    #[test]
    fn mode_is_lowercased() {
        let resp: OrchestrateResponse =
            serde_json::from_value(json!({"mode": "WorkFlow", "trace_id": "abc"})).unwrap();
        assert!(resp.is_workflow());
        assert_eq!(resp.trace_id().as_deref(), Some("abc"));
    }

    #[test]
    fn run_summary_requires_an_object() {
        let run: RunDetail = serde_json::from_value(json!({
            "ok": true,
            "architect_summary": {"goal": "ship", "decisions": ["a", 2]},
            "notes": "n"
        }))
        .unwrap();
        let summary = run.summary().unwrap();
        assert_eq!(summary.goal, Some(json!("ship")));
        assert_eq!(summary.decisions.len(), 2);

        let bare: RunDetail =
            serde_json::from_value(json!({"architect_summary": "text"})).unwrap();
        assert!(bare.summary().is_none());
    }

    #[test]
    fn json_content_is_pretty_printed() {
        let content = ChatContent::Json(json!({"k": 1}));
        assert_eq!(content.display_text(), "{\n  \"k\": 1\n}");
        assert_eq!(ChatContent::Json(Value::Null).display_text(), "");
    }
}
