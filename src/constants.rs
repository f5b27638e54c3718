// Defaults – single source of truth for values the backend may override.
pub const DEFAULT_PROJECT_ID: &str = "default";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are the Orchestrator. Be truthful, verify when needed, and follow read\u{2192}patch rules.";

// Orchestration request knobs sent with every chat turn / workflow start.
pub const DEFAULT_MAX_STEPS: u32 = 10;
pub const DEFAULT_ENABLE_POSTPROCESS: bool = true;
pub const DEFAULT_PARALLEL_TOOL_CALLS: bool = true;

// Live polling
pub const POLL_INTERVAL_MS: u32 = 1000;

// Feed limits
pub const ACTIONS_FEED_LIMIT: usize = 120;
pub const LIVE_FEED_LIMIT: usize = 60;

// Trace / run ids are shown shortened to this many characters.
pub const SHORT_ID_LEN: usize = 8;

// Toast lifetime
pub const TOAST_TIMEOUT_MS: i32 = 4000;

// ---------------------------------------------------------------------------
// DOM ids
// ---------------------------------------------------------------------------
pub const ID_APP_ROOT: &str = "app-root";
pub const ID_HEADER: &str = "header";
pub const ID_PROJECT_SELECT: &str = "project-select";
pub const ID_MODEL_SELECT: &str = "model-select";
pub const ID_OPEN_PREVIEW_LINK: &str = "open-preview-link";
pub const ID_MAIN: &str = "main";
pub const ID_LEFT_COLUMN: &str = "left-column";
pub const ID_MIDDLE_COLUMN: &str = "middle-column";
pub const ID_RIGHT_COLUMN: &str = "right-column";
pub const ID_CHAT_STATUS: &str = "chat-status";
pub const ID_CHAT_LOG: &str = "chat-log";
pub const ID_CHAT_INPUT: &str = "chat-input";
pub const ID_CHAT_SEND: &str = "chat-send";
pub const ID_CHAT_RUN_WORKFLOW: &str = "chat-run-workflow";
pub const ID_MIDDLE_HEAD: &str = "middle-head";
pub const ID_MIDDLE_BODY: &str = "middle-body";
pub const ID_PREVIEW_FRAME: &str = "preview-frame";
pub const ID_FILE_BROWSER: &str = "file-browser";
pub const ID_RIGHT_TABS: &str = "right-tabs";
pub const ID_RIGHT_BODY: &str = "right-body";

// ---------------------------------------------------------------------------
// Attributes & CSS classes
// ---------------------------------------------------------------------------
pub const ATTR_ACTION: &str = "data-action";
pub const ATTR_ARG: &str = "data-arg";
pub const ATTR_NONCE: &str = "data-nonce";
pub const ATTR_TYPE: &str = "type";
pub const BUTTON_TYPE_BUTTON: &str = "button";

pub const CSS_TAB_BUTTON: &str = "tab-button";
pub const CSS_TAB_BUTTON_ACTIVE: &str = "tab-button active";
pub const CSS_HIDDEN: &str = "hidden";
pub const CSS_MUTED: &str = "muted";
pub const CSS_ERROR: &str = "error-block";
pub const CSS_FULLSCREEN: &str = "fullscreen";

// ---------------------------------------------------------------------------
// data-action values handled by `ui::events`
// ---------------------------------------------------------------------------
pub const ACTION_CREATE_PROJECT: &str = "create-project";
pub const ACTION_SELECT_PROJECT: &str = "select-project";
pub const ACTION_SELECT_MODEL: &str = "select-model";
pub const ACTION_SEND: &str = "send";
pub const ACTION_RUN_WORKFLOW: &str = "run-workflow";
pub const ACTION_MIDDLE_MODE: &str = "middle-mode";
pub const ACTION_TOGGLE_FULLSCREEN: &str = "toggle-fullscreen";
pub const ACTION_REFRESH_FILES: &str = "refresh-files";
pub const ACTION_SELECT_FILE: &str = "select-file";
pub const ACTION_RIGHT_TAB: &str = "right-tab";
pub const ACTION_SELECT_AGENT: &str = "select-agent";
pub const ACTION_TOGGLE_PERMISSION: &str = "toggle-permission";
pub const ACTION_LOAD_RUN: &str = "load-run";
pub const ACTION_WATCH_TRACE: &str = "watch-trace";
pub const ACTION_STOP_WATCHING: &str = "stop-watching";
pub const ACTION_TOGGLE_MAPS_RAW: &str = "toggle-maps-raw";
