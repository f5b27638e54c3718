//! Backend origin configuration and URL building.

use std::cell::RefCell;

use serde::Deserialize;
use url::Url;

use crate::constants::DEFAULT_BACKEND_URL;

/// API route configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    base_url: Url,
}

impl Default for ApiConfig {
    /// Points at the local development backend.  Used by tests and whenever
    /// neither the build-time `BACKEND_URL` nor a runtime override is present.
    fn default() -> Self {
        Self::from_url(DEFAULT_BACKEND_URL)
    }
}

/// Shape accepted by `init_api_config_js()`.
#[derive(Debug, Deserialize)]
pub struct RuntimeConfig {
    pub backend_url: Option<String>,
}

impl ApiConfig {
    /// Build from the `BACKEND_URL` environment variable captured at compile
    /// time, falling back to the local default.
    pub fn from_env() -> Self {
        match option_env!("BACKEND_URL") {
            Some(url) if !url.trim().is_empty() => Self::from_url(url),
            _ => Self::default(),
        }
    }

    /// Create a new ApiConfig from a URL string.  Unparseable input falls
    /// back to the default origin.
    pub fn from_url(url: &str) -> Self {
        let trimmed = url.trim().trim_end_matches('/');
        let base_url = Url::parse(trimmed)
            .or_else(|_| Url::parse(DEFAULT_BACKEND_URL))
            .unwrap_or_else(|_| unreachable!("default backend URL is valid"));
        Self { base_url }
    }

    /// Get the base URL for all API calls (no trailing slash).
    pub fn base_url(&self) -> String {
        self.base_url.as_str().trim_end_matches('/').to_string()
    }

    /// Absolute URL for the given path segments (each percent-encoded) and
    /// query pairs.
    pub fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> String {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        url.to_string()
    }

    /// `/api/...` endpoint helper.
    pub fn api(&self, segments: &[&str], query: &[(&str, &str)]) -> String {
        let mut full = Vec::with_capacity(segments.len() + 1);
        full.push("api");
        full.extend_from_slice(segments);
        self.endpoint(&full, query)
    }

    /// Live preview for a project, served by the backend.
    pub fn preview_url(&self, project_id: &str) -> String {
        self.endpoint(&["preview", project_id, "preview", ""], &[])
    }
}

thread_local! {
    static API_CONFIG: RefCell<Option<ApiConfig>> = const { RefCell::new(None) };
}

/// Store the configuration used by every subsequent request.
pub fn init_api_config(config: ApiConfig) {
    API_CONFIG.with(|cell| *cell.borrow_mut() = Some(config));
}

/// The active configuration, initialising from the environment on first use.
pub fn api_config() -> ApiConfig {
    API_CONFIG.with(|cell| {
        cell.borrow_mut().get_or_insert_with(ApiConfig::from_env).clone()
    })
}
