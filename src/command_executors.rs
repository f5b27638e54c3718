use crate::messages::{Command, Message};
use crate::models::model_ids;
use crate::network::{ApiClient, ApiError};
use crate::state::dispatch_global_message;
use crate::{debug_log, error_log, warn_log};

/// Run a network side effect.  Each command gets its own task; results come
/// back through `dispatch_global_message`.
pub fn execute_fetch_command(cmd: Command) {
    match cmd {
        Command::FetchProjects => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::list_projects().await {
                    Ok(resp) if resp.ok => {
                        dispatch_global_message(Message::ProjectsLoaded(resp.projects))
                    }
                    Ok(_) => warn_log!("Project list returned ok=false"),
                    Err(e) => warn_log!("Failed to fetch projects: {}", e),
                }
            });
        }
        Command::CreateProject => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::create_project("").await {
                    Ok(resp) => match (resp.ok, resp.project_id) {
                        (true, Some(project_id)) if !project_id.is_empty() => {
                            dispatch_global_message(Message::ProjectCreated { project_id })
                        }
                        _ => dispatch_global_message(Message::ProjectCreateFailed(
                            resp.error.unwrap_or_else(|| "no project id returned".to_string()),
                        )),
                    },
                    Err(e) => dispatch_global_message(Message::ProjectCreateFailed(e.to_string())),
                }
            });
        }
        Command::FetchModels => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::fetch_models().await {
                    Ok(value) => {
                        let models = model_ids(&value);
                        debug_log!("Fetched {} models", models.len());
                        dispatch_global_message(Message::ModelsLoaded(models));
                    }
                    Err(e) => warn_log!("Failed to fetch models: {}", e),
                }
            });
        }
        Command::FetchSystemMaps => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::fetch_system_maps().await {
                    Ok(maps) => dispatch_global_message(Message::SystemMapsLoaded(maps)),
                    Err(e) => warn_log!("Failed to fetch system maps: {}", e),
                }
            });
        }
        Command::FetchRuns { project_id } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::fetch_runs(&project_id).await {
                    Ok(resp) if resp.ok => {
                        dispatch_global_message(Message::RunsLoaded { project_id, runs: resp.runs })
                    }
                    Ok(_) => warn_log!("Runs for {} returned ok=false", project_id),
                    Err(e) => warn_log!("Failed to fetch runs: {}", e),
                }
            });
        }
        Command::FetchRun { project_id, trace_id } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::fetch_run(&project_id, &trace_id).await {
                    Ok(run) => dispatch_global_message(Message::RunLoaded {
                        project_id,
                        trace_id,
                        run: Box::new(run),
                    }),
                    Err(e) => dispatch_global_message(Message::RunLoadFailed {
                        project_id,
                        trace_id,
                        error: e.to_string(),
                    }),
                }
            });
        }
        Command::FetchPermissions { project_id } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::get_permissions(&project_id).await {
                    Ok(resp) => match (resp.ok, resp.permissions) {
                        (true, Some(permissions)) => {
                            dispatch_global_message(Message::PermissionsLoaded { project_id, permissions })
                        }
                        _ => warn_log!("Permissions for {} unavailable", project_id),
                    },
                    Err(e) => warn_log!("Failed to fetch permissions: {}", e),
                }
            });
        }
        Command::PersistPermissions { project_id, permissions } => {
            wasm_bindgen_futures::spawn_local(async move {
                // The local toggle already happened; a failed save only logs.
                if let Err(e) = ApiClient::set_permissions(&project_id, permissions).await {
                    warn_log!("Failed to save permissions for {}: {}", project_id, e);
                }
            });
        }
        Command::FetchWorkspaceFiles { project_id } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::list_workspace_files(&project_id).await {
                    Ok(resp) if resp.ok => dispatch_global_message(Message::WorkspaceFilesLoaded {
                        project_id,
                        files: resp.files,
                    }),
                    Ok(resp) => warn_log!(
                        "Workspace listing failed: {}",
                        resp.error.unwrap_or_default()
                    ),
                    Err(e) => warn_log!("Failed to list workspace files: {}", e),
                }
            });
        }
        Command::ReadWorkspaceFile { project_id, path } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::read_workspace_file(&project_id, &path).await {
                    Ok(resp) if resp.ok => {
                        let content = resp.content_text();
                        dispatch_global_message(Message::FileContentLoaded { path, content })
                    }
                    Ok(resp) => dispatch_global_message(Message::FileReadFailed {
                        path,
                        error: resp.error.unwrap_or_else(|| "Failed to read file".to_string()),
                    }),
                    Err(e) => dispatch_global_message(Message::FileReadFailed {
                        path,
                        error: e.to_string(),
                    }),
                }
            });
        }
        Command::FetchAgents { project_id, trace_id } => spawn_agents_fetch(project_id, trace_id),
        Command::Orchestrate { model, messages, project_id, permissions } => {
            wasm_bindgen_futures::spawn_local(async move {
                let result = ApiClient::orchestrate(&model, messages, &project_id, permissions)
                    .await
                    .and_then(|resp| match (resp.ok, &resp.error) {
                        (Some(false), Some(error)) => Err(ApiError::Backend(error.clone())),
                        _ => Ok(resp),
                    });
                match result {
                    Ok(resp) => dispatch_global_message(Message::OrchestrateCompleted {
                        project_id,
                        response: Box::new(resp),
                    }),
                    Err(e) => {
                        error_log!("Orchestrate failed: {}", e);
                        dispatch_global_message(Message::OrchestrateFailed(e.to_string()))
                    }
                }
            });
        }
        Command::StartWorkflow { model, goal, project_id, permissions } => {
            wasm_bindgen_futures::spawn_local(async move {
                match ApiClient::start_workflow(&model, &goal, &project_id, permissions).await {
                    Ok(resp) if resp.ok != Some(false) => {
                        dispatch_global_message(Message::WorkflowStarted {
                            project_id,
                            trace_id: resp.trace_id,
                        })
                    }
                    Ok(resp) => dispatch_global_message(Message::WorkflowStartFailed(
                        resp.error.unwrap_or_else(|| "backend refused the workflow".to_string()),
                    )),
                    Err(e) => dispatch_global_message(Message::WorkflowStartFailed(e.to_string())),
                }
            });
        }
        other => warn_log!("execute_fetch_command got a non-network command: {:?}", other),
    }
}

/// One polling tick: the agents and events fetches run independently, each
/// applied as it resolves.
pub fn poll_trace_once(project_id: &str, trace_id: &str) {
    spawn_agents_fetch(project_id.to_string(), trace_id.to_string());
    spawn_events_fetch(project_id.to_string(), trace_id.to_string());
}

fn spawn_agents_fetch(project_id: String, trace_id: String) {
    wasm_bindgen_futures::spawn_local(async move {
        match ApiClient::fetch_workflow_agents(&project_id, &trace_id).await {
            Ok(resp) => match (resp.ok, resp.agents) {
                (true, Some(agents)) => {
                    dispatch_global_message(Message::AgentsPolled { project_id, trace_id, agents })
                }
                _ => debug_log!("Agents poll for {} returned nothing", trace_id),
            },
            Err(e) => debug_log!("Agents poll failed: {}", e),
        }
    });
}

fn spawn_events_fetch(project_id: String, trace_id: String) {
    wasm_bindgen_futures::spawn_local(async move {
        match ApiClient::fetch_workflow_events(&project_id, &trace_id).await {
            Ok(resp) => match (resp.ok, resp.events_by_agent) {
                (true, Some(events_by_agent)) => dispatch_global_message(Message::EventsPolled {
                    project_id,
                    trace_id,
                    events_by_agent,
                }),
                _ => debug_log!("Events poll for {} returned nothing", trace_id),
            },
            Err(e) => debug_log!("Events poll failed: {}", e),
        }
    });
}
