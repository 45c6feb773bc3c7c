//! Task API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::api::extract::JsonBody;
use crate::api::response::MessageResponse;
use crate::api::state::AppState;
use crate::error::{Result, TaskError};
use crate::storage::tasks::{NewTask, Task};

// ============================================================================
// Request DTOs
// ============================================================================

/// Create task request
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
}

impl From<CreateTaskRequest> for NewTask {
    fn from(req: CreateTaskRequest) -> Self {
        NewTask {
            title: req.title.unwrap_or_default(),
            description: req.description,
            priority: req.priority,
        }
    }
}

/// Update task request. `id` is only read on `PUT /api/tasks`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskRequest {
    pub id: Option<String>,
    pub completed: Option<Value>,
}

/// Delete task request for `DELETE /api/tasks`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteTaskRequest {
    pub id: Option<String>,
}

// ============================================================================
// Helper functions
// ============================================================================

/// `completed` must be a JSON boolean
fn completed_flag(value: Option<Value>) -> Result<bool> {
    match value {
        Some(Value::Bool(completed)) => Ok(completed),
        _ => Err(TaskError::validation("Completed must be a boolean")),
    }
}

fn deleted() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Task deleted".to_string(),
    })
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /api/tasks
/// List all tasks, newest first
pub async fn list_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>> {
    Ok(Json(state.store.list()?))
}

/// GET /api/tasks/{id}
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>> {
    Ok(Json(state.store.get(&id)?))
}

/// POST /api/tasks
/// Create a new task
pub async fn create_task(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>)> {
    let task = state.store.create(req.into())?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/tasks/{id}
/// Set the completion flag of a task
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateTaskRequest>,
) -> Result<Json<Task>> {
    let completed = completed_flag(req.completed)?;
    Ok(Json(state.store.set_completion(&id, completed)?))
}

/// PUT /api/tasks
/// Same as `PUT /api/tasks/{id}` with the id carried in the body
pub async fn update_task_by_body(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<UpdateTaskRequest>,
) -> Result<Json<Task>> {
    let completed = completed_flag(req.completed)?;
    let id = req.id.ok_or_else(TaskError::task_not_found)?;
    Ok(Json(state.store.set_completion(&id, completed)?))
}

/// DELETE /api/tasks/{id}
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.store.delete(&id)?;
    Ok(deleted())
}

/// DELETE /api/tasks
/// Same as `DELETE /api/tasks/{id}` with the id carried in the body
pub async fn delete_task_by_body(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<DeleteTaskRequest>,
) -> Result<Json<MessageResponse>> {
    let id = req.id.ok_or_else(TaskError::task_not_found)?;
    state.store.delete(&id)?;
    Ok(deleted())
}

/// PUT /api/tasks/
/// The empty id never matches a task
pub async fn update_task_without_id(
    JsonBody(req): JsonBody<UpdateTaskRequest>,
) -> Result<Json<Task>> {
    completed_flag(req.completed)?;
    Err(TaskError::task_not_found())
}

/// DELETE /api/tasks/
pub async fn delete_task_without_id() -> Result<Json<MessageResponse>> {
    Err(TaskError::task_not_found())
}
