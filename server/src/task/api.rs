use crate::task::{Task, TaskData, TaskService, TaskServiceError, TaskState, TaskStatus};
use crate::web::api::ServerErrorResponse;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// JSON representation of a Task for API responses.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson {
    /// Unique identifier for the task
    id: i64,
    /// Short title of the task
    title: String,
    /// Free-form description, if any
    description: Option<String>,
    /// Due date in yyyy-MM-dd format, if any
    due_date: Option<NaiveDate>,
    /// Whether the task is completed
    completed: bool,
    /// Status of the task
    status: TaskStatus,
}

impl From<Task> for TaskJson {
    fn from(task: Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_string(),
            description: task.description().map(str::to_string),
            due_date: task.due_date(),
            completed: task.completed(),
            status: task.status(),
        }
    }
}

/// JSON request payload for creating a task. Carries no ID; creation always
/// inserts and the storage layer assigns the ID.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Short title of the task
    title: String,
    /// Free-form description
    description: Option<String>,
    /// Due date in yyyy-MM-dd format
    due_date: Option<NaiveDate>,
    /// Completion flag, defaults to false when omitted
    completed: Option<bool>,
    /// Status, defaults to UNSTARTED when omitted
    status: Option<TaskStatus>,
}

/// JSON request payload for replacing the mutable fields of a task. Omitted
/// fields become null (description, due date) or their defaults (completed,
/// status); this is a wholesale replace, not a merge.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// Short title of the task
    title: String,
    /// Free-form description
    description: Option<String>,
    /// Due date in yyyy-MM-dd format
    due_date: Option<NaiveDate>,
    /// Completion flag
    #[serde(default)]
    completed: bool,
    /// Status of the task
    #[serde(default)]
    status: TaskStatus,
}

impl From<UpdateTaskRequest> for TaskData {
    fn from(request: UpdateTaskRequest) -> Self {
        TaskData {
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            completed: request.completed,
            status: request.status,
        }
    }
}

/// Custom error type for task handler operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskApiError {
    /// Represents an absent task; a normal outcome mapped to 404.
    #[error("Task with ID {0} not found")]
    NotFound(i64),
    /// Represents a task service failure.
    #[error("Task service error")]
    Service(#[from] TaskServiceError),
}

impl IntoResponse for TaskApiError {
    fn into_response(self) -> Response {
        match self {
            TaskApiError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
            TaskApiError::Service(err) => {
                tracing::error!("Task service failure: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ServerErrorResponse::new(
                        "Failed to process the request".to_string(),
                    )),
                )
                    .into_response()
            }
        }
    }
}

/// Handler for GET /api/tasks - Returns all tasks in JSON format.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks",
    responses(
        (status = 200, description = "Successfully retrieved tasks", body = Vec<TaskJson>),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_handler(
    State(state): State<Arc<TaskState>>,
) -> Result<Json<Vec<TaskJson>>, TaskApiError> {
    let service = TaskService::new(&state.db);
    let tasks = service.get_all_tasks().await?;
    Ok(Json(tasks.into_iter().map(TaskJson::from).collect()))
}

/// Handler for GET /api/tasks/{id} - Returns a single task or 404.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks/{id}",
    params(
        ("id" = i64, Path, description = "ID of the task to retrieve")
    ),
    responses(
        (status = 200, description = "Task found", body = TaskJson),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_task_by_id_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<i64>,
) -> Result<Json<TaskJson>, TaskApiError> {
    let service = TaskService::new(&state.db);
    let task = service
        .get_task_by_id(id)
        .await?
        .ok_or(TaskApiError::NotFound(id))?;
    Ok(Json(TaskJson::from(task)))
}

/// Handler for GET /api/tasks/dueDate/{due_date} - Returns the tasks due on
/// the given date, or 204 with no body when none match.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/tasks/dueDate/{due_date}",
    params(
        ("due_date" = String, Path, description = "Due date to filter tasks (format: yyyy-MM-dd)")
    ),
    responses(
        (status = 200, description = "Tasks found", body = Vec<TaskJson>),
        (status = 204, description = "No tasks due on the given date"),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn get_tasks_by_due_date_handler(
    State(state): State<Arc<TaskState>>,
    Path(due_date): Path<NaiveDate>,
) -> Result<Response, TaskApiError> {
    let service = TaskService::new(&state.db);
    let tasks = service.get_tasks_by_due_date(due_date).await?;
    if tasks.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    let json_tasks: Vec<TaskJson> = tasks.into_iter().map(TaskJson::from).collect();
    Ok(Json(json_tasks).into_response())
}

/// Handler for POST /api/tasks - Creates a new task. Creation defaults
/// (completed=false, status=UNSTARTED) are applied here before the service
/// is invoked.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    post,
    path = "/api/tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 200, description = "Task created successfully", body = TaskJson),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn create_task_handler(
    State(state): State<Arc<TaskState>>,
    Json(payload): Json<CreateTaskRequest>,
) -> Result<Json<TaskJson>, TaskApiError> {
    let service = TaskService::new(&state.db);
    let data = TaskData {
        title: payload.title,
        description: payload.description,
        due_date: payload.due_date,
        completed: payload.completed.unwrap_or(false),
        status: payload.status.unwrap_or_default(),
    };
    let created_task = service.save_task(data).await?;
    Ok(Json(TaskJson::from(created_task)))
}

/// Handler for PUT /api/tasks/{id} - Replaces the mutable fields of an
/// existing task, or returns 404 without creating anything.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    put,
    path = "/api/tasks/{id}",
    params(
        ("id" = i64, Path, description = "ID of the task to update")
    ),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated successfully", body = TaskJson),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn update_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateTaskRequest>,
) -> Result<Json<TaskJson>, TaskApiError> {
    let service = TaskService::new(&state.db);
    let updated_task = service
        .update_task(id, TaskData::from(payload))
        .await?
        .ok_or(TaskApiError::NotFound(id))?;
    Ok(Json(TaskJson::from(updated_task)))
}

/// Handler for DELETE /api/tasks/{id} - Removes a task, or returns 404 when
/// no task with the given ID exists.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    delete,
    path = "/api/tasks/{id}",
    params(
        ("id" = i64, Path, description = "ID of the task to delete")
    ),
    responses(
        (status = 204, description = "Task deleted successfully"),
        (status = 404, description = "Task not found"),
        (status = 500, description = "Internal server error", body = ServerErrorResponse)
    ),
    tag = "Tasks"
)]
pub async fn delete_task_handler(
    State(state): State<Arc<TaskState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, TaskApiError> {
    let service = TaskService::new(&state.db);
    if service.delete_task(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(TaskApiError::NotFound(id))
    }
}

/// Creates and returns the tasks API router.
pub fn create_tasks_router(state: Arc<TaskState>) -> Router {
    Router::new()
        .route("/tasks", get(get_tasks_handler).post(create_task_handler))
        .route("/tasks/dueDate/{due_date}", get(get_tasks_by_due_date_handler))
        .route(
            "/tasks/{id}",
            get(get_task_by_id_handler)
                .put(update_task_handler)
                .delete(delete_task_handler),
        )
        .with_state(state)
}
