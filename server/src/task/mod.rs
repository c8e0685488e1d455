use chrono::NaiveDate;
use sea_orm::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::entities::*;

pub mod api;
pub mod storage;

use storage::TaskRepository;

/// Classification of a task, independent of the boolean `completed` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Unstarted,
    InProgress,
    Finished,
}

impl TaskStatus {
    /// Returns the stored representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Unstarted => "UNSTARTED",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Finished => "FINISHED",
        }
    }

    /// Parses a stored status value. Unknown values read back as `Unstarted`.
    pub fn from_db(value: &str) -> Self {
        match value {
            "IN_PROGRESS" => TaskStatus::InProgress,
            "FINISHED" => TaskStatus::Finished,
            _ => TaskStatus::Unstarted,
        }
    }
}

#[derive(Debug, PartialEq, Clone, Eq, Hash)]
pub struct Task {
    id: i64,
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    completed: bool,
    status: TaskStatus,
}

impl Task {
    pub fn new(
        id: i64,
        title: String,
        description: Option<String>,
        due_date: Option<NaiveDate>,
        completed: bool,
        status: TaskStatus,
    ) -> Self {
        Self {
            id,
            title,
            description,
            due_date,
            completed,
            status,
        }
    }

    /// Returns the ID of the task.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the title of the task.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description of the task, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the due date of the task, if any.
    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    /// Returns whether the task is completed.
    pub fn completed(&self) -> bool {
        self.completed
    }

    /// Returns the status of the task.
    pub fn status(&self) -> TaskStatus {
        self.status
    }
}

impl From<task::Model> for Task {
    fn from(model: task::Model) -> Self {
        Task::new(
            model.id,
            model.title,
            model.description,
            model.due_date,
            model.completed,
            TaskStatus::from_db(&model.status),
        )
    }
}

/// The five mutable fields of a task, as accepted on create and update.
#[derive(Debug, Clone)]
pub struct TaskData {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub completed: bool,
    pub status: TaskStatus,
}

impl TaskData {
    fn into_active_model(self) -> task::ActiveModel {
        task::ActiveModel {
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            due_date: ActiveValue::Set(self.due_date),
            completed: ActiveValue::Set(self.completed),
            status: ActiveValue::Set(self.status.as_str().to_owned()),
            ..Default::default()
        }
    }
}

/// Error type for TaskService operations.
#[derive(Debug, thiserror::Error)]
pub enum TaskServiceError {
    /// Represents a database error.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

/// Shared state handed to the task routers.
#[derive(Clone, Debug)]
pub struct TaskState {
    pub db: Arc<sea_orm::DatabaseConnection>,
}

pub struct TaskService<'a> {
    repository: TaskRepository<'a>,
}

impl TaskService<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskService {
        TaskService {
            repository: TaskRepository::new(db),
        }
    }

    /// Retrieves all tasks from the database.
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_all_tasks(&self) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = self
            .repository
            .find_all()
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    /// Retrieves the tasks whose due date equals the given date.
    ///
    /// # Arguments
    ///
    /// * `due_date` - The date to match against, exact equality only.
    ///
    /// # Returns
    ///
    /// A `Result` containing a vector of `Task` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn get_tasks_by_due_date(
        &self,
        due_date: NaiveDate,
    ) -> Result<Vec<Task>, TaskServiceError> {
        let tasks = self
            .repository
            .find_by_due_date(due_date)
            .await?
            .into_iter()
            .map(Task::from)
            .collect();
        Ok(tasks)
    }

    /// Retrieves a task by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to retrieve.
    ///
    /// # Returns
    ///
    /// A `Result` containing `Some(Task)` if the task exists, `None` otherwise.
    /// Absence is a normal outcome, not an error.
    #[tracing::instrument(skip(self))]
    pub async fn get_task_by_id(&self, id: i64) -> Result<Option<Task>, TaskServiceError> {
        let task = self.repository.find_by_id(id).await?.map(Task::from);
        Ok(task)
    }

    /// Persists a new task. The caller is responsible for having applied
    /// creation defaults to `data` beforehand.
    ///
    /// # Arguments
    ///
    /// * `data` - The field values of the task to create.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Task` with its assigned ID.
    #[tracing::instrument(skip(self))]
    pub async fn save_task(&self, data: TaskData) -> Result<Task, TaskServiceError> {
        let created_model = self.repository.save(data.into_active_model()).await?;
        Ok(Task::from(created_model))
    }

    /// Overwrites the five mutable fields of an existing task with `new_data`
    /// and persists it. This is a full replace, not a sparse patch; the ID is
    /// preserved.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to update.
    /// * `new_data` - The replacement field values.
    ///
    /// # Returns
    ///
    /// A `Result` containing `Some(Task)` with the updated values, or `None`
    /// if no task with the given ID exists.
    #[tracing::instrument(skip(self))]
    pub async fn update_task(
        &self,
        id: i64,
        new_data: TaskData,
    ) -> Result<Option<Task>, TaskServiceError> {
        let Some(task_to_update) = self.repository.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active_model: task::ActiveModel = task_to_update.into();
        active_model.title = ActiveValue::Set(new_data.title);
        active_model.completed = ActiveValue::Set(new_data.completed);
        active_model.status = ActiveValue::Set(new_data.status.as_str().to_owned());
        active_model.due_date = ActiveValue::Set(new_data.due_date);
        active_model.description = ActiveValue::Set(new_data.description);
        let updated_model = self.repository.save(active_model).await?;

        Ok(Some(Task::from(updated_model)))
    }

    /// Deletes a task by its ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the task to delete.
    ///
    /// # Returns
    ///
    /// A `Result` containing `true` if the task existed and was deleted, or
    /// `false` if no task with the given ID exists.
    #[tracing::instrument(skip(self))]
    pub async fn delete_task(&self, id: i64) -> Result<bool, TaskServiceError> {
        if !self.repository.exists_by_id(id).await? {
            return Ok(false);
        }
        self.repository.delete_by_id(id).await?;
        Ok(true)
    }
}
