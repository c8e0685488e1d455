use chrono::NaiveDate;
use sea_orm::*;

use crate::entities::*;

/// Keyed storage for task records with two lookup paths: by ID and by exact
/// due date. Inserts assign the ID; saves with an ID present overwrite.
pub struct TaskRepository<'a> {
    db: &'a sea_orm::DatabaseConnection,
}

impl TaskRepository<'_> {
    pub fn new(db: &sea_orm::DatabaseConnection) -> TaskRepository {
        TaskRepository { db }
    }

    /// Returns all task records. Order is not guaranteed.
    pub async fn find_all(&self) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find().all(self.db).await
    }

    /// Returns the task record with the given ID, if one exists.
    pub async fn find_by_id(&self, id: i64) -> Result<Option<task::Model>, DbErr> {
        task::Entity::find_by_id(id).one(self.db).await
    }

    /// Returns the task records whose due date exactly equals `due_date`.
    pub async fn find_by_due_date(&self, due_date: NaiveDate) -> Result<Vec<task::Model>, DbErr> {
        task::Entity::find()
            .filter(task::Column::DueDate.eq(due_date))
            .all(self.db)
            .await
    }

    /// Persists `task`: inserts when the primary key is unset, overwrites the
    /// existing record otherwise. Returns the persisted record.
    pub async fn save(&self, task: task::ActiveModel) -> Result<task::Model, DbErr> {
        task.save(self.db).await?.try_into_model()
    }

    /// Returns whether a task record with the given ID exists.
    pub async fn exists_by_id(&self, id: i64) -> Result<bool, DbErr> {
        let existing = task::Entity::find_by_id(id).one(self.db).await?;
        Ok(existing.is_some())
    }

    /// Removes the task record with the given ID. Callers check existence
    /// first; deleting an absent ID is not reported here.
    pub async fn delete_by_id(&self, id: i64) -> Result<(), DbErr> {
        task::Entity::delete_by_id(id).exec(self.db).await?;
        Ok(())
    }
}
