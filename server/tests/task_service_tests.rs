use chrono::NaiveDate;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection};
use todoapp_server::entities::task;
use todoapp_server::task::{Task, TaskData, TaskService, TaskStatus};

mod common;

use common::setup;

fn due_date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
}

/// Test helper to insert a task record directly using the entity ActiveModel.
async fn insert_task(
    db: &DatabaseConnection,
    title: &str,
    description: Option<&str>,
    date: Option<NaiveDate>,
    completed: bool,
    status: &str,
) -> task::Model {
    let active_model = task::ActiveModel {
        title: ActiveValue::Set(title.to_string()),
        description: ActiveValue::Set(description.map(str::to_string)),
        due_date: ActiveValue::Set(date),
        completed: ActiveValue::Set(completed),
        status: ActiveValue::Set(status.to_string()),
        ..Default::default()
    };
    active_model.insert(db).await.expect("Failed to insert task")
}

#[tokio::test]
async fn can_save_task() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let created_task = task_service
        .save_task(TaskData {
            title: "Water the plants".to_string(),
            description: Some("Only the ones on the balcony".to_string()),
            due_date: Some(due_date(2025, 4, 24)),
            completed: false,
            status: TaskStatus::Unstarted,
        })
        .await
        .expect("Failed to save task");

    let expected_task = Task::new(
        created_task.id(), // The ID is generated, so we use the created task's ID
        "Water the plants".to_string(),
        Some("Only the ones on the balcony".to_string()),
        Some(due_date(2025, 4, 24)),
        false,
        TaskStatus::Unstarted,
    );
    assert_eq!(created_task, expected_task);
}

#[tokio::test]
async fn can_get_task_by_id() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let inserted = insert_task(&state.db, "Read a chapter", None, None, false, "UNSTARTED").await;

    let found = task_service
        .get_task_by_id(inserted.id)
        .await
        .expect("Failed to get task by id");

    assert_eq!(found, Some(Task::from(inserted)));
}

#[tokio::test]
async fn get_task_by_id_returns_none_when_absent() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let inserted = insert_task(&state.db, "Some task", None, None, false, "UNSTARTED").await;

    let found = task_service
        .get_task_by_id(inserted.id + 1)
        .await
        .expect("Lookup of an absent id should not be an error");

    assert_eq!(found, None);
}

#[tokio::test]
async fn can_get_all_tasks() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let first = insert_task(&state.db, "First task", None, None, false, "UNSTARTED").await;
    let second = insert_task(&state.db, "Second task", None, None, true, "FINISHED").await;

    let tasks = task_service
        .get_all_tasks()
        .await
        .expect("Failed to get all tasks");

    assert_eq!(tasks.len(), 2);
    assert!(tasks.contains(&Task::from(first)));
    assert!(tasks.contains(&Task::from(second)));
}

#[tokio::test]
async fn can_handle_empty_task_list() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let tasks = task_service
        .get_all_tasks()
        .await
        .expect("Failed to get all tasks");

    assert!(tasks.is_empty());
}

#[tokio::test]
async fn can_get_tasks_by_due_date() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let date = due_date(2025, 4, 24);
    let other_date = due_date(2025, 5, 1);
    let matching1 =
        insert_task(&state.db, "Buy milk", None, Some(date), false, "UNSTARTED").await;
    let matching2 =
        insert_task(&state.db, "Buy bread", None, Some(date), false, "IN_PROGRESS").await;
    insert_task(&state.db, "Pay rent", None, Some(other_date), false, "UNSTARTED").await;
    insert_task(&state.db, "No due date", None, None, false, "UNSTARTED").await;

    let tasks = task_service
        .get_tasks_by_due_date(date)
        .await
        .expect("Failed to get tasks by due date");

    assert_eq!(tasks.len(), 2);
    assert!(tasks.contains(&Task::from(matching1)));
    assert!(tasks.contains(&Task::from(matching2)));
}

#[tokio::test]
async fn get_tasks_by_due_date_returns_empty_when_no_match() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    insert_task(
        &state.db,
        "Pay rent",
        None,
        Some(due_date(2025, 5, 1)),
        false,
        "UNSTARTED",
    )
    .await;

    let tasks = task_service
        .get_tasks_by_due_date(due_date(2030, 1, 1))
        .await
        .expect("Failed to get tasks by due date");

    assert!(tasks.is_empty());
}

#[tokio::test]
async fn can_update_task_replacing_all_mutable_fields() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let inserted = insert_task(
        &state.db,
        "Original title",
        Some("Original description"),
        Some(due_date(2025, 4, 24)),
        true,
        "FINISHED",
    )
    .await;

    let updated = task_service
        .update_task(
            inserted.id,
            TaskData {
                title: "New title".to_string(),
                description: None,
                due_date: None,
                completed: false,
                status: TaskStatus::Unstarted,
            },
        )
        .await
        .expect("Failed to update task");

    // Wholesale replace: fields absent from the new data are cleared, the ID
    // is preserved.
    let expected = Task::new(
        inserted.id,
        "New title".to_string(),
        None,
        None,
        false,
        TaskStatus::Unstarted,
    );
    assert_eq!(updated, Some(expected.clone()));

    let reloaded = task_service
        .get_task_by_id(inserted.id)
        .await
        .expect("Failed to reload task");
    assert_eq!(reloaded, Some(expected));
}

#[tokio::test]
async fn update_task_returns_none_when_absent() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let inserted = insert_task(&state.db, "Existing task", None, None, false, "UNSTARTED").await;

    let result = task_service
        .update_task(
            inserted.id + 1,
            TaskData {
                title: "Should not land anywhere".to_string(),
                description: None,
                due_date: None,
                completed: false,
                status: TaskStatus::Unstarted,
            },
        )
        .await
        .expect("Update of an absent id should not be an error");

    assert_eq!(result, None);

    // The existing record is untouched and nothing was created.
    let tasks = task_service
        .get_all_tasks()
        .await
        .expect("Failed to get all tasks");
    assert_eq!(tasks, vec![Task::from(inserted)]);
}

#[tokio::test]
async fn can_delete_task() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let inserted = insert_task(&state.db, "Short-lived task", None, None, false, "UNSTARTED").await;

    let deleted = task_service
        .delete_task(inserted.id)
        .await
        .expect("Failed to delete task");
    assert!(deleted);

    let found = task_service
        .get_task_by_id(inserted.id)
        .await
        .expect("Failed to look up deleted task");
    assert_eq!(found, None);
}

#[tokio::test]
async fn delete_task_returns_false_when_absent() {
    let state = setup().await.expect("Failed to setup test context");
    let task_service = TaskService::new(&state.db);

    let inserted = insert_task(&state.db, "Surviving task", None, None, false, "UNSTARTED").await;

    let deleted = task_service
        .delete_task(inserted.id + 1)
        .await
        .expect("Delete of an absent id should not be an error");
    assert!(!deleted);

    // Storage is unchanged.
    let tasks = task_service
        .get_all_tasks()
        .await
        .expect("Failed to get all tasks");
    assert_eq!(tasks, vec![Task::from(inserted)]);
}
