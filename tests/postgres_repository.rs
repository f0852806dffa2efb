//! `PostgreSQL` repository tests.
//!
//! These need a running database and are ignored by default:
//!
//! ```text
//! DATABASE_URL=postgres://localhost/taskdesk_test cargo test -- --ignored
//! ```
//!
//! `#[sqlx::test]` creates a fresh database per test and applies `migrations/`.

use sqlx::PgPool;

use taskdesk::domain::{OwnerId, Task, TaskChanges, TaskFilter, TaskId, Timestamp};
use taskdesk::infrastructure::{OwnerScope, Pagination, PostgresTaskRepository, TaskRepository};

fn owner(name: &str) -> OwnerId {
    OwnerId::parse(name).unwrap()
}

fn scope(name: &str) -> OwnerScope {
    OwnerScope::new(owner(name))
}

fn task(name: &str, title: &str) -> Task {
    Task::new(TaskId::generate(), owner(name), title, Timestamp::now())
}

// =============================================================================
// Insert / Find
// =============================================================================

#[ignore = "requires PostgreSQL"]
#[sqlx::test(migrations = "./migrations")]
async fn test_insert_then_find_by_owner(pool: PgPool) {
    let repository = PostgresTaskRepository::new(pool);
    let task = task("alice", "Stored").with_description("Details");

    let inserted = repository.insert(&task).await.unwrap();
    let found = repository
        .find(&scope("alice"), &task.task_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(inserted.task_id, task.task_id);
    assert_eq!(found.title, "Stored");
    assert_eq!(found.description.as_deref(), Some("Details"));
    assert_eq!(found.owner, owner("alice"));
    assert!(!found.completed);
}

#[ignore = "requires PostgreSQL"]
#[sqlx::test(migrations = "./migrations")]
async fn test_find_is_scoped_to_owner(pool: PgPool) {
    let repository = PostgresTaskRepository::new(pool);
    let task = task("alice", "Private");
    repository.insert(&task).await.unwrap();

    let found = repository.find(&scope("bob"), &task.task_id).await.unwrap();

    assert!(found.is_none());
}

// =============================================================================
// List
// =============================================================================

#[ignore = "requires PostgreSQL"]
#[sqlx::test(migrations = "./migrations")]
async fn test_list_counts_all_matching_rows(pool: PgPool) {
    let repository = PostgresTaskRepository::new(pool);
    for index in 0..5 {
        let task = task("alice", &format!("Task {index}")).with_completed(index % 2 == 0);
        repository.insert(&task).await.unwrap();
    }
    repository.insert(&task("bob", "Other")).await.unwrap();

    let page = repository
        .list(&scope("alice"), TaskFilter::default(), Pagination::new(2, 0))
        .await
        .unwrap();
    let completed = repository
        .list(
            &scope("alice"),
            TaskFilter {
                completed: Some(true),
            },
            Pagination::default(),
        )
        .await
        .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.items.len(), 2);
    assert_eq!(completed.total, 3);
    assert!(completed.items.iter().all(|task| task.completed));
    assert!(
        page.items
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at)
    );
}

// =============================================================================
// Update / Delete
// =============================================================================

#[ignore = "requires PostgreSQL"]
#[sqlx::test(migrations = "./migrations")]
async fn test_update_applies_changes_and_advances_timestamp(pool: PgPool) {
    let repository = PostgresTaskRepository::new(pool);
    let task = task("alice", "Before").with_description("Remove me");
    let inserted = repository.insert(&task).await.unwrap();

    let changes = TaskChanges {
        title: Some("After".to_string()),
        description: Some(None),
        completed: Some(true),
    };
    let updated = repository
        .update(&scope("alice"), &task.task_id, changes, inserted.updated_at)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "After");
    assert_eq!(updated.description, None);
    assert!(updated.completed);
    assert!(updated.updated_at > inserted.updated_at);
}

#[ignore = "requires PostgreSQL"]
#[sqlx::test(migrations = "./migrations")]
async fn test_foreign_update_and_delete_do_nothing(pool: PgPool) {
    let repository = PostgresTaskRepository::new(pool);
    let task = task("alice", "Mine");
    repository.insert(&task).await.unwrap();

    let updated = repository
        .update(
            &scope("bob"),
            &task.task_id,
            TaskChanges {
                completed: Some(true),
                ..TaskChanges::default()
            },
            Timestamp::now(),
        )
        .await
        .unwrap();
    let deleted = repository.delete(&scope("bob"), &task.task_id).await.unwrap();

    assert!(updated.is_none());
    assert!(!deleted);
    assert!(
        repository
            .delete(&scope("alice"), &task.task_id)
            .await
            .unwrap()
    );
}
