use sqlx::PgPool;

/// Full bootstrap test: migrate, verify seed data and core constraints.
#[sqlx::test(migrations = "./migrations")]
async fn schema_bootstrap(pool: PgPool) {
    bostarter_db::health_check(&pool).await.unwrap();

    // Lookup table seeded in state-machine order.
    let statuses: Vec<(i16, String)> =
        sqlx::query_as("SELECT id, name FROM project_statuses ORDER BY id")
            .fetch_all(&pool)
            .await
            .unwrap();
    let names: Vec<&str> = statuses.iter().map(|(_, n)| n.as_str()).collect();
    assert_eq!(names, ["draft", "open", "funded", "expired", "cancelled"]);
}

/// The schema rejects a non-positive funding goal.
#[sqlx::test(migrations = "./migrations")]
async fn goal_must_be_positive(pool: PgPool) {
    let (creator,): (i64,) = sqlx::query_as(
        "INSERT INTO users (username, display_name) VALUES ('c', 'C') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let result = sqlx::query(
        "INSERT INTO projects (creator_id, title, kind, goal_amount, deadline)
         VALUES ($1, 'p', 'software', 0, NOW() + INTERVAL '30 days')",
    )
    .bind(creator)
    .execute(&pool)
    .await;

    assert!(result.is_err(), "zero goal must violate the CHECK constraint");
}

/// Two rewards in one project cannot share a minimum amount.
#[sqlx::test(migrations = "./migrations")]
async fn reward_minimum_unique_per_project(pool: PgPool) {
    let (creator,): (i64,) = sqlx::query_as(
        "INSERT INTO users (username, display_name) VALUES ('c', 'C') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let (project,): (i64,) = sqlx::query_as(
        "INSERT INTO projects (creator_id, title, kind, goal_amount, deadline)
         VALUES ($1, 'p', 'hardware', 100, NOW() + INTERVAL '30 days')
         RETURNING id",
    )
    .bind(creator)
    .fetch_one(&pool)
    .await
    .unwrap();

    sqlx::query("INSERT INTO rewards (project_id, title, minimum_amount) VALUES ($1, 'a', 10)")
        .bind(project)
        .execute(&pool)
        .await
        .unwrap();

    let dup =
        sqlx::query("INSERT INTO rewards (project_id, title, minimum_amount) VALUES ($1, 'b', 10)")
            .bind(project)
            .execute(&pool)
            .await;
    assert!(dup.is_err(), "duplicate minimum must violate uq_rewards_project_minimum");

    // Same minimum on a different project is fine.
    let (other,): (i64,) = sqlx::query_as(
        "INSERT INTO projects (creator_id, title, kind, goal_amount, deadline)
         VALUES ($1, 'q', 'hardware', 100, NOW() + INTERVAL '30 days')
         RETURNING id",
    )
    .bind(creator)
    .fetch_one(&pool)
    .await
    .unwrap();
    sqlx::query("INSERT INTO rewards (project_id, title, minimum_amount) VALUES ($1, 'a', 10)")
        .bind(other)
        .execute(&pool)
        .await
        .unwrap();
}
