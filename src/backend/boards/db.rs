/**
 * Board Model and Database Operations
 *
 * A board is a titled container owned by exactly one user. Each board
 * gets a generated code on creation; rows are removed with their owner
 * (cascade delete on the foreign key).
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// A board owned by a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    /// Unique board ID
    pub id: i64,
    /// Generated share code
    pub code: String,
    /// Board title
    pub title: String,
    /// Free-form board content
    pub content: Option<String>,
    /// Owning user
    pub user_id: i64,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

/// Create a board for a user, generating its code
pub async fn create_board(
    pool: &PgPool,
    user_id: i64,
    title: &str,
    content: Option<&str>,
) -> Result<Board, sqlx::Error> {
    let code = Uuid::new_v4().to_string();
    let now = Utc::now();

    sqlx::query_as::<_, Board>(
        r#"
        INSERT INTO boards (code, title, content, user_id, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, code, title, content, user_id, created_at
        "#,
    )
    .bind(&code)
    .bind(title)
    .bind(content)
    .bind(user_id)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Boards owned by a user
pub async fn find_by_user(pool: &PgPool, user_id: i64) -> Result<Vec<Board>, sqlx::Error> {
    sqlx::query_as::<_, Board>(
        r#"
        SELECT id, code, title, content, user_id, created_at
        FROM boards
        WHERE user_id = $1
        ORDER BY id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}
