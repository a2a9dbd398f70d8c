use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Joke, JokeListItem, NewJoke, Store, StoreError, StoreResult, User};

#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        let res = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at, updated_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await;

        match res {
            Ok(user) => Ok(user),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(StoreError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn list_jokes(&self, limit: i64, offset: i64) -> StoreResult<Vec<JokeListItem>> {
        let rows = sqlx::query_as::<_, JokeListItem>(
            r#"
            SELECT id, name
            FROM jokes
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn find_joke(&self, id: Uuid) -> StoreResult<Option<Joke>> {
        let joke = sqlx::query_as::<_, Joke>(
            r#"
            SELECT id, jokester_id, name, content, created_at, updated_at
            FROM jokes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;
        Ok(joke)
    }

    async fn create_joke(&self, joke: NewJoke) -> StoreResult<Joke> {
        let joke = sqlx::query_as::<_, Joke>(
            r#"
            INSERT INTO jokes (jokester_id, name, content)
            VALUES ($1, $2, $3)
            RETURNING id, jokester_id, name, content, created_at, updated_at
            "#,
        )
        .bind(joke.jokester_id)
        .bind(joke.name)
        .bind(joke.content)
        .fetch_one(&self.db)
        .await?;
        Ok(joke)
    }

    async fn delete_joke(&self, id: Uuid) -> StoreResult<bool> {
        let res = sqlx::query(r#"DELETE FROM jokes WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}
