use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
mod memory;
mod models;
mod postgres;

#[cfg(test)]
pub use memory::MemoryStore;
pub use models::{Joke, JokeListItem, NewJoke, User};
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("username {0:?} is already taken")]
    DuplicateUsername(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for users and jokes.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User>;
    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    /// Newest first.
    async fn list_jokes(&self, limit: i64, offset: i64) -> StoreResult<Vec<JokeListItem>>;
    async fn find_joke(&self, id: Uuid) -> StoreResult<Option<Joke>>;
    async fn create_joke(&self, joke: NewJoke) -> StoreResult<Joke>;
    /// Returns `false` when nothing was deleted.
    async fn delete_joke(&self, id: Uuid) -> StoreResult<bool>;
}
