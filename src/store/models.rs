use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// User record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String, // Argon2 or legacy bcrypt, never rendered
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Joke record in the database.
#[derive(Debug, Clone, FromRow)]
pub struct Joke {
    pub id: Uuid,
    pub jokester_id: Uuid,
    pub name: String,
    pub content: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Row shape for the joke sidebar/list.
#[derive(Debug, Clone, FromRow)]
pub struct JokeListItem {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NewJoke {
    pub jokester_id: Uuid,
    pub name: String,
    pub content: String,
}
