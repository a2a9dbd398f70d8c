use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Joke, JokeListItem, NewJoke, Store, StoreError, StoreResult, User};

/// Process-local store, enforcing the same unique username constraint as
/// the database schema.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    jokes: RwLock<Vec<Joke>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn joke_count(&self) -> usize {
        self.jokes.read().await.len()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> StoreResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == username) {
            return Err(StoreError::DuplicateUsername(username.to_string()));
        }
        let now = OffsetDateTime::now_utc();
        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_jokes(&self, limit: i64, offset: i64) -> StoreResult<Vec<JokeListItem>> {
        let jokes = self.jokes.read().await;
        // insertion order doubles as creation order
        Ok(jokes
            .iter()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .map(|j| JokeListItem {
                id: j.id,
                name: j.name.clone(),
            })
            .collect())
    }

    async fn find_joke(&self, id: Uuid) -> StoreResult<Option<Joke>> {
        let jokes = self.jokes.read().await;
        Ok(jokes.iter().find(|j| j.id == id).cloned())
    }

    async fn create_joke(&self, joke: NewJoke) -> StoreResult<Joke> {
        let users = self.users.read().await;
        if !users.iter().any(|u| u.id == joke.jokester_id) {
            return Err(StoreError::Database(sqlx::Error::RowNotFound));
        }
        let now = OffsetDateTime::now_utc();
        let joke = Joke {
            id: Uuid::new_v4(),
            jokester_id: joke.jokester_id,
            name: joke.name,
            content: joke.content,
            created_at: now,
            updated_at: now,
        };
        self.jokes.write().await.push(joke.clone());
        Ok(joke)
    }

    async fn delete_joke(&self, id: Uuid) -> StoreResult<bool> {
        let mut jokes = self.jokes.write().await;
        let before = jokes.len();
        jokes.retain(|j| j.id != id);
        Ok(jokes.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let store = MemoryStore::new();
        store.create_user("kody", "hash").await.expect("first insert");
        let err = store.create_user("kody", "other").await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateUsername(name) if name == "kody"));
    }

    #[tokio::test]
    async fn jokes_are_listed_newest_first() {
        let store = MemoryStore::new();
        let user = store.create_user("kody", "hash").await.unwrap();
        for name in ["first", "second", "third"] {
            store
                .create_joke(NewJoke {
                    jokester_id: user.id,
                    name: name.into(),
                    content: "some joke content".into(),
                })
                .await
                .unwrap();
        }

        let names: Vec<_> = store
            .list_jokes(2, 0)
            .await
            .unwrap()
            .into_iter()
            .map(|j| j.name)
            .collect();
        assert_eq!(names, vec!["third", "second"]);

        let rest = store.list_jokes(20, 2).await.unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].name, "first");
    }

    #[tokio::test]
    async fn joke_requires_existing_jokester() {
        let store = MemoryStore::new();
        let res = store
            .create_joke(NewJoke {
                jokester_id: Uuid::new_v4(),
                name: "Orphan".into(),
                content: "nobody told this one".into(),
            })
            .await;
        assert!(res.is_err());
        assert_eq!(store.joke_count().await, 0);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let store = MemoryStore::new();
        let user = store.create_user("kody", "hash").await.unwrap();
        let joke = store
            .create_joke(NewJoke {
                jokester_id: user.id,
                name: "Road".into(),
                content: "to get to the other side".into(),
            })
            .await
            .unwrap();

        assert!(store.delete_joke(joke.id).await.unwrap());
        assert!(!store.delete_joke(joke.id).await.unwrap());
        assert!(store.find_joke(joke.id).await.unwrap().is_none());
    }
}
