use serde::Deserialize;

use crate::views::JokeFieldErrors;

pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct Pagination {
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}
fn default_limit() -> i64 {
    20
}

impl Pagination {
    pub fn clamped(&self) -> (i64, i64) {
        (self.limit.clamp(1, MAX_LIMIT), self.offset.max(0))
    }
}

/// Body of `POST /jokes/new`.
#[derive(Debug, Default, Deserialize)]
pub struct NewJokeForm {
    pub name: Option<String>,
    pub content: Option<String>,
}

/// Body of `POST /jokes/:id`.
#[derive(Debug, Default, Deserialize)]
pub struct JokeActionForm {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

pub fn validate_joke_name(name: &str) -> Option<String> {
    if name.chars().count() < 2 {
        return Some("That joke's name is too short".into());
    }
    None
}

pub fn validate_joke_content(content: &str) -> Option<String> {
    if content.chars().count() < 10 {
        return Some("That joke is too short".into());
    }
    None
}

pub fn validate_joke(name: &str, content: &str) -> JokeFieldErrors {
    JokeFieldErrors {
        name: validate_joke_name(name),
        content: validate_joke_content(content),
    }
}
