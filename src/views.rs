//! Page templates. All interpolated values are HTML-escaped by askama.

use askama::Template;
use axum::response::Html;

use crate::{
    error::AppError,
    store::{Joke, JokeListItem},
};

pub(crate) fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    page.render()
        .map(Html)
        .map_err(|e| AppError::Unexpected(anyhow::anyhow!("template render failed: {e}")))
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub username: Option<String>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub title: String,
    pub status: u16,
    pub message: String,
    pub login_href: Option<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LoginFieldErrors {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl LoginFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub login_type: String,
    pub username: String,
    pub redirect_to: String,
    pub field_errors: LoginFieldErrors,
    pub form_error: Option<String>,
}

#[derive(Template)]
#[template(path = "jokes/list.html")]
pub struct JokesListPage {
    pub username: Option<String>,
    pub jokes: Vec<JokeListItem>,
}

#[derive(Template)]
#[template(path = "jokes/joke.html")]
pub struct JokePage {
    pub username: Option<String>,
    pub joke: Joke,
    pub is_owner: bool,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct JokeFieldErrors {
    pub name: Option<String>,
    pub content: Option<String>,
}

impl JokeFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.content.is_none()
    }
}

#[derive(Template)]
#[template(path = "jokes/new.html")]
pub struct NewJokePage {
    pub username: Option<String>,
    pub name: String,
    pub content: String,
    pub field_errors: JokeFieldErrors,
    pub form_error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_document_links_stylesheets() {
        let html = IndexPage { username: None }.render().unwrap();
        assert!(html.contains(r#"href="/styles/global.css""#));
        assert!(html.contains(r#"media="print, (min-width: 640px)""#));
        assert!(html.contains(r#"media="screen and (min-width: 1024px)""#));
        assert!(html.contains(r#"href="/login""#));
    }

    #[test]
    fn user_content_is_escaped() {
        let html = NewJokePage {
            username: Some("<b>kody</b>".into()),
            name: "<script>alert(1)</script>".into(),
            content: String::new(),
            field_errors: JokeFieldErrors::default(),
            form_error: None,
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(!html.contains("<b>kody</b>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn error_page_shows_login_link_when_given() {
        let html = ErrorPage {
            title: "Unauthorized".into(),
            status: 401,
            message: "You must be logged in to create a joke.".into(),
            login_href: Some("/login?redirectTo=%2Fjokes%2Fnew".into()),
        }
        .render()
        .unwrap();
        assert!(html.contains("You must be logged in to create a joke."));
        assert!(html.contains("redirectTo=%2Fjokes%2Fnew"));
    }
}
