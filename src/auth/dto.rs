use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;

use crate::views::LoginFieldErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginType {
    Login,
    Register,
}

impl LoginType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "login" => Some(Self::Login),
            "register" => Some(Self::Register),
            _ => None,
        }
    }
}

/// Query string of `GET /login`.
#[derive(Debug, Default, Deserialize)]
pub struct LoginQuery {
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

/// Body of `POST /login`. Every field is optional so a malformed submission
/// can be answered with a form error instead of an extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "loginType")]
    pub login_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

pub fn validate_username(username: &str) -> Option<String> {
    lazy_static! {
        static ref USERNAME_RE: Regex = Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap();
    }
    if username.chars().count() < 3 {
        return Some("Usernames must be at least 3 characters long".into());
    }
    if !USERNAME_RE.is_match(username) {
        return Some("Usernames may only contain letters, digits, '_', '.' and '-'".into());
    }
    None
}

pub fn validate_password(password: &str) -> Option<String> {
    if password.chars().count() < 6 {
        return Some("Passwords must be at least 6 characters long".into());
    }
    None
}

pub fn validate_login(username: &str, password: &str) -> LoginFieldErrors {
    LoginFieldErrors {
        username: validate_username(username),
        password: validate_password(password),
    }
}
