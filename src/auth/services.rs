use axum::{
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::{
    auth::password::{hash_password, verify_password},
    error::{found, AppError},
    session::Session,
    state::AppState,
    store::{StoreError, User},
};

#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    #[error("username {0:?} is already taken")]
    UsernameTaken(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Hashes the password and inserts the user. Uniqueness is left to the
/// store's constraint, so a second registration of a name always fails.
pub async fn register(state: &AppState, username: &str, password: &str) -> Result<User, RegisterError> {
    let hash = hash_password(password)?;
    match state.store.create_user(username, &hash).await {
        Ok(user) => {
            info!(user_id = %user.id, username = %user.username, "user registered");
            Ok(user)
        }
        Err(StoreError::DuplicateUsername(name)) => {
            warn!(username = %name, "username already registered");
            Err(RegisterError::UsernameTaken(name))
        }
        Err(e) => Err(RegisterError::Other(e.into())),
    }
}

/// `None` for an unknown username or a wrong password.
pub async fn login(state: &AppState, username: &str, password: &str) -> anyhow::Result<Option<User>> {
    let Some(user) = state.store.find_user_by_username(username).await? else {
        warn!(%username, "login unknown username");
        return Ok(None);
    };
    if !verify_password(password, &user.password_hash)? {
        warn!(%username, user_id = %user.id, "login invalid password");
        return Ok(None);
    }
    info!(user_id = %user.id, %username, "user logged in");
    Ok(Some(user))
}

pub fn current_user_id(state: &AppState, headers: &HeaderMap) -> Option<Uuid> {
    state.session.get_session(headers).get_user_id()
}

/// Like [`current_user_id`], but a missing user becomes a redirect to the
/// login page that will send them back to `redirect_to`.
pub fn require_user_id(state: &AppState, headers: &HeaderMap, redirect_to: &str) -> Result<Uuid, AppError> {
    match current_user_id(state, headers) {
        Some(id) => Ok(id),
        None => {
            debug!(%redirect_to, "login required");
            Err(AppError::redirect(login_url(redirect_to)))
        }
    }
}

/// Loads the signed-in user. A failing lookup logs the user out instead of
/// surfacing the error.
pub async fn current_user(state: &AppState, headers: &HeaderMap) -> Result<Option<User>, AppError> {
    let Some(user_id) = current_user_id(state, headers) else {
        return Ok(None);
    };
    match state.store.find_user_by_id(user_id).await {
        Ok(user) => Ok(user),
        Err(e) => {
            error!(error = %e, %user_id, "current user lookup failed; logging out");
            Err(logout_redirect(state, headers))
        }
    }
}

pub fn create_user_session(state: &AppState, user_id: Uuid, redirect_to: &str) -> Result<Response, AppError> {
    let mut session = Session::new();
    session.set_user_id(user_id);
    let set_cookie = state.session.commit(&session)?;
    Ok(found(redirect_to, Some(&set_cookie)))
}

pub fn logout(state: &AppState, headers: &HeaderMap) -> Response {
    logout_redirect(state, headers).into_response()
}

fn logout_redirect(state: &AppState, headers: &HeaderMap) -> AppError {
    let session = state.session.get_session(headers);
    AppError::Redirect {
        location: "/login".into(),
        set_cookie: Some(state.session.destroy(session)),
    }
}

pub fn login_url(redirect_to: &str) -> String {
    let query = serde_urlencoded::to_string(&[("redirectTo", redirect_to)]).unwrap_or_default();
    format!("/login?{query}")
}

/// Only same-site paths are followed after login.
pub fn safe_redirect(to: Option<&str>) -> &str {
    match to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.contains('\\')
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/jokes",
    }
}
