use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use uuid::Uuid;

use super::services;
use crate::{error::AppError, state::AppState, store::User};

/// Session user id, if any.
pub struct MaybeUserId(pub Option<Uuid>);

#[async_trait]
impl FromRequestParts<AppState> for MaybeUserId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        Ok(MaybeUserId(services::current_user_id(state, &parts.headers)))
    }
}

/// Session user id; without one the request is redirected to the login page
/// and returned to the current path afterwards.
pub struct RequireUserId(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for RequireUserId {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        services::require_user_id(state, &parts.headers, &path).map(RequireUserId)
    }
}

/// Loaded user row for the session, if any.
pub struct CurrentUser(pub Option<User>);

impl CurrentUser {
    pub fn username(&self) -> Option<String> {
        self.0.as_ref().map(|u| u.username.clone())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        services::current_user(state, &parts.headers).await.map(CurrentUser)
    }
}
