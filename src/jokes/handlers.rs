use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    auth::{
        extractors::{CurrentUser, MaybeUserId, RequireUserId},
        services::login_url,
    },
    error::{found, AppError},
    extract::{Form, Query},
    state::AppState,
    store::NewJoke,
    views::{render, IndexPage, JokeFieldErrors, JokePage, JokesListPage, NewJokePage},
};

use super::dto::{validate_joke, JokeActionForm, NewJokeForm, Pagination};

const NOT_FOUND: &str = "What a joke! Not found.";
const NOT_YOUR_JOKE: &str = "Pssh, nice try. That's not your joke";
const LOGIN_TO_CREATE: &str = "You must be logged in to create a joke.";
const FORM_NOT_SUBMITTED: &str = "Form not submitted correctly.";

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/jokes", get(list_jokes))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/jokes/new", get(new_joke_page).post(create_joke))
        .route("/jokes/:id", get(get_joke).post(joke_action))
}

#[instrument(skip_all)]
pub async fn index(user: CurrentUser) -> Result<Response, AppError> {
    Ok(render(&IndexPage {
        username: user.username(),
    })?
    .into_response())
}

#[instrument(skip(state, user))]
pub async fn list_jokes(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(p): Query<Pagination>,
) -> Result<Response, AppError> {
    let (limit, offset) = p.clamped();
    let jokes = state.store.list_jokes(limit, offset).await?;
    Ok(render(&JokesListPage {
        username: user.username(),
        jokes,
    })?
    .into_response())
}

#[instrument(skip(state, user))]
pub async fn get_joke(
    State(state): State<AppState>,
    user: CurrentUser,
    MaybeUserId(viewer): MaybeUserId,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    // malformed ids are as missing as unknown ones
    let Ok(id) = id.parse::<Uuid>() else {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    };
    let Some(joke) = state.store.find_joke(id).await? else {
        return Err(AppError::NotFound(NOT_FOUND.into()));
    };
    let is_owner = viewer == Some(joke.jokester_id);
    Ok(render(&JokePage {
        username: user.username(),
        joke,
        is_owner,
    })?
    .into_response())
}

#[instrument(skip_all)]
pub async fn new_joke_page(
    MaybeUserId(user_id): MaybeUserId,
    user: CurrentUser,
) -> Result<Response, AppError> {
    if user_id.is_none() {
        return Err(AppError::Unauthorized {
            message: LOGIN_TO_CREATE.into(),
            login_href: Some(login_url("/jokes/new")),
        });
    }
    Ok(render(&NewJokePage {
        username: user.username(),
        name: String::new(),
        content: String::new(),
        field_errors: JokeFieldErrors::default(),
        form_error: None,
    })?
    .into_response())
}

#[instrument(skip(state, user, form))]
pub async fn create_joke(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    user: CurrentUser,
    Form(form): Form<NewJokeForm>,
) -> Result<Response, AppError> {
    let (Some(name), Some(content)) = (form.name, form.content) else {
        return Ok(render(&NewJokePage {
            username: user.username(),
            name: String::new(),
            content: String::new(),
            field_errors: JokeFieldErrors::default(),
            form_error: Some(FORM_NOT_SUBMITTED.into()),
        })?
        .into_response());
    };

    let field_errors = validate_joke(&name, &content);
    if !field_errors.is_empty() {
        return Ok(render(&NewJokePage {
            username: user.username(),
            name,
            content,
            field_errors,
            form_error: None,
        })?
        .into_response());
    }

    let joke = state
        .store
        .create_joke(NewJoke {
            jokester_id: user_id,
            name,
            content,
        })
        .await?;
    info!(joke_id = %joke.id, %user_id, "joke created");
    Ok(found(&format!("/jokes/{}", joke.id), None))
}

#[instrument(skip(state, form))]
pub async fn joke_action(
    State(state): State<AppState>,
    RequireUserId(user_id): RequireUserId,
    Path(id): Path<String>,
    Form(form): Form<JokeActionForm>,
) -> Result<Response, AppError> {
    if form.method.as_deref() != Some("delete") {
        return Err(AppError::BadRequest(format!(
            "Invalid _method {:?}",
            form.method.unwrap_or_default()
        )));
    }

    let Ok(id) = id.parse::<Uuid>() else {
        return Err(AppError::NotFound("Can't delete what does not exist".into()));
    };
    let Some(joke) = state.store.find_joke(id).await? else {
        return Err(AppError::NotFound("Can't delete what does not exist".into()));
    };
    if joke.jokester_id != user_id {
        warn!(joke_id = %joke.id, owner = %joke.jokester_id, %user_id, "delete of someone else's joke");
        return Err(AppError::unauthorized(NOT_YOUR_JOKE));
    }

    state.store.delete_joke(joke.id).await?;
    info!(joke_id = %joke.id, %user_id, "joke deleted");
    Ok(found("/jokes", None))
}
