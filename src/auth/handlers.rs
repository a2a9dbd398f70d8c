use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tracing::{error, instrument};

use crate::{
    auth::{
        dto::{validate_login, LoginForm, LoginQuery, LoginType},
        services::{self, safe_redirect, RegisterError},
    },
    error::{found, AppError},
    extract::{Form, Query},
    state::AppState,
    views::{render, LoginFieldErrors, LoginPage},
};

const FORM_NOT_SUBMITTED: &str = "Form not submitted correctly.";

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login_action))
        .route("/logout", get(logout_page).post(logout_action))
}

#[instrument(skip_all)]
pub async fn login_page(Query(q): Query<LoginQuery>) -> Result<Response, AppError> {
    let page = LoginPage {
        login_type: "login".into(),
        username: String::new(),
        redirect_to: safe_redirect(q.redirect_to.as_deref()).to_string(),
        field_errors: LoginFieldErrors::default(),
        form_error: None,
    };
    Ok(render(&page)?.into_response())
}

#[instrument(skip(state, form))]
pub async fn login_action(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let redirect_to = safe_redirect(form.redirect_to.as_deref()).to_string();

    let (Some(raw_type), Some(username), Some(password)) =
        (form.login_type, form.username, form.password)
    else {
        return rejected(LoginPage {
            login_type: "login".into(),
            username: String::new(),
            redirect_to,
            field_errors: LoginFieldErrors::default(),
            form_error: Some(FORM_NOT_SUBMITTED.into()),
        });
    };

    let mut page = LoginPage {
        login_type: raw_type.clone(),
        username: username.clone(),
        redirect_to: redirect_to.clone(),
        field_errors: LoginFieldErrors::default(),
        form_error: None,
    };

    let Some(login_type) = LoginType::parse(&raw_type) else {
        page.form_error = Some("Login type invalid".into());
        return rejected(page);
    };

    let field_errors = validate_login(&username, &password);
    if !field_errors.is_empty() {
        page.field_errors = field_errors;
        return rejected(page);
    }

    let user = match login_type {
        LoginType::Login => match services::login(&state, &username, &password).await? {
            Some(user) => user,
            None => {
                page.form_error = Some("Username/Password combination is incorrect".into());
                return rejected(page);
            }
        },
        LoginType::Register => match services::register(&state, &username, &password).await {
            Ok(user) => user,
            Err(RegisterError::UsernameTaken(name)) => {
                page.form_error = Some(format!("User with username {name} already exists"));
                return rejected(page);
            }
            Err(RegisterError::Other(e)) => {
                error!(error = %e, "register failed");
                return Err(AppError::Unexpected(e));
            }
        },
    };

    services::create_user_session(&state, user.id, &redirect_to)
}

#[instrument(skip_all)]
pub async fn logout_action(State(state): State<AppState>, headers: HeaderMap) -> Response {
    services::logout(&state, &headers)
}

pub async fn logout_page() -> Response {
    found("/", None)
}

fn rejected(page: LoginPage) -> Result<Response, AppError> {
    Ok((StatusCode::BAD_REQUEST, render(&page)?).into_response())
}
